//! Entry point transplant: core definition + platform override → `web/FN<Unit>.js`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{RETURN_CLASS, Transplant, TransplantKind};
use crate::domain::DomainError;
use crate::domain::anchor::{AnchorRule, extract, strip_imports};
use crate::domain::marker::SpliceDocument;

/// Scaffold factory body: everything after the component factory line.
static TARGET_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)export\s+default\s+function\s+\w+\s*\(\s*\{.*?\}\s*,?\s*\)\s*\{\s*const\s+\w+\s*=\s*\w+\s*\(\s*\{\s*ABViewComponentPlugin\s*\}\s*\)\s*;(.*)\}\s*$",
    )
    .expect("target body pattern must compile")
});

static EXPORT_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\s+").expect("export pattern must compile"));

static MODULE_EXPORTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"module\.exports\s*=\s*").expect("exports pattern must compile"));

static LABEL_HELPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"let\s+L\s*=[^;]+;").expect("label helper pattern must compile"));

static COMPONENT_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"const\s+\w*Component\w*\s*=\s*require\s*\(\s*["'][^"']*Component[^"']*["']\s*\)\s*;"#)
        .expect("component require pattern must compile")
});

static PLUGIN_BASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bABViewPlugin\b").expect("base pattern must compile"));

static WIDGET_BASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bABViewWidget\b").expect("widget pattern must compile"));

const WIDGET_PLUGIN_BASE: &str = "ABViewWidgetPlugin";

/// The runtime key accessor; the migrated view reads its key from `common()`.
const KEY_ACCESSOR: &str = "/**
       * @method getPluginKey
       * return the plugin key for this view.
       * @return {string} plugin key
       */
      static getPluginKey() {
         return this.common().key;
      }";

/// Merge the legacy core definition and platform override into the scaffold.
///
/// The result keeps the scaffold's factory signature and component factory
/// line, followed by the core definition body and the platform class. The
/// platform class receives the key accessor and the scaffold's `component()`
/// method in place of its own.
pub fn transplant_core_view(
    file: &str,
    target: &str,
    platform: &str,
    core: Option<&str>,
) -> Result<Transplant, DomainError> {
    let kind = TransplantKind::CoreView;
    if kind.is_migrated(target) {
        return Ok(Transplant::AlreadyMigrated);
    }

    let mut missing = Vec::new();

    let mut accessors = format!("{KEY_ACCESSOR}\n\n");
    match extract(target, &AnchorRule::Method("component")) {
        Some(component) => {
            accessors.push_str(component.text);
            accessors.push_str("\n\n");
        }
        None => missing.push("component accessor"),
    }

    let Some(body) = TARGET_BODY.captures(target).and_then(|c| c.get(1)) else {
        return Ok(Transplant::TargetShapeUnrecognized {
            region: "view factory body",
        });
    };

    let mut doc = SpliceDocument::new(file, target);
    doc.open(body.range(), "\n\n", "\n\n")?;

    // Core definition goes first, ahead of the still-open marker.
    match core {
        Some(core) => {
            let (imports, rest) = strip_imports(core);
            let mut core_body = rest.trim().to_string();
            if imports.contains("ABViewWidget") {
                debug!("Legacy core extends ABViewWidget, renaming base type");
                doc.rewrite(|c| PLUGIN_BASE.replace_all(c, WIDGET_PLUGIN_BASE).into_owned());
                core_body = WIDGET_BASE
                    .replace_all(&core_body, WIDGET_PLUGIN_BASE)
                    .into_owned();
            }
            let core_body = strip_exports(&core_body, "");
            doc.splice_before_marker(&core_body);
        }
        None => missing.push("core definition"),
    }

    let platform_body = rewrite_platform(platform, &accessors, &mut missing);
    doc.splice(&platform_body);

    let content = doc.finish()?;
    Ok(Transplant::Applied {
        content: kind.stamp(&content),
        missing,
    })
}

fn strip_exports(text: &str, replacement: &str) -> String {
    let text = EXPORT_DEFAULT.replace_all(text, replacement);
    MODULE_EXPORTS.replace_all(&text, replacement).into_owned()
}

/// Platform override reshaped to live inside the factory function.
fn rewrite_platform(platform: &str, accessors: &str, missing: &mut Vec<&'static str>) -> String {
    let (_, rest) = strip_imports(platform);
    let rest = LABEL_HELPER.replace_all(rest.trim(), "");
    let mut body = strip_exports(&rest, "return ");

    if let Some(own_component) = extract(&body, &AnchorRule::Method("component")) {
        body.replace_range(own_component.start..own_component.end, "");
    }
    if let Some(require) = COMPONENT_REQUIRE.find(&body) {
        body.replace_range(require.range(), "");
    }

    match RETURN_CLASS.find(&body) {
        Some(head) => body.insert_str(head.end(), &format!("\n\n{accessors}")),
        None => missing.push("platform class declaration"),
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TARGET: &str = r#"import FNFooComponent from "./FNFooComponent.js";

export default function FNFoo({
   /*AB,*/
   ABViewPlugin,
   ABViewComponentPlugin,
}) {
   const ABFooComponent = FNFooComponent({ ABViewComponentPlugin });

   const ABViewDefaults = {
      key: "ab-view-foo",
   };

   return class ABFoo extends ABViewPlugin {
      /**
       * @method component
       * return a UI component based upon this view.
       */
      component() {
         return new ABFooComponent(this);
      }
   };
}
"#;

    const CORE: &str = r#"const ABViewWidget = require("../../platform/views/ABViewWidget");

const ABViewDefaults = {
   key: "foo",
};

module.exports = class ABViewFooCore extends ABViewWidget {
   static common() {
      return ABViewDefaults;
   }
};
"#;

    const PLATFORM: &str = r#"const ABViewFooCore = require("../../core/views/ABViewFooCore");
const ABViewFooComponent = require("./viewComponent/ABViewFooComponent");

let L = (...params) => AB.Multilingual.label(...params);

module.exports = class ABViewFoo extends ABViewFooCore {
   component() {
      return new ABViewFooComponent(this);
   }

   refresh() {}
};
"#;

    fn applied(t: Transplant) -> (String, Vec<&'static str>) {
        match t {
            Transplant::Applied { content, missing } => (content, missing),
            other => panic!("expected applied, got {other:?}"),
        }
    }

    #[test]
    fn merges_core_then_platform_with_accessors() {
        let (content, missing) =
            applied(transplant_core_view("web/FNFoo.js", TARGET, PLATFORM, Some(CORE)).unwrap());
        assert!(missing.is_empty(), "{missing:?}");

        assert!(content.starts_with("// grafter:migrated core-view\n"));
        assert!(content.contains("const ABFooComponent = FNFooComponent({ ABViewComponentPlugin });"));
        // Scaffold body is gone.
        assert!(!content.contains("ab-view-foo"));

        let core_at = content.find("class ABViewFooCore extends ABViewWidgetPlugin").unwrap();
        let platform_at = content.find("return class ABViewFoo extends ABViewFooCore {").unwrap();
        assert!(core_at < platform_at);

        // Base types renamed throughout.
        assert!(content.contains("   ABViewWidgetPlugin,\n"));
        assert!(!content.contains("extends ABViewWidget {"));

        // Legacy boilerplate stripped.
        assert!(!content.contains("require("));
        assert!(!content.contains("let L ="));
        assert!(!content.contains("module.exports"));
        assert!(!content.contains("ABViewFooComponent(this)"));

        // Accessors follow the platform class head, legacy methods survive.
        let accessors_at = content.find("return this.common().key;").unwrap();
        assert!(platform_at < accessors_at);
        assert!(content.contains("return new ABFooComponent(this);"));
        assert!(content.contains("refresh() {}"));
        assert!(!content.contains(crate::domain::marker::INSERT_MARKER));
    }

    #[test]
    fn missing_core_is_reported_not_fatal() {
        let (content, missing) =
            applied(transplant_core_view("web/FNFoo.js", TARGET, PLATFORM, None).unwrap());
        assert_eq!(missing, vec!["core definition"]);
        assert!(content.contains("return class ABViewFoo extends ABViewFooCore {"));
        assert!(content.contains("   ABViewPlugin,\n"));
    }

    #[test]
    fn second_run_is_already_migrated() {
        let (content, _) =
            applied(transplant_core_view("web/FNFoo.js", TARGET, PLATFORM, Some(CORE)).unwrap());
        assert_eq!(
            transplant_core_view("web/FNFoo.js", &content, PLATFORM, Some(CORE)).unwrap(),
            Transplant::AlreadyMigrated
        );
    }

    #[test]
    fn foreign_target_is_left_alone() {
        assert_eq!(
            transplant_core_view("web/FNFoo.js", "export default {};", PLATFORM, None).unwrap(),
            Transplant::TargetShapeUnrecognized {
                region: "view factory body"
            }
        );
    }
}
