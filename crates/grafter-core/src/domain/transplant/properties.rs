//! Designer properties transplant → `properties/FN<Unit>.js`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Transplant, TransplantKind, designer_accessors, insert_before_return_class};
use crate::domain::DomainError;
use crate::domain::anchor::{AnchorRule, extract};
use crate::domain::marker::SpliceDocument;

static HEADER_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+function\s*\w*\s*\(\s*AB\s*\)\s*\{[^\n]*\n")
        .expect("properties header pattern must compile")
});

static HEADER_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+\w+\s+extends").expect("class pattern must compile"));

static BASE_VIEW_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*\bABView\b.*\n?").expect("base view pattern must compile"));

static RETURN_LEGACY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"return\s+ABView\w+\s*;").expect("legacy return pattern must compile")
});

/// Merge a legacy designer properties file into the scaffold.
///
/// The target body becomes the carried-over accessors followed by the legacy
/// class body. Declarations that preceded the legacy class are re-inserted
/// ahead of the target's returned class, minus lines that build `ABView`.
pub fn transplant_properties(file: &str, target: &str, legacy: &str) -> Result<Transplant, DomainError> {
    let kind = TransplantKind::Properties;
    if kind.is_migrated(target) {
        return Ok(Transplant::AlreadyMigrated);
    }

    let mut missing = Vec::new();
    let accessors = designer_accessors(target, &mut missing);

    let mut legacy = legacy.to_string();
    let header = match extract(
        &legacy,
        &AnchorRule::Between {
            open: &HEADER_OPEN,
            close: &HEADER_CLOSE,
        },
    ) {
        Some(region) => {
            let text = region.text.to_string();
            legacy.replace_range(region.start..region.end, "");
            BASE_VIEW_LINE.replace_all(&text, "").into_owned()
        }
        None => {
            missing.push("properties header");
            String::new()
        }
    };
    let legacy = RETURN_LEGACY_CLASS.replace_all(&legacy, "");

    let Some(legacy_body) = extract(&legacy, &AnchorRule::ClassBody) else {
        return Ok(Transplant::SourceShapeUnrecognized { region: "properties class body" });
    };
    let Some(target_body) = extract(target, &AnchorRule::ClassBody) else {
        return Ok(Transplant::TargetShapeUnrecognized { region: "properties class body" });
    };

    let mut doc = SpliceDocument::new(file, target);
    doc.open(target_body.start..target_body.end, "\n\n", "\n\n")?;
    doc.splice(&format!("{accessors}\n\n{}", legacy_body.text));
    let mut content = doc.finish()?;

    if !header.trim().is_empty() && !insert_before_return_class(&mut content, &header) {
        missing.push("target class declaration");
    }

    Ok(Transplant::Applied {
        content: kind.stamp(&content),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = r#"// FNFoo Properties
export default function FNFooProperties({
   AB,
   ABViewPropertiesPlugin,
}) {
   return class ABFooProperties extends ABViewPropertiesPlugin {
      constructor() {
         super(ABFooProperties.getPluginKey(), {});
      }

      static getPluginKey() {
         return "ab-view-foo";
      }

      static getPluginType() {
         return "properties-view";
         // properties-view : will display in the properties panel of the ABDesigner
      }
   };
}
"#;

    const LEGACY: &str = r#"import FViewClass from "./ABView";
import ABFooSettings from "./FooSettings";

export default function (AB) {
   const BASE_ID = "properties_abview_foo";

   const ABView = FViewClass(AB);
   const uiConfig = AB.Config.uiSettings();

   class ABViewFooProperty extends ABView {
      constructor() {
         super(BASE_ID, { text: "" });
      }

      static get key() {
         return "foo";
      }
   }

   return ABViewFooProperty;
}
"#;

    #[test]
    fn merges_accessors_body_and_header() {
        let Transplant::Applied { content, missing } =
            transplant_properties("properties/FNFoo.js", TARGET, LEGACY).unwrap()
        else {
            panic!("expected applied");
        };
        assert!(missing.is_empty(), "{missing:?}");
        assert!(content.starts_with("// grafter:migrated properties\n"));

        // Header re-inserted ahead of the returned class, ABView line dropped.
        let header_at = content.find("const BASE_ID = \"properties_abview_foo\";").unwrap();
        let class_at = content.find("return class ABFooProperties extends ABViewPropertiesPlugin {").unwrap();
        assert!(header_at < class_at);
        assert!(content.contains("const uiConfig = AB.Config.uiSettings();"));
        assert!(!content.contains("FViewClass(AB)"));

        // Accessors precede the legacy body; the scaffold's own body is gone.
        let key_at = content.find("return this.key;").unwrap();
        let type_at = content.find("return \"properties-view\";").unwrap();
        let body_at = content.find("static get key()").unwrap();
        assert!(class_at < key_at && key_at < type_at && type_at < body_at);
        assert!(!content.contains("ab-view-foo"));
        assert!(!content.contains("return ABViewFooProperty;"));
    }

    #[test]
    fn legacy_without_header_still_merges_body() {
        let legacy = "export default class ABViewFooProperty extends ABView {\n   x() {}\n}\n";
        let Transplant::Applied { content, missing } =
            transplant_properties("properties/FNFoo.js", TARGET, legacy).unwrap()
        else {
            panic!("expected applied");
        };
        assert_eq!(missing, vec!["properties header"]);
        assert!(content.contains("x() {}"));
    }
}
