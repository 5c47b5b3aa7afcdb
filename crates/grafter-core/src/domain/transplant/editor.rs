//! Designer editor transplant → `properties/FN<Unit>Editor.js`.

use std::sync::LazyLock;

use regex::Regex;

use super::{Transplant, TransplantKind, designer_accessors, insert_before_return_class};
use crate::domain::DomainError;
use crate::domain::anchor::{AnchorRule, extract};
use crate::domain::marker::SpliceDocument;

static GUARD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"if\s*\(\s*!myClass\s*\)\s*\{").expect("guard pattern must compile"));

static GUARDED_CLASS_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+\s*=\s*class\s+\w+\s+extends\s+\w+\s*\{").expect("guarded class pattern must compile")
});

static UI_CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const\s+UIClass\s*=\s*UI_Class\s*\(\s*AB\s*\)\s*;").expect("UIClass pattern must compile")
});

static UI_CLASS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const\s+L\s*=\s*UIClass\.L\(\s*\)\s*;").expect("label pattern must compile")
});

const LABEL_HELPER: &str = "this.L = AB.Label();";

/// Merge a legacy guarded editor class into the scaffold.
pub fn transplant_editor(file: &str, target: &str, legacy: &str) -> Result<Transplant, DomainError> {
    let kind = TransplantKind::Editor;
    if kind.is_migrated(target) {
        return Ok(Transplant::AlreadyMigrated);
    }

    let mut missing = Vec::new();
    let accessors = designer_accessors(target, &mut missing);

    let Some(legacy_body) = extract(legacy, &AnchorRule::GuardedClassBody) else {
        return Ok(Transplant::SourceShapeUnrecognized { region: "editor class body" });
    };
    let Some(target_body) = extract(target, &AnchorRule::ClassBody) else {
        return Ok(Transplant::TargetShapeUnrecognized { region: "editor class body" });
    };

    let mut doc = SpliceDocument::new(file, target);
    doc.open(target_body.start..target_body.end, "\n\n", "\n\n")?;
    doc.splice(&format!("{accessors}\n\n{}", legacy_body.text));
    let mut content = doc.finish()?;

    // Guard declarations: the UI_Class base goes away, its label helper is
    // rebound to the plugin API.
    let header = extract(
        legacy,
        &AnchorRule::Between {
            open: &GUARD_OPEN,
            close: &GUARDED_CLASS_HEAD,
        },
    )
    .map(|region| {
        let header = UI_CLASS_DECL.replace(region.text, "");
        UI_CLASS_LABEL.replace(&header, LABEL_HELPER).into_owned()
    });

    match header {
        Some(header) if !header.trim().is_empty() => {
            if !insert_before_return_class(&mut content, header.trim_end()) {
                missing.push("target class declaration");
            }
        }
        Some(_) => {}
        None => missing.push("editor guard header"),
    }

    Ok(Transplant::Applied {
        content: kind.stamp(&content),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = r#"export default function FNFooEditor({ AB, ABViewEditorPlugin }) {
   return class ABFooEditor extends ABViewEditorPlugin {
      static getPluginKey() {
         return "ab-view-foo";
      }

      /**
       * @method getPluginType
       * the kind of designer panel this plugin fills.
       */
      static getPluginType() {
         return "editor-view";
      }
   };
}
"#;

    const LEGACY: &str = r#"import UI_Class from "../../ui_class";

let myClass = null;

export default function (AB) {
   if (!myClass) {
      const UIClass = UI_Class(AB);
      const L = UIClass.L();
      const BASE_ID = "interface_editor_viewfoo";

      myClass = class ABViewFooEditor extends UIClass {
         static get key() {
            return "foo";
         }

         ui() {
            return { id: this.ids.component, view: "label" };
         }
      };
   }

   return myClass;
}
"#;

    #[test]
    fn merges_guarded_body_and_rebinds_label_helper() {
        let Transplant::Applied { content, missing } =
            transplant_editor("properties/FNFooEditor.js", TARGET, LEGACY).unwrap()
        else {
            panic!("expected applied");
        };
        assert!(missing.is_empty(), "{missing:?}");
        assert!(content.starts_with("// grafter:migrated editor\n"));

        let label_at = content.find("this.L = AB.Label();").unwrap();
        let base_id_at = content.find("const BASE_ID = \"interface_editor_viewfoo\";").unwrap();
        let class_at = content.find("return class ABFooEditor extends ABViewEditorPlugin {").unwrap();
        assert!(label_at < base_id_at && base_id_at < class_at);
        assert!(!content.contains("UI_Class(AB)"));
        assert!(!content.contains("UIClass.L()"));

        let doc_at = content.find("@method getPluginType").unwrap();
        let body_at = content.find("static get key()").unwrap();
        assert!(class_at < doc_at && doc_at < body_at);
        assert!(content.contains("return this.key;"));
        assert!(!content.contains("ab-view-foo"));
        assert!(!content.contains("myClass"));
    }

    #[test]
    fn unguarded_legacy_is_skipped() {
        let legacy = "export default class ABViewFooEditor extends UIClass {\n   ui() {}\n}\n";
        assert_eq!(
            transplant_editor("properties/FNFooEditor.js", TARGET, legacy).unwrap(),
            Transplant::SourceShapeUnrecognized { region: "editor class body" }
        );
    }

    #[test]
    fn second_run_is_already_migrated() {
        let Transplant::Applied { content, .. } =
            transplant_editor("properties/FNFooEditor.js", TARGET, LEGACY).unwrap()
        else {
            panic!("expected applied");
        };
        assert_eq!(
            transplant_editor("properties/FNFooEditor.js", &content, LEGACY).unwrap(),
            Transplant::AlreadyMigrated
        );
    }
}
