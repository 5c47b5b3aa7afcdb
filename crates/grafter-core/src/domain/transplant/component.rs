//! UI component transplant: legacy component class body → `web/FN<Unit>Component.js`.

use super::{Transplant, TransplantKind};
use crate::domain::DomainError;
use crate::domain::anchor::{AnchorRule, extract};
use crate::domain::marker::SpliceDocument;

/// Replace the scaffold component's class body with the legacy one, verbatim.
pub fn transplant_component(file: &str, target: &str, legacy: &str) -> Result<Transplant, DomainError> {
    let kind = TransplantKind::Component;
    if kind.is_migrated(target) {
        return Ok(Transplant::AlreadyMigrated);
    }

    let Some(legacy_body) = extract(legacy, &AnchorRule::ClassBody) else {
        return Ok(Transplant::SourceShapeUnrecognized { region: "component class body" });
    };
    let Some(target_body) = extract(target, &AnchorRule::ClassBody) else {
        return Ok(Transplant::TargetShapeUnrecognized { region: "component class body" });
    };

    // The greedy class body of the scaffold runs up to the factory's closing
    // brace, so the class terminator is written back after the marker.
    let mut doc = SpliceDocument::new(file, target);
    doc.open(target_body.start..target_body.end, "\n\n", "\n\n   };\n\n")?;
    doc.splice(legacy_body.text);

    let content = doc.finish()?;
    Ok(Transplant::Applied {
        content: kind.stamp(&content),
        missing: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TARGET: &str = "export default function FNFooComponent({\n   ABViewComponentPlugin,\n}) {\n   return class ABFooComponent extends ABViewComponentPlugin {\n      ui() {\n         return super.ui([]);\n      }\n   };\n}\n";

    const LEGACY: &str = "const ABViewComponent = require(\"./ABViewComponent\").default;\n\nmodule.exports = class ABViewFooComponent extends ABViewComponent {\n   ui() {\n      return { view: \"label\" };\n   }\n};\n";

    #[test]
    fn legacy_body_replaces_scaffold_body() {
        let Transplant::Applied { content, .. } =
            transplant_component("web/FNFooComponent.js", TARGET, LEGACY).unwrap()
        else {
            panic!("expected applied");
        };
        assert_eq!(
            content,
            "// grafter:migrated component\nexport default function FNFooComponent({\n   ABViewComponentPlugin,\n}) {\n   return class ABFooComponent extends ABViewComponentPlugin {\n\n\n   ui() {\n      return { view: \"label\" };\n   }\n\n\n   };\n\n}\n"
        );
    }

    #[test]
    fn legacy_without_class_changes_nothing() {
        assert_eq!(
            transplant_component("web/FNFooComponent.js", TARGET, "module.exports = {};").unwrap(),
            Transplant::SourceShapeUnrecognized { region: "component class body" }
        );
    }
}
