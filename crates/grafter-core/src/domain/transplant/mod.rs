//! Content transplants.
//!
//! Each transplant takes the freshly scaffolded target file and one or more
//! legacy sources, and produces the merged target content:
//!
//! 1. Save the target accessors that must survive the merge.
//! 2. Open the target body at the insertion marker.
//! 3. Strip legacy boilerplate (imports, exports, label helpers).
//! 4. Splice the legacy regions in, then re-insert accessors and headers.
//! 5. Stamp the first line with the role sentinel.
//!
//! A target that already carries its sentinel is reported as
//! [`Transplant::AlreadyMigrated`] and left untouched.

mod component;
mod core_view;
mod editor;
mod properties;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::anchor::DOC_COMMENT;

pub use component::transplant_component;
pub use core_view::transplant_core_view;
pub use editor::transplant_editor;
pub use properties::transplant_properties;

/// The four target files a view migration rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransplantKind {
    CoreView,
    Component,
    Properties,
    Editor,
}

impl TransplantKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::CoreView => "core-view",
            Self::Component => "component",
            Self::Properties => "properties",
            Self::Editor => "editor",
        }
    }

    /// First-line comment recording a completed transplant.
    pub fn sentinel(self) -> String {
        format!("// grafter:migrated {}", self.label())
    }

    /// Whether `content` was already produced by this transplant.
    pub fn is_migrated(self, content: &str) -> bool {
        content
            .trim_start_matches('\u{feff}')
            .lines()
            .next()
            .is_some_and(|first| first.trim() == self.sentinel())
    }

    fn stamp(self, content: &str) -> String {
        format!("{}\n{}", self.sentinel(), content)
    }
}

impl fmt::Display for TransplantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one transplant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transplant {
    /// Merged content, plus the optional regions that were not found.
    Applied {
        content: String,
        missing: Vec<&'static str>,
    },
    /// The target already carries this transplant's sentinel.
    AlreadyMigrated,
    /// The target does not have the scaffold shape; nothing was changed.
    TargetShapeUnrecognized { region: &'static str },
    /// The legacy source lacks its main region; nothing was changed.
    SourceShapeUnrecognized { region: &'static str },
}

// ── Shared anchors ─────────────────────────────────────────────────────────

static RETURN_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"return\s+class\s+\w+\s+extends\s+\w+\s*\{").expect("return class pattern must compile")
});

static PLUGIN_TYPE_ACCESSOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?:{DOC_COMMENT}\s*)?static\s+getPluginType\(\s*\)\s*\{{\s*return\s+"[^"]+"\s*;\s*(?://[^\n]*\n\s*)?\}}"#
    ))
    .expect("plugin type accessor pattern must compile")
});

/// Key accessor of the designer-side plugins; the scaffold's own literal key
/// accessor is replaced by this one.
const DESIGNER_KEY_ACCESSOR: &str = "static getPluginKey() {
         return this.key;
      }";

/// Accessors the properties and editor transplants carry over from the target.
fn designer_accessors(target: &str, missing: &mut Vec<&'static str>) -> String {
    let mut out = format!("{DESIGNER_KEY_ACCESSOR}\n\n");
    match PLUGIN_TYPE_ACCESSOR.find(target) {
        Some(m) => {
            out.push_str(m.as_str());
            out.push_str("\n\n");
        }
        None => missing.push("getPluginType accessor"),
    }
    out
}

/// Put `header` on its own before the first `return class ... {` of `content`.
fn insert_before_return_class(content: &mut String, header: &str) -> bool {
    match RETURN_CLASS.find(content) {
        Some(m) => {
            content.insert_str(m.start(), &format!("{header}\n\n"));
            true
        }
        None => false,
    }
}
