//! Two-phase splicing around an insertion marker.
//!
//! A transplant first *opens* a region of the target (replacing it with the
//! marker), then fills the marker with legacy content. At most one marker may
//! be open per document, and [`SpliceDocument::finish`] refuses to hand back
//! content that still contains one.

use std::ops::Range;

use crate::domain::DomainError;

/// Placeholder written into a target between the open and splice phases.
pub const INSERT_MARKER: &str = "// Insert Here //";

/// A target file's content being rewritten by one transplant step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceDocument {
    file: String,
    content: String,
}

impl SpliceDocument {
    pub fn new(file: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_marker(&self) -> bool {
        self.content.contains(INSERT_MARKER)
    }

    /// Replace `range` with `before` + marker + `after`.
    pub fn open(&mut self, range: Range<usize>, before: &str, after: &str) -> Result<(), DomainError> {
        if self.has_marker() {
            return Err(DomainError::MarkerAlreadyOpen {
                file: self.file.clone(),
            });
        }
        self.content
            .replace_range(range, &format!("{before}{INSERT_MARKER}{after}"));
        Ok(())
    }

    /// Resolve the open marker with `text`. Returns `false` if none was open.
    pub fn splice(&mut self, text: &str) -> bool {
        match self.content.find(INSERT_MARKER) {
            Some(at) => {
                self.content
                    .replace_range(at..at + INSERT_MARKER.len(), text);
                true
            }
            None => false,
        }
    }

    /// Insert `text` ahead of the open marker, keeping the marker open.
    pub fn splice_before_marker(&mut self, text: &str) -> bool {
        match self.content.find(INSERT_MARKER) {
            Some(at) => {
                self.content.insert_str(at, &format!("{text}\n\n"));
                true
            }
            None => false,
        }
    }

    /// Apply a whole-content rewrite such as a reference rename.
    pub fn rewrite(&mut self, f: impl FnOnce(&str) -> String) {
        self.content = f(&self.content);
    }

    /// Hand back the final content, failing if a marker is still unresolved.
    pub fn finish(self) -> Result<String, DomainError> {
        if self.has_marker() {
            return Err(DomainError::UnresolvedMarker { file: self.file });
        }
        Ok(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_splice_resolves_marker() {
        let mut doc = SpliceDocument::new("a.js", "class A { old(); }");
        doc.open(9..17, "\n", "\n").unwrap();
        assert_eq!(doc.content(), "class A {\n// Insert Here //\n}");

        assert!(doc.splice_before_marker("first();"));
        assert!(doc.splice("second();"));
        assert_eq!(doc.finish().unwrap(), "class A {\nfirst();\n\nsecond();\n}");
    }

    #[test]
    fn only_one_marker_may_be_open() {
        let mut doc = SpliceDocument::new("a.js", "abc");
        doc.open(0..1, "", "").unwrap();
        assert!(matches!(
            doc.open(2..3, "", ""),
            Err(DomainError::MarkerAlreadyOpen { .. })
        ));
    }

    #[test]
    fn finish_rejects_unresolved_marker() {
        let mut doc = SpliceDocument::new("web/FNFoo.js", "abc");
        doc.open(1..2, "", "").unwrap();
        assert_eq!(
            doc.finish(),
            Err(DomainError::UnresolvedMarker {
                file: "web/FNFoo.js".into()
            })
        );
    }

    #[test]
    fn empty_splice_keeps_document_well_formed() {
        let mut doc = SpliceDocument::new("a.js", "{ body }");
        doc.open(1..7, "", "").unwrap();
        assert!(doc.splice(""));
        assert_eq!(doc.finish().unwrap(), "{}");
    }

    #[test]
    fn splice_without_marker_is_reported() {
        let mut doc = SpliceDocument::new("a.js", "abc");
        assert!(!doc.splice("x"));
        assert!(!doc.splice_before_marker("x"));
        assert_eq!(doc.finish().unwrap(), "abc");
    }
}
