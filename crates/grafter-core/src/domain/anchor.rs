//! Anchor extraction.
//!
//! Carves named regions out of raw source text without parsing it. Every
//! function here is pure and returns `None` when the construct is absent;
//! callers decide whether a missing region matters.
//!
//! ## Rules
//!
//! | Rule | Region |
//! |------|--------|
//! | [`AnchorRule::ImportBlock`] | leading `import` / `require` statements, up to the first blank line |
//! | [`AnchorRule::Method`] | optional `/** */` header plus a method with its balanced body |
//! | [`AnchorRule::ClassBody`] | everything between `class X extends Y {` and the last `}` of the text |
//! | [`AnchorRule::GuardedClassBody`] | the class body inside a `myClass = class ... return myClass;` guard |
//! | [`AnchorRule::Between`] | text after one pattern up to the first match of another |
//! | [`AnchorRule::Pattern`] | a capture group of an arbitrary [`AnchorPattern`] |

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

/// A `/** ... */` block comment. Cannot run past its own closing `*/`.
pub(crate) const DOC_COMMENT: &str = r"/\*\*(?:[^*]|\*+[^*/])*\*+/";

static CLASS_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)class\s+\w+\s+extends\s+\w+\s*\{(.*)\}").expect("class body pattern must compile")
});

static GUARDED_CLASS_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)myClass\s*=\s*class\s+\w+\s+extends\s+\w+\s*\{(.*)\}\s+return\s+myClass\s*;")
        .expect("guarded class body pattern must compile")
});

static REQUIRE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:var|const|let)\s+(?:\w+|\{[^}]+\})\s*=\s*require\s*\(|require\s*\()")
        .expect("require pattern must compile")
});

/// A span of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'t> {
    pub text: &'t str,
    pub start: usize,
    pub end: usize,
}

impl<'t> Region<'t> {
    fn of(source: &'t str, start: usize, end: usize) -> Self {
        Self {
            text: &source[start..end],
            start,
            end,
        }
    }
}

/// A (recognition, capture) pair: a compiled regex and the group to return.
#[derive(Debug, Clone)]
pub struct AnchorPattern {
    regex: Regex,
    group: usize,
}

impl AnchorPattern {
    pub fn new(pattern: &str, group: usize) -> Result<Self, DomainError> {
        let regex = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        if group >= regex.captures_len() {
            return Err(DomainError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("no capture group {group}"),
            });
        }
        Ok(Self { regex, group })
    }

    pub fn extract<'t>(&self, text: &'t str) -> Option<Region<'t>> {
        let m = self.regex.captures(text)?.get(self.group)?;
        Some(Region::of(text, m.start(), m.end()))
    }
}

/// Structural recognition rules understood by [`extract`].
#[derive(Debug, Clone, Copy)]
pub enum AnchorRule<'a> {
    ImportBlock,
    Method(&'a str),
    ClassBody,
    GuardedClassBody,
    Between { open: &'a Regex, close: &'a Regex },
    Pattern(&'a AnchorPattern),
}

/// Extract the region recognised by `rule`, or `None` if it is absent.
pub fn extract<'t>(text: &'t str, rule: &AnchorRule<'_>) -> Option<Region<'t>> {
    match rule {
        AnchorRule::ImportBlock => {
            let statements = import_statements(text);
            let first = statements.first()?;
            let last = statements.last()?;
            Some(Region::of(text, first.start, last.end))
        }
        AnchorRule::Method(name) => method(text, name),
        AnchorRule::ClassBody => capture(&CLASS_BODY, text),
        AnchorRule::GuardedClassBody => capture(&GUARDED_CLASS_BODY, text),
        AnchorRule::Between { open, close } => between(text, open, close),
        AnchorRule::Pattern(pattern) => pattern.extract(text),
    }
}

fn capture<'t>(regex: &Regex, text: &'t str) -> Option<Region<'t>> {
    let m = regex.captures(text)?.get(1)?;
    Some(Region::of(text, m.start(), m.end()))
}

/// Text after the first `open` match, up to the first `close` match after it.
pub fn between<'t>(text: &'t str, open: &Regex, close: &Regex) -> Option<Region<'t>> {
    let start = open.find(text)?.end();
    let end = start + close.find(&text[start..])?.start();
    Some(Region::of(text, start, end))
}

// ============================================================================
// Imports
// ============================================================================

/// Every leading `import` / `require` statement, in order.
///
/// Statements may span several lines; an `import` ends at a line containing
/// `;` or ending in a quote. Scanning stops at the first blank line after at
/// least one statement was found.
pub fn import_statements(text: &str) -> Vec<Region<'_>> {
    let mut found = Vec::new();
    let mut open: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let body = line.trim_end_matches(['\n', '\r']);
        let line_end = line_start + body.len();
        let trimmed = body.trim();
        let terminated =
            body.contains(';') || trimmed.ends_with('\'') || trimmed.ends_with('"');

        if trimmed.starts_with("import ") {
            if terminated {
                found.push(Region::of(text, line_start, line_end));
                open = None;
            } else {
                open = Some(line_start);
            }
        } else if let Some(start) = open {
            if terminated {
                found.push(Region::of(text, start, line_end));
                open = None;
            }
        } else if REQUIRE_STATEMENT.is_match(trimmed) {
            if trimmed.contains(';') {
                found.push(Region::of(text, line_start, line_end));
            } else {
                open = Some(line_start);
            }
        } else if trimmed.is_empty() && !found.is_empty() {
            break;
        }
    }

    found
}

/// Split `text` into its import statements (newline-joined) and the rest.
pub fn strip_imports(text: &str) -> (String, String) {
    let statements = import_statements(text);
    let imports = statements
        .iter()
        .map(|r| r.text)
        .collect::<Vec<_>>()
        .join("\n");

    let mut rest = String::with_capacity(text.len());
    let mut cursor = 0;
    for r in &statements {
        rest.push_str(&text[cursor..r.start]);
        cursor = r.end;
    }
    rest.push_str(&text[cursor..]);

    (imports, rest)
}

// ============================================================================
// Methods and blocks
// ============================================================================

/// A method definition named `name`, including a directly preceding doc comment.
fn method<'t>(text: &'t str, name: &str) -> Option<Region<'t>> {
    let head = Regex::new(&format!(
        r"(?m)^[ \t]*((?:static\s+|async\s+)*{}\s*\([^)]*\)\s*\{{)",
        regex::escape(name)
    ))
    .ok()?;

    let head = head.captures(text)?.get(1)?;
    let end = balanced_block_end(text, head.end() - 1)?;
    let start = leading_doc_start(text, head.start());
    Some(Region::of(text, start, end))
}

/// Offset just past the `}` that closes the `{` at `open`.
///
/// String literals and comments are skipped, so braces inside them do not
/// count. Returns `None` for unbalanced input.
pub fn balanced_block_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Start of a `/** */` comment that ends right before `at` (whitespace
/// only in between), or `at` itself.
pub fn leading_doc_start(text: &str, at: usize) -> usize {
    let before = text[..at].trim_end();
    if !before.ends_with("*/") {
        return at;
    }
    let Some(start) = before.rfind("/**") else {
        return at;
    };
    // `/**/` shares its opening and closing stars.
    let closes_here = match before.get(start + 3..before.len() - 2) {
        Some(inner) => !inner.contains("*/"),
        None => start + 4 == before.len(),
    };
    if closes_here { start } else { at }
}
