//! Registry (index/aggregator file) maintenance.
//!
//! A registry is a JavaScript module with a declaration section of
//! `import` / `require` lines followed by a bracketed inclusion list:
//!
//! ```text
//! import viewLabel from "./view_label/FNLabel.js";
//! import viewImage from "./view_image/FNImage.js";
//!
//! export default [viewImage, viewLabel];
//! ```
//!
//! [`link`] adds one declaration block and its references to the list, and is
//! a no-op when the entry key already appears as a whole word in the file.
//! [`unlink`] comments out the first live `require(...)` of a legacy unit.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

static FIRST_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:import\s|(?:var|const|let)\s+\w+\s*=\s*require\s*\()")
        .expect("declaration pattern must compile")
});

static VIEW_DEFAULTS_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)ABViewDefaults\s*=\s*\{.*?key:\s*"([^"]+)""#).expect("view key pattern must compile")
});

static INCLUSION_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[([^\[\]]*)\]\s*;").expect("inclusion list pattern must compile")
});

/// One unit's registration in a registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Directory name whose presence as a whole word means the unit is
    /// already registered.
    pub key: String,
    /// Declaration lines, e.g. `import viewFoo from "./view_foo/FNFoo.js";`.
    pub declarations: Vec<String>,
    /// References appended to the inclusion list.
    pub inclusions: Vec<String>,
}

impl RegistryEntry {
    /// Runtime registry entry for the `view_<key>` directory.
    pub fn runtime(legacy_key: &str, primary_file: &str) -> Self {
        let dir = format!("view_{legacy_key}");
        let reference = reference_name(legacy_key);
        Self {
            declarations: vec![format!("import {reference} from \"./{dir}/{primary_file}\";")],
            inclusions: vec![reference],
            key: dir,
        }
    }

    /// Designer registry entry for the `web_view_<key>` directory.
    ///
    /// `files` pairs each reference name with the file it imports.
    pub fn designer(legacy_key: &str, files: &[(String, String)]) -> Self {
        let dir = format!("web_view_{legacy_key}");
        Self {
            declarations: files
                .iter()
                .map(|(reference, file)| format!("import {reference} from \"./{dir}/{file}\";"))
                .collect(),
            inclusions: files.iter().map(|(reference, _)| reference.clone()).collect(),
            key: dir,
        }
    }
}

/// Identifier used to import a migrated view: `view` + key in camel form.
///
/// `label` → `viewLabel`, `data-select` → `viewDataSelect`.
pub fn reference_name(legacy_key: &str) -> String {
    let mut out = String::from("view");
    let mut upper_next = true;
    for c in legacy_key.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            if upper_next {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}

/// Key a migrated view registers under.
///
/// Read from the `ABViewDefaults` block of the migrated entry point; without
/// one, the Pascal name minus a leading `ABView`, first letter lower-cased.
pub fn view_key(entry_source: &str, pascal: &str) -> String {
    if let Some(key) = VIEW_DEFAULTS_KEY.captures(entry_source).and_then(|c| c.get(1)) {
        return key.as_str().to_string();
    }
    let stem = pascal.strip_prefix("ABView").filter(|s| !s.is_empty()).unwrap_or(pascal);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked(String),
    AlreadyLinked,
}

/// Register `entry` in the registry `content`.
pub fn link(content: &str, entry: &RegistryEntry) -> Result<LinkOutcome, DomainError> {
    if mentions_key(content, &entry.key) {
        return Ok(LinkOutcome::AlreadyLinked);
    }

    let list = INCLUSION_LIST
        .captures(content)
        .and_then(|c| c.get(1))
        .ok_or_else(|| DomainError::RegistryListNotFound {
            entry: entry.key.clone(),
        })?;
    let new_list = append_items(list.as_str(), &entry.inclusions);

    let declare_at = FIRST_DECLARATION.find(content).map_or(0, |m| m.start());
    let declarations = format!("{}\n", entry.declarations.join("\n"));

    let mut out = content.to_string();
    if declare_at >= list.end() {
        out.insert_str(declare_at, &declarations);
        out.replace_range(list.range(), &new_list);
    } else {
        out.replace_range(list.range(), &new_list);
        out.insert_str(declare_at, &declarations);
    }

    Ok(LinkOutcome::Linked(out))
}

/// Whether `key` occurs in `content` not flanked by identifier characters, so
/// `view_foo` is not found inside `view_foobar` or `web_view_foo`.
fn mentions_key(content: &str, key: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || matches!(c, '_' | '$' | '-');
    content.match_indices(key).any(|(at, _)| {
        let before = content[..at].chars().next_back();
        let after = content[at + key.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

/// Append `items` to the inner text of a list literal, following its style.
fn append_items(inner: &str, items: &[String]) -> String {
    if inner.trim().is_empty() {
        return items.join(", ");
    }

    let head = inner.trim_end();
    let tail = &inner[head.len()..];
    let indent = inner.contains('\n').then(|| {
        inner
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(|l| &l[..l.len() - l.trim_start().len()])
            .unwrap_or("")
    });

    let mut added = String::new();
    let trailing_comma = head.ends_with(',');
    for item in items {
        match (indent, trailing_comma) {
            (Some(indent), true) => added.push_str(&format!("\n{indent}{item},")),
            (Some(indent), false) => added.push_str(&format!(",\n{indent}{item}")),
            (None, true) => added.push_str(&format!(" {item},")),
            (None, false) => added.push_str(&format!(", {item}")),
        }
    }

    format!("{head}{added}{tail}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Unlinked(String),
    NotRegistered,
}

/// Comment out the first live `require("<...>/<unit>")` registration.
///
/// The match must name the unit exactly (an optional `.js` suffix is allowed),
/// so unlinking `Label` leaves `LabelNew` alone. Matches on lines that are
/// already comments are skipped, which makes a second call a no-op.
pub fn unlink(content: &str, unit: &str) -> Result<UnlinkOutcome, DomainError> {
    let pattern = format!(
        r#"require\s*\(\s*["'](?:[^"'\n]*/)?{}(?:\.js)?["']\s*\)(?:[ \t]*(,))?"#,
        regex::escape(unit)
    );
    let re = Regex::new(&pattern).map_err(|e| DomainError::InvalidPattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    for caps in re.captures_iter(content) {
        let Some(m) = caps.get(0) else { continue };
        let line_start = content[..m.start()].rfind('\n').map_or(0, |i| i + 1);
        if content[line_start..m.start()].contains("//") {
            continue;
        }

        // Without a trailing comma the entry must end its line, otherwise the
        // comment would swallow the rest of the list.
        if caps.get(1).is_none() {
            let rest = content[m.end()..].split('\n').next().unwrap_or("").trim();
            if !rest.is_empty() && !rest.starts_with("//") {
                continue;
            }
        }

        let mut out = content.to_string();
        out.insert_str(m.start(), "// ");
        return Ok(UnlinkOutcome::Unlinked(out));
    }

    Ok(UnlinkOutcome::NotRegistered)
}
