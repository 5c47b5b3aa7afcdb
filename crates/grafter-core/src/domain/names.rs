//! Name derivation.
//!
//! A unit is named once by the user ("My View-Name", "ABViewLabel") and that
//! free-form name is turned into every identifier the plugin convention needs:
//!
//! | Form | Example for `"My View-Name"` | Used for |
//! |------|------------------------------|----------|
//! | Pascal | `MyViewName` | class names, file names |
//! | Function-style | `FNMyViewName` | entry point files and factories |
//! | Hyphenated key | `my-view-name` | registry keys (`ab-view-my-view-name`) |
//! | Directory name | `ab_plugin_my_view_name` | plugin package directories |
//! | Flat snake | `my_view_name` | manifest keys |
//!
//! Every function here is total: invalid input yields `""`, never a panic, and
//! each one is idempotent when applied to its own output.

use serde::Serialize;

use crate::domain::DomainError;

/// Prefix shared by every plugin package directory.
pub const PLUGIN_DIR_PREFIX: &str = "ab_plugin_";

/// Prefix of the function-style identifier.
pub const FN_PREFIX: &str = "FN";

/// Prefix of every view registry key.
pub const VIEW_KEY_PREFIX: &str = "ab-view-";

// ============================================================================
// Derived forms
// ============================================================================

/// Pascal-cased identifier.
///
/// Words keep their inner casing; only the first letter of each word is
/// upper-cased, so acronyms survive (`"ABViewLabel"` stays `"ABViewLabel"`).
pub fn pascal(name: &str) -> String {
    split_words(name)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Function-style identifier: `FN` + Pascal form.
///
/// A name that already carries the prefix (`FNMyWidget`) is left alone.
pub fn fn_name(name: &str) -> String {
    let pascal = pascal(name);
    if pascal.is_empty() {
        return String::new();
    }
    let already_prefixed = pascal
        .strip_prefix(FN_PREFIX)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase());
    if already_prefixed {
        pascal
    } else {
        format!("{FN_PREFIX}{pascal}")
    }
}

/// Hyphenated key: lower-cased words joined by `-`.
pub fn hyphenated(name: &str) -> String {
    split_words(name)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Registry key for a view: `ab-view-` + hyphenated name.
///
/// Re-applying to an already prefixed key does not double the prefix.
pub fn registry_key(name: &str) -> String {
    let key = hyphenated(name);
    if key.is_empty() || key.starts_with(VIEW_KEY_PREFIX) {
        key
    } else {
        format!("{VIEW_KEY_PREFIX}{key}")
    }
}

/// Canonical plugin directory name: `ab_plugin_` + snake-cased words.
pub fn plugin_dir_name(name: &str) -> String {
    let snake = split_words(name)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    let snake = snake.strip_prefix(PLUGIN_DIR_PREFIX).unwrap_or(&snake);
    if snake.is_empty() {
        String::new()
    } else {
        format!("{PLUGIN_DIR_PREFIX}{snake}")
    }
}

/// Flat snake form: lower-cased, every non-alphanumeric becomes `_`.
///
/// No boundary detection, so `"NetsuiteAPI"` becomes `"netsuiteapi"`.
pub fn flat_snake(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Capitalise the first character only.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a string into words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Separators:** any character that is not alphanumeric always splits
/// 2. **Case transition (camelCase):** `aB` splits between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` splits between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
///
/// Words keep their original casing.
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            // "myApp" → "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(std::mem::take(&mut current));
                continue;
            }

            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(std::mem::take(&mut current));
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

// ============================================================================
// NameVariants
// ============================================================================

/// Every derived form of one unit name, computed once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameVariants {
    /// The name exactly as given; legacy file names use it verbatim.
    pub unit: String,
    pub pascal: String,
    pub fn_name: String,
    pub hyphenated: String,
    pub registry_key: String,
    pub dir_name: String,
}

impl NameVariants {
    /// Derive all forms for `name`, rejecting names with no usable characters.
    pub fn derive(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.trim();
        let pascal = pascal(trimmed);
        if pascal.is_empty() {
            return Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: "no letters or digits".into(),
            });
        }

        Ok(Self {
            unit: trimmed.to_string(),
            fn_name: fn_name(trimmed),
            hyphenated: hyphenated(trimmed),
            registry_key: registry_key(trimmed),
            dir_name: plugin_dir_name(trimmed),
            pascal,
        })
    }

    /// Entry point file name, e.g. `FNFoo.js`.
    pub fn entry_file(&self) -> String {
        format!("{}.js", self.fn_name)
    }

    /// UI sub-component file name, e.g. `FNFooComponent.js`.
    pub fn component_file(&self) -> String {
        format!("{}Component.js", self.fn_name)
    }

    /// Editor file name, e.g. `FNFooEditor.js`.
    pub fn editor_file(&self) -> String {
        format!("{}Editor.js", self.fn_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_separators_boundary() {
        assert_eq!(pascal("My View-Name"), "MyViewName");
        assert_eq!(hyphenated("My View-Name"), "my-view-name");
        assert_eq!(plugin_dir_name("My View-Name"), "ab_plugin_my_view_name");
        assert_eq!(fn_name("My View-Name"), "FNMyViewName");
    }

    #[test]
    fn acronyms_are_preserved_in_pascal() {
        assert_eq!(pascal("ABViewLabel"), "ABViewLabel");
        assert_eq!(hyphenated("ABViewLabel"), "ab-view-label");
        assert_eq!(plugin_dir_name("NetsuiteAPI"), "ab_plugin_netsuite_api");
    }

    #[test]
    fn camel_and_snake_inputs() {
        assert_eq!(pascal("myWidget"), "MyWidget");
        assert_eq!(pascal("my_widget"), "MyWidget");
        assert_eq!(hyphenated("HTTPServer"), "http-server");
    }

    #[test]
    fn forms_are_idempotent() {
        for input in ["My View-Name", "ABViewLabel", "xml_HTTP request", "  a--b  ", "Foo"] {
            let p = pascal(input);
            assert_eq!(pascal(&p), p, "pascal({input})");
            let k = hyphenated(input);
            assert_eq!(hyphenated(&k), k, "hyphenated({input})");
            let d = plugin_dir_name(input);
            assert_eq!(plugin_dir_name(&d), d, "plugin_dir_name({input})");
            let f = fn_name(input);
            assert_eq!(fn_name(&f), f, "fn_name({input})");
            let r = registry_key(input);
            assert_eq!(registry_key(&r), r, "registry_key({input})");
            let s = flat_snake(input);
            assert_eq!(flat_snake(&s), s, "flat_snake({input})");
        }
    }

    #[test]
    fn empty_and_invalid_input_yield_empty() {
        for input in ["", "   ", "---", "_ _"] {
            assert_eq!(pascal(input), "");
            assert_eq!(fn_name(input), "");
            assert_eq!(hyphenated(input), "");
            assert_eq!(registry_key(input), "");
            assert_eq!(plugin_dir_name(input), "");
        }
    }

    #[test]
    fn registry_key_uses_view_prefix() {
        assert_eq!(registry_key("MyWidget"), "ab-view-my-widget");
        assert_eq!(registry_key("ab-view-my-widget"), "ab-view-my-widget");
    }

    #[test]
    fn flat_snake_matches_manifest_convention() {
        assert_eq!(flat_snake("Netsuite API"), "netsuite_api");
        assert_eq!(flat_snake("Bar"), "bar");
    }

    #[test]
    fn variants_reject_unusable_names() {
        assert!(matches!(
            NameVariants::derive("!!!"),
            Err(DomainError::InvalidName { .. })
        ));
    }

    #[test]
    fn variants_file_names() {
        let v = NameVariants::derive("Foo").unwrap();
        assert_eq!(v.entry_file(), "FNFoo.js");
        assert_eq!(v.component_file(), "FNFooComponent.js");
        assert_eq!(v.editor_file(), "FNFooEditor.js");
        assert_eq!(v.registry_key, "ab-view-foo");
        assert_eq!(v.unit, "Foo");
    }
}
