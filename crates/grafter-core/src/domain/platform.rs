//! Plugin platform entry files (`web.js`, `properties.js`) and webpack entries.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

static LAST_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import\s+[^;]+;").expect("import pattern must compile"));

static DEFAULT_EXPORT_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+function").expect("export pattern must compile")
});

static RETURN_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)return\s*\[\s*([^\]]*?)\s*\]").expect("return array pattern must compile")
});

static PLAIN_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s+[^\[;]+").expect("return pattern must compile"));

static FUNCTION_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)export\s+default\s+function\s+\w+\s*\([^)]*\)\s*\{[^}]*(\})")
        .expect("function body pattern must compile")
});

static BROWSER_ESM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)const\s+browserEsm\s*=").expect("browserEsm pattern must compile")
});

static ENTRY_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)entry:\s*\{").expect("entry pattern must compile"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Added(String),
    AlreadyPresent,
}

/// Register `fn_name` in a platform entry file.
///
/// Adds `import <fn> from "./<sub_dir>/<fn>.js";` after the last import and
/// `<fn>(PluginAPI)` to the returned array. Each half is skipped when already
/// present, so the call is idempotent.
pub fn add_platform_entry(
    content: &str,
    file: &str,
    fn_name: &str,
    sub_dir: &str,
) -> Result<EntryOutcome, DomainError> {
    let name = regex::escape(fn_name);
    let unparseable = || DomainError::PlatformEntryUnparseable {
        file: file.to_string(),
        entry: fn_name.to_string(),
    };
    let imported = Regex::new(&format!(
        r#"(?i)import\s+{name}\s+from\s+["'][^"']*{name}(?:\.js)?["']"#
    ))
    .map_err(|_| unparseable())?;
    let listed = Regex::new(&format!(r"\b{name}\b")).map_err(|_| unparseable())?;

    let has_import = imported.is_match(content);
    let in_array = RETURN_ARRAY
        .captures(content)
        .and_then(|c| c.get(1))
        .is_some_and(|items| listed.is_match(items.as_str()));
    if has_import && in_array {
        return Ok(EntryOutcome::AlreadyPresent);
    }

    let mut out = content.to_string();

    if !has_import {
        let statement = format!("import {fn_name} from \"./{sub_dir}/{fn_name}.js\";");
        if let Some(last) = LAST_IMPORT.find_iter(&out).last() {
            out.insert_str(last.end(), &format!("\n{statement}"));
        } else if let Some(export) = DEFAULT_EXPORT_FN.find(&out) {
            out.insert_str(export.start(), &format!("{statement}\n\n"));
        } else {
            out.insert_str(0, &format!("{statement}\n\n"));
        }
    }

    if !in_array {
        let item = format!("{fn_name}(PluginAPI)");
        if let Some(caps) = RETURN_ARRAY.captures(&out) {
            let (whole, items) = match (caps.get(0), caps.get(1)) {
                (Some(w), Some(i)) => (w.range(), i.as_str()),
                _ => return Err(unparseable()),
            };
            let mut entries: Vec<&str> = items
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            entries.push(&item);
            let rebuilt = format!("return [\n      {}\n   ]", entries.join(",\n      "));
            out.replace_range(whole, &rebuilt);
        } else if let Some(m) = PLAIN_RETURN.find(&out) {
            out.replace_range(m.range(), &format!("return [\n      {item}\n   ]"));
        } else if let Some(close) = FUNCTION_BODY.captures(&out).and_then(|c| c.get(1)) {
            out.insert_str(close.start(), &format!("\n   return [\n      {item}\n   ];\n"));
        } else {
            return Err(unparseable());
        }
    }

    Ok(EntryOutcome::Added(out))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebpackOutcome {
    Added(String),
    AlreadyPresent,
    /// No `const browserEsm =` configuration to extend.
    NoBrowserEsm,
    /// `browserEsm` exists but has no `entry: {` block.
    NoEntryBlock,
}

/// Make sure the `browserEsm` webpack config builds `<entry>.js`.
pub fn ensure_webpack_entry(content: &str, entry: &str) -> WebpackOutcome {
    let name = regex::escape(entry);
    let present = Regex::new(&format!(
        r#"(?i)entry:\s*\{{[^}}]*{name}:\s*path\.join\(\s*APP,\s*["']{name}\.js["']\s*\)"#
    ));
    if present.is_ok_and(|re| re.is_match(content)) {
        return WebpackOutcome::AlreadyPresent;
    }

    let Some(esm) = BROWSER_ESM.find(content) else {
        return WebpackOutcome::NoBrowserEsm;
    };
    let Some(block) = ENTRY_BLOCK.find(&content[esm.end()..]) else {
        return WebpackOutcome::NoEntryBlock;
    };

    let at = esm.end() + block.end();
    let mut out = content.to_string();
    out.insert_str(at, &format!("\n      {entry}: path.join(APP, \"{entry}.js\"),"));
    WebpackOutcome::Added(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WEB_JS: &str = "import FNImage from \"./web/FNImage.js\";\n\nexport default function web(PluginAPI) {\n   return [FNImage(PluginAPI)];\n}\n";

    fn added(outcome: EntryOutcome) -> String {
        match outcome {
            EntryOutcome::Added(s) => s,
            EntryOutcome::AlreadyPresent => panic!("expected a change"),
        }
    }

    #[test]
    fn adds_import_and_array_item() {
        let out = added(add_platform_entry(WEB_JS, "web.js", "FNFoo", "web").unwrap());
        assert_eq!(
            out,
            "import FNImage from \"./web/FNImage.js\";\nimport FNFoo from \"./web/FNFoo.js\";\n\nexport default function web(PluginAPI) {\n   return [\n      FNImage(PluginAPI),\n      FNFoo(PluginAPI)\n   ];\n}\n"
        );
        assert_eq!(
            add_platform_entry(&out, "web.js", "FNFoo", "web").unwrap(),
            EntryOutcome::AlreadyPresent
        );
    }

    #[test]
    fn editor_is_added_next_to_its_properties() {
        let content = "import FNFoo from \"./properties/FNFoo.js\";\n\nexport default function properties(PluginAPI) {\n   return [\n      FNFoo(PluginAPI)\n   ];\n}\n";
        let out = added(add_platform_entry(content, "properties.js", "FNFooEditor", "properties").unwrap());
        assert!(out.contains("import FNFooEditor from \"./properties/FNFooEditor.js\";"));
        assert!(out.contains("FNFoo(PluginAPI),\n      FNFooEditor(PluginAPI)"));

        // An existing FNFooEditor does not count as FNFoo.
        let content = "import FNFooEditor from \"./properties/FNFooEditor.js\";\nexport default function p(PluginAPI) {\n   return [FNFooEditor(PluginAPI)];\n}\n";
        let out = added(add_platform_entry(content, "properties.js", "FNFoo", "properties").unwrap());
        assert!(out.contains("FNFooEditor(PluginAPI),\n      FNFoo(PluginAPI)"));
    }

    #[test]
    fn empty_array_and_no_imports() {
        let content = "export default function web(PluginAPI) {\n   return [];\n}\n";
        let out = added(add_platform_entry(content, "web.js", "FNFoo", "web").unwrap());
        assert_eq!(
            out,
            "import FNFoo from \"./web/FNFoo.js\";\n\nexport default function web(PluginAPI) {\n   return [\n      FNFoo(PluginAPI)\n   ];\n}\n"
        );
    }

    #[test]
    fn function_without_return_gets_one() {
        let content = "export default function web(PluginAPI) {\n}\n";
        let out = added(add_platform_entry(content, "web.js", "FNFoo", "web").unwrap());
        assert!(out.contains("{\n\n   return [\n      FNFoo(PluginAPI)\n   ];\n}"));
    }

    #[test]
    fn unparseable_file_is_an_error() {
        assert!(matches!(
            add_platform_entry("module.exports = 1", "web.js", "FNFoo", "web"),
            Err(DomainError::PlatformEntryUnparseable { .. })
        ));
    }

    const WEBPACK: &str = "const browserEsm = {\n   entry: {\n      web: path.join(APP, \"web.js\"),\n   },\n};\n";

    #[test]
    fn webpack_entry_added_once() {
        assert_eq!(ensure_webpack_entry(WEBPACK, "web"), WebpackOutcome::AlreadyPresent);

        let WebpackOutcome::Added(out) = ensure_webpack_entry(WEBPACK, "properties") else {
            panic!("expected an added entry");
        };
        assert!(out.contains("entry: {\n      properties: path.join(APP, \"properties.js\"),\n      web:"));
        assert_eq!(ensure_webpack_entry(&out, "properties"), WebpackOutcome::AlreadyPresent);
    }

    #[test]
    fn webpack_without_browser_esm_is_left_alone() {
        assert_eq!(
            ensure_webpack_entry("module.exports = {};", "web"),
            WebpackOutcome::NoBrowserEsm
        );
        assert_eq!(
            ensure_webpack_entry("const browserEsm = {};", "web"),
            WebpackOutcome::NoEntryBlock
        );
    }
}
