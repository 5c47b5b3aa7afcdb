//! Template sets compiled into the binary.
//!
//! Every file under `templates/<set>/` is embedded here, keyed by its path
//! relative to the set directory. Paths and contents still carry their
//! `[name]` and `<%= name %>` placeholders; rendering happens in
//! [`SimpleRenderer`](crate::renderer::SimpleRenderer).

use grafter_core::domain::TemplateSet;

/// One embedded template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedFile {
    pub path: &'static str,
    pub content: &'static str,
}

/// One embedded template set.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSet {
    /// Raw `template.toml` of the set.
    pub manifest: &'static str,
    pub files: &'static [EmbeddedFile],
}

macro_rules! embed {
    ($set:literal, $path:literal) => {
        EmbeddedFile {
            path: $path,
            content: include_str!(concat!("../templates/", $set, "/", $path)),
        }
    };
}

const PLUGIN: EmbeddedSet = EmbeddedSet {
    manifest: include_str!("../templates/plugin/template.toml"),
    files: &[
        embed!("plugin", "manifest.json"),
        embed!("plugin", "web.js"),
        embed!("plugin", "properties.js"),
        embed!("plugin", "webpack.common.js"),
        embed!("plugin", "webpack.prod.js"),
        embed!("plugin", "package.json"),
        embed!("plugin", "README.md"),
    ],
};

const VIEW: EmbeddedSet = EmbeddedSet {
    manifest: include_str!("../templates/view/template.toml"),
    files: &[
        embed!("view", "web/FN[objectNamePascal].js"),
        embed!("view", "web/FN[objectNamePascal]Component.js"),
        embed!("view", "properties/FN[objectNamePascal].js"),
        embed!("view", "properties/FN[objectNamePascal]Editor.js"),
    ],
};

/// The embedded files of `set`.
pub fn embedded(set: TemplateSet) -> &'static EmbeddedSet {
    match set {
        TemplateSet::Plugin => &PLUGIN,
        TemplateSet::View => &VIEW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_set_has_the_package_skeleton() {
        let paths: Vec<_> = embedded(TemplateSet::Plugin).files.iter().map(|f| f.path).collect();
        for expected in ["manifest.json", "web.js", "properties.js", "webpack.common.js"] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn view_set_has_four_files() {
        let set = embedded(TemplateSet::View);
        assert_eq!(set.files.len(), 4);
        assert!(set.files.iter().all(|f| f.path.contains("[objectNamePascal]")));
    }

    #[test]
    fn platform_entry_files_start_with_an_empty_list() {
        let web = embedded(TemplateSet::Plugin)
            .files
            .iter()
            .find(|f| f.path == "web.js")
            .unwrap();
        assert!(web.content.contains("return [];"));
    }
}
