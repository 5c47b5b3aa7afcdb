//! Directory convention of a project root.
//!
//! ```text
//! <root>/developer/
//! ├── ab_platform_web/<AppBuilder>/
//! │   ├── core/ABViewManagerCore.js         legacy runtime registry
//! │   ├── core/views/                       core definitions
//! │   ├── platform/views/                   platform overrides
//! │   └── platform/plugins/included/        runtime registry + view_<key>/
//! └── plugins/
//!     ├── <ABDesigner>/src/plugins/         designer registry + web_view_<key>/
//!     └── ab_plugin_<name>/                 plugin packages
//! ```

use std::path::{Path, PathBuf};

pub const DEVELOPER_DIR: &str = "developer";
pub const PLATFORM_WEB_DIR: &str = "ab_platform_web";
pub const PLUGINS_DIR: &str = "plugins";

/// Accepted spellings of the legacy application directory.
pub const APPBUILDER_NAMES: &[&str] = &["Appbuilder", "AppBuilder", "appbuilder"];

/// Accepted spellings of the designer plugin directory.
pub const DESIGNER_NAMES: &[&str] = &["ABDesigner", "abdesigner", "AbDesigner"];

/// Legacy runtime registry, relative to the application directory.
pub const LEGACY_VIEW_REGISTRY: &str = "core/ABViewManagerCore.js";

/// Legacy designer registries, two levels above each designer source file.
pub const LEGACY_EDITOR_REGISTRY: &str = "EditorManager.js";
pub const LEGACY_PROPERTY_REGISTRY: &str = "PropertyManager.js";

/// Resolved directory roles of one project root.
///
/// The application and designer trees are optional individually; the locator
/// fails when both are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub appbuilder: Option<PathBuf>,
    pub designer: Option<PathBuf>,
}

impl ProjectLayout {
    pub fn developer(root: &Path) -> PathBuf {
        root.join(DEVELOPER_DIR)
    }

    pub fn platform_web(root: &Path) -> PathBuf {
        Self::developer(root).join(PLATFORM_WEB_DIR)
    }

    pub fn plugins(root: &Path) -> PathBuf {
        Self::developer(root).join(PLUGINS_DIR)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        Self::plugins(&self.root)
    }

    pub fn legacy_view_registry(&self) -> Option<PathBuf> {
        self.appbuilder
            .as_ref()
            .map(|app| app.join(LEGACY_VIEW_REGISTRY))
    }

    /// Directory holding the runtime registry `index.js`.
    pub fn runtime_plugins(&self) -> Option<PathBuf> {
        self.appbuilder
            .as_ref()
            .map(|app| app.join("platform").join("plugins").join("included"))
    }

    /// Directory holding the designer registry `index.js`.
    pub fn designer_plugins(&self) -> Option<PathBuf> {
        self.designer
            .as_ref()
            .map(|d| d.join("src").join("plugins"))
    }
}

/// Registry two directory levels above `source`, e.g. the
/// `EditorManager.js` next to `editors/` for `editors/views/Foo.js`.
pub fn sibling_registry(source: &Path, file_name: &str) -> Option<PathBuf> {
    Some(source.parent()?.parent()?.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_paths_follow_convention() {
        let layout = ProjectLayout {
            root: PathBuf::from("/r"),
            appbuilder: Some(PathBuf::from("/r/developer/ab_platform_web/AppBuilder")),
            designer: None,
        };
        assert_eq!(layout.plugins_dir(), PathBuf::from("/r/developer/plugins"));
        assert_eq!(
            layout.runtime_plugins().unwrap(),
            PathBuf::from("/r/developer/ab_platform_web/AppBuilder/platform/plugins/included")
        );
        assert_eq!(
            layout.legacy_view_registry().unwrap(),
            PathBuf::from("/r/developer/ab_platform_web/AppBuilder/core/ABViewManagerCore.js")
        );
        assert!(layout.designer_plugins().is_none());
    }

    #[test]
    fn sibling_registry_is_two_levels_up() {
        let source = Path::new("/d/src/rootPages/Designer/editors/views/Foo.js");
        assert_eq!(
            sibling_registry(source, LEGACY_EDITOR_REGISTRY).unwrap(),
            PathBuf::from("/d/src/rootPages/Designer/editors/EditorManager.js")
        );
    }
}
