//! Filesystem-based template overrides.
//!
//! A local template directory mirrors the embedded sets:
//!
//! ```text
//! my-templates/
//! ├── plugin/
//! │   ├── template.toml        ← optional, names the set in listings
//! │   └── README.md            ← replaces the embedded README.md
//! └── view/
//!     └── web/
//!         └── FN[objectNamePascal]Component.js
//! ```
//!
//! Each file found replaces the embedded file with the same relative path;
//! files with no embedded counterpart are added to the set.
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name        = "view"
//! description = "Our house view layout"   # optional
//! ```
//!
//! # Resolution
//!
//! `$GRAFTER_TEMPLATES_DIR` wins over the configured `templates.local_path`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use grafter_core::domain::TemplateSet;

/// Environment variable naming the override directory.
pub const TEMPLATES_DIR_ENV: &str = "GRAFTER_TEMPLATES_DIR";

const MANIFEST_FILE: &str = "template.toml";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to parse '{path}': {reason}")]
    Manifest { path: PathBuf, reason: String },
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised `template.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TemplateManifest {
    pub template: TemplateSection,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TemplateSection {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TemplateManifest {
    pub fn parse(raw: &str, path: &Path) -> Result<Self, LoadError> {
        toml::from_str(raw).map_err(|e| LoadError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Files of one override set, keyed by relative path with `/` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSet {
    pub manifest: Option<TemplateManifest>,
    pub files: BTreeMap<String, String>,
}

/// Reads override sets from one directory.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist; a missing set loads as empty.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Loader for `$GRAFTER_TEMPLATES_DIR`, else for `configured`.
    pub fn resolve(configured: Option<&Path>) -> Option<Self> {
        if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV).filter(|v| !v.is_empty()) {
            debug!(path = ?dir, env = TEMPLATES_DIR_ENV, "template overrides from environment");
            return Some(Self::new(dir));
        }
        configured.map(Self::new)
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every override file of `set`.
    ///
    /// A malformed `template.toml` is skipped with a warning; the files
    /// still apply.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load(&self, set: TemplateSet) -> Result<LoadedSet, LoadError> {
        let set_dir = self.templates_dir.join(set.dir_name());
        if !set_dir.is_dir() {
            debug!(path = %set_dir.display(), "no overrides for set");
            return Ok(LoadedSet::default());
        }

        let mut loaded = LoadedSet::default();
        for entry in WalkDir::new(&set_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| LoadError::Read {
                path: set_dir.clone(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(&set_dir) else {
                continue;
            };
            let relative = normalize_path(&relative.to_string_lossy());
            let raw = fs::read_to_string(path).map_err(|e| LoadError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

            if relative == MANIFEST_FILE {
                match TemplateManifest::parse(&raw, path) {
                    Ok(manifest) => loaded.manifest = Some(manifest),
                    Err(e) => warn!(error = %e, "ignoring template manifest"),
                }
                continue;
            }

            debug!(file = %relative, "override found");
            loaded.files.insert(relative, raw);
        }

        Ok(loaded)
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_set_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let loaded = FilesystemTemplateLoader::new(tmp.path())
            .load(TemplateSet::View)
            .unwrap();
        assert_eq!(loaded, LoadedSet::default());
    }

    #[test]
    fn nested_files_use_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "view/web/FN[objectNamePascal].js", "custom");
        write(tmp.path(), "plugin/README.md", "other set");

        let loaded = FilesystemTemplateLoader::new(tmp.path())
            .load(TemplateSet::View)
            .unwrap();

        assert_eq!(loaded.files.len(), 1);
        assert_eq!(
            loaded.files.get("web/FN[objectNamePascal].js").map(String::as_str),
            Some("custom")
        );
    }

    #[test]
    fn manifest_is_read_not_rendered() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "plugin/template.toml",
            "[template]\nname = \"house plugin\"\ndescription = \"ours\"\n",
        );

        let loaded = FilesystemTemplateLoader::new(tmp.path())
            .load(TemplateSet::Plugin)
            .unwrap();

        assert!(loaded.files.is_empty());
        let manifest = loaded.manifest.unwrap();
        assert_eq!(manifest.template.name, "house plugin");
        assert_eq!(manifest.template.description.as_deref(), Some("ours"));
    }

    #[test]
    fn broken_manifest_is_ignored() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "plugin/template.toml", "not = [toml");
        write(tmp.path(), "plugin/web.js", "x");

        let loaded = FilesystemTemplateLoader::new(tmp.path())
            .load(TemplateSet::Plugin)
            .unwrap();

        assert!(loaded.manifest.is_none());
        assert_eq!(loaded.files.len(), 1);
    }

    #[test]
    fn normalize_path_replaces_backslashes() {
        assert_eq!(normalize_path(r"web\FNFoo.js"), "web/FNFoo.js");
    }
}
