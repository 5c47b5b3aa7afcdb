//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{RenderContext, TemplateSet};
use crate::error::GrafterResult;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// A rendered file, relative to the directory it will be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Description of a template set, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub set: TemplateSet,
    pub name: String,
    pub description: String,
    pub files: Vec<String>,
    /// Relative paths replaced by a local override directory.
    pub overridden: Vec<String>,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `grafter_adapters::filesystem::LocalFilesystem` (production)
/// - `grafter_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GrafterResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> GrafterResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> GrafterResult<String>;

    /// Immediate children of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> GrafterResult<Vec<DirEntry>>;

    /// Copy a file byte for byte.
    fn copy_file(&self, from: &Path, to: &Path) -> GrafterResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> GrafterResult<()>;
}

/// Port for template generation.
///
/// Implemented by `grafter_adapters::renderer::SimpleRenderer`.
pub trait TemplateGenerator: Send + Sync {
    /// Render every file of `set` with `context`.
    fn generate(&self, set: TemplateSet, context: &RenderContext) -> GrafterResult<Vec<GeneratedFile>>;

    /// Describe `set` without rendering it.
    fn describe(&self, set: TemplateSet) -> GrafterResult<TemplateInfo>;
}
