//! Application layer errors.
//!
//! These errors represent failures in orchestration, not text rules.
//! Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the pipeline through the ports.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No ancestor looks like a project root, or it has neither tree.
    #[error("No project root found from {start} (searched {depth} levels)")]
    RootNotFound { start: PathBuf, depth: usize },

    /// A plugin name could not be resolved to a directory.
    #[error("Plugin '{name}' not found in {plugins_dir}")]
    PluginNotFound { name: String, plugins_dir: PathBuf },

    /// Plugin directory already exists.
    #[error("Plugin already exists at {path}")]
    PluginExists { path: PathBuf },

    /// The plugin has no manifest.json to update.
    #[error("Plugin manifest not found at {path}")]
    ManifestMissing { path: PathBuf },

    /// Template generation failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// In-memory state lock poisoned.
    #[error("Filesystem state lock poisoned")]
    LockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::RootNotFound { start, .. } => vec![
                format!("Searched upwards from {}", start.display()),
                "Run grafter inside a project containing developer/ab_platform_web and developer/plugins".into(),
                "Or pass the project root with --root".into(),
            ],
            Self::PluginNotFound { name, plugins_dir } => vec![
                format!("No directory in {} matches '{}'", plugins_dir.display(), name),
                format!("Create it first: grafter new \"{}\"", name),
                "Try: grafter list to see existing plugins".into(),
            ],
            Self::PluginExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different plugin name".into(),
            ],
            Self::ManifestMissing { path } => vec![
                format!("Expected {}", path.display()),
                "Recreate the plugin with grafter new, or restore manifest.json".into(),
            ],
            Self::LockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RootNotFound { .. } | Self::PluginNotFound { .. } | Self::ManifestMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::PluginExists { .. } => ErrorCategory::Conflict,
            Self::FilesystemError { .. } | Self::RenderingFailed { .. } | Self::LockError => {
                ErrorCategory::Internal
            }
        }
    }
}
