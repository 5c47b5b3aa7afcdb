// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Soft conditions (a region that is not found, a registry that already holds
/// an entry) are outcomes, not errors, and never appear here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid unit name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid anchor pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Template path '{path}' must stay inside the output directory")]
    UnsafeTemplatePath { path: String },

    // ========================================================================
    // Migration Errors
    // ========================================================================
    #[error("Insertion marker left unresolved in {file}")]
    UnresolvedMarker { file: String },

    #[error("Insertion marker already present in {file}")]
    MarkerAlreadyOpen { file: String },

    #[error("Could not parse {file} to add '{entry}'")]
    PlatformEntryUnparseable { file: String, entry: String },

    #[error("Registry has no inclusion list to add '{entry}' to")]
    RegistryListNotFound { entry: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{}' does not contain any letters or digits", name),
                "Use a name such as 'MyWidget' or 'my widget'".into(),
            ],
            Self::InvalidManifest(msg) => vec![
                "manifest.json must contain a JSON object".into(),
                format!("Details: {}", msg),
            ],
            Self::UnresolvedMarker { file } | Self::MarkerAlreadyOpen { file } => vec![
                format!("{} still contains '// Insert Here //'", file),
                "A previous run was interrupted; restore the file from version control".into(),
                "Then run the migration again".into(),
            ],
            Self::PlatformEntryUnparseable { file, entry } => vec![
                format!("Add '{}' to {} manually", entry, file),
                "The file needs an import section and a 'return [ ... ]' list".into(),
            ],
            Self::RegistryListNotFound { entry } => vec![
                format!("Add '{}' to the registry list manually", entry),
                "The registry must end with a bracketed list such as 'export default [ ... ];'"
                    .into(),
            ],
            Self::UnsafeTemplatePath { path } => vec![
                format!("Rename '{}' in the template directory", path),
                "Template paths must be relative and must not contain '..'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::InvalidManifest(_)
            | Self::UnsafeTemplatePath { .. } => ErrorCategory::Validation,
            Self::UnresolvedMarker { .. }
            | Self::MarkerAlreadyOpen { .. }
            | Self::PlatformEntryUnparseable { .. }
            | Self::RegistryListNotFound { .. } => ErrorCategory::Migration,
            Self::InvalidPattern { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Migration,
    Internal,
}
