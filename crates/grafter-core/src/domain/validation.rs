use std::path::{Component, Path};

use crate::domain::error::DomainError;
use crate::domain::names::pascal;

/// Centralized domain validation.
///
/// Name derivation itself is total; these checks decide which inputs are
/// allowed to reach it.
pub struct DomainValidator;

impl DomainValidator {
    /// A plugin or unit name must contain something usable and must not be a path.
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if pascal(name.trim()).is_empty() {
            return Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: "no letters or digits".into(),
            });
        }
        if name.contains(['/', '\\']) {
            return Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: "path separators are not allowed".into(),
            });
        }
        Ok(())
    }

    /// A rendered template path must stay below the directory it is written to.
    pub fn validate_template_path(path: &Path) -> Result<(), DomainError> {
        let escapes = path.is_absolute()
            || path
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || path.as_os_str().is_empty() {
            Err(DomainError::UnsafeTemplatePath {
                path: path.display().to_string(),
            })
        } else {
            Ok(())
        }
    }
}
