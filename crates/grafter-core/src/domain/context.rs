//! Per-run migration state.

use std::path::{Path, PathBuf};

use crate::domain::{ArtifactRole, NameVariants, SourceArtifactSet};

/// Everything one migration run has learned so far.
///
/// Steps never mutate a shared context; each `with_*` call consumes the value
/// and returns the next one, so a batch driver can keep one context per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationContext {
    names: NameVariants,
    plugin_name: String,
    plugin_dir: PathBuf,
    sources: SourceArtifactSet,
    primary_output: Option<PathBuf>,
    legacy_key: Option<String>,
}

impl MigrationContext {
    pub fn new(names: NameVariants, plugin_name: impl Into<String>, plugin_dir: impl Into<PathBuf>) -> Self {
        Self {
            names,
            plugin_name: plugin_name.into(),
            plugin_dir: plugin_dir.into(),
            sources: SourceArtifactSet::default(),
            primary_output: None,
            legacy_key: None,
        }
    }

    pub fn with_sources(self, sources: SourceArtifactSet) -> Self {
        Self { sources, ..self }
    }

    pub fn with_primary_output(self, path: impl Into<PathBuf>) -> Self {
        Self {
            primary_output: Some(path.into()),
            ..self
        }
    }

    pub fn with_legacy_key(self, key: impl Into<String>) -> Self {
        Self {
            legacy_key: Some(key.into()),
            ..self
        }
    }

    pub fn names(&self) -> &NameVariants {
        &self.names
    }

    pub fn unit(&self) -> &str {
        &self.names.unit
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    pub fn sources(&self) -> &SourceArtifactSet {
        &self.sources
    }

    pub fn has(&self, role: ArtifactRole) -> bool {
        self.sources.has(role)
    }

    pub fn primary_output(&self) -> Option<&Path> {
        self.primary_output.as_deref()
    }

    pub fn legacy_key(&self) -> Option<&str> {
        self.legacy_key.as_deref()
    }

    // ── Target files ──────────────────────────────────────────────────────

    pub fn web_dir(&self) -> PathBuf {
        self.plugin_dir.join("web")
    }

    pub fn properties_dir(&self) -> PathBuf {
        self.plugin_dir.join("properties")
    }

    pub fn entry_target(&self) -> PathBuf {
        self.web_dir().join(self.names.entry_file())
    }

    pub fn component_target(&self) -> PathBuf {
        self.web_dir().join(self.names.component_file())
    }

    pub fn properties_target(&self) -> PathBuf {
        self.properties_dir().join(self.names.entry_file())
    }

    pub fn editor_target(&self) -> PathBuf {
        self.properties_dir().join(self.names.editor_file())
    }

    /// The four files the placeholder scaffold must provide.
    pub fn placeholder_targets(&self) -> [PathBuf; 4] {
        [
            self.entry_target(),
            self.component_target(),
            self.properties_target(),
            self.editor_target(),
        ]
    }
}
