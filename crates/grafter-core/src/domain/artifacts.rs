//! Legacy source artifacts of a unit.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// The fixed categories of legacy source file a unit may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactRole {
    CoreDefinition,
    CoreDefinitionCore,
    PlatformOverride,
    UiComponent,
    DesignProperties,
    DesignEditor,
}

impl ArtifactRole {
    pub const ALL: [ArtifactRole; 6] = [
        Self::CoreDefinition,
        Self::CoreDefinitionCore,
        Self::PlatformOverride,
        Self::UiComponent,
        Self::DesignProperties,
        Self::DesignEditor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CoreDefinition => "coreDefinition",
            Self::CoreDefinitionCore => "coreDefinitionCore",
            Self::PlatformOverride => "platformOverride",
            Self::UiComponent => "uiComponent",
            Self::DesignProperties => "designProperties",
            Self::DesignEditor => "designEditor",
        }
    }

    /// Legacy file name for a unit called `unit`.
    pub fn file_name(self, unit: &str) -> String {
        match self {
            Self::CoreDefinitionCore => format!("{unit}Core.js"),
            Self::UiComponent => format!("{unit}Component.js"),
            _ => format!("{unit}.js"),
        }
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role → path of every legacy file found for one unit.
///
/// Built once by the locator; a role is present only if its file existed at
/// resolution time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceArtifactSet {
    paths: BTreeMap<ArtifactRole, PathBuf>,
}

impl SourceArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: ArtifactRole, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(role, path.into());
        self
    }

    pub fn get(&self, role: ArtifactRole) -> Option<&Path> {
        self.paths.get(&role).map(PathBuf::as_path)
    }

    pub fn has(&self, role: ArtifactRole) -> bool {
        self.paths.contains_key(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArtifactRole, &Path)> {
        self.paths.iter().map(|(r, p)| (*r, p.as_path()))
    }

    /// The file that contributes the core definition: the `Core` variant
    /// when present, else the plain core definition.
    pub fn core_source(&self) -> Option<&Path> {
        self.get(ArtifactRole::CoreDefinitionCore)
            .or_else(|| self.get(ArtifactRole::CoreDefinition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_role_suffixes() {
        assert_eq!(ArtifactRole::CoreDefinition.file_name("ABViewLabel"), "ABViewLabel.js");
        assert_eq!(ArtifactRole::CoreDefinitionCore.file_name("ABViewLabel"), "ABViewLabelCore.js");
        assert_eq!(ArtifactRole::UiComponent.file_name("ABViewLabel"), "ABViewLabelComponent.js");
        assert_eq!(ArtifactRole::DesignEditor.file_name("ABViewLabel"), "ABViewLabel.js");
    }

    #[test]
    fn core_source_prefers_core_variant() {
        let set = SourceArtifactSet::new()
            .with(ArtifactRole::CoreDefinition, "/a/Foo.js")
            .with(ArtifactRole::CoreDefinitionCore, "/a/FooCore.js");
        assert_eq!(set.core_source(), Some(Path::new("/a/FooCore.js")));

        let set = SourceArtifactSet::new().with(ArtifactRole::CoreDefinition, "/a/Foo.js");
        assert_eq!(set.core_source(), Some(Path::new("/a/Foo.js")));
        assert!(!set.has(ArtifactRole::DesignEditor));
        assert_eq!(set.len(), 1);
    }
}
