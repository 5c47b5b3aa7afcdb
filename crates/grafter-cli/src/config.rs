//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values threaded into
//! `MigrationOptions` and `PluginDefaults`.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `GRAFTER__SECTION__KEY` environment variables
//! 3. Config file: `--config FILE`, else `.grafter.toml` in the current
//!    directory, else the per-user file from [`AppConfig::config_path`]
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use grafter_core::{application::MigrationOptions, domain::PluginDefaults};

/// Name of the per-project config file written by `grafter init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".grafter.toml";

const ENV_PREFIX: &str = "GRAFTER";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when creating a plugin.
    pub defaults: Defaults,
    /// Migration pipeline settings.
    pub migration: MigrationConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
    pub icon: String,
    pub description: String,
}

impl Default for Defaults {
    fn default() -> Self {
        let plugin = PluginDefaults::default();
        Self {
            author: plugin.author,
            icon: plugin.icon,
            description: plugin.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub max_root_depth: usize,
    pub create_missing_plugin: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        let options = MigrationOptions::default();
        Self {
            max_root_depth: options.max_root_depth,
            create_missing_plugin: options.create_missing_plugin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory with `plugin/` and `view/` override sets.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::active_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&Self::default()).context("encoding built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// The file `load(None)` reads: the local file when present, else the
    /// per-user one.
    pub fn active_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() { local } else { Self::config_path() }
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.grafter.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "grafter", "grafter")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Serialise as the TOML `grafter init` writes.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("encoding configuration as TOML")
    }

    /// Look up a dotted key such as `migration.max_root_depth`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for segment in key.split('.') {
            value = value.get_mut(segment)?.take();
        }
        Some(value)
    }

    pub fn migration_options(&self) -> MigrationOptions {
        MigrationOptions {
            max_root_depth: self.migration.max_root_depth,
            create_missing_plugin: self.migration.create_missing_plugin,
        }
    }

    pub fn plugin_defaults(&self) -> PluginDefaults {
        PluginDefaults {
            description: self.defaults.description.clone(),
            author: self.defaults.author.clone(),
            icon: self.defaults.icon.clone(),
        }
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates.local_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_core() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.migration.max_root_depth, 20);
        assert!(cfg.migration.create_missing_plugin);
        assert_eq!(cfg.plugin_defaults(), PluginDefaults::default());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("grafter.toml");
        fs::write(
            &path,
            "[defaults]\nauthor = \"Jane\"\n\n[migration]\nmax_root_depth = 5\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.defaults.author, "Jane");
        assert_eq!(cfg.migration.max_root_depth, 5);
        // untouched keys keep their defaults
        assert_eq!(cfg.defaults.icon, "fa-puzzle-piece");
        assert!(cfg.migration.create_missing_plugin);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn toml_round_trips_through_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("grafter.toml");
        let mut cfg = AppConfig::default();
        cfg.templates.local_path = Some(PathBuf::from("/opt/templates"));
        fs::write(&path, cfg.to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("migration.max_root_depth"),
            Some(serde_json::json!(20))
        );
        assert_eq!(cfg.get("defaults.nope"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
