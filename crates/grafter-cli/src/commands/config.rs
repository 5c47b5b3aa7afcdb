//! `grafter config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config_value(&config, &key)?;
            output.print_raw(&value)?;
        }
        ConfigCommands::List => {
            let serialised = config
                .to_toml()
                .map_err(|e| CliError::config("failed to serialise config", e))?;
            output.header("Current Configuration:")?;
            output.print(&serialised)?;
        }
        ConfigCommands::Path => {
            output.print_raw(&AppConfig::active_path().display().to_string())?;
        }
    }
    Ok(())
}

/// Scalar values print bare; tables print as JSON.
fn config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Null) => Ok(String::new()),
        Some(other) => Ok(other.to_string()),
        None => Err(CliError::InvalidInput {
            message: format!("unknown config key '{key}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_print_bare() {
        let cfg = AppConfig::default();
        assert_eq!(config_value(&cfg, "defaults.icon").unwrap(), "fa-puzzle-piece");
        assert_eq!(config_value(&cfg, "migration.create_missing_plugin").unwrap(), "true");
        assert_eq!(config_value(&cfg, "templates.local_path").unwrap(), "");
    }

    #[test]
    fn unknown_key_is_invalid_input() {
        let cfg = AppConfig::default();
        assert!(matches!(
            config_value(&cfg, "does.not.exist"),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
