//! Implementation of the `grafter new` command.
//!
//! Responsibility: resolve the project root, collect the plugin metadata
//! (flags, then prompts, then configured defaults), call the core plugin
//! service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use grafter_core::{
    application::ApplicationError,
    domain::{PluginDefaults, ProjectLayout, names::plugin_dir_name},
    error::GrafterError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    commands::{self, Adapters},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `grafter new` command.
///
/// 1. Find the project root (falls back to the current directory)
/// 2. Collect description, author and icon
/// 3. Confirm unless `--yes`
/// 4. Render the plugin template set into `developer/plugins/`
#[instrument(skip_all, fields(plugin = %args.name))]
pub fn execute(args: NewArgs, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if args.name.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "plugin name cannot be empty".into(),
        });
    }

    let adapters = Adapters::local(&config);
    let service = adapters.plugin_service();

    let root = match commands::project_root(&global, &config, service.locator()) {
        Ok(root) => root,
        Err(CliError::Core(e @ GrafterError::Application(ApplicationError::RootNotFound { .. }))) => {
            let cwd = commands::start_dir(&global)?;
            warn!(error = %e, cwd = %cwd.display(), "No project root found, creating below the start directory");
            cwd
        }
        Err(e) => return Err(e),
    };

    let defaults = collect_defaults(&args, &global, &config)?;
    let target = target_dir(&root, &args.name);
    debug!(?defaults, target = %target.display(), "Plugin metadata resolved");

    if !args.yes && !global.quiet && !output.is_json() {
        show_summary(&args.name, &defaults, &target, &output)?;
        if !commands::confirm(&global, "Create this plugin?", true)? {
            return Err(CliError::Cancelled);
        }
    }

    let dir = service.create_plugin(&root, &args.name, &defaults)?;
    info!(path = %dir.display(), "Plugin created");

    if output.is_json() {
        output.json(&serde_json::json!({
            "plugin": args.name.trim(),
            "path": dir,
        }))?;
        return Ok(());
    }

    output.success(&format!("Plugin '{}' created at {}", args.name.trim(), dir.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  grafter view \"{}\" <ViewName>", args.name.trim()))?;
    output.print(&format!("  cd {} && npm install", dir.display()))?;
    Ok(())
}

/// Flags win, then prompts (seeded with the configured values), then config.
fn collect_defaults(args: &NewArgs, global: &GlobalArgs, config: &AppConfig) -> CliResult<PluginDefaults> {
    let configured = config.plugin_defaults();
    let interactive = !args.yes;

    let pick = |flag: &Option<String>, prompt: &str, fallback: &str| -> CliResult<String> {
        match flag {
            Some(value) => Ok(value.clone()),
            None if interactive => commands::ask(global, prompt, fallback),
            None => Ok(fallback.to_owned()),
        }
    };

    Ok(PluginDefaults {
        description: pick(&args.description, "Description", &configured.description)?,
        author: pick(&args.author, "Author", &configured.author)?,
        icon: pick(&args.icon, "Icon (fa-*)", &configured.icon)?,
    })
}

fn target_dir(root: &Path, name: &str) -> PathBuf {
    ProjectLayout::plugins(root).join(plugin_dir_name(name))
}

fn show_summary(name: &str, defaults: &PluginDefaults, target: &Path, out: &OutputManager) -> CliResult<()> {
    out.header("New plugin")?;
    out.print(&format!("  Name:        {}", name.trim()))?;
    out.print(&format!("  Description: {}", defaults.description))?;
    out.print(&format!("  Author:      {}", defaults.author))?;
    out.print(&format!("  Icon:        {}", defaults.icon))?;
    out.print(&format!("  Location:    {}", target.display()))?;
    out.print("")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use pretty_assertions::assert_eq;

    fn global() -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            root: None,
            log_file: None,
            output_format: OutputFormat::Plain,
        }
    }

    fn args(author: Option<&str>) -> NewArgs {
        NewArgs {
            name: "Netsuite API".into(),
            description: None,
            author: author.map(str::to_owned),
            icon: None,
            yes: true,
        }
    }

    #[test]
    fn flags_win_over_config() {
        let mut config = AppConfig::default();
        config.defaults.author = "Configured".into();

        let defaults = collect_defaults(&args(Some("Flag")), &global(), &config).unwrap();
        assert_eq!(defaults.author, "Flag");
        assert_eq!(defaults.icon, config.defaults.icon);
    }

    #[test]
    fn config_fills_missing_flags() {
        let mut config = AppConfig::default();
        config.defaults.description = "From config".into();

        let defaults = collect_defaults(&args(None), &global(), &config).unwrap();
        assert_eq!(defaults.description, "From config");
    }

    #[test]
    fn target_uses_package_directory_name() {
        assert_eq!(
            target_dir(Path::new("/p"), "Netsuite API"),
            PathBuf::from("/p/developer/plugins/ab_plugin_netsuite_api")
        );
    }
}
