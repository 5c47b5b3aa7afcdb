//! Implementation of the `grafter view` command.

use tracing::instrument;

use crate::{
    cli::{GlobalArgs, ViewArgs},
    commands::{self, Adapters},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Scaffold a view into an existing plugin and wire it into the entry
/// files, webpack config and manifest.
#[instrument(skip_all, fields(plugin = %args.plugin))]
pub fn execute(args: ViewArgs, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let adapters = Adapters::local(&config);
    let service = adapters.plugin_service();
    let root = commands::project_root(&global, &config, service.locator())?;

    let view = args.view.as_deref().unwrap_or(&args.plugin);
    let scaffold = service.add_view(&root, &args.plugin, view)?;

    if output.is_json() {
        output.json(&scaffold)?;
        return Ok(());
    }

    if scaffold.created.is_empty() && scaffold.updated.is_empty() {
        output.info(&format!("View '{view}' already exists in '{}', nothing to do", args.plugin))?;
        return Ok(());
    }

    output.success(&format!("View '{view}' added to '{}'", args.plugin))?;
    for path in &scaffold.created {
        output.print(&format!("  created  {}", path.display()))?;
    }
    for path in &scaffold.existing {
        output.print(&format!("  kept     {}", path.display()))?;
    }
    for path in &scaffold.updated {
        output.print(&format!("  updated  {}", path.display()))?;
    }
    Ok(())
}
