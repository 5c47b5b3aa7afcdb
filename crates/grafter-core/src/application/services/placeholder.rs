//! Placeholder ensurer: a scaffold must exist before anything is transplanted.

use tracing::info;

use crate::{
    application::{
        ports::Filesystem,
        services::{TemplateService, ViewScaffold, ViewScaffolder},
    },
    domain::MigrationContext,
    error::GrafterResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholders {
    /// All four target files were already there.
    AlreadyPresent,
    Generated(ViewScaffold),
}

/// Make sure the entry point, component, properties and editor targets of
/// `ctx` exist, scaffolding the view when any of them is missing.
pub fn ensure_placeholders(
    filesystem: &dyn Filesystem,
    templates: &TemplateService,
    ctx: &MigrationContext,
) -> GrafterResult<Placeholders> {
    let missing = ctx
        .placeholder_targets()
        .iter()
        .filter(|p| !filesystem.exists(p))
        .count();
    if missing == 0 {
        info!("Placeholder files already exist");
        return Ok(Placeholders::AlreadyPresent);
    }

    info!(missing, "Generating placeholder files");
    let scaffold = ViewScaffolder::new(filesystem, templates).scaffold(
        ctx.plugin_dir(),
        ctx.plugin_name(),
        ctx.names(),
    )?;
    Ok(Placeholders::Generated(scaffold))
}
