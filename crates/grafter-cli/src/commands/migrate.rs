//! Implementation of `grafter migrate view`.
//!
//! Runs the core migration pipeline and renders its report: a step table
//! for humans, the full report for `--output-format json`.

use chrono::Local;
use owo_colors::OwoColorize;
use tracing::{info, instrument};

use grafter_core::{
    application::{MigrationReport, MigrationRequest, StepReport, StepStatus},
    error::{Context as _, GrafterResult},
};

use crate::{
    cli::{GlobalArgs, MigrateCommands, MigrateViewArgs},
    commands::{self, Adapters},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: MigrateCommands, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        MigrateCommands::View(args) => migrate_view(args, global, config, output),
    }
}

#[instrument(skip_all, fields(plugin = %args.plugin, view = %args.view))]
fn migrate_view(args: MigrateViewArgs, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut options = config.migration_options();
    if args.no_create {
        options.create_missing_plugin = false;
    }

    if !args.yes && !output.is_json() {
        let prompt = format!("Migrate view '{}' into plugin '{}'?", args.view, args.plugin);
        if !commands::confirm(&global, &prompt, true)? {
            return Err(CliError::Cancelled);
        }
    }

    let start = commands::start_dir(&global)?;
    let service = Adapters::local(&config).migration_service(options);
    let request = MigrationRequest::new(start, &args.plugin, &args.view);

    let spinner = output.spinner(&format!("Migrating {} into {}", args.view, args.plugin));
    let result = service.migrate_view(&request);
    spinner.finish_and_clear();
    let report = result?;

    info!(run_id = %report.run_id, steps = report.steps.len(), "Migration reported");

    if output.is_json() {
        output.print_raw(&report_json(&report)?)?;
        return Ok(());
    }
    show_report(&report, &output)
}

fn report_json(report: &MigrationReport) -> GrafterResult<String> {
    serde_json::to_string_pretty(report).context("serialising migration report")
}

fn show_report(report: &MigrationReport, output: &OutputManager) -> CliResult<()> {
    let finished = report.finished_at.with_timezone(&Local);
    output.header(&format!(
        "Migrated '{}' into '{}' ({})",
        report.unit,
        report.plugin,
        finished.format("%Y-%m-%d %H:%M:%S")
    ))?;
    output.print(&format!("  root:    {}", report.root.display()))?;
    output.print(&format!("  plugin:  {}", report.plugin_dir.display()))?;
    if let Some(key) = &report.legacy_key {
        output.print(&format!("  key:     {key}"))?;
    }
    if let Some(primary) = &report.primary_output {
        output.print(&format!("  entry:   {}", primary.display()))?;
    }
    output.print("")?;

    for step in &report.steps {
        output.print(&step_line(step, output.supports_color()))?;
    }
    output.print("")?;

    let skipped = report.count(StepStatus::Skipped) + report.count(StepStatus::Incomplete);
    let summary = format!(
        "{} applied, {} unchanged, {} skipped or incomplete",
        report.count(StepStatus::Applied),
        report.count(StepStatus::Unchanged),
        skipped
    );
    if skipped == 0 {
        output.success(&summary)?;
    } else {
        output.warning(&summary)?;
    }
    Ok(())
}

fn status_label(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Applied => "applied",
        StepStatus::Unchanged => "unchanged",
        StepStatus::Incomplete => "incomplete",
        StepStatus::Skipped => "skipped",
    }
}

fn step_line(step: &StepReport, color: bool) -> String {
    let label = format!("{:<10}", status_label(step.status));
    let label = if !color {
        label
    } else {
        match step.status {
            StepStatus::Applied => label.green().to_string(),
            StepStatus::Unchanged => label.dimmed().to_string(),
            StepStatus::Incomplete | StepStatus::Skipped => label.yellow().to_string(),
        }
    };
    match &step.detail {
        Some(detail) => format!("  {label} {:<28} {detail}", step.step),
        None => format!("  {label} {}", step.step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_step_line_includes_detail() {
        let step = StepReport::skipped("link designer registry", "no designer tree");
        assert_eq!(
            step_line(&step, false),
            "  skipped    link designer registry       no designer tree"
        );
    }

    #[test]
    fn plain_step_line_without_detail() {
        let step = StepReport::unchanged("ensure placeholders");
        assert_eq!(step_line(&step, false), "  unchanged  ensure placeholders");
    }
}
