//! Implementation of the `grafter list` command.

use grafter_core::application::{PluginInfo, ports::TemplateInfo};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    commands::{self, Adapters},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = Adapters::local(&config).plugin_service();

    // `--output-format json` implies `--format json`.
    let format = if output.is_json() { ListFormat::Json } else { args.format };

    if args.templates {
        let templates = service.templates().list()?;
        return show_templates(&templates, format, &output);
    }

    let root = commands::project_root(&global, &config, service.locator())?;
    let plugins = service.list_plugins(&root)?;
    show_plugins(&plugins, format, &output)
}

fn show_plugins(plugins: &[PluginInfo], format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Json => output.json(&plugins)?,
        ListFormat::List => {
            for plugin in plugins {
                output.print_raw(&plugin.dir_name)?;
            }
        }
        ListFormat::Table => {
            if plugins.is_empty() {
                output.info("No plugins found")?;
                return Ok(());
            }
            output.header("Plugins:")?;
            let width = plugins.iter().map(|p| p.name.len()).max().unwrap_or(0);
            for plugin in plugins {
                output.print(&plugin_row(plugin, width))?;
            }
        }
    }
    Ok(())
}

fn plugin_row(plugin: &PluginInfo, width: usize) -> String {
    let records = if plugin.has_manifest {
        format!("{} manifest records", plugin.records)
    } else {
        "no manifest".to_owned()
    };
    format!("  {:<width$}  {:<32}  {records}", plugin.name, plugin.dir_name)
}

fn show_templates(templates: &[TemplateInfo], format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Json => output.json(&templates)?,
        ListFormat::List => {
            for template in templates {
                output.print_raw(&template.name)?;
            }
        }
        ListFormat::Table => {
            output.header("Template sets:")?;
            for template in templates {
                output.print(&format!("  {} ({}): {}", template.name, template.set, template.description))?;
                for file in &template.files {
                    let mark = if template.overridden.contains(file) { " (override)" } else { "" };
                    output.print(&format!("      {file}{mark}"))?;
                }
            }
        }
    }
    Ok(())
}
