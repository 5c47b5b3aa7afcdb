//! Command handlers, one module per subcommand.
//!
//! Shared here: adapter wiring, project root discovery and the prompts.

use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use grafter_adapters::{FilesystemTemplateLoader, LocalFilesystem, SimpleRenderer};
use grafter_core::application::{
    MigrationOptions, MigrationService, PluginService,
    ports::{Filesystem, TemplateGenerator},
    services::Locator,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod migrate;
pub mod new;
pub mod view;

// ── Adapter wiring ────────────────────────────────────────────────────────────

/// Production adapters: the local disk and the embedded templates plus any
/// configured overrides.
pub struct Adapters {
    pub filesystem: Arc<dyn Filesystem>,
    pub generator: Arc<dyn TemplateGenerator>,
}

impl Adapters {
    pub fn local(config: &AppConfig) -> Self {
        let renderer = match FilesystemTemplateLoader::resolve(config.templates_dir()) {
            Some(loader) => {
                debug!(dir = %loader.templates_dir().display(), "Using template overrides");
                SimpleRenderer::with_overrides(loader)
            }
            None => SimpleRenderer::new(),
        };
        Self {
            filesystem: Arc::new(LocalFilesystem::new()),
            generator: Arc::new(renderer),
        }
    }

    pub fn plugin_service(&self) -> PluginService {
        PluginService::new(Arc::clone(&self.filesystem), Arc::clone(&self.generator))
    }

    pub fn migration_service(&self, options: MigrationOptions) -> MigrationService {
        MigrationService::new(Arc::clone(&self.filesystem), Arc::clone(&self.generator), options)
    }
}

/// Directory the root search starts from: `--root`, else the working
/// directory.
pub fn start_dir(global: &GlobalArgs) -> CliResult<PathBuf> {
    global
        .start_dir()
        .with_cli_context(|| "reading the current directory")
}

/// The project root above `--root` or the working directory.
pub fn project_root(global: &GlobalArgs, config: &AppConfig, locator: &Locator) -> CliResult<PathBuf> {
    let start = start_dir(global)?;
    Ok(locator.find_root(&start, config.migration.max_root_depth)?)
}

// ── Prompts ───────────────────────────────────────────────────────────────────

/// Whether prompts may be shown at all.
pub fn can_prompt(global: &GlobalArgs) -> bool {
    !global.quiet && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Ask a yes/no question, `default` when prompting is impossible.
pub fn confirm(global: &GlobalArgs, prompt: &str, default: bool) -> CliResult<bool> {
    if !can_prompt(global) {
        return Ok(default);
    }
    ask_confirm(prompt, default)
}

/// Ask for a line of text, `default` when prompting is impossible.
pub fn ask(global: &GlobalArgs, prompt: &str, default: &str) -> CliResult<String> {
    if !can_prompt(global) {
        return Ok(default.to_owned());
    }
    ask_text(prompt, default)
}

#[cfg(feature = "interactive")]
fn ask_confirm(prompt: &str, default: bool) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

#[cfg(feature = "interactive")]
fn ask_text(prompt: &str, default: &str) -> CliResult<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .map_err(prompt_error)
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => CliError::Cancelled,
        dialoguer::Error::IO(e) => CliError::IoError {
            message: "reading prompt input".into(),
            source: e,
        },
    }
}

#[cfg(not(feature = "interactive"))]
fn ask_confirm(prompt: &str, default: bool) -> CliResult<bool> {
    use std::io::{self, Write};

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    eprint!("{prompt} {hint} ");
    io::stderr().flush().with_cli_context(|| "failed to flush stderr")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(match input.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

#[cfg(not(feature = "interactive"))]
fn ask_text(_prompt: &str, default: &str) -> CliResult<String> {
    Ok(default.to_owned())
}
