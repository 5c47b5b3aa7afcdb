//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "grafter",
    bin_name = "grafter",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Plugin scaffolding and legacy view migration",
    long_about = "Grafter creates AppBuilder plugin packages and moves legacy \
                  platform views into them, rewiring every registry on the way.",
    after_help = "EXAMPLES:\n\
        \x20 grafter new \"Netsuite API\"\n\
        \x20 grafter view \"Netsuite API\" Invoice\n\
        \x20 grafter migrate view Charts Label\n\
        \x20 grafter list --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new plugin package.
    #[command(
        visible_alias = "n",
        about = "Create a new plugin",
        after_help = "EXAMPLES:\n\
            \x20 grafter new \"Netsuite API\"            # developer/plugins/ab_plugin_netsuite_api\n\
            \x20 grafter new Charts --author Me -y"
    )]
    New(NewArgs),

    /// Add a view to an existing plugin.
    #[command(
        about = "Scaffold a view in an existing plugin",
        after_help = "EXAMPLES:\n\
            \x20 grafter view \"Netsuite API\" Invoice\n\
            \x20 grafter view ab_plugin_charts PieChart"
    )]
    View(ViewArgs),

    /// Migrate legacy units into plugins.
    #[command(about = "Migrate legacy units", subcommand)]
    Migrate(MigrateCommands),

    /// List plugins or template sets.
    #[command(
        visible_alias = "ls",
        about = "List plugins",
        after_help = "EXAMPLES:\n\
            \x20 grafter list\n\
            \x20 grafter list --templates\n\
            \x20 grafter list --format json"
    )]
    List(ListArgs),

    /// Initialise a Grafter configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 grafter init           # default location\n\
            \x20 grafter init --local   # .grafter.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 grafter completions bash > ~/.local/share/bash-completion/completions/grafter\n\
            \x20 grafter completions zsh  > ~/.zfunc/_grafter\n\
            \x20 grafter completions fish > ~/.config/fish/completions/grafter.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Grafter configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 grafter config get defaults.author\n\
            \x20 grafter config list\n\
            \x20 grafter config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `grafter new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Plugin display name, e.g. "Netsuite API".
    #[arg(value_name = "NAME", help = "Plugin name")]
    pub name: String,

    #[arg(long, value_name = "TEXT", help = "Plugin description")]
    pub description: Option<String>,

    #[arg(long, value_name = "NAME", help = "Plugin author")]
    pub author: Option<String>,

    /// Font Awesome icon reference.
    #[arg(long, value_name = "fa-*", help = "Font Awesome icon (fa-*)")]
    pub icon: Option<String>,

    /// Skip the prompts and use the configured defaults.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,
}

// ── view ──────────────────────────────────────────────────────────────────────

/// Arguments for `grafter view`.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Plugin name or directory name.
    #[arg(value_name = "PLUGIN")]
    pub plugin: String,

    /// View name; `Invoice` creates `FNInvoice.js`. Defaults to the plugin name.
    #[arg(value_name = "VIEW")]
    pub view: Option<String>,
}

// ── migrate ───────────────────────────────────────────────────────────────────

/// Subcommands for `grafter migrate`.
#[derive(Debug, Subcommand)]
pub enum MigrateCommands {
    /// Move a legacy platform view into a plugin.
    #[command(after_help = "EXAMPLES:\n\
        \x20 grafter migrate view Charts Label\n\
        \x20 grafter migrate view Charts Label --no-create -y\n\
        \x20 grafter --output-format json migrate view Charts Label")]
    View(MigrateViewArgs),
}

/// Arguments for `grafter migrate view`.
#[derive(Debug, Args)]
pub struct MigrateViewArgs {
    /// Target plugin; created when missing unless `--no-create`.
    #[arg(value_name = "PLUGIN")]
    pub plugin: String,

    /// Legacy view name exactly as its files are named, e.g. `Label`.
    #[arg(value_name = "VIEW")]
    pub view: String,

    /// Fail instead of creating a missing plugin.
    #[arg(long = "no-create", help = "Fail if the plugin does not exist")]
    pub no_create: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `grafter list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// List template sets instead of plugins.
    #[arg(long = "templates", help = "List template sets instead of plugins")]
    pub templates: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `grafter init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.grafter.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `grafter completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `grafter config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from(["grafter", "new", "Netsuite API", "--author", "Me", "-y"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "Netsuite API");
        assert_eq!(args.author.as_deref(), Some("Me"));
        assert!(args.yes);
    }

    #[test]
    fn view_name_is_optional() {
        let cli = Cli::parse_from(["grafter", "view", "Charts"]);
        let Commands::View(args) = cli.command else {
            panic!("expected View command");
        };
        assert_eq!(args.plugin, "Charts");
        assert!(args.view.is_none());
    }

    #[test]
    fn parse_migrate_view() {
        let cli = Cli::parse_from(["grafter", "--root", "/p", "migrate", "view", "Bar", "Foo", "--no-create"]);
        let Commands::Migrate(MigrateCommands::View(args)) = cli.command else {
            panic!("expected migrate view");
        };
        assert_eq!(args.plugin, "Bar");
        assert_eq!(args.view, "Foo");
        assert!(args.no_create);
        assert_eq!(cli.global.root.as_deref(), Some(std::path::Path::new("/p")));
    }

    #[test]
    fn migrate_requires_both_names() {
        assert!(Cli::try_parse_from(["grafter", "migrate", "view", "Bar"]).is_err());
    }

    #[test]
    fn no_color_env_accepts_any_truthy_value() {
        let flag = |var: &'static str| {
            Cli::command()
                .mut_arg("no_color", |arg| arg.env(var))
                .try_get_matches_from(["grafter", "list"])
                .map(|m| m.get_flag("no_color"))
        };
        // SAFETY: each test sets a variable no other test reads.
        unsafe {
            std::env::set_var("GRAFTER_TEST_NO_COLOR_1", "1");
            std::env::set_var("GRAFTER_TEST_NO_COLOR_0", "0");
        }
        assert!(flag("GRAFTER_TEST_NO_COLOR_1").unwrap());
        assert!(!flag("GRAFTER_TEST_NO_COLOR_0").unwrap());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["grafter", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
