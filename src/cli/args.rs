//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use polydoc::config::DEFAULT_CONFIG_NAME;

/// Validate and resolve multi-locale documentation site configs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched for upward when not found (default: polydoc.toml)
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG_NAME, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load and validate the config, optionally checking links against content
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// List every nav and sidebar link
    #[command(visible_alias = "l")]
    Links {
        /// Print JSON instead of one link per line
        #[arg(long)]
        json: bool,
    },

    /// Print the page context for a request path as JSON
    #[command(visible_alias = "r")]
    Resolve {
        /// Request path, e.g. /es/guides/mcp/mcp-setup-guide
        path: String,
    },

    /// Print merged search strings for a locale as JSON
    #[command(visible_alias = "s")]
    Search {
        /// Locale code, e.g. es or pt-BR
        locale: String,
    },
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Content directory whose markdown files are the known pages
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Treat unknown config keys as errors
    #[arg(long)]
    pub deny_unknown: bool,
}
