//! polydoc - validate and resolve multi-locale documentation site configs.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use polydoc::config::UnknownFields;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    polydoc::logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Check { args } => cli::check::run_check(&cli, args),
        Commands::Links { json } => {
            let (config, _) = cli::load_config(&cli, UnknownFields::Warn)?;
            cli::links::run_links(&config, *json)
        }
        Commands::Resolve { path } => {
            let (config, _) = cli::load_config(&cli, UnknownFields::Warn)?;
            cli::resolve::run_resolve(&config, path)
        }
        Commands::Search { locale } => {
            let (config, _) = cli::load_config(&cli, UnknownFields::Warn)?;
            cli::search::run_search(&config, locale)
        }
    }
}
