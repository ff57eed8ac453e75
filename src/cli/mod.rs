//! Command-line interface module.

mod args;
pub mod check;
pub mod links;
pub mod resolve;
pub mod search;

pub use args::{CheckArgs, Cli, Commands};

use anyhow::{Context, Result};
use polydoc::config::{
    ConfigDiagnostics, SiteConfig, UnknownFields, find_config_file,
};
use polydoc::debug;
use std::path::PathBuf;

/// Locate the config file named by `-C`.
///
/// An existing path is used as is. A bare file name that does not exist
/// here is searched for in parent directories.
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    if cli.config.exists() {
        return Ok(cli.config.clone());
    }
    let found = cli
        .config
        .parent()
        .is_none_or(|p| p.as_os_str().is_empty())
        .then(|| find_config_file(&cli.config))
        .flatten();
    found.with_context(|| format!("config file `{}` not found", cli.config.display()))
}

/// Load the config, printing warnings and notes.
pub fn load_config(cli: &Cli, unknown: UnknownFields) -> Result<(SiteConfig, ConfigDiagnostics)> {
    let path = config_path(cli)?;
    debug!("config"; "loading {}", path.display());
    let (config, diag) = SiteConfig::from_path_with(&path, unknown)?;
    diag.print_warnings_and_notes();
    Ok((config, diag))
}
