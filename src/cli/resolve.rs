//! `polydoc resolve`: page context for a request path.

use anyhow::{Context, Result};
use polydoc::config::SiteConfig;

pub fn run_resolve(config: &SiteConfig, path: &str) -> Result<()> {
    let page = config
        .resolve_page(path)
        .with_context(|| format!("no locale serves `{path}`"))?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
