//! `polydoc links`: list nav and sidebar links.

use anyhow::Result;
use owo_colors::OwoColorize;
use polydoc::config::{LinkSource, SiteConfig};

pub fn run_links(config: &SiteConfig, json: bool) -> Result<()> {
    let links = config.links();

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    for link in &links {
        let source = match link.source {
            LinkSource::Nav => "nav",
            LinkSource::Sidebar => "sidebar",
        };
        println!(
            "{:<5} {:<7} {} {}",
            link.locale.as_str(),
            source.dimmed(),
            link.link,
            link.text.dimmed()
        );
    }
    Ok(())
}
