//! `polydoc search`: merged search strings for a locale.

use anyhow::Result;
use polydoc::config::SiteConfig;
use polydoc::log;

pub fn run_search(config: &SiteConfig, locale: &str) -> Result<()> {
    let merged = config.merge_search_strings(locale);
    if let Some(note) = &merged.note {
        log!("hint"; "{}", note);
    }
    println!("{}", serde_json::to_string_pretty(&merged.strings)?);
    Ok(())
}
