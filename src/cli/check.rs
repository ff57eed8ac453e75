//! `polydoc check`: validate the config and, with `--content`, its links.

use anyhow::{Context, Result, bail};
use polydoc::config::{ConfigError, UnknownFields};
use polydoc::pages::PageSet;
use polydoc::utils::plural_count;
use polydoc::{debug, log};

use super::{CheckArgs, Cli, load_config};

pub fn run_check(cli: &Cli, args: &CheckArgs) -> Result<()> {
    let unknown = if args.deny_unknown {
        UnknownFields::Deny
    } else {
        UnknownFields::Warn
    };
    let (config, _) = load_config(cli, unknown)?;

    log!(
        "check";
        "config ok: {}, default `{}`",
        plural_count(config.locales.len(), "locale"),
        config.default_locale()
    );

    let Some(content) = &args.content else {
        return Ok(());
    };

    let pages = PageSet::scan(content)
        .with_context(|| format!("failed to scan `{}`", content.display()))?;
    if pages.is_empty() {
        bail!("no markdown files under `{}`", content.display());
    }
    debug!("check"; "found {}", plural_count(pages.len(), "page"));

    let report = match config.resolve_links(&pages) {
        Ok(report) => report,
        Err(ConfigError::DeadLinks(report)) => {
            report.print();
            bail!("{report}");
        }
        Err(err) => return Err(err.into()),
    };
    report.print();
    if report.has_dead_links() {
        log!("warning"; "{} (ignore_dead_links = true)", report);
    } else {
        log!("check"; "{}", report);
    }
    Ok(())
}
