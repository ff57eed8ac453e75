//! Link validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::{FieldPath, LinkRef, LocaleCode};
use crate::utils::plural_s;

/// A sidebar whose prefix no nav entry of its locale leads into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanSidebar {
    pub locale: LocaleCode,
    pub prefix: String,
    pub field: FieldPath,
}

/// Outcome of checking nav and sidebar links against known pages.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationReport {
    /// Unresolved link targets, each with every entry that references it.
    pub dead_links: BTreeMap<String, Vec<LinkRef>>,
    /// Sidebars unreachable from their locale's nav.
    pub orphan_sidebars: Vec<OrphanSidebar>,
}

impl ValidationReport {
    /// Record an unresolved link.
    pub fn add_dead_link(&mut self, link: LinkRef) {
        self.dead_links
            .entry(link.link.clone())
            .or_default()
            .push(link);
    }

    pub fn add_orphan(&mut self, orphan: OrphanSidebar) {
        self.orphan_sidebars.push(orphan);
    }

    /// Fold another report into this one, keeping `self`'s entries first.
    pub fn merge(mut self, other: Self) -> Self {
        for (path, refs) in other.dead_links {
            self.dead_links.entry(path).or_default().extend(refs);
        }
        self.orphan_sidebars.extend(other.orphan_sidebars);
        self
    }

    /// Unresolved paths, sorted.
    pub fn dead_paths(&self) -> impl Iterator<Item = &str> {
        self.dead_links.keys().map(String::as_str)
    }

    /// Count of distinct unresolved paths.
    pub fn dead_link_count(&self) -> usize {
        self.dead_links.len()
    }

    /// Count of entries pointing at unresolved paths.
    pub fn reference_count(&self) -> usize {
        self.dead_links.values().map(Vec::len).sum()
    }

    pub fn orphan_count(&self) -> usize {
        self.orphan_sidebars.len()
    }

    pub fn has_dead_links(&self) -> bool {
        !self.dead_links.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.dead_links.is_empty() && self.orphan_sidebars.is_empty()
    }

    /// Print the full report to stderr (dead links -> orphan sidebars).
    pub fn print(&self) {
        if !self.dead_links.is_empty() {
            eprintln!();
            let count = self.dead_link_count();
            eprintln!(
                "{} {}",
                "dead links".red().bold(),
                format!("({count} path{})", plural_s(count)).dimmed()
            );
            for (path, refs) in &self.dead_links {
                eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
                for r in refs {
                    eprintln!("{} {} {}", "→".red(), r.field, r.text.dimmed());
                }
            }
        }

        if !self.orphan_sidebars.is_empty() {
            eprintln!();
            let count = self.orphan_count();
            eprintln!(
                "{} {}",
                "orphan sidebars".yellow().bold(),
                format!("({count} prefix{})", if count == 1 { "" } else { "es" }).dimmed()
            );
            for orphan in &self.orphan_sidebars {
                eprintln!(
                    "{} {} no nav entry in `{}` leads into `{}`",
                    "→".yellow(),
                    orphan.field,
                    orphan.locale,
                    orphan.prefix
                );
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dead = self.dead_link_count();
        let orphans = self.orphan_count();

        if dead == 0 && orphans == 0 {
            return write!(f, "{}", "all links resolved".green());
        }
        write!(
            f,
            "{} {} {}",
            "found".dimmed(),
            dead.to_string().red().bold(),
            format!("dead link{}", plural_s(dead)).dimmed()
        )?;
        if orphans > 0 {
            write!(
                f,
                "{} {} {}",
                ",".dimmed(),
                orphans.to_string().yellow().bold(),
                format!("orphan sidebar{}", plural_s(orphans)).dimmed()
            )?;
        }
        Ok(())
    }
}
