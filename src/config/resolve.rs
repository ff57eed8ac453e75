//! Resolution over a loaded [`SiteConfig`].
//!
//! - default locale selection
//! - request path -> [`PageContext`]
//! - flattened nav/sidebar links, and checking them against a [`PageSet`]

use rayon::prelude::*;
use serde::Serialize;

use super::{
    ConfigError, FieldPath, LocaleCode, LocaleConfig, NavItem, OrderedMap, SearchConfig,
    SidebarEntry, SiteConfig, sidebar_items,
};
use crate::debug;
use crate::link::{LinkKind, is_path_prefix, normalize_route};
use crate::pages::PageSet;
use crate::report::{OrphanSidebar, ValidationReport};

// ============================================================================
// Default locale
// ============================================================================

/// The locale served at `/` if there is one, else the first declared.
pub fn select_default_locale(
    locales: &OrderedMap<LocaleCode, LocaleConfig>,
) -> Option<&LocaleCode> {
    locales
        .iter()
        .find(|(_, locale)| locale.is_root())
        .or_else(|| locales.first())
        .map(|(code, _)| code)
}

// ============================================================================
// Links
// ============================================================================

/// Where a link was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSource {
    Nav,
    Sidebar,
}

/// A nav or sidebar link with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRef {
    pub locale: LocaleCode,
    pub source: LinkSource,
    /// Path of the `link` field, e.g. `locales.es.theme.nav[2].link`.
    pub field: FieldPath,
    pub text: String,
    pub link: String,
}

// ============================================================================
// Page context
// ============================================================================

/// Everything the renderer needs for one request path.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext<'a> {
    pub path: String,
    pub locale: &'a LocaleCode,
    pub lang: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub site_title: &'a str,
    pub nav: &'a [NavItem],
    /// Matching sidebar key; `None` when no sidebar applies.
    pub sidebar_prefix: Option<&'a str>,
    pub sidebar: &'a [SidebarEntry],
    pub search: &'a SearchConfig,
}

impl SiteConfig {
    #[inline]
    pub fn default_locale(&self) -> &LocaleCode {
        &self.default_locale
    }

    /// Look up a locale by code, in any spelling that normalizes to it.
    pub fn locale(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.get(LocaleCode::normalize(code).as_str())
    }

    /// Locale owning `path`: the one with the longest matching `link`,
    /// falling back to the default locale.
    pub fn locale_for_path(&self, path: &str) -> Option<(&LocaleCode, &LocaleConfig)> {
        self.locales
            .iter()
            .filter(|(_, locale)| owns_path(&locale.link, path))
            .max_by_key(|(_, locale)| locale.link.len())
            .or_else(|| {
                self.locales
                    .iter()
                    .find(|(code, _)| *code == &self.default_locale)
            })
    }

    /// Resolve what a page at `path` renders with.
    ///
    /// Returns `None` only for a config without locales.
    pub fn resolve_page(&self, path: &str) -> Option<PageContext<'_>> {
        let path = normalize_route(path);
        let (code, locale) = self.locale_for_path(&path)?;
        let sidebar = locale.theme.sidebar_match(&path);

        Some(PageContext {
            locale: code,
            lang: &locale.lang,
            title: locale.title_or(&self.title),
            description: locale.description_or(&self.description),
            site_title: locale.site_title_or(&self.title),
            nav: &locale.theme.nav,
            sidebar_prefix: sidebar.map(|(prefix, _)| prefix),
            sidebar: sidebar.map(|(_, entries)| entries).unwrap_or_default(),
            search: &locale.theme.search,
            path,
        })
    }

    /// Every nav and sidebar link, locale by locale in document order.
    pub fn links(&self) -> Vec<LinkRef> {
        self.locales
            .iter()
            .flat_map(|(code, locale)| locale_links(code, locale))
            .collect()
    }

    /// Check internal links against `pages` and look for orphan sidebars.
    ///
    /// Dead links are fatal unless `ignore_dead_links` is set. Use
    /// [`SiteConfig::check_links`] for the report alone.
    pub fn resolve_links(&self, pages: &PageSet) -> Result<ValidationReport, ConfigError> {
        let report = self.check_links(pages);
        if report.has_dead_links() && !self.ignore_dead_links {
            return Err(ConfigError::DeadLinks(report));
        }
        Ok(report)
    }

    /// Build the link report without deciding whether it is fatal.
    pub fn check_links(&self, pages: &PageSet) -> ValidationReport {
        let locales: Vec<_> = self.locales.iter().collect();
        let reports: Vec<_> = locales
            .par_iter()
            .map(|(code, locale)| check_locale(code, locale, pages))
            .collect();

        let report = reports
            .into_iter()
            .fold(ValidationReport::default(), ValidationReport::merge);
        debug!(
            "links";
            "checked {} locales against {} pages: {}",
            locales.len(),
            pages.len(),
            report
        );
        report
    }
}

/// Whether a locale served at `link` owns the request `path`.
fn owns_path(link: &str, path: &str) -> bool {
    !link.is_empty() && (is_path_prefix(link, path) || path == link.trim_end_matches('/'))
}

fn locale_links(code: &LocaleCode, locale: &LocaleConfig) -> Vec<LinkRef> {
    let theme = FieldPath::root().key("locales").key(code.as_str()).key("theme");
    let mut links = Vec::new();

    let nav = theme.key("nav");
    for (i, item) in locale.theme.nav.iter().enumerate() {
        links.push(LinkRef {
            locale: code.clone(),
            source: LinkSource::Nav,
            field: nav.index(i).key("link"),
            text: item.text.clone(),
            link: item.link.clone(),
        });
    }

    let sidebar = theme.key("sidebar");
    for (prefix, entries) in locale.theme.sidebar.iter() {
        for (item, field) in sidebar_items(entries, &sidebar.key(prefix)) {
            links.push(LinkRef {
                locale: code.clone(),
                source: LinkSource::Sidebar,
                field: field.key("link"),
                text: item.text.clone(),
                link: item.link.clone(),
            });
        }
    }
    links
}

fn check_locale(code: &LocaleCode, locale: &LocaleConfig, pages: &PageSet) -> ValidationReport {
    let mut report = ValidationReport::default();

    for link in locale_links(code, locale) {
        if let Some(path) = LinkKind::parse(&link.link).site_root()
            && !pages.contains(path)
        {
            report.add_dead_link(link);
        }
    }

    // Stricter than a plain prefix match: the home route is a prefix of
    // every sidebar, so a nav link to it reaches none of them.
    let home = normalize_route(&locale.link);
    let entry_points: Vec<String> = locale
        .theme
        .nav
        .iter()
        .filter_map(|item| LinkKind::parse(&item.link).site_root())
        .map(normalize_route)
        .filter(|route| *route != home)
        .collect();

    let sidebar = FieldPath::root()
        .key("locales")
        .key(code.as_str())
        .key("theme")
        .key("sidebar");
    for prefix in locale.theme.sidebar.keys() {
        let reachable = entry_points
            .iter()
            .any(|route| is_path_prefix(route, prefix) || is_path_prefix(prefix, route));
        if !reachable {
            report.add_orphan(OrphanSidebar {
                locale: code.clone(),
                prefix: prefix.clone(),
                field: sidebar.key(prefix),
            });
        }
    }
    report
}
