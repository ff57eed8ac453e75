//! Per-locale theme configuration.
//!
//! # Example
//!
//! ```toml
//! [locales.en.theme]
//! site_title = "Team Docs"
//! nav = [
//!     { text = "Home", link = "/en/" },
//!     { text = "Guides", link = "/en/guides/" },
//! ]
//! outline_title = "On this page"
//!
//! [locales.en.theme.footer]
//! message = "Internal documentation"
//! copyright = "Copyright © 2026"
//!
//! [locales.en.theme.edit_link]
//! pattern = "https://github.com/org/repo/edit/main/docs/:path"
//! text = "Edit this page on GitHub"
//!
//! [[locales.en.theme.social_links]]
//! icon = "github"
//! link = "https://github.com/org"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, OrderedMap, SchemaErrorKind};
use serde::{Deserialize, Serialize};

use super::{NavItem, SearchConfig, SidebarEntry};

/// Placeholder substituted with the page's source path in edit links.
pub const EDIT_PATH_PLACEHOLDER: &str = ":path";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Title in the top bar. Empty falls back to the site title.
    pub site_title: String,

    /// Navigation bar, in display order.
    pub nav: Vec<NavItem>,

    /// Sidebar trees keyed by path prefix (`/en/guides/`).
    pub sidebar: OrderedMap<String, Vec<SidebarEntry>>,

    pub search: SearchConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLinkConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<LastUpdatedConfig>,

    pub social_links: Vec<SocialLink>,

    // UI label overrides; the renderer's defaults apply when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to_top_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_menu_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode_switch_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub message: String,
    pub copyright: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditLinkConfig {
    /// URL template containing `:path`.
    pub pattern: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastUpdatedConfig {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    /// Icon name understood by the theme (`github`, `discord`, ...).
    pub icon: String,
    pub link: String,
}

impl EditLinkConfig {
    /// Edit URL for a page source path relative to the docs root.
    ///
    /// `es/guides/index.md` with pattern `.../edit/main/docs/:path` gives
    /// `.../edit/main/docs/es/guides/index.md`.
    pub fn url_for(&self, page_path: &str) -> String {
        self.pattern
            .replace(EDIT_PATH_PLACEHOLDER, page_path.trim_start_matches('/'))
    }
}

impl ThemeConfig {
    /// Edit URL for a page, if edit links are configured.
    pub fn edit_url(&self, page_path: &str) -> Option<String> {
        self.edit_link.as_ref().map(|e| e.url_for(page_path))
    }

    /// Longest sidebar prefix of `path`, with its entries.
    pub fn sidebar_match(&self, path: &str) -> Option<(&str, &[SidebarEntry])> {
        self.sidebar
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, entries)| (prefix.as_str(), entries.as_slice()))
    }

    /// Sidebar for a request path; empty when no prefix matches.
    pub fn sidebar_for(&self, path: &str) -> &[SidebarEntry] {
        self.sidebar_match(path)
            .map(|(_, entries)| entries)
            .unwrap_or_default()
    }

    /// Validate against the owning locale's `prefix` (its `link`).
    pub(crate) fn validate(&self, prefix: &str, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        let nav = field.key("nav");
        for (i, item) in self.nav.iter().enumerate() {
            item.validate(prefix, &nav.index(i), diag);
        }

        let sidebar = field.key("sidebar");
        for (key, entries) in self.sidebar.iter() {
            let key_field = sidebar.key(key);
            validate_sidebar_prefix(key, prefix, &key_field, diag);
            for (i, entry) in entries.iter().enumerate() {
                entry.validate(prefix, &key_field.index(i), diag);
            }
        }

        self.search.validate(&field.key("search"), diag);

        if let Some(edit) = &self.edit_link {
            edit.validate(&field.key("edit_link"), diag);
        }

        let social = field.key("social_links");
        for (i, link) in self.social_links.iter().enumerate() {
            link.validate(&social.index(i), diag);
        }
    }
}

/// A sidebar key must be a directory path under the locale prefix.
fn validate_sidebar_prefix(key: &str, prefix: &str, field: &FieldPath, diag: &mut ConfigDiagnostics) {
    if !key.starts_with('/') || !key.ends_with('/') {
        diag.error_with_hint(
            field.clone(),
            SchemaErrorKind::Invalid,
            format!("sidebar prefix `{key}` must start and end with `/`"),
            format!("e.g. \"{prefix}guides/\""),
        );
    } else if !key.starts_with(prefix) {
        diag.error(
            field.clone(),
            SchemaErrorKind::PrefixMismatch,
            format!("sidebar prefix `{key}` is outside of locale prefix `{prefix}`"),
        );
    }
}

impl EditLinkConfig {
    fn validate(&self, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        let pattern = field.key("pattern");
        if self.pattern.trim().is_empty() {
            diag.missing(pattern);
        } else if !self.pattern.contains(EDIT_PATH_PLACEHOLDER) {
            diag.error_with_hint(
                pattern,
                SchemaErrorKind::Invalid,
                "edit link pattern has no `:path` placeholder",
                "e.g. \"https://github.com/org/repo/edit/main/docs/:path\"",
            );
        } else {
            validate_http_url(&self.url_for("index.md"), pattern, diag);
        }

        if self.text.trim().is_empty() {
            diag.missing(field.key("text"));
        }
    }
}

impl SocialLink {
    fn validate(&self, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        if self.icon.trim().is_empty() {
            diag.missing(field.key("icon"));
        }
        if self.link.trim().is_empty() {
            diag.missing(field.key("link"));
        } else {
            validate_http_url(&self.link, field.key("link"), diag);
        }
    }
}

/// URL must parse, use http(s), and have a host.
fn validate_http_url(raw: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    match url::Url::parse(raw) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    SchemaErrorKind::Invalid,
                    format!("scheme '{}' not supported, must be http or https", parsed.scheme()),
                    "use format like https://example.com",
                );
            } else if parsed.host_str().is_none() {
                diag.error_with_hint(
                    field,
                    SchemaErrorKind::Invalid,
                    "URL must have a valid host",
                    "use format like https://example.com",
                );
            }
        }
        Err(e) => {
            diag.error_with_hint(
                field,
                SchemaErrorKind::Invalid,
                format!("invalid URL: {e}"),
                "use format like https://example.com",
            );
        }
    }
}
