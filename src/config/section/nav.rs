//! `nav` entries and the link rules shared with sidebar items.

use crate::config::{ConfigDiagnostics, FieldPath, SchemaErrorKind};
use crate::link::{LinkKind, is_path_prefix};
use serde::{Deserialize, Serialize};

/// One entry of a locale's navigation bar.
///
/// ```toml
/// [[locales.en.theme.nav]]
/// text = "Guides"
/// link = "/en/guides/"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

impl NavItem {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    pub(crate) fn validate(&self, prefix: &str, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        if self.text.trim().is_empty() {
            diag.missing(field.key("text"));
        }
        validate_link(&self.link, prefix, field.key("link"), diag);
    }
}

/// Check a nav or sidebar link against its locale's `prefix`.
///
/// Site-root paths and absolute URLs are accepted, relative links are not.
/// A site-root path outside the locale only warns.
pub(crate) fn validate_link(link: &str, prefix: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if link.trim().is_empty() {
        diag.missing(field);
        return;
    }

    match LinkKind::parse(link) {
        LinkKind::External(url) => {
            if LinkKind::is_http(url)
                && let Err(e) = url::Url::parse(url)
            {
                diag.error(field, SchemaErrorKind::Invalid, format!("invalid URL: {e}"));
            }
        }
        LinkKind::SiteRoot(path) => {
            let locale_root = prefix.trim_end_matches('/');
            if !is_path_prefix(prefix, path) && path != locale_root {
                diag.warn(
                    field,
                    format!("`{path}` is outside of locale prefix `{prefix}`"),
                );
            }
        }
        LinkKind::Fragment(_) | LinkKind::FileRelative(_) => {
            diag.error_with_hint(
                field,
                SchemaErrorKind::Invalid,
                format!("`{link}` must be a site-root path or an absolute URL"),
                format!("write it from the site root, e.g. \"{prefix}...\""),
            );
        }
    }
}
