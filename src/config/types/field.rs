//! Dotted config field path.

use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;

/// Location of a value inside the config document.
///
/// Paths are built while walking the typed config, so they name the exact
/// entry that failed, including map keys and sequence indices:
///
/// ```text
/// locales.es.theme.sidebar["/es/guides/"][0].items[1].link
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path of the document root (renders as an empty string).
    #[inline]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Wrap an already formatted path (e.g. one reported by `serde_ignored`).
    #[inline]
    pub fn raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Descend into a struct field or a plain map key.
    ///
    /// Keys that are not simple identifiers (`/es/guides/`, `es-ES`) are
    /// quoted in brackets so the path stays unambiguous.
    pub fn key(&self, key: &str) -> Self {
        let simple = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
        let mut path = self.0.clone();
        if simple {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(key);
        } else {
            path.push_str(&format!("[{key:?}]"));
        }
        Self(path)
    }

    /// Descend into a sequence element.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.0.is_empty() { "<root>" } else { &self.0 };
        write!(f, "{}", format_args!("`{shown}`").bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_struct_fields() {
        let path = FieldPath::root().key("locales").key("es").key("link");
        assert_eq!(path.as_str(), "locales.es.link");
    }

    #[test]
    fn test_route_keys_are_quoted() {
        let path = FieldPath::root()
            .key("locales")
            .key("en")
            .key("theme")
            .key("sidebar")
            .key("/en/guides/")
            .index(0)
            .key("items")
            .index(2)
            .key("link");
        assert_eq!(
            path.as_str(),
            r#"locales.en.theme.sidebar["/en/guides/"][0].items[2].link"#
        );
    }

    #[test]
    fn test_root_path() {
        assert!(FieldPath::root().is_root());
        assert!(!FieldPath::root().key("title").is_root());
    }
}
