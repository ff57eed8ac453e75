//! `[locales.<code>]` configuration.
//!
//! # Example
//!
//! ```toml
//! [locales.es]
//! label = "Español"
//! lang = "es"
//! link = "/es/"
//! title = "Documentación interna"
//! description = "Guías del equipo"
//! ```

use crate::config::{
    ConfigDiagnostics, FieldPath, LocaleCode, SchemaErrorKind, is_language_tag, lang_refines,
};
use serde::{Deserialize, Serialize};

use super::ThemeConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Name shown in the locale picker.
    pub label: String,

    /// BCP-47 tag for `<html lang>`; equals or refines the locale code.
    pub lang: String,

    /// Root path of the locale (`/es/`), or `/` for the root locale.
    pub link: String,

    /// Overrides the site title. Empty falls back to it.
    pub title: String,

    /// Overrides the site description. Empty falls back to it.
    pub description: String,

    pub theme: ThemeConfig,
}

impl LocaleConfig {
    /// Whether this locale is served at the site root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.link == "/"
    }

    pub fn title_or<'a>(&'a self, site_title: &'a str) -> &'a str {
        non_empty_or(&self.title, site_title)
    }

    pub fn description_or<'a>(&'a self, site_description: &'a str) -> &'a str {
        non_empty_or(&self.description, site_description)
    }

    /// Top-bar title, falling back to the locale then site title.
    pub fn site_title_or<'a>(&'a self, site_title: &'a str) -> &'a str {
        non_empty_or(&self.theme.site_title, self.title_or(site_title))
    }

    /// Validate this locale under its document key `key`.
    pub(crate) fn validate(&self, key: &LocaleCode, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        let code = key.normalized();

        if !code.is_well_formed() && !code.is_root_key() {
            diag.error_with_hint(
                field.clone(),
                SchemaErrorKind::Invalid,
                format!("`{key}` is not a locale code"),
                "use a code like \"en\" or \"pt-BR\"",
            );
        }

        if self.label.trim().is_empty() {
            diag.missing(field.key("label"));
        }

        self.validate_lang(&code, field, diag);
        let prefix = self.validate_link(&code, field, diag);
        self.theme.validate(&prefix, &field.key("theme"), diag);
    }

    fn validate_lang(&self, code: &LocaleCode, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        let lang = field.key("lang");
        if self.lang.trim().is_empty() {
            diag.missing(lang);
        } else if !is_language_tag(&self.lang) {
            diag.error(
                lang,
                SchemaErrorKind::Invalid,
                format!("`{}` is not a BCP-47 language tag", self.lang),
            );
        } else if !code.is_root_key() && !lang_refines(&self.lang, code.as_str()) {
            diag.error_with_hint(
                lang,
                SchemaErrorKind::Invalid,
                format!("lang `{}` does not match locale `{code}`", self.lang),
                format!("use \"{code}\" or a refinement like \"{code}-XX\""),
            );
        }
    }

    /// Check `link` and return the prefix that paths in this locale live under.
    fn validate_link(&self, code: &LocaleCode, field: &FieldPath, diag: &mut ConfigDiagnostics) -> String {
        let link = field.key("link");
        let expected = format!("/{code}/");

        if self.link.trim().is_empty() {
            diag.missing(link);
            return expected;
        }
        if self.is_root() {
            return self.link.clone();
        }
        if code.is_root_key() {
            diag.error_with_hint(
                link,
                SchemaErrorKind::PrefixMismatch,
                format!("the `root` locale must be served at \"/\", not `{}`", self.link),
                "set link = \"/\"",
            );
            return self.link.clone();
        }
        if !self.link.starts_with(&expected) {
            diag.error_with_hint(
                link,
                SchemaErrorKind::PrefixMismatch,
                format!("link `{}` must start with `{expected}`", self.link),
                format!("use \"{expected}\""),
            );
            return expected;
        }
        self.link.clone()
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(label: &str, lang: &str, link: &str) -> LocaleConfig {
        LocaleConfig {
            label: label.into(),
            lang: lang.into(),
            link: link.into(),
            ..LocaleConfig::default()
        }
    }

    fn errors(key: &str, locale: &LocaleConfig) -> Vec<(String, SchemaErrorKind)> {
        let mut diag = ConfigDiagnostics::new();
        let field = FieldPath::root().key("locales").key(key);
        locale.validate(&LocaleCode::from(key), &field, &mut diag);
        diag.errors()
            .iter()
            .map(|e| (e.field.as_str().to_string(), e.kind))
            .collect()
    }

    #[test]
    fn test_valid_locale() {
        assert!(errors("es", &locale("Español", "es", "/es/")).is_empty());
        assert!(errors("es", &locale("Español", "es-419", "/es/")).is_empty());
        assert!(errors("pt-BR", &locale("Português", "pt-BR", "/pt-BR/")).is_empty());
    }

    #[test]
    fn test_link_prefix_mismatch() {
        assert_eq!(
            errors("en", &locale("English", "en", "/english/")),
            [("locales.en.link".to_string(), SchemaErrorKind::PrefixMismatch)]
        );
    }

    #[test]
    fn test_lang_must_refine_code() {
        assert_eq!(
            errors("en", &locale("English", "es", "/en/")),
            [("locales.en.lang".to_string(), SchemaErrorKind::Invalid)]
        );
    }

    #[test]
    fn test_missing_fields() {
        let kinds = errors("en", &LocaleConfig::default());
        assert_eq!(
            kinds,
            [
                ("locales.en.label".to_string(), SchemaErrorKind::Missing),
                ("locales.en.lang".to_string(), SchemaErrorKind::Missing),
                ("locales.en.link".to_string(), SchemaErrorKind::Missing),
            ]
        );
    }

    #[test]
    fn test_bad_code() {
        let errs = errors("english", &locale("English", "en", "/english/"));
        assert!(errs.contains(&("locales.english".to_string(), SchemaErrorKind::Invalid)));
    }

    #[test]
    fn test_root_locale() {
        assert!(errors("root", &locale("English", "en", "/")).is_empty());
        // Any code may be served at the root.
        assert!(errors("en", &locale("English", "en", "/")).is_empty());
        assert_eq!(
            errors("root", &locale("English", "en", "/en/")),
            [("locales.root.link".to_string(), SchemaErrorKind::PrefixMismatch)]
        );
    }

    #[test]
    fn test_title_fallbacks() {
        let mut es = locale("Español", "es", "/es/");
        assert_eq!(es.title_or("Docs"), "Docs");
        assert_eq!(es.site_title_or("Docs"), "Docs");
        es.title = "Documentación".into();
        assert_eq!(es.site_title_or("Docs"), "Documentación");
        es.theme.site_title = "LIDR Docs".into();
        assert_eq!(es.site_title_or("Docs"), "LIDR Docs");
        assert_eq!(es.description_or("Team docs"), "Team docs");
    }
}
