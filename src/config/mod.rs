//! Site configuration management for `polydoc.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── locale     # [locales.<code>]
//! │   ├── theme      # [locales.<code>.theme]
//! │   ├── nav        # theme.nav
//! │   ├── sidebar    # theme.sidebar
//! │   ├── search     # theme.search
//! │   └── markdown   # [markdown]
//! ├── types/         # Utility types
//! │   ├── code       # LocaleCode
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   ├── handle     # Reloadable config handle
//! │   └── map        # OrderedMap
//! ├── resolve        # Locale selection, page context, link checks
//! ├── search         # Search string merging
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Loading
//!
//! A document goes through three stages:
//!
//! 1. **parse**: deserialize, collecting unknown keys with `serde_ignored`
//! 2. **validate**: collect every schema error in one [`ConfigDiagnostics`]
//! 3. **finalize**: normalize locale codes and pick the default locale
//!
//! The resulting [`SiteConfig`] is immutable. Reloading builds a new one
//! (see [`ConfigHandle`]).

pub mod section;
pub mod types;
mod resolve;
mod search;
mod util;

pub use resolve::{LinkRef, LinkSource, PageContext, select_default_locale};
pub use search::{MergedSearchStrings, builtin_search_strings};
pub use util::{ConfigFormat, DEFAULT_CONFIG_NAME, find_config_file, find_config_file_from};

// Re-export from section/
pub use section::{
    EDIT_PATH_PLACEHOLDER, EditLinkConfig, FooterConfig, LastUpdatedConfig, LocaleConfig,
    LocalizedSearchStrings, MarkdownOptions, NavItem, SearchConfig, SearchOptions, SearchProvider,
    SidebarEntry, SidebarGroup, SidebarItem, SocialLink, ThemeConfig, sidebar_items,
};

// Re-export from types/
pub use types::{
    ConfigDiagnostics, ConfigError, ConfigHandle, FieldPath, LocaleCode, OrderedMap, ROOT_LOCALE,
    SchemaError, SchemaErrorKind, UnderLocalizedSearch, is_language_tag, lang_refines,
    primary_subtag,
};
use types::{located_schema_error, validate_unique_codes};

use crate::debug;
use crate::utils::plural_count;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `polydoc.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site-wide title, used when a locale sets none.
    pub title: String,

    pub description: String,

    /// Report dead links without failing.
    pub ignore_dead_links: bool,

    pub markdown: MarkdownOptions,

    /// Locale code -> locale config, in display order.
    pub locales: OrderedMap<LocaleCode, LocaleConfig>,

    /// Computed during finalize.
    #[serde(skip)]
    default_locale: LocaleCode,
}

/// How keys that match no known field are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Report as warnings and continue.
    #[default]
    Warn,
    /// Report as [`SchemaErrorKind::Unknown`] errors.
    Deny,
}

impl SiteConfig {
    /// Parse, validate and finalize a document.
    ///
    /// Unknown keys are tolerated. Use [`SiteConfig::load_with`] to see them.
    pub fn load(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Self::load_with(content, format, UnknownFields::Warn).map(|(config, _)| config)
    }

    /// Like [`SiteConfig::load`], also returning warnings and notes.
    pub fn load_with(
        content: &str,
        format: ConfigFormat,
        unknown: UnknownFields,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (mut config, ignored) = Self::parse_with_ignored(content, format)?;

        let mut diag = ConfigDiagnostics::new();
        for path in ignored {
            match unknown {
                UnknownFields::Warn => diag.warn(FieldPath::raw(path), "unknown field, ignored"),
                UnknownFields::Deny => {
                    diag.error(FieldPath::raw(path), SchemaErrorKind::Unknown, "unknown field")
                }
            }
        }

        config.validate(&mut diag);
        let mut diag = diag.into_result().map_err(ConfigError::Schema)?;

        config.finalize();
        config.collect_search_notes(&mut diag);

        debug!(
            "config";
            "loaded {}, default `{}`",
            plural_count(config.locales.len(), "locale"),
            config.default_locale
        );
        Ok((config, diag))
    }

    /// Load a config file, picking the format from its extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = read_config(path)?;
        Self::from_content(path, &content)
    }

    /// Like [`SiteConfig::from_path`], also returning warnings and notes.
    pub fn from_path_with(
        path: &Path,
        unknown: UnknownFields,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let content = read_config(path)?;
        Self::load_with(&content, ConfigFormat::from_path(path)?, unknown)
    }

    /// Load already-read `content` of the file at `path`.
    pub(crate) fn from_content(path: &Path, content: &str) -> Result<Self, ConfigError> {
        Self::load(content, ConfigFormat::from_path(path)?)
    }

    /// Serialize back into a document that loads to an equal config.
    pub fn to_document(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Parse content, collecting any unknown fields.
    ///
    /// A well-formed document with a mistyped field fails with a
    /// [`ConfigError::Schema`] naming that field.
    fn parse_with_ignored(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let config = match format {
            ConfigFormat::Toml => {
                let deserializer = toml::Deserializer::new(content);
                let parsed = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                    ignored.push(path.to_string());
                });
                parsed.map_err(|err| Self::locate_toml_error(content, err))?
            }
            ConfigFormat::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                let parsed =
                    serde_ignored::deserialize(&mut deserializer, |path: serde_ignored::Path| {
                        ignored.push(path.to_string());
                    });
                let config = parsed.map_err(|err| Self::locate_json_error(content, err))?;
                deserializer.end()?;
                config
            }
        };
        Ok((config, ignored))
    }

    /// Syntax errors stay [`ConfigError::Toml`].
    fn locate_toml_error(content: &str, err: toml::de::Error) -> ConfigError {
        let Ok(table) = content.parse::<toml::Table>() else {
            return err.into();
        };
        located_schema_error(&toml::Value::Table(table), |doc: &toml::Value| {
            doc.clone()
                .try_into::<Self>()
                .map(drop)
                .map_err(|e| e.message().to_string())
        })
        .unwrap_or_else(|| err.into())
    }

    /// Syntax errors stay [`ConfigError::Json`].
    fn locate_json_error(content: &str, err: serde_json::Error) -> ConfigError {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(content) else {
            return err.into();
        };
        located_schema_error(&value, |doc: &serde_json::Value| {
            serde_json::from_value::<Self>(doc.clone())
                .map(drop)
                .map_err(|e| e.to_string())
        })
        .unwrap_or_else(|| err.into())
    }

    // ========================================================================
    // validation
    // ========================================================================

    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.missing(FieldPath::root().key("title"));
        }

        let locales = FieldPath::root().key("locales");
        if self.locales.is_empty() {
            diag.error_with_hint(
                locales,
                SchemaErrorKind::Missing,
                "at least one locale is required",
                "add a [locales.en] table",
            );
            return;
        }

        self.validate_locale_keys(&locales, diag);
        for (key, locale) in self.locales.iter() {
            locale.validate(key, &locales.key(key.as_str()), diag);
        }
    }

    /// Keys must stay unique after normalization, and only one locale
    /// may be served at `/`.
    fn validate_locale_keys(&self, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        validate_unique_codes(self.locales.keys(), field, diag);

        let mut roots = self.locales.iter().filter(|(_, locale)| locale.is_root());
        if let Some((first, _)) = roots.next() {
            for (key, _) in roots {
                diag.error(
                    field.key(key.as_str()).key("link"),
                    SchemaErrorKind::Invalid,
                    format!("`{first}` is already served at \"/\""),
                );
            }
        }
    }

    fn finalize(&mut self) {
        self.locales = std::mem::take(&mut self.locales).map_keys(|key| key.normalized());
        for locale in self.locales.values_mut() {
            let options = &mut locale.theme.search.options;
            options.locales = std::mem::take(&mut options.locales).map_keys(|key| key.normalized());
        }
        self.default_locale = select_default_locale(&self.locales)
            .cloned()
            .unwrap_or_default();
    }

    /// Note every local-search locale whose UI copy needs built-in defaults.
    fn collect_search_notes(&self, diag: &mut ConfigDiagnostics) {
        for (code, locale) in self.locales.iter() {
            if !locale.theme.search.is_local() {
                continue;
            }
            if let Some(note) = self.merge_search_strings(code.as_str()).note {
                diag.note(note);
            }
        }
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Smallest config that loads cleanly.
#[cfg(test)]
pub const MINIMAL_CONFIG: &str = r#"
title = "Docs"

[locales.en]
label = "English"
lang = "en"
link = "/en/"
"#;

/// Two-locale site used across resolver tests.
#[cfg(test)]
pub const SITE_FIXTURE: &str = include_str!("../../fixtures/site.toml");

/// Load a TOML config that must be valid.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (config, diag) = SiteConfig::load_with(content, ConfigFormat::Toml, UnknownFields::Deny)
        .unwrap_or_else(|err| panic!("test config failed to load: {err}"));
    assert!(
        diag.warnings().is_empty(),
        "test config has warnings: {:?}",
        diag.warnings()
    );
    config
}

/// Load a TOML config that must fail, returning its schema errors.
#[cfg(test)]
pub fn test_schema_errors(content: &str) -> Vec<(String, SchemaErrorKind)> {
    match SiteConfig::load(content, ConfigFormat::Toml) {
        Ok(_) => panic!("config unexpectedly loaded"),
        Err(err) => err
            .schema_errors()
            .iter()
            .map(|e| (e.field.as_str().to_string(), e.kind))
            .collect(),
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::load("[locales\ntitle = \"Docs\"", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_minimal_config() {
        let config = test_parse_config(MINIMAL_CONFIG);
        assert_eq!(config.title, "Docs");
        assert!(!config.ignore_dead_links);
        assert_eq!(config.default_locale(), "en");
    }

    #[test]
    fn test_fixture_loads() {
        let config = test_parse_config(SITE_FIXTURE);
        let codes: Vec<_> = config.locales.keys().map(LocaleCode::as_str).collect();
        assert_eq!(codes, ["es", "en"]);
        assert!(config.ignore_dead_links);
        assert!(config.markdown.line_numbers);

        let es = config.locale("es").unwrap();
        assert_eq!(es.theme.nav.len(), 6);
        assert_eq!(es.theme.sidebar.len(), 4);
        assert_eq!(es.theme.outline_title.as_deref(), Some("En esta página"));
    }

    #[test]
    fn test_every_locale_link_has_its_prefix() {
        let config = test_parse_config(SITE_FIXTURE);
        for (code, locale) in config.locales.iter() {
            assert!(locale.link.starts_with(&format!("/{code}/")));
        }
    }

    #[test]
    fn test_load_is_idempotent() {
        let first = test_parse_config(SITE_FIXTURE);
        for format in [ConfigFormat::Toml, ConfigFormat::Json] {
            let document = first.to_document(format).unwrap();
            let second = SiteConfig::load(&document, format).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_json_document() {
        let content = r#"{
            "title": "Docs",
            "locales": {
                "en": { "label": "English", "lang": "en", "link": "/en/" }
            }
        }"#;
        let config = SiteConfig::load(content, ConfigFormat::Json).unwrap();
        assert_eq!(config, test_parse_config(MINIMAL_CONFIG));
    }

    #[test]
    fn test_json_trailing_content() {
        let result = SiteConfig::load(r#"{"title": "Docs"} {}"#, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_empty_locales() {
        assert_eq!(
            test_schema_errors("title = \"Docs\"\n[locales]\n"),
            [("locales".to_string(), SchemaErrorKind::Missing)]
        );
    }

    #[test]
    fn test_errors_are_collected_together() {
        let errors = test_schema_errors(
            r#"
[locales.en]
label = "English"
lang = "en"
link = "/english/"
"#,
        );
        assert_eq!(
            errors,
            [
                ("title".to_string(), SchemaErrorKind::Missing),
                ("locales.en.link".to_string(), SchemaErrorKind::PrefixMismatch),
            ]
        );
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let errors = test_schema_errors(
            r#"
title = "Docs"

[locales.pt-BR]
label = "Português"
lang = "pt-BR"
link = "/pt-BR/"

[locales.pt_br]
label = "Português"
lang = "pt-BR"
link = "/pt-BR/"
"#,
        );
        assert_eq!(
            errors,
            [("locales.pt_br".to_string(), SchemaErrorKind::DuplicateKey)]
        );
    }

    #[test]
    fn test_keys_are_normalized() {
        let config = test_parse_config(
            r#"
title = "Docs"

[locales.EN]
label = "English"
lang = "en"
link = "/en/"

[locales.EN.theme.search.options.locales.EN.translations.button]
button_text = "Search"
"#,
        );
        assert_eq!(config.locales.keys().next().unwrap(), "en");
        assert!(config.locale("en").unwrap().theme.search.strings_for("en").is_some());
    }

    #[test]
    fn test_mistyped_field() {
        let err = SiteConfig::load("title = 3", ConfigFormat::Toml).unwrap_err();
        assert!(err.is_schema());
        assert_eq!(
            test_schema_errors("title = 3"),
            [("title".to_string(), SchemaErrorKind::Invalid)]
        );

        let content = format!("{MINIMAL_CONFIG}\n[locales.en.theme]\nnav = \"not a list\"");
        let err = SiteConfig::load(&content, ConfigFormat::Toml).unwrap_err();
        let errors = err.schema_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field.as_str(), "locales.en.theme.nav");
        assert_eq!(errors[0].kind, SchemaErrorKind::Invalid);
        assert!(errors[0].reason.contains("invalid type"));
    }

    #[test]
    fn test_malformed_sidebar_entry_is_located() {
        let content = format!(
            r#"{MINIMAL_CONFIG}
[[locales.en.theme.sidebar."/en/guides/"]]
text = "Guides"
link = "/en/guides/"
items = [{{ text = "Intro", link = "/en/guides/intro" }}]
"#
        );
        assert_eq!(
            test_schema_errors(&content),
            [(
                r#"locales.en.theme.sidebar["/en/guides/"][0]"#.to_string(),
                SchemaErrorKind::Invalid
            )]
        );
    }

    #[test]
    fn test_mistyped_json_field_in_document_order() {
        let content = r#"{
            "title": "Docs",
            "locales": {
                "es": { "label": 3, "lang": "es", "link": "/es/" },
                "en": { "label": 4, "lang": "en", "link": "/en/" }
            }
        }"#;
        let err = SiteConfig::load(content, ConfigFormat::Json).unwrap_err();
        let errors = err.schema_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field.as_str(), "locales.es.label");
    }

    #[test]
    fn test_two_root_locales() {
        let errors = test_schema_errors(
            r#"
title = "Docs"

[locales.root]
label = "English"
lang = "en"
link = "/"

[locales.es]
label = "Español"
lang = "es"
link = "/"
"#,
        );
        assert_eq!(
            errors,
            [("locales.es.link".to_string(), SchemaErrorKind::Invalid)]
        );
    }

    #[test]
    fn test_unknown_fields_warn() {
        let content = format!("{MINIMAL_CONFIG}\n[unknown_section]\nfield = \"value\"");
        let (config, diag) =
            SiteConfig::load_with(&content, ConfigFormat::Toml, UnknownFields::Warn).unwrap();
        assert_eq!(config.title, "Docs");
        assert!(
            diag.warnings()
                .iter()
                .any(|(field, _)| field.as_str().contains("unknown_section"))
        );
    }

    #[test]
    fn test_unknown_fields_deny() {
        let content = format!("{MINIMAL_CONFIG}\n[locales.en.theme]\nsidebar_title = \"x\"");
        let err = SiteConfig::load_with(&content, ConfigFormat::Toml, UnknownFields::Deny)
            .unwrap_err();
        let errors = err.schema_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SchemaErrorKind::Unknown);
        assert!(errors[0].field.as_str().contains("sidebar_title"));
    }

    #[test]
    fn test_markdown_passthrough_is_not_unknown() {
        let content = format!("{MINIMAL_CONFIG}\n[markdown]\nline_numbers = true\ntheme = \"github-dark\"");
        let config = test_parse_config(&content);
        assert!(config.markdown.line_numbers);
        assert!(config.markdown.get("theme").is_some());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, MINIMAL_CONFIG).unwrap();
        assert_eq!(SiteConfig::from_path(&path).unwrap().title, "Docs");

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            SiteConfig::from_path(&missing),
            Err(ConfigError::Io(..))
        ));
    }
}
