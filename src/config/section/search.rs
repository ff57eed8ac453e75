//! Search provider configuration and localized search UI copy.
//!
//! # Example
//!
//! ```toml
//! [locales.es.theme.search]
//! provider = "local"
//!
//! [locales.es.theme.search.options.locales.es.translations.button]
//! button_text = "Buscar"
//! button_aria_label = "Buscar"
//!
//! [locales.es.theme.search.options.locales.es.translations.modal]
//! no_results_text = "No se encontraron resultados"
//! reset_button_title = "Limpiar búsqueda"
//! footer = { select_text = "Seleccionar", navigate_text = "Navegar", close_text = "Cerrar" }
//! ```

use crate::config::types::validate_unique_codes;
use crate::config::{ConfigDiagnostics, FieldPath, LocaleCode, OrderedMap, SchemaErrorKind};
use serde::{Deserialize, Serialize};

/// Full-text search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// In-browser index built by the generator.
    #[default]
    Local,
    /// Hosted Algolia DocSearch.
    Algolia,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    pub options: SearchOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Search UI copy per locale code.
    pub locales: OrderedMap<LocaleCode, LocalizedSearchStrings>,

    /// Algolia application id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// Algolia search-only API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Algolia index name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
}

impl SearchConfig {
    /// Whether local search is on (the case that needs localized copy).
    #[inline]
    pub fn is_local(&self) -> bool {
        self.provider == SearchProvider::Local
    }

    /// Localized strings declared here for `code`.
    pub fn strings_for(&self, code: &str) -> Option<&LocalizedSearchStrings> {
        self.options.locales.get(code)
    }

    pub(crate) fn validate(&self, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        let options = field.key("options");

        if self.provider == SearchProvider::Algolia {
            let required = [
                ("app_id", &self.options.app_id),
                ("api_key", &self.options.api_key),
                ("index_name", &self.options.index_name),
            ];
            for (name, value) in required {
                if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                    diag.error_with_hint(
                        options.key(name),
                        SchemaErrorKind::Missing,
                        format!("`{name}` is required by the algolia provider"),
                        "set it, or use provider = \"local\"",
                    );
                }
            }
        }

        let locales = options.key("locales");
        for code in self.options.locales.keys() {
            let normalized = code.normalized();
            if !normalized.is_well_formed() && !normalized.is_root_key() {
                diag.error(
                    locales.key(code.as_str()),
                    SchemaErrorKind::Invalid,
                    format!("`{code}` is not a locale code like `en` or `pt-BR`"),
                );
            }
        }
        validate_unique_codes(self.options.locales.keys(), &locales, diag);
    }
}

// ============================================================================
// Localized strings
// ============================================================================

/// Search modal copy for one locale.
///
/// Every field defaults to empty; empty fields are filled from built-in
/// defaults when strings are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedSearchStrings {
    pub translations: SearchTranslations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTranslations {
    pub button: ButtonTranslations,
    pub modal: ModalTranslations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonTranslations {
    pub button_text: String,
    pub button_aria_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalTranslations {
    pub no_results_text: String,
    pub reset_button_title: String,
    pub footer: FooterTranslations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterTranslations {
    pub select_text: String,
    pub navigate_text: String,
    pub close_text: String,
}

impl LocalizedSearchStrings {
    /// Number of string fields.
    pub const FIELD_COUNT: usize = 7;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        button_text: &str,
        button_aria_label: &str,
        no_results_text: &str,
        reset_button_title: &str,
        select_text: &str,
        navigate_text: &str,
        close_text: &str,
    ) -> Self {
        Self {
            translations: SearchTranslations {
                button: ButtonTranslations {
                    button_text: button_text.into(),
                    button_aria_label: button_aria_label.into(),
                },
                modal: ModalTranslations {
                    no_results_text: no_results_text.into(),
                    reset_button_title: reset_button_title.into(),
                    footer: FooterTranslations {
                        select_text: select_text.into(),
                        navigate_text: navigate_text.into(),
                        close_text: close_text.into(),
                    },
                },
            },
        }
    }

    /// Every string with its dotted name, in declaration order.
    pub fn fields(&self) -> [(&'static str, &str); Self::FIELD_COUNT] {
        let t = &self.translations;
        [
            ("button.button_text", t.button.button_text.as_str()),
            ("button.button_aria_label", t.button.button_aria_label.as_str()),
            ("modal.no_results_text", t.modal.no_results_text.as_str()),
            ("modal.reset_button_title", t.modal.reset_button_title.as_str()),
            ("modal.footer.select_text", t.modal.footer.select_text.as_str()),
            ("modal.footer.navigate_text", t.modal.footer.navigate_text.as_str()),
            ("modal.footer.close_text", t.modal.footer.close_text.as_str()),
        ]
    }

    fn fields_mut(&mut self) -> [(&'static str, &mut String); Self::FIELD_COUNT] {
        let t = &mut self.translations;
        [
            ("button.button_text", &mut t.button.button_text),
            ("button.button_aria_label", &mut t.button.button_aria_label),
            ("modal.no_results_text", &mut t.modal.no_results_text),
            ("modal.reset_button_title", &mut t.modal.reset_button_title),
            ("modal.footer.select_text", &mut t.modal.footer.select_text),
            ("modal.footer.navigate_text", &mut t.modal.footer.navigate_text),
            ("modal.footer.close_text", &mut t.modal.footer.close_text),
        ]
    }

    /// Whether every field has non-blank copy.
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|(_, v)| !v.trim().is_empty())
    }

    /// Fill blank fields from `defaults`, returning the names filled.
    pub fn fill_from(&mut self, defaults: &Self) -> Vec<&'static str> {
        let mut filled = Vec::new();
        for ((name, slot), (_, default)) in self.fields_mut().into_iter().zip(defaults.fields()) {
            if slot.trim().is_empty() {
                *slot = default.to_string();
                filled.push(name);
            }
        }
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_strings_default_to_empty() {
        let strings: LocalizedSearchStrings =
            toml::from_str("[translations.button]\nbutton_text = \"Buscar\"").unwrap();
        assert_eq!(strings.translations.button.button_text, "Buscar");
        assert!(strings.translations.modal.no_results_text.is_empty());
        assert!(!strings.is_complete());
    }

    #[test]
    fn test_fill_from_only_blank_fields() {
        let defaults = LocalizedSearchStrings::new("Search", "Search", "No results", "Clear", "Select", "Navigate", "Close");
        let mut strings = LocalizedSearchStrings::default();
        strings.translations.button.button_text = "Buscar".into();
        strings.translations.modal.footer.close_text = "  ".into();

        let filled = strings.fill_from(&defaults);
        assert_eq!(filled.len(), LocalizedSearchStrings::FIELD_COUNT - 1);
        assert!(filled.contains(&"modal.footer.close_text"));
        assert_eq!(strings.translations.button.button_text, "Buscar");
        assert_eq!(strings.translations.modal.footer.close_text, "Close");
        assert!(strings.is_complete());
    }

    #[test]
    fn test_algolia_requires_credentials() {
        let search: SearchConfig = toml::from_str("provider = \"algolia\"\n[options]\napp_id = \"APP\"").unwrap();
        let mut diag = ConfigDiagnostics::new();
        search.validate(&FieldPath::root().key("search"), &mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["search.options.api_key", "search.options.index_name"]);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(toml::from_str::<SearchConfig>("provider = \"elastic\"").is_err());
    }

    #[test]
    fn test_bad_locale_key() {
        let search: SearchConfig =
            toml::from_str("[options.locales.spanish.translations.button]\nbutton_text = \"Buscar\"").unwrap();
        let mut diag = ConfigDiagnostics::new();
        search.validate(&FieldPath::root().key("search"), &mut diag);
        assert_eq!(diag.errors()[0].field.as_str(), "search.options.locales.spanish");
    }

    #[test]
    fn test_duplicate_locale_key_after_normalization() {
        let errors = crate::config::test_schema_errors(&format!(
            r#"{}
[locales.en.theme.search.options.locales.pt-BR.translations.button]
button_text = "Pesquisar"

[locales.en.theme.search.options.locales.pt_br.translations.button]
button_text = "Buscar"
"#,
            crate::config::MINIMAL_CONFIG
        ));
        assert_eq!(
            errors,
            [(
                "locales.en.theme.search.options.locales.pt_br".to_string(),
                SchemaErrorKind::DuplicateKey
            )]
        );
    }
}
