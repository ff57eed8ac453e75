//! Search modal copy, merged per locale.
//!
//! Lookup order for a locale's strings:
//!
//! 1. its own `theme.search.options.locales.<code>`
//! 2. any other locale's search options that carry `<code>`, in
//!    declaration order
//! 3. built-in copy in the default locale's language, field by field

use serde::Serialize;

use super::{LocaleCode, LocalizedSearchStrings, SiteConfig, UnderLocalizedSearch, primary_subtag};

/// Languages with built-in search copy.
const BUILTIN_LANGUAGES: [&str; 5] = ["en", "es", "fr", "de", "pt"];

/// Merged strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedSearchStrings {
    pub strings: LocalizedSearchStrings,
    /// Set when any field came from built-in copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<UnderLocalizedSearch>,
}

/// Built-in search copy for a language tag (`pt-BR` uses `pt`).
pub fn builtin_search_strings(lang: &str) -> Option<LocalizedSearchStrings> {
    let strings = match primary_subtag(lang).to_ascii_lowercase().as_str() {
        "en" => LocalizedSearchStrings::new(
            "Search",
            "Search",
            "No results found",
            "Clear search",
            "Select",
            "Navigate",
            "Close",
        ),
        "es" => LocalizedSearchStrings::new(
            "Buscar",
            "Buscar",
            "No se encontraron resultados",
            "Limpiar búsqueda",
            "Seleccionar",
            "Navegar",
            "Cerrar",
        ),
        "fr" => LocalizedSearchStrings::new(
            "Rechercher",
            "Rechercher",
            "Aucun résultat",
            "Effacer la recherche",
            "Sélectionner",
            "Naviguer",
            "Fermer",
        ),
        "de" => LocalizedSearchStrings::new(
            "Suchen",
            "Suchen",
            "Keine Ergebnisse gefunden",
            "Suche zurücksetzen",
            "Auswählen",
            "Navigieren",
            "Schließen",
        ),
        "pt" => LocalizedSearchStrings::new(
            "Pesquisar",
            "Pesquisar",
            "Nenhum resultado encontrado",
            "Limpar pesquisa",
            "Selecionar",
            "Navegar",
            "Fechar",
        ),
        _ => return None,
    };
    Some(strings)
}

/// Built-in copy for `lang`, or English, with the language used.
fn fallback_strings(lang: &str) -> (LocalizedSearchStrings, &'static str) {
    let primary = primary_subtag(lang).to_ascii_lowercase();
    BUILTIN_LANGUAGES
        .iter()
        .find(|&&builtin| builtin == primary)
        .and_then(|&builtin| builtin_search_strings(builtin).map(|s| (s, builtin)))
        .unwrap_or_else(|| (english(), "en"))
}

fn english() -> LocalizedSearchStrings {
    builtin_search_strings("en").unwrap_or_default()
}

impl SiteConfig {
    /// Strings declared anywhere in the document for `code`.
    pub fn declared_search_strings(&self, code: &str) -> Option<&LocalizedSearchStrings> {
        let code = LocaleCode::normalize(code);
        let own = self
            .locales
            .get(code.as_str())
            .and_then(|locale| locale.theme.search.strings_for(&code));

        own.or_else(|| {
            self.locales
                .values()
                .find_map(|locale| locale.theme.search.strings_for(&code))
        })
    }

    /// Complete search copy for `locale`. Never fails.
    ///
    /// Blank fields are filled from built-in copy in the default locale's
    /// language, and the result carries a note naming them.
    pub fn merge_search_strings(&self, locale: &str) -> MergedSearchStrings {
        let code = LocaleCode::normalize(locale);
        let mut strings = self
            .declared_search_strings(&code)
            .cloned()
            .unwrap_or_default();

        let default_code = self.default_locale();
        let default_lang = self
            .locales
            .get(default_code.as_str())
            .map(|l| l.lang.as_str())
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or(default_code.as_str());

        let (defaults, fallback_language) = fallback_strings(default_lang);
        let filled = strings.fill_from(&defaults);
        let note = (!filled.is_empty()).then(|| UnderLocalizedSearch {
            locale: code,
            fallback_language: fallback_language.to_string(),
            filled,
        });

        MergedSearchStrings { strings, note }
    }
}
