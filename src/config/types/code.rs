//! Locale codes and language tags.

use super::{ConfigDiagnostics, FieldPath, SchemaErrorKind};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

/// Reserved key for a locale served at the site root (`/`).
pub const ROOT_LOCALE: &str = "root";

/// `xx` or `xx-YY`, after normalization.
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("static regex"));

/// Loose BCP-47 shape: primary language subtag then alphanumeric subtags.
static LANG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("static regex")
});

/// Key of a locale in `locales` (e.g. `es`, `en`, `pt-BR`).
///
/// The raw key from the document is kept until validation has passed;
/// finalization then replaces it with [`LocaleCode::normalize`]d form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical spelling: `_` becomes `-`, language lowercased,
    /// region uppercased.
    ///
    /// `EN` -> `en`, `pt_br` -> `pt-BR`, `root` stays `root`.
    pub fn normalize(raw: &str) -> String {
        let raw = raw.trim().replace('_', "-");
        match raw.split_once('-') {
            Some((lang, region)) => {
                format!(
                    "{}-{}",
                    lang.to_ascii_lowercase(),
                    region.to_ascii_uppercase()
                )
            }
            None => raw.to_ascii_lowercase(),
        }
    }

    /// Normalized copy of this code.
    pub fn normalized(&self) -> Self {
        Self(Self::normalize(&self.0))
    }

    /// Whether the (normalized) code has the `xx` / `xx-YY` shape.
    pub fn is_well_formed(&self) -> bool {
        CODE_RE.is_match(&self.0)
    }

    #[inline]
    pub fn is_root_key(&self) -> bool {
        self.0 == ROOT_LOCALE
    }

    /// Primary language subtag (`pt-BR` -> `pt`).
    pub fn language(&self) -> &str {
        primary_subtag(&self.0)
    }
}

/// Whether `tag` looks like a BCP-47 language tag.
pub fn is_language_tag(tag: &str) -> bool {
    LANG_RE.is_match(tag)
}

/// Whether `lang` equals `code` or refines it (`es` -> `es-419`, `es-ES`).
///
/// Comparison is case-insensitive, as BCP-47 tags are.
pub fn lang_refines(lang: &str, code: &str) -> bool {
    let lang = lang.to_ascii_lowercase();
    let code = code.to_ascii_lowercase();
    lang == code
        || lang
            .strip_prefix(&code)
            .is_some_and(|rest| rest.starts_with('-'))
}

/// First subtag of a language tag, as written.
pub fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

/// Report every key under `field` that normalizes to an earlier key.
pub(crate) fn validate_unique_codes<'a>(
    keys: impl IntoIterator<Item = &'a LocaleCode>,
    field: &FieldPath,
    diag: &mut ConfigDiagnostics,
) {
    let mut seen: FxHashMap<LocaleCode, &LocaleCode> = FxHashMap::default();
    for key in keys {
        let code = key.normalized();
        match seen.get(&code) {
            Some(first) => diag.error_with_hint(
                field.key(key.as_str()),
                SchemaErrorKind::DuplicateKey,
                format!("`{key}` and `{first}` are both locale `{code}`"),
                "keep one of them",
            ),
            None => {
                seen.insert(code, key);
            }
        }
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LocaleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocaleCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl PartialEq<str> for LocaleCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(LocaleCode::normalize("EN"), "en");
        assert_eq!(LocaleCode::normalize("pt_br"), "pt-BR");
        assert_eq!(LocaleCode::normalize("es-es"), "es-ES");
        assert_eq!(LocaleCode::normalize(" en "), "en");
        assert_eq!(LocaleCode::normalize("root"), "root");
    }

    #[test]
    fn test_well_formed() {
        assert!(LocaleCode::from("es").is_well_formed());
        assert!(LocaleCode::from("pt-BR").is_well_formed());
        assert!(!LocaleCode::from("english").is_well_formed());
        assert!(!LocaleCode::from("pt-br").is_well_formed());
        assert!(!LocaleCode::from("e").is_well_formed());
    }

    #[test]
    fn test_lang_refines() {
        assert!(lang_refines("es", "es"));
        assert!(lang_refines("es-ES", "es"));
        assert!(lang_refines("es-419", "es"));
        assert!(lang_refines("EN-us", "en-US"));
        assert!(!lang_refines("en", "es"));
        // A shared prefix is not a refinement.
        assert!(!lang_refines("est", "es"));
    }

    #[test]
    fn test_language_tag_shape() {
        assert!(is_language_tag("en"));
        assert!(is_language_tag("zh-Hans-CN"));
        assert!(is_language_tag("es-419"));
        assert!(!is_language_tag("e"));
        assert!(!is_language_tag("en_US"));
        assert!(!is_language_tag(""));
    }

    #[test]
    fn test_unique_codes() {
        let keys = [
            LocaleCode::from("pt-BR"),
            LocaleCode::from("es"),
            LocaleCode::from("PT_br"),
        ];
        let mut diag = ConfigDiagnostics::new();
        validate_unique_codes(&keys, &FieldPath::root().key("locales"), &mut diag);

        let errors = diag.into_result().unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field.as_str(), "locales.PT_br");
        assert_eq!(errors.errors()[0].kind, SchemaErrorKind::DuplicateKey);
    }

    #[test]
    fn test_language_subtag() {
        assert_eq!(LocaleCode::from("pt-BR").language(), "pt");
        assert_eq!(primary_subtag("es"), "es");
    }
}
