//! Configuration error types.

use super::FieldPath;
use crate::report::ValidationReport;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Config serialization error")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Unsupported config format `{0}` (expected .toml or .json)")]
    Format(String),

    // Displayed in full; no source, or anyhow would print it twice.
    #[error("{0}")]
    Schema(ConfigDiagnostics),

    #[error("{0}")]
    DeadLinks(ValidationReport),
}

impl ConfigError {
    /// Whether the document itself is malformed (as opposed to I/O or
    /// link-resolution failures).
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Toml(_) | Self::Json(_) | Self::Schema(_))
    }

    /// Schema errors from a mistyped field or from validation, if any.
    pub fn schema_errors(&self) -> &[SchemaError] {
        match self {
            Self::Schema(diag) => diag.errors(),
            _ => &[],
        }
    }
}

// ============================================================================
// SchemaError
// ============================================================================

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorKind {
    /// Required value is absent or empty.
    Missing,
    /// Value is present but malformed.
    Invalid,
    /// Two locale keys normalize to the same code.
    DuplicateKey,
    /// A path does not live under its locale's prefix.
    PrefixMismatch,
    /// Key not recognized by the schema (only under `UnknownFields::Deny`).
    Unknown,
}

impl SchemaErrorKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Invalid => "invalid",
            Self::DuplicateKey => "duplicate key",
            Self::PrefixMismatch => "prefix mismatch",
            Self::Unknown => "unknown field",
        }
    }
}

/// A single fatal configuration problem.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaError {
    /// Config field path (e.g., "locales.es.link")
    pub field: FieldPath,
    pub kind: SchemaErrorKind,
    /// Error description
    pub reason: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl SchemaError {
    pub fn new(field: FieldPath, kind: SchemaErrorKind, reason: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            reason: reason.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = if self.field.is_root() {
            "<root>"
        } else {
            self.field.as_str()
        };
        writeln!(
            f,
            "{}{}{} {}",
            "[".dimmed(),
            field.cyan(),
            "]".dimmed(),
            self.kind.label().dimmed()
        )?;
        write!(f, "{} {}", "→".red(), self.reason)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// Notes
// ============================================================================

/// A locale whose search UI copy had to be filled from built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnderLocalizedSearch {
    pub locale: String,
    /// Language of the built-in strings that were used.
    pub fallback_language: String,
    /// Fields that were filled (e.g. `button.button_text`).
    pub filled: Vec<&'static str>,
}

impl fmt::Display for UnderLocalizedSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search strings for `{}` fall back to built-in `{}` copy ({} field{})",
            self.locale,
            self.fallback_language,
            self.filled.len(),
            crate::utils::plural_s(self.filled.len())
        )
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct ConfigDiagnostics {
    errors: Vec<SchemaError>,
    /// Non-fatal findings (unknown fields, links outside their locale).
    warnings: Vec<(FieldPath, String)>,
    /// Informational notes (under-localized search).
    notes: Vec<UnderLocalizedSearch>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, kind: SchemaErrorKind, message: impl Into<String>) {
        self.errors.push(SchemaError::new(field, kind, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        kind: SchemaErrorKind,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(SchemaError::new(field, kind, message).with_hint(hint));
    }

    /// Shorthand for a [`SchemaErrorKind::Missing`] error.
    pub fn missing(&mut self, field: FieldPath) {
        self.error(field, SchemaErrorKind::Missing, "required value is missing or empty");
    }

    /// Add a warning (collected for batch display).
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push((field, message.into()));
    }

    pub fn note(&mut self, note: UnderLocalizedSearch) {
        self.notes.push(note);
    }

    /// Print collected warnings and notes in a grouped format.
    ///
    /// Call this after validation to display them all at once.
    pub fn print_warnings_and_notes(&self) {
        if !self.warnings.is_empty() {
            crate::log!("warning"; "config warnings:");
            for (field, message) in &self.warnings {
                eprintln!("- {} {}", field, message);
            }
        }

        if !self.notes.is_empty() {
            crate::log!("hint"; "under-localized search:");
            for note in &self.notes {
                eprintln!("- {note}");
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[(FieldPath, String)] {
        &self.warnings
    }

    pub fn notes(&self) -> &[UnderLocalizedSearch] {
        &self.notes
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<Self, Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
