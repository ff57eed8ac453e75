//! `[markdown]` options, passed through to the renderer.
//!
//! ```toml
//! [markdown]
//! line_numbers = true
//! math = true        # unknown keys are kept in `extra`
//! ```
//!
//! Values are kept as TOML values in both formats. TOML has no null, so a
//! JSON `"key": null` leaves `key` unset; a null nested deeper in a value
//! is rejected.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Show line numbers on fenced code blocks.
    pub line_numbers: bool,

    /// Renderer options this crate does not interpret.
    #[serde(flatten, deserialize_with = "without_nulls")]
    pub extra: FxHashMap<String, toml::Value>,
}

impl MarkdownOptions {
    /// Passthrough option by name.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.extra.get(key)
    }
}

fn without_nulls<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<FxHashMap<String, toml::Value>, D::Error> {
    let raw = FxHashMap::<String, Option<toml::Value>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| Some((key, value?)))
        .collect())
}
