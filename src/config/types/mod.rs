//! Configuration utility types.
//!
//! | Module   | Purpose                                          |
//! |----------|--------------------------------------------------|
//! | `code`   | Locale codes and language-tag checks             |
//! | `error`  | Configuration error and diagnostic types         |
//! | `field`  | Dotted field paths for diagnostics               |
//! | `handle` | Shared, atomically reloadable config             |
//! | `locate` | Field lookup for failed typed parses             |
//! | `map`    | Insertion-ordered map for keyed tables           |

mod code;
mod error;
mod field;
mod handle;
mod locate;
mod map;

pub(crate) use code::validate_unique_codes;
pub use code::{LocaleCode, ROOT_LOCALE, is_language_tag, lang_refines, primary_subtag};
pub(crate) use locate::located_schema_error;
pub use error::{
    ConfigDiagnostics, ConfigError, SchemaError, SchemaErrorKind, UnderLocalizedSearch,
};
pub use field::FieldPath;
pub use handle::ConfigHandle;
pub use map::OrderedMap;
