//! Locating the field behind a failed typed parse.
//!
//! serde reports *what* went wrong but not *where*. Given the document
//! as a generic tree, the failing field is found by removing one child at
//! a time: a child is to blame when removing it changes the error. The
//! search descends while exactly one child is to blame, and stops at the
//! node where the blame splits or the tree ends.

use super::{ConfigDiagnostics, ConfigError, FieldPath, SchemaErrorKind};

/// One step into a document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Key(String),
    Index(usize),
}

/// Generic document value (`toml::Value`, `serde_json::Value`).
pub(crate) trait DocumentTree: Clone {
    fn segments(&self) -> Vec<Segment>;
    fn child(&self, segment: &Segment) -> Option<&Self>;
    fn child_mut(&mut self, segment: &Segment) -> Option<&mut Self>;
    fn remove(&mut self, segment: &Segment);
}

impl DocumentTree for toml::Value {
    fn segments(&self) -> Vec<Segment> {
        match self {
            Self::Table(table) => table.keys().cloned().map(Segment::Key).collect(),
            Self::Array(items) => (0..items.len()).map(Segment::Index).collect(),
            _ => Vec::new(),
        }
    }

    fn child(&self, segment: &Segment) -> Option<&Self> {
        match (self, segment) {
            (Self::Table(table), Segment::Key(key)) => table.get(key),
            (Self::Array(items), Segment::Index(i)) => items.get(*i),
            _ => None,
        }
    }

    fn child_mut(&mut self, segment: &Segment) -> Option<&mut Self> {
        match (self, segment) {
            (Self::Table(table), Segment::Key(key)) => table.get_mut(key),
            (Self::Array(items), Segment::Index(i)) => items.get_mut(*i),
            _ => None,
        }
    }

    fn remove(&mut self, segment: &Segment) {
        match (self, segment) {
            (Self::Table(table), Segment::Key(key)) => {
                table.remove(key);
            }
            (Self::Array(items), Segment::Index(i)) if *i < items.len() => {
                items.remove(*i);
            }
            _ => {}
        }
    }
}

impl DocumentTree for serde_json::Value {
    fn segments(&self) -> Vec<Segment> {
        match self {
            Self::Object(map) => map.keys().cloned().map(Segment::Key).collect(),
            Self::Array(items) => (0..items.len()).map(Segment::Index).collect(),
            _ => Vec::new(),
        }
    }

    fn child(&self, segment: &Segment) -> Option<&Self> {
        match (self, segment) {
            (Self::Object(map), Segment::Key(key)) => map.get(key),
            (Self::Array(items), Segment::Index(i)) => items.get(*i),
            _ => None,
        }
    }

    fn child_mut(&mut self, segment: &Segment) -> Option<&mut Self> {
        match (self, segment) {
            (Self::Object(map), Segment::Key(key)) => map.get_mut(key),
            (Self::Array(items), Segment::Index(i)) => items.get_mut(*i),
            _ => None,
        }
    }

    fn remove(&mut self, segment: &Segment) {
        match (self, segment) {
            // Keep document order: the first error depends on it.
            (Self::Object(map), Segment::Key(key)) => {
                map.shift_remove(key);
            }
            (Self::Array(items), Segment::Index(i)) if *i < items.len() => {
                items.remove(*i);
            }
            _ => {}
        }
    }
}

/// Find the field `check` fails on, with the failure message.
///
/// Returns `None` when `check` accepts `doc`.
pub(crate) fn locate_error<T: DocumentTree>(
    doc: &T,
    check: impl Fn(&T) -> Result<(), String>,
) -> Option<(FieldPath, String)> {
    let reason = check(doc).err()?;
    let mut trail: Vec<Segment> = Vec::new();

    while let Some(node) = node_at(doc, &trail) {
        let blamed: Vec<Segment> = node
            .segments()
            .into_iter()
            .filter(|segment| {
                let mut trial = doc.clone();
                if let Some(parent) = node_at_mut(&mut trial, &trail) {
                    parent.remove(segment);
                }
                check(&trial).err().as_ref() != Some(&reason)
            })
            .collect();

        match <[Segment; 1]>::try_from(blamed) {
            Ok([segment]) => trail.push(segment),
            Err(_) => break,
        }
    }

    let field = trail
        .iter()
        .fold(FieldPath::root(), |field, segment| match segment {
            Segment::Key(key) => field.key(key),
            Segment::Index(i) => field.index(*i),
        });
    Some((field, reason))
}

/// [`locate_error`] wrapped as a single-error [`ConfigError::Schema`].
pub(crate) fn located_schema_error<T: DocumentTree>(
    doc: &T,
    check: impl Fn(&T) -> Result<(), String>,
) -> Option<ConfigError> {
    let (field, reason) = locate_error(doc, check)?;
    let mut diag = ConfigDiagnostics::new();
    diag.error(field, SchemaErrorKind::Invalid, reason);
    Some(ConfigError::Schema(diag))
}

fn node_at<'a, T: DocumentTree>(doc: &'a T, trail: &[Segment]) -> Option<&'a T> {
    trail.iter().try_fold(doc, |node, segment| node.child(segment))
}

fn node_at_mut<'a, T: DocumentTree>(doc: &'a mut T, trail: &[Segment]) -> Option<&'a mut T> {
    trail.iter().try_fold(doc, |node, segment| node.child_mut(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Doc {
        name: String,
        #[serde(default)]
        ports: Vec<u16>,
    }

    fn check(value: &serde_json::Value) -> Result<(), String> {
        serde_json::from_value::<Doc>(value.clone())
            .map(drop)
            .map_err(|e| e.to_string())
    }

    #[test]
    fn test_locates_array_element() {
        let doc = serde_json::json!({ "name": "web", "ports": [80, "http", 443] });
        let (field, reason) = locate_error(&doc, check).unwrap();
        assert_eq!(field.as_str(), "ports[1]");
        assert!(reason.contains("invalid type"));
    }

    #[test]
    fn test_missing_field_reported_on_parent() {
        let doc = serde_json::json!({ "name": 3 });
        let (field, _) = locate_error(&doc, check).unwrap();
        assert_eq!(field.as_str(), "name");

        let doc = serde_json::json!({ "ports": [80] });
        let (field, reason) = locate_error(&doc, check).unwrap();
        assert!(field.is_root());
        assert!(reason.contains("missing field"));
    }

    #[test]
    fn test_stops_where_blame_splits() {
        // Either entry alone is fine; together they clash.
        #[derive(Deserialize)]
        #[allow(dead_code)]
        struct Pair {
            #[serde(default)]
            entries: Vec<Entry>,
        }
        #[derive(Deserialize)]
        #[serde(try_from = "RawEntry")]
        struct Entry;
        #[derive(Deserialize)]
        struct RawEntry {
            link: Option<String>,
            items: Option<Vec<u8>>,
        }
        impl TryFrom<RawEntry> for Entry {
            type Error = String;
            fn try_from(raw: RawEntry) -> Result<Self, String> {
                match (raw.link, raw.items) {
                    (Some(_), Some(_)) => Err("both `link` and `items`".into()),
                    _ => Ok(Entry),
                }
            }
        }

        let doc = serde_json::json!({ "entries": [{ "link": "/a" }, { "link": "/b", "items": [1] }] });
        let (field, reason) = locate_error(&doc, |value: &serde_json::Value| {
            serde_json::from_value::<Pair>(value.clone())
                .map(drop)
                .map_err(|e| e.to_string())
        })
        .unwrap();
        assert_eq!(field.as_str(), "entries[1]");
        assert!(reason.contains("both"));
    }

    #[test]
    fn test_valid_document() {
        let doc = serde_json::json!({ "name": "web" });
        assert!(locate_error(&doc, check).is_none());
    }

    #[test]
    fn test_toml_tree() {
        let doc = toml::Value::Table("name = \"web\"\nports = [80, 8080.5]".parse().unwrap());
        let check = |value: &toml::Value| {
            value
                .clone()
                .try_into::<Doc>()
                .map(drop)
                .map_err(|e| e.message().to_string())
        };
        let (field, _) = locate_error(&doc, check).unwrap();
        assert_eq!(field.as_str(), "ports[1]");
    }
}
