//! Sidebar trees.
//!
//! Each locale maps path prefixes to a sequence of entries. An entry is
//! either a page link or a group of further entries:
//!
//! ```toml
//! [[locales.en.theme.sidebar."/en/guides/"]]
//! text = "Guides"
//!
//! [[locales.en.theme.sidebar."/en/guides/".items]]
//! text = "Setup"
//! link = "/en/guides/setup"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::nav::validate_link;

/// A sidebar node: a group of entries, or a leaf page link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    Group(SidebarGroup),
    Item(SidebarItem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub text: String,
    /// `None`: not collapsible. `Some(false)`: collapsible, starts open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    pub items: Vec<SidebarEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub text: String,
    pub link: String,
}

/// Wire shape: both variants share one table layout and are told apart by
/// which of `link` / `items` is set.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSidebarEntry {
    #[serde(default)]
    text: String,
    link: Option<String>,
    collapsed: Option<bool>,
    items: Option<Vec<SidebarEntry>>,
}

impl<'de> Deserialize<'de> for SidebarEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSidebarEntry::deserialize(deserializer)?;
        match (raw.link, raw.items) {
            (Some(_), Some(_)) => Err(D::Error::custom(format!(
                "sidebar entry `{}` sets both `link` and `items`",
                raw.text
            ))),
            (None, None) => Err(D::Error::custom(format!(
                "sidebar entry `{}` needs either `link` or `items`",
                raw.text
            ))),
            (Some(link), None) => {
                if raw.collapsed.is_some() {
                    return Err(D::Error::custom(format!(
                        "sidebar item `{}` has a link; `collapsed` only applies to groups",
                        raw.text
                    )));
                }
                Ok(Self::Item(SidebarItem {
                    text: raw.text,
                    link,
                }))
            }
            (None, Some(items)) => Ok(Self::Group(SidebarGroup {
                text: raw.text,
                collapsed: raw.collapsed,
                items,
            })),
        }
    }
}

impl SidebarEntry {
    pub fn item(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Item(SidebarItem {
            text: text.into(),
            link: link.into(),
        })
    }

    pub fn group(text: impl Into<String>, collapsed: Option<bool>, items: Vec<Self>) -> Self {
        Self::Group(SidebarGroup {
            text: text.into(),
            collapsed,
            items,
        })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Group(group) => &group.text,
            Self::Item(item) => &item.text,
        }
    }

    /// Nesting depth: 1 for an item, 1 + deepest child for a group.
    pub fn depth(&self) -> usize {
        match self {
            Self::Item(_) => 1,
            Self::Group(group) => 1 + group.items.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// Visit every leaf item with its field path, depth first in order.
    pub fn for_each_item<'a>(&'a self, field: &FieldPath, f: &mut impl FnMut(&'a SidebarItem, FieldPath)) {
        match self {
            Self::Item(item) => f(item, field.clone()),
            Self::Group(group) => {
                let items = field.key("items");
                for (i, child) in group.items.iter().enumerate() {
                    child.for_each_item(&items.index(i), f);
                }
            }
        }
    }

    pub(crate) fn validate(&self, prefix: &str, field: &FieldPath, diag: &mut ConfigDiagnostics) {
        if self.text().trim().is_empty() {
            diag.missing(field.key("text"));
        }
        match self {
            Self::Item(item) => validate_link(&item.link, prefix, field.key("link"), diag),
            Self::Group(group) => {
                let items = field.key("items");
                if group.items.is_empty() {
                    diag.warn(items.clone(), "group has no entries");
                }
                for (i, child) in group.items.iter().enumerate() {
                    child.validate(prefix, &items.index(i), diag);
                }
            }
        }
    }
}

/// Flatten a sidebar sequence into `(item, field)` pairs.
pub fn sidebar_items<'a>(entries: &'a [SidebarEntry], field: &FieldPath) -> Vec<(&'a SidebarItem, FieldPath)> {
    let mut out = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        entry.for_each_item(&field.index(i), &mut |item, path| out.push((item, path)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Doc {
        sidebar: Vec<SidebarEntry>,
    }

    const SKILLS: &str = r#"
[[sidebar]]
text = "Skills Module"

[[sidebar.items]]
text = "Fundamentals"
collapsed = false
items = [
    { text = "What Are Skills?", link = "/en/modules/skills/01-fundamentals/what-are-skills" },
    { text = "Architecture", link = "/en/modules/skills/01-fundamentals/architecture" },
]

[[sidebar.items]]
text = "Installation"
link = "/en/modules/skills/02-using-skills/installation"
"#;

    #[test]
    fn test_parse_nested_groups() {
        let doc: Doc = toml::from_str(SKILLS).unwrap();
        let [SidebarEntry::Group(module)] = doc.sidebar.as_slice() else {
            panic!("expected a single group");
        };
        assert_eq!(module.text, "Skills Module");
        assert_eq!(module.collapsed, None);
        assert_eq!(module.items.len(), 2);
        assert!(matches!(
            &module.items[0],
            SidebarEntry::Group(SidebarGroup { collapsed: Some(false), .. })
        ));
        assert!(matches!(&module.items[1], SidebarEntry::Item(_)));
        assert_eq!(doc.sidebar[0].depth(), 3);
    }

    #[test]
    fn test_flatten_items_with_paths() {
        let doc: Doc = toml::from_str(SKILLS).unwrap();
        let items = sidebar_items(&doc.sidebar, &FieldPath::root().key("sidebar"));
        let paths: Vec<_> = items.iter().map(|(_, f)| f.as_str().to_string()).collect();
        assert_eq!(
            paths,
            [
                "sidebar[0].items[0].items[0]",
                "sidebar[0].items[0].items[1]",
                "sidebar[0].items[1]",
            ]
        );
        assert_eq!(items[2].0.text, "Installation");
    }

    #[test]
    fn test_link_and_items_conflict() {
        let err = toml::from_str::<Doc>(
            r#"sidebar = [{ text = "Both", link = "/en/", items = [] }]"#,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("both `link` and `items`"));
    }

    #[test]
    fn test_entry_needs_link_or_items() {
        let err = toml::from_str::<Doc>(r#"sidebar = [{ text = "Empty" }]"#)
            .err()
            .unwrap();
        assert!(err.to_string().contains("either `link` or `items`"));
    }

    #[test]
    fn test_unknown_entry_key_rejected() {
        assert!(toml::from_str::<Doc>(r#"sidebar = [{ text = "A", link = "/en/", icon = "x" }]"#).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let doc: Doc = toml::from_str(SKILLS).unwrap();
        let json = serde_json::to_string(&doc.sidebar).unwrap();
        let back: Vec<SidebarEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc.sidebar);
        // Non-collapsible groups don't grow a `collapsed` key.
        assert!(json.starts_with(r#"[{"text":"Skills Module","items""#));
    }

    #[test]
    fn test_validate_empty_group_warns() {
        let entry = SidebarEntry::group("Empty", None, Vec::new());
        let mut diag = ConfigDiagnostics::new();
        entry.validate("/en/", &FieldPath::root().key("sidebar").index(0), &mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings()[0].0.as_str(), "sidebar[0].items");
    }
}
