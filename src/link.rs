//! Link classification and route normalization.

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/en/, /en/guides/setup).
    SiteRoot(&'a str),
    /// File-relative path (./setup, ../other).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Check if link is HTTP/HTTPS.
    #[inline]
    pub fn is_http(link: &str) -> bool {
        link.starts_with("http://") || link.starts_with("https://")
    }

    /// Site-root path, if this link is one.
    #[inline]
    pub fn site_root(&self) -> Option<&'a str> {
        match *self {
            Self::SiteRoot(path) => Some(path),
            _ => None,
        }
    }
}

/// Whether a link has a URL scheme (`https:`, `mailto:`, ...).
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Normalize a site path or content file path into a route.
///
/// - fragment and query are dropped
/// - a leading `/` is ensured
/// - `.md` / `.html` suffixes are dropped
/// - a trailing `index` becomes a trailing `/`
///
/// ```text
/// /en/guides/index.md      -> /en/guides/
/// en/guides/setup.md       -> /en/guides/setup
/// /en/guides/setup.html#a  -> /en/guides/setup
/// /en/                     -> /en/
/// ```
pub fn normalize_route(path: &str) -> String {
    let path = path.split(['#', '?']).next().unwrap_or_default();
    let path = path
        .strip_suffix(".md")
        .or_else(|| path.strip_suffix(".html"))
        .unwrap_or(path);

    let mut route = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        route.push('/');
    }
    route.push_str(path);

    if route == "/index" {
        route.truncate(1);
    } else if route.ends_with("/index") {
        route.truncate(route.len() - "index".len());
    }
    route
}

/// Whether `prefix` is a path prefix of `path`, at a segment boundary.
///
/// `/en/` is a prefix of `/en/guides/`; `/en/gui` is not a prefix of
/// `/en/guides/`.
pub fn is_path_prefix(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://github.com/org"),
            LinkKind::External("https://github.com/org")
        ));
        assert!(matches!(
            LinkKind::parse("mailto:docs@example.com"),
            LinkKind::External(_)
        ));
        assert!(LinkKind::is_http("https://example.com"));
        assert!(!LinkKind::is_http("mailto:docs@example.com"));
    }

    #[test]
    fn test_parse_fragment() {
        assert!(matches!(
            LinkKind::parse("#setup"),
            LinkKind::Fragment("setup")
        ));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Fragment("")));
    }

    #[test]
    fn test_parse_site_root() {
        assert_eq!(
            LinkKind::parse("/es/guides/").site_root(),
            Some("/es/guides/")
        );
        assert_eq!(LinkKind::parse("guides/").site_root(), None);
    }

    #[test]
    fn test_parse_file_relative() {
        assert!(matches!(
            LinkKind::parse("./setup"),
            LinkKind::FileRelative("./setup")
        ));
        assert!(matches!(
            LinkKind::parse("setup"),
            LinkKind::FileRelative("setup")
        ));
    }

    #[test]
    fn test_normalize_route() {
        assert_eq!(normalize_route("/en/guides/index.md"), "/en/guides/");
        assert_eq!(normalize_route("en/guides/setup.md"), "/en/guides/setup");
        assert_eq!(normalize_route("/en/guides/setup.html#top"), "/en/guides/setup");
        assert_eq!(normalize_route("/en/?q=1"), "/en/");
        assert_eq!(normalize_route("index.md"), "/");
        assert_eq!(normalize_route("/"), "/");
        // Only a whole `index` segment collapses.
        assert_eq!(normalize_route("/en/reindex"), "/en/reindex");
    }

    #[test]
    fn test_is_path_prefix() {
        assert!(is_path_prefix("/en/", "/en/guides/"));
        assert!(is_path_prefix("/en/guides/", "/en/guides/"));
        assert!(is_path_prefix("/en/guides", "/en/guides/setup"));
        assert!(!is_path_prefix("/en/gui", "/en/guides/"));
        assert!(!is_path_prefix("/es/", "/en/guides/"));
    }
}
