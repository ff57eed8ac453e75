//! Known content routes for link resolution.
//!
//! The content-discovery side of the generator decides which pages exist.
//! `PageSet` is the shape it hands to [`SiteConfig::resolve_links`]: either
//! built from an explicit list of paths, or scanned from a docs directory
//! of markdown files.
//!
//! [`SiteConfig::resolve_links`]: crate::config::SiteConfig::resolve_links

use crate::link::normalize_route;
use jwalk::WalkDir;
use rustc_hash::FxHashSet;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct PageSet {
    routes: FxHashSet<String>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page by site path or content-relative file path.
    pub fn insert(&mut self, path: &str) {
        self.routes.insert(normalize_route(path));
    }

    /// Whether a link target resolves to a known page.
    ///
    /// `/en/guides` and `/en/guides/` both resolve to a `guides/index.md`,
    /// and to a `guides.md`.
    pub fn contains(&self, link: &str) -> bool {
        let route = normalize_route(link);
        if self.routes.contains(&route) {
            return true;
        }
        match route.strip_suffix('/') {
            Some(bare) if !bare.is_empty() => self.routes.contains(bare),
            Some(_) => false,
            None => self.routes.contains(&format!("{route}/")),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Collect every markdown file under `dir` as a route.
    ///
    /// `docs/en/guides/index.md` under `docs/` becomes `/en/guides/`.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("content directory `{}` not found", dir.display()),
            ));
        }

        let mut pages = Self::new();
        WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .filter_map(|p| {
                p.strip_prefix(dir)
                    .ok()
                    .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            })
            .for_each(|rel| pages.insert(&rel));

        Ok(pages)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pages = Self::new();
        for path in iter {
            pages.insert(path.as_ref());
        }
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_contains_with_and_without_trailing_slash() {
        let pages: PageSet = ["/en/guides/index.md", "/en/notes.md"].into_iter().collect();
        assert!(pages.contains("/en/guides/"));
        assert!(pages.contains("/en/guides"));
        assert!(pages.contains("/en/notes"));
        assert!(pages.contains("/en/notes/"));
        assert!(pages.contains("/en/notes#top"));
        assert!(!pages.contains("/en/"));
    }

    #[test]
    fn test_root_route() {
        let pages: PageSet = ["index.md"].into_iter().collect();
        assert!(pages.contains("/"));
        assert!(!pages.contains("/en/"));
    }

    #[test]
    fn test_scan_markdown_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("en/guides")).unwrap();
        fs::write(root.join("en/index.md"), "# Home").unwrap();
        fs::write(root.join("en/guides/setup.md"), "# Setup").unwrap();
        fs::write(root.join("en/guides/logo.png"), [0u8; 4]).unwrap();

        let pages = PageSet::scan(root).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages.contains("/en/"));
        assert!(pages.contains("/en/guides/setup"));
        assert!(!pages.contains("/en/guides/logo"));
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageSet::scan(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
