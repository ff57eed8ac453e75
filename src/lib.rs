//! polydoc - configuration model for multi-locale documentation sites.
//!
//! A [`config::SiteConfig`] is loaded once from `polydoc.toml` (or JSON),
//! validated as a whole, and then queried:
//!
//! - [`config::SiteConfig::default_locale`]
//! - [`config::SiteConfig::resolve_page`] for the renderer
//! - [`config::SiteConfig::links`] and [`config::SiteConfig::resolve_links`]
//!   for link checking against a [`pages::PageSet`]
//! - [`config::SiteConfig::merge_search_strings`] for search UI copy

pub mod config;
pub mod link;
pub mod logger;
pub mod pages;
pub mod report;
pub mod utils;
