//! Shared config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! Readers keep whatever `Arc<SiteConfig>` they loaded; a reload never
//! mutates a config in place, it swaps in a freshly loaded one.
//!
//! Reloads are serialized: the stored hash always belongs to the config
//! currently published.

use crate::config::{ConfigError, SiteConfig};
use crate::debug;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct ConfigHandle {
    path: PathBuf,
    current: ArcSwap<SiteConfig>,
    /// Hash of the file content the current config was loaded from.
    /// Held for the whole of a reload.
    hash: Mutex<u64>,
}

impl ConfigHandle {
    /// Load the config at `path` and wrap it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = read(&path)?;
        let config = SiteConfig::from_content(&path, &content)?;
        Ok(Self {
            current: ArcSwap::from_pointee(config),
            hash: Mutex::new(crate::utils::hash::compute(content.as_bytes())),
            path,
        })
    }

    #[inline]
    pub fn get(&self) -> Arc<SiteConfig> {
        self.current.load_full()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload config from disk if content changed.
    ///
    /// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
    /// On error the previous config stays in place.
    pub fn reload(&self) -> Result<bool, ConfigError> {
        let mut hash = self.hash.lock();
        let content = read(&self.path)?;
        let new_hash = crate::utils::hash::compute(content.as_bytes());

        if new_hash == *hash {
            debug!("config"; "{} unchanged", self.path.display());
            return Ok(false);
        }

        let config = SiteConfig::from_content(&self.path, &content)?;
        self.current.store(Arc::new(config));
        *hash = new_hash;
        debug!("config"; "reloaded {}", self.path.display());

        Ok(true)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))
}
