//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::ARTICLE_CACHE_CAPACITY;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries each article cache can hold
    pub article_capacity: usize,
    /// Directory for the durable snapshot; `None` falls back to the
    /// platform cache directory
    pub storage_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ARTICLE_CACHE_CAPACITY` - Maximum entries per article cache (default: 100)
    /// - `ARTICLE_CACHE_DIR` - Snapshot directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self {
            article_capacity: env::var("ARTICLE_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(ARTICLE_CACHE_CAPACITY),
            storage_dir: env::var("ARTICLE_CACHE_DIR").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            article_capacity: ARTICLE_CACHE_CAPACITY,
            storage_dir: None,
        }
    }
}
