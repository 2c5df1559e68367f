//! Feed Cache - client-side caching layer for a feed reader
//!
//! Shields the view layer from redundant network calls with TTL-classed
//! in-memory caches, bounded insertion-ordered article caches, and a
//! best-effort durable snapshot that survives process restarts.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod service;

pub use config::Config;
pub use service::{ArticleCacheStats, CacheService};
