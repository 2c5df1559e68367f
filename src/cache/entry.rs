//! Cache Entry Module
//!
//! Defines the cache entry wrapper and the TTL classes governing validity
//! windows.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == TTL Class ==
/// Validity window class applied to a cached domain.
///
/// Validity is checked only at read time; there is no background timer, so
/// an expired-but-unread entry keeps occupying memory until the next read
/// touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlClass {
    /// 5 minutes, for fast-moving list data
    Short,
    /// 12 hours, for word-cloud results
    Medium,
    /// 48 hours, for article bodies and metadata
    Long,
}

impl TtlClass {
    /// Returns the validity window for this class.
    pub fn duration(self) -> Duration {
        match self {
            TtlClass::Short => Duration::minutes(5),
            TtlClass::Medium => Duration::hours(12),
            TtlClass::Long => Duration::hours(48),
        }
    }

    /// Checks whether data stored at `stored_at` is still valid at `now`.
    ///
    /// Boundary condition: validity holds strictly inside
    /// `[stored_at, stored_at + window)`; an entry whose age equals the
    /// window is already expired.
    pub fn is_valid(self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - stored_at < self.duration()
    }
}

// == Cache Entry ==
/// A cached value together with the instant it was stored.
///
/// Entries are immutable and replaced wholesale; a set always produces a
/// fresh entry with a fresh timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data
    pub data: T,
    /// When the data was stored
    pub timestamp: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Creates an entry timestamped now.
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }

    /// Creates an entry with an explicit timestamp.
    ///
    /// Restored snapshot entries keep their original store time so the
    /// Long window keeps counting across restarts.
    pub fn with_timestamp(data: T, timestamp: DateTime<Utc>) -> Self {
        Self { data, timestamp }
    }

    /// Checks this entry against a TTL class at time `now`.
    pub fn is_valid(&self, class: TtlClass, now: DateTime<Utc>) -> bool {
        class.is_valid(self.timestamp, now)
    }
}
