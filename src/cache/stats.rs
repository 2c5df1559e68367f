//! Cache Statistics Module
//!
//! Hit/miss/eviction counters kept by the bounded article caches.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for one bounded cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful retrievals
    pub hits: u64,
    /// Failed retrievals (key absent or expired)
    pub misses: u64,
    /// Entries evicted by the capacity bound
    pub evictions: u64,
    /// Current number of entries
    pub entries: usize,
}

impl CacheStats {
    /// Creates counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits over total lookups, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_entries(&mut self, count: usize) {
        self.entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_hit();

        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_eviction_counter() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_eviction();

        assert_eq!(stats.evictions, 2);
    }
}
