//! Cache Module
//!
//! In-memory caching primitives: TTL-classed entries, single-entry and
//! keyed stores, the bounded insertion-ordered article map, and the
//! paginated category cache.

mod entry;
mod paged;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, TtlClass};
pub use paged::{MergedPages, PageSlice, PagedCategoryCache};
pub use recency::BoundedRecencyMap;
pub use stats::CacheStats;
pub use store::{TtlMap, TtlSlot};

// == Public Constants ==
/// Capacity shared by the three bounded article caches
pub const ARTICLE_CACHE_CAPACITY: usize = 100;
