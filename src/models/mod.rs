//! Domain records for the cached data
//!
//! Plain serde records as supplied by the fetch layer. The cache relies
//! only on the numeric identity fields of the keyed domains and carries
//! everything else opaquely; field names follow the upstream API wire
//! format (camelCase).

pub mod article;
pub mod source;
pub mod subscription;

// Re-export commonly used types
pub use article::{ArticleDetail, ArticleExtra, ArticleFeed, ExtraStatus, TocEntry};
pub use source::{HotEvent, RssSource, SourceCategory, WordCloudEntry};
pub use subscription::{FavoritesPage, FeedPage, Subscription, SubscriptionType};
