//! Composite Cache Facade
//!
//! One owned cache-service instance combining every domain, created by the
//! application's composition root and handed down to the view layer; there
//! is no ambient global state.
//!
//! Callers check a getter before issuing a network fetch and call the
//! matching setter on fetch success. User actions (favorite, subscribe,
//! unsubscribe) go through the cross-cache mutations, which patch cached
//! copies in place instead of forcing a refetch.
//!
//! The service never initiates network activity. Every mutation is
//! synchronous and atomic with respect to other cache operations; fetches
//! racing on the same key are not deduplicated here — whichever setter
//! lands last wins.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{
    BoundedRecencyMap, CacheStats, MergedPages, PagedCategoryCache, TtlClass, TtlMap, TtlSlot,
};
use crate::config::Config;
use crate::models::{
    ArticleDetail, ArticleExtra, ArticleFeed, FavoritesPage, FeedPage, HotEvent, RssSource,
    Subscription, WordCloudEntry,
};
use crate::persist::{PersistentSnapshot, SnapshotStore};

// == Article Cache Stats ==
/// Counters of the three bounded article caches.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleCacheStats {
    pub details: CacheStats,
    pub extras: CacheStats,
    pub merged_contents: CacheStats,
}

// == Cache Service ==
/// The composite cache for the whole application.
#[derive(Debug)]
pub struct CacheService {
    /// Landing-page trending events, Short class
    hot_events: TtlSlot<Vec<HotEvent>>,
    /// Latest articles per source id, Short class
    source_articles: TtlMap<u64, Vec<ArticleFeed>>,
    /// The user's subscription list, Short class
    subscriptions: TtlSlot<Vec<Subscription>>,
    /// Subscription timelines by cache key, Short class
    subscription_feeds: TtlMap<String, FeedPage>,
    /// The favorites page, Short class
    favorites: TtlSlot<FavoritesPage>,
    /// Word clouds per source id (0 = all sources), Medium class
    word_clouds: TtlMap<u64, Vec<WordCloudEntry>>,
    /// RSS source pages per category, Short class
    sources: PagedCategoryCache<RssSource>,
    /// Article details by article id, Long class, persisted
    article_details: BoundedRecencyMap<u64, ArticleDetail>,
    /// AI extras by article id, Long class, persisted
    article_extras: BoundedRecencyMap<u64, ArticleExtra>,
    /// Merged article bodies by article id, Long class, persisted
    merged_contents: BoundedRecencyMap<u64, String>,
    /// Durable snapshot store; `None` disables persistence
    snapshots: Option<SnapshotStore>,
}

impl CacheService {
    // == Constructor ==
    /// Creates the service and hydrates the article caches from the
    /// durable snapshot.
    ///
    /// Hydration happens here, exactly once, so no read of the Long-class
    /// maps can precede it. When no storage directory is configured and
    /// the platform provides none, persistence is disabled and the
    /// service runs purely in memory.
    pub fn new(config: &Config) -> Self {
        let snapshots = match &config.storage_dir {
            Some(dir) => Some(SnapshotStore::with_dir(dir.clone())),
            None => match SnapshotStore::new() {
                Ok(store) => Some(store),
                Err(err) => {
                    warn!("Durable snapshots disabled: {}", err);
                    None
                }
            },
        };

        let mut service = Self {
            hot_events: TtlSlot::new(TtlClass::Short),
            source_articles: TtlMap::new(TtlClass::Short),
            subscriptions: TtlSlot::new(TtlClass::Short),
            subscription_feeds: TtlMap::new(TtlClass::Short),
            favorites: TtlSlot::new(TtlClass::Short),
            word_clouds: TtlMap::new(TtlClass::Medium),
            sources: PagedCategoryCache::new(TtlClass::Short),
            article_details: BoundedRecencyMap::new(config.article_capacity, TtlClass::Long),
            article_extras: BoundedRecencyMap::new(config.article_capacity, TtlClass::Long),
            merged_contents: BoundedRecencyMap::new(config.article_capacity, TtlClass::Long),
            snapshots,
        };
        service.hydrate();
        service
    }

    /// Restores the three article caches from the blob, keeping only
    /// entries still inside the Long window at hydration time.
    fn hydrate(&mut self) {
        let Some(store) = &self.snapshots else {
            return;
        };
        let snapshot = store.read();
        let now = Utc::now();

        let mut restored = 0usize;
        let mut dropped = 0usize;
        for (id, entry) in snapshot.article_details {
            if entry.is_valid(TtlClass::Long, now) {
                self.article_details.insert_entry(id, entry);
                restored += 1;
            } else {
                dropped += 1;
            }
        }
        for (id, entry) in snapshot.article_extras {
            if entry.is_valid(TtlClass::Long, now) {
                self.article_extras.insert_entry(id, entry);
                restored += 1;
            } else {
                dropped += 1;
            }
        }
        for (id, entry) in snapshot.article_merged_contents {
            if entry.is_valid(TtlClass::Long, now) {
                self.merged_contents.insert_entry(id, entry);
                restored += 1;
            } else {
                dropped += 1;
            }
        }

        if restored > 0 || dropped > 0 {
            info!(
                "Hydrated {} article cache entries, dropped {} expired",
                restored, dropped
            );
        }
    }

    // == Hot Events ==
    /// Cached trending events, if fresh.
    pub fn hot_events(&mut self) -> Option<Vec<HotEvent>> {
        self.hot_events.get().cloned()
    }

    pub fn set_hot_events(&mut self, events: Vec<HotEvent>) {
        self.hot_events.set(events);
    }

    // == Source Articles ==
    /// Cached latest articles of one source, if fresh.
    pub fn source_articles(&mut self, source_id: u64) -> Option<Vec<ArticleFeed>> {
        self.source_articles.get(&source_id).cloned()
    }

    pub fn set_source_articles(&mut self, source_id: u64, articles: Vec<ArticleFeed>) {
        self.source_articles.insert(source_id, articles);
    }

    // == Subscriptions ==
    /// Cached subscription list, if fresh.
    pub fn subscriptions(&mut self) -> Option<Vec<Subscription>> {
        self.subscriptions.get().cloned()
    }

    pub fn set_subscriptions(&mut self, subscriptions: Vec<Subscription>) {
        self.subscriptions.set(subscriptions);
    }

    /// Replaces the cached entry matching the item's id, or prepends the
    /// item; seeds a singleton list when nothing is cached yet. The list
    /// timestamp is refreshed either way.
    pub fn upsert_subscription(&mut self, item: Subscription) {
        if self.subscriptions.is_vacant() {
            self.subscriptions.set(vec![item]);
            return;
        }
        self.subscriptions.update(|list| {
            match list.iter_mut().find(|sub| sub.id == item.id) {
                Some(existing) => *existing = item,
                None => list.insert(0, item),
            }
        });
    }

    /// Filters the subscription out of the cached list and drops its
    /// cached timeline, so a removed subscription never serves a stale
    /// feed.
    pub fn remove_subscription(&mut self, subscription_id: u64) {
        self.subscriptions
            .update(|list| list.retain(|sub| sub.id != subscription_id));
        self.subscription_feeds
            .remove(Self::subscription_feed_key(subscription_id).as_str());
    }

    // == Subscription Timelines ==
    /// Key under which a subscription's own timeline is cached.
    pub fn subscription_feed_key(subscription_id: u64) -> String {
        format!("sub:{subscription_id}")
    }

    /// Cached timeline window under `key`, if fresh.
    pub fn subscription_feed(&mut self, key: &str) -> Option<FeedPage> {
        self.subscription_feeds.get(key).cloned()
    }

    pub fn set_subscription_feed(&mut self, key: &str, page: FeedPage) {
        self.subscription_feeds.insert(key.to_string(), page);
    }

    // == Favorites ==
    /// Cached favorites page, if fresh.
    pub fn favorites(&mut self) -> Option<FavoritesPage> {
        self.favorites.get().cloned()
    }

    pub fn set_favorites(&mut self, page: FavoritesPage) {
        self.favorites.set(page);
    }

    /// Prepends the article to the favorites items if absent. Pagination
    /// metadata stays as fetched; a first page is seeded when nothing is
    /// cached.
    pub fn upsert_favorite(&mut self, article: ArticleFeed) {
        if self.favorites.is_vacant() {
            self.favorites.set(FavoritesPage {
                items: vec![article],
                page: 1,
                last: false,
            });
            return;
        }
        self.favorites.update(|page| {
            if !page.items.iter().any(|item| item.id == article.id) {
                page.items.insert(0, article);
            }
        });
    }

    /// Drops the article from the favorites items. Page metadata is left
    /// untouched, so displayed counts can drift from server truth until
    /// the next full refetch.
    pub fn remove_favorite(&mut self, article_id: u64) {
        self.favorites
            .update(|page| page.items.retain(|item| item.id != article_id));
    }

    // == Word Clouds ==
    /// Cached word cloud of a source; source id 0 means "all sources".
    pub fn word_cloud(&mut self, source_id: u64) -> Option<Vec<WordCloudEntry>> {
        self.word_clouds.get(&source_id).cloned()
    }

    pub fn set_word_cloud(&mut self, source_id: u64, entries: Vec<WordCloudEntry>) {
        self.word_clouds.insert(source_id, entries);
    }

    // == RSS Sources ==
    /// Merged view of every cached page of a category plus the next page
    /// to request.
    pub fn sources(&mut self, category: &str) -> Option<MergedPages<RssSource>> {
        self.sources.merged(category)
    }

    /// Stores one fetched page of a category, replacing a slice with the
    /// same page number.
    pub fn add_sources(&mut self, category: &str, sources: Vec<RssSource>, page: u32, last: bool) {
        self.sources.add_page(category, sources, page, last);
    }

    /// Drops a category so the next read starts a fresh paging sequence.
    pub fn clear_sources(&mut self, category: &str) {
        self.sources.clear(category);
    }

    /// Rewrites the subscription state of every cached copy of a source
    /// across every category and page.
    pub fn sync_source_subscription(
        &mut self,
        source_id: u64,
        is_subscribed: bool,
        subscription_id: Option<u64>,
    ) {
        self.sources.patch_all(
            |source| source.id == source_id,
            |source| {
                source.is_subscribed = is_subscribed;
                source.subscription_id = subscription_id;
            },
        );
    }

    // == Article Detail ==
    /// Cached article detail, if still inside the Long window.
    ///
    /// A lazy expiry detected by this read rewrites the snapshot so the
    /// blob keeps tracking memory.
    pub fn article_detail(&mut self, article_id: u64) -> Option<ArticleDetail> {
        let before = self.article_details.len();
        let detail = self.article_details.get(&article_id);
        if self.article_details.len() != before {
            self.persist_snapshot();
        }
        detail
    }

    pub fn set_article_detail(&mut self, article_id: u64, detail: ArticleDetail) {
        self.article_details.insert(article_id, detail);
        self.persist_snapshot();
    }

    // == Article Extra ==
    /// Cached AI metadata of an article, if still inside the Long window.
    pub fn article_extra(&mut self, article_id: u64) -> Option<ArticleExtra> {
        let before = self.article_extras.len();
        let extra = self.article_extras.get(&article_id);
        if self.article_extras.len() != before {
            self.persist_snapshot();
        }
        extra
    }

    pub fn set_article_extra(&mut self, article_id: u64, extra: ArticleExtra) {
        self.article_extras.insert(article_id, extra);
        self.persist_snapshot();
    }

    // == Merged Content ==
    /// Cached merged article body, if still inside the Long window.
    pub fn merged_content(&mut self, article_id: u64) -> Option<String> {
        let before = self.merged_contents.len();
        let content = self.merged_contents.get(&article_id);
        if self.merged_contents.len() != before {
            self.persist_snapshot();
        }
        content
    }

    pub fn set_merged_content(&mut self, article_id: u64, content: String) {
        self.merged_contents.insert(article_id, content);
        self.persist_snapshot();
    }

    // == Stats ==
    /// Counters of the three article caches.
    pub fn stats(&self) -> ArticleCacheStats {
        ArticleCacheStats {
            details: self.article_details.stats(),
            extras: self.article_extras.stats(),
            merged_contents: self.merged_contents.stats(),
        }
    }

    // == Global Operations ==
    /// Resets every domain to empty and deletes the durable blob.
    pub fn clear_all(&mut self) {
        self.hot_events.clear();
        self.source_articles.clear();
        self.subscriptions.clear();
        self.subscription_feeds.clear();
        self.favorites.clear();
        self.word_clouds.clear();
        self.sources.clear_all();
        self.article_details.clear();
        self.article_extras.clear();
        self.merged_contents.clear();
        if let Some(store) = &self.snapshots {
            store.clear();
        }
        debug!("All caches cleared");
    }

    /// Alias of [`CacheService::clear_all`]; no selective-domain refresh
    /// is offered.
    pub fn force_refresh(&mut self) {
        self.clear_all();
    }

    // == Persistence ==
    /// Writes all three article caches as one blob, not only the mutated
    /// one; that keeps restart hydration trivial at the cost of redundant
    /// writes on bursts. Failures are swallowed inside the store.
    fn persist_snapshot(&self) {
        let Some(store) = &self.snapshots else {
            return;
        };
        let snapshot = PersistentSnapshot {
            article_details: self
                .article_details
                .entries_ordered()
                .map(|(id, entry)| (*id, entry.clone()))
                .collect(),
            article_extras: self
                .article_extras
                .entries_ordered()
                .map(|(id, entry)| (*id, entry.clone()))
                .collect(),
            article_merged_contents: self
                .merged_contents
                .entries_ordered()
                .map(|(id, entry)| (*id, entry.clone()))
                .collect(),
        };
        store.write(&snapshot);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn test_service() -> (CacheService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config {
            article_capacity: 100,
            storage_dir: Some(temp_dir.path().to_path_buf()),
        };
        (CacheService::new(&config), temp_dir)
    }

    fn subscription(id: u64) -> Subscription {
        Subscription {
            id,
            kind: crate::models::SubscriptionType::Rss,
            target_id: id * 10,
            name: Some(format!("sub {id}")),
            icon: None,
            link: None,
            category: None,
            content: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_subscription_feed_key_format() {
        assert_eq!(CacheService::subscription_feed_key(42), "sub:42");
    }

    #[test]
    fn test_upsert_subscription_seeds_singleton() {
        let (mut service, _temp_dir) = test_service();

        service.upsert_subscription(subscription(1));

        let list = service.subscriptions().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 1);
    }

    #[test]
    fn test_upsert_subscription_replaces_by_id() {
        let (mut service, _temp_dir) = test_service();
        service.set_subscriptions(vec![subscription(1), subscription(2)]);

        let mut renamed = subscription(2);
        renamed.name = Some("renamed".to_string());
        service.upsert_subscription(renamed);

        let list = service.subscriptions().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name.as_deref(), Some("renamed"));
    }

    #[test]
    fn test_upsert_subscription_prepends_new() {
        let (mut service, _temp_dir) = test_service();
        service.set_subscriptions(vec![subscription(1)]);

        service.upsert_subscription(subscription(9));

        let list = service.subscriptions().unwrap();
        assert_eq!(list[0].id, 9);
        assert_eq!(list[1].id, 1);
    }

    #[test]
    fn test_remove_subscription_drops_timeline() {
        let (mut service, _temp_dir) = test_service();
        service.set_subscriptions(vec![subscription(1), subscription(2)]);
        service.set_subscription_feed(
            &CacheService::subscription_feed_key(2),
            FeedPage {
                items: vec![],
                cursor: Some("c1".to_string()),
                has_more: true,
            },
        );

        service.remove_subscription(2);

        let list = service.subscriptions().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 1);
        assert!(service
            .subscription_feed(&CacheService::subscription_feed_key(2))
            .is_none());
    }

    #[test]
    fn test_word_cloud_all_sources_key() {
        let (mut service, _temp_dir) = test_service();
        service.set_word_cloud(
            0,
            vec![WordCloudEntry {
                text: "rust".to_string(),
                value: 42,
            }],
        );

        assert!(service.word_cloud(0).is_some());
        assert!(service.word_cloud(3).is_none());
    }

    #[test]
    fn test_stats_reflect_article_reads() {
        let (mut service, _temp_dir) = test_service();

        service.set_merged_content(1, "body".to_string());
        service.merged_content(1);
        service.merged_content(2);

        let stats = service.stats();
        assert_eq!(stats.merged_contents.hits, 1);
        assert_eq!(stats.merged_contents.misses, 1);
        assert_eq!(stats.merged_contents.entries, 1);
        assert_eq!(stats.details.hits, 0);
    }
}
