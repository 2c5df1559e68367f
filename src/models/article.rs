//! Article records
//!
//! Covers the three article-keyed cache domains: feed summaries, full
//! details, and AI-derived extras.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feed-level article summary as it appears in lists and timelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFeed {
    /// Stable article id, the key for all article caches
    pub id: u64,
    pub source_id: u64,
    pub source_name: String,
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub pub_date: DateTime<Utc>,
    #[serde(default)]
    pub word_count: Option<u32>,
}

/// Full article record including the fetched body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    /// Summary fields, flattened to match the upstream wire shape
    #[serde(flatten)]
    pub feed: ArticleFeed,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Outcome of the AI enrichment pipeline for one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraStatus {
    Success,
    Failed,
}

/// One table-of-contents entry extracted from an article body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub title: String,
    pub anchor: String,
}

/// AI-derived metadata for an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleExtra {
    pub id: u64,
    pub article_id: u64,
    pub overview: String,
    pub key_information: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub toc: Vec<TocEntry>,
    pub status: ExtraStatus,
    #[serde(default)]
    pub error_message: Option<String>,
}
