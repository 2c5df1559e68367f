//! RSS source, hot event and word-cloud records

use serde::{Deserialize, Serialize};

/// Editorial category a source is filed under; also the page-cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceCategory {
    News,
    Tech,
    Programming,
    Society,
    Finance,
    Lifestyle,
    Other,
}

/// An RSS source as listed in the category browser.
///
/// `is_subscribed` and `subscription_id` are the fields rewritten in place
/// by the cross-cache subscription-state sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RssSource {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub link: String,
    pub category: SourceCategory,
    pub is_subscribed: bool,
    #[serde(default)]
    pub subscription_id: Option<u64>,
}

/// A trending topic on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotEvent {
    pub event: String,
    pub score: f64,
    #[serde(default)]
    pub is_subscribed: bool,
}

/// One weighted term of a topic word-cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub value: u32,
}
