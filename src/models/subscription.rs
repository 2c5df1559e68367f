//! Subscription, timeline and favorites records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ArticleFeed, SourceCategory};

/// What a subscription points at: a whole RSS source or a tracked topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionType {
    Rss,
    Topic,
}

/// One entry of the user's subscription list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: SubscriptionType,
    pub target_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub category: Option<SourceCategory>,
    #[serde(default)]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One cached window of a subscription timeline, with its continuation
/// cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub items: Vec<ArticleFeed>,
    #[serde(default)]
    pub cursor: Option<String>,
    pub has_more: bool,
}

/// The cached favorites page. `page` and `last` mirror the server-side
/// pagination state at fetch time and are left untouched by local
/// favorite/unfavorite mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesPage {
    pub items: Vec<ArticleFeed>,
    pub page: u32,
    pub last: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_type_wire_name() {
        let json = r#"{
            "id": 5,
            "type": "TOPIC",
            "targetId": 9,
            "createdAt": "2026-07-30T10:00:00Z"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.kind, SubscriptionType::Topic);
        assert!(sub.name.is_none());
    }

    #[test]
    fn test_feed_page_without_cursor() {
        let json = r#"{"items": [], "hasMore": false}"#;
        let page: FeedPage = serde_json::from_str(json).unwrap();
        assert!(page.cursor.is_none());
        assert!(!page.has_more);
    }
}
