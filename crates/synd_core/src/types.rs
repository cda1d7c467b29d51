use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin tag for an article. The set is closed: everything entering the
/// store came from one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    LinkedIn,
    WordPress,
    Curated,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::LinkedIn => "linkedin",
            ContentSource::WordPress => "wordpress",
            ContentSource::Curated => "curated",
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle tag for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Pending,
    Approved,
    Published,
}

/// A normalized content record, regardless of origin source.
///
/// `published_at` is authoritative for ordering and persistence; `date` is
/// the human-readable display form and is derived from `published_at` when a
/// source doesn't provide one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub full_content: String,
    pub author: String,
    pub category: String,
    pub source: ContentSource,
    pub read_time: String,
    pub date: String,
    #[serde(rename = "publishedDate")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ArticleStatus,
}

impl Article {
    /// Display date derived from `published_at`, e.g. "January 15, 2024".
    pub fn display_date(published_at: &DateTime<Utc>) -> String {
        published_at.format("%B %-d, %Y").to_string()
    }
}

/// The persisted store document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub approved: Vec<Article>,
    #[serde(default)]
    pub published: Vec<Article>,
    #[serde(default)]
    pub last_published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_published_items: Option<usize>,
    #[serde(default)]
    pub content_version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_roundtrip_uses_wire_names() {
        let article = Article {
            id: "wp-1".to_string(),
            title: "Title".to_string(),
            excerpt: "Excerpt".to_string(),
            full_content: "Body".to_string(),
            author: "Jane Doe".to_string(),
            category: "Leadership".to_string(),
            source: ContentSource::WordPress,
            read_time: "4 min".to_string(),
            date: "January 1, 2024".to_string(),
            published_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            status: ArticleStatus::Approved,
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["fullContent"], "Body");
        assert_eq!(json["readTime"], "4 min");
        assert_eq!(json["publishedDate"], "2024-01-01T00:00:00Z");
        assert_eq!(json["source"], "wordpress");
        assert_eq!(json["status"], "approved");

        let back: Article = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, article.id);
        assert_eq!(back.published_at, article.published_at);
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let json = serde_json::json!({
            "id": "li-1",
            "title": "t",
            "excerpt": "e",
            "fullContent": "c",
            "author": "a",
            "category": "Tips",
            "source": "linkedin",
            "readTime": "1 min",
            "date": "March 5, 2024",
            "publishedDate": "2024-03-05T12:00:00Z"
        });
        let article: Article = serde_json::from_value(json).unwrap();
        assert_eq!(article.status, ArticleStatus::Pending);
    }
}
