use std::sync::Arc;

use synd_core::{Article, ContentStore};
use synd_fetchers::Aggregator;

/// Filter applied to the published set on the public read path.
///
/// The site shows one coach's long-form content: short "tip" style posts
/// and guest categories stay out of the public feed even when approved.
#[derive(Debug, Clone, Default)]
pub struct PublishPolicy {
    /// Only articles by this author are served. `None` serves everyone.
    pub author: Option<String>,
    /// Categories excluded from the public feed, matched case-insensitively.
    pub excluded_categories: Vec<String>,
}

impl PublishPolicy {
    pub fn allows(&self, article: &Article) -> bool {
        if let Some(author) = &self.author {
            if !article.author.eq_ignore_ascii_case(author) {
                return false;
            }
        }
        !self
            .excluded_categories
            .iter()
            .any(|category| article.category.eq_ignore_ascii_case(category))
    }
}

pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub aggregator: Arc<Aggregator>,
    pub policy: PublishPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use synd_core::types::{ArticleStatus, ContentSource};

    fn article(author: &str, category: &str) -> Article {
        let published_at = Utc::now();
        Article {
            id: "a1".to_string(),
            title: "Title".to_string(),
            excerpt: "Excerpt".to_string(),
            full_content: "Body".to_string(),
            author: author.to_string(),
            category: category.to_string(),
            source: ContentSource::Curated,
            read_time: "2 min".to_string(),
            date: Article::display_date(&published_at),
            published_at,
            status: ArticleStatus::Published,
        }
    }

    #[test]
    fn test_policy_filters_author_and_category() {
        let policy = PublishPolicy {
            author: Some("Jane Doe".to_string()),
            excluded_categories: vec!["Tips".to_string()],
        };

        assert!(policy.allows(&article("Jane Doe", "Leadership")));
        assert!(policy.allows(&article("jane doe", "Leadership")));
        assert!(!policy.allows(&article("Jane Doe", "tips")));
        assert!(!policy.allows(&article("Someone Else", "Leadership")));
    }

    #[test]
    fn test_default_policy_allows_everything() {
        let policy = PublishPolicy::default();
        assert!(policy.allows(&article("Anyone", "Tips")));
    }
}
