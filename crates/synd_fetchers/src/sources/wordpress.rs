use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use synd_core::dates;
use synd_core::types::{ArticleStatus, ContentSource};
use synd_core::{Article, Error, Result};

use crate::sources::{utils, SourceFetcher};

const PER_PAGE: usize = 20;

/// Pulls posts from a WordPress site's REST API and normalizes the rendered
/// fields into articles.
pub struct WordPressFetcher {
    base_url: String,
    author: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct WpPost {
    id: u64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    date_gmt: Option<String>,
    #[serde(default)]
    title: WpRendered,
    #[serde(default)]
    excerpt: WpRendered,
    #[serde(default)]
    content: WpRendered,
}

#[derive(Debug, Deserialize, Default)]
struct WpRendered {
    #[serde(default)]
    rendered: String,
}

impl WordPressFetcher {
    pub fn new(base_url: impl Into<String>, author: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            author: author.into(),
            client: reqwest::Client::new(),
        }
    }

    fn posts_url(&self) -> String {
        format!(
            "{}/wp-json/wp/v2/posts?per_page={}&orderby=date&order=desc",
            self.base_url, PER_PAGE
        )
    }

    fn normalize(&self, post: WpPost) -> Article {
        // date_gmt is naive UTC; date carries the site's local offset when
        // it carries anything. Prefer GMT.
        let published_at = dates::parse_published(&[
            post.date_gmt.as_deref().unwrap_or(""),
            post.date.as_deref().unwrap_or(""),
        ]);
        let full_content = utils::strip_tags(&post.content.rendered);
        let read_time = utils::estimate_read_time(&full_content);

        Article {
            id: format!("wp-{}", post.id),
            title: utils::strip_tags(&post.title.rendered),
            excerpt: utils::strip_tags(&post.excerpt.rendered),
            full_content,
            author: self.author.clone(),
            category: "Blog".to_string(),
            source: ContentSource::WordPress,
            read_time,
            date: Article::display_date(&published_at),
            published_at,
            status: ArticleStatus::Pending,
        }
    }
}

#[async_trait]
impl SourceFetcher for WordPressFetcher {
    fn source(&self) -> ContentSource {
        ContentSource::WordPress
    }

    async fn fetch(&self) -> Result<Vec<Article>> {
        let url = self.posts_url();
        debug!("Fetching WordPress posts from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "WordPress returned {} for {}",
                status, url
            )));
        }

        let posts: Vec<WpPost> = response.json().await?;
        debug!("Fetched {} posts from {}", posts.len(), self.base_url);
        Ok(posts.into_iter().map(|post| self.normalize(post)).collect())
    }

    fn fallback(&self) -> Vec<Article> {
        let entries: &[(&str, &str, &str, &str)] = &[
            (
                "wp-fallback-1",
                "Building a coaching practice that outlasts you",
                "Systems beat heroics. A practice built on one person's \
                 calendar is a practice with a single point of failure.",
                "2024-03-20T08:00:00Z",
            ),
            (
                "wp-fallback-2",
                "What executive presence actually means",
                "It isn't charisma. It's the discipline of being the \
                 calmest person in the room when stakes are highest.",
                "2024-03-01T08:00:00Z",
            ),
        ];

        entries
            .iter()
            .map(|(id, title, excerpt, date)| {
                let published_at = date.parse().unwrap_or_default();
                Article {
                    id: id.to_string(),
                    title: title.to_string(),
                    excerpt: excerpt.to_string(),
                    full_content: excerpt.to_string(),
                    author: self.author.clone(),
                    category: "Blog".to_string(),
                    source: ContentSource::WordPress,
                    read_time: "3 min".to_string(),
                    date: Article::display_date(&published_at),
                    published_at,
                    status: ArticleStatus::Pending,
                }
            })
            .collect()
    }
}
