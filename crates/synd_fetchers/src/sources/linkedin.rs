use async_trait::async_trait;
use chrono::{Duration, Utc};
use scraper::Html;
use tracing::debug;

use synd_core::types::{ArticleStatus, ContentSource};
use synd_core::{Article, Error, Result};

use crate::sources::{utils, SourceFetcher};

/// Feed markup classes probed on the recent-activity page. LinkedIn renders
/// nothing useful to anonymous clients most of the time, so the count of
/// these is the only signal we get.
const FEED_SELECTORS: &[&str] = &[
    ".feed-shared-update-v2",
    ".update-components-text",
    ".feed-shared-inline-show-more-text",
];

const MAX_SYNTHESIZED: usize = 10;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Scrapes a profile's recent-activity page.
///
/// This does not parse structured post payloads. It counts occurrences of
/// known feed markup classes and synthesizes placeholder entries
/// proportional to the count, so the returned articles stand in for real
/// posts rather than reproduce them. Anything that smells like the auth
/// wall is an error; the caller substitutes the curated fallback.
pub struct LinkedInFetcher {
    profile: String,
    author: String,
    client: reqwest::Client,
}

impl LinkedInFetcher {
    pub fn new(profile: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            author: author.into(),
            client: reqwest::Client::new(),
        }
    }

    fn activity_url(&self) -> String {
        format!(
            "https://www.linkedin.com/in/{}/recent-activity/all/",
            self.profile
        )
    }

    /// Count feed post markers in the raw page markup.
    fn count_feed_posts(html: &str) -> Result<usize> {
        if html.contains("authwall") || html.contains("/checkpoint/") {
            return Err(Error::Fetch(
                "LinkedIn served the auth wall instead of the activity feed".to_string(),
            ));
        }
        let document = Html::parse_document(html);
        let mut best = 0;
        for selector in FEED_SELECTORS {
            best = best.max(utils::count_matches(&document, selector)?);
        }
        Ok(best)
    }

    /// Placeholder entries standing in for the posts the markup indicated.
    fn synthesize_posts(&self, count: usize) -> Vec<Article> {
        let count = count.min(MAX_SYNTHESIZED);
        let now = Utc::now();
        (0..count)
            .map(|i| {
                let published_at = now - Duration::days(i as i64 * 3);
                Article {
                    id: format!("li-{}-{}", self.profile, i + 1),
                    title: format!("LinkedIn update #{}", i + 1),
                    excerpt: format!(
                        "Recent activity detected on the {} LinkedIn feed.",
                        self.profile
                    ),
                    full_content: format!(
                        "A post was detected on the {} LinkedIn activity feed. \
                         Post bodies are not available to anonymous clients; \
                         open the profile for the full text.",
                        self.profile
                    ),
                    author: self.author.clone(),
                    category: "Updates".to_string(),
                    source: ContentSource::LinkedIn,
                    read_time: "1 min".to_string(),
                    date: Article::display_date(&published_at),
                    published_at,
                    status: ArticleStatus::Pending,
                }
            })
            .collect()
    }
}

#[async_trait]
impl SourceFetcher for LinkedInFetcher {
    fn source(&self) -> ContentSource {
        ContentSource::LinkedIn
    }

    async fn fetch(&self) -> Result<Vec<Article>> {
        let url = self.activity_url();
        debug!("Fetching LinkedIn activity from {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "LinkedIn returned {} for {}",
                status, url
            )));
        }

        let html = response.text().await?;
        let count = Self::count_feed_posts(&html)?;
        if count == 0 {
            return Err(Error::Fetch(format!(
                "No feed markup found on {} (page likely requires a session)",
                url
            )));
        }

        debug!("Found {} feed post markers for {}", count, self.profile);
        Ok(self.synthesize_posts(count))
    }

    fn fallback(&self) -> Vec<Article> {
        let entries: &[(&str, &str, &str, &str)] = &[
            (
                "li-fallback-1",
                "Why great leaders ask more questions than they answer",
                "The best coaching conversations start with a question you \
                 don't already know the answer to.",
                "2024-03-12T09:00:00Z",
            ),
            (
                "li-fallback-2",
                "Three signs your team has stopped telling you the truth",
                "Silence in meetings is rarely agreement. Here is what to \
                 listen for instead.",
                "2024-02-26T09:00:00Z",
            ),
            (
                "li-fallback-3",
                "The feedback sandwich is stale",
                "Direct, specific, kind. Pick all three and skip the bread.",
                "2024-02-05T09:00:00Z",
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
                    category: "Leadership".to_string(),
                    source: ContentSource::LinkedIn,
                    read_time: "2 min".to_string(),
                    date: Article::display_date(&published_at),
                    published_at,
                    status: ArticleStatus::Pending,
                }
            })
            .collect()
    }
}
