use async_trait::async_trait;
use scraper::{Html, Selector};

use synd_core::types::ContentSource;
use synd_core::{Article, Error, Result};

pub mod linkedin;
pub mod wordpress;

pub use linkedin::LinkedInFetcher;
pub use wordpress::WordPressFetcher;

/// One external content origin.
///
/// `fetch` returns an error on any remote failure; it never substitutes
/// stand-in content. The caller decides whether to fall back to the curated
/// set, so live data and fallback data stay distinguishable.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// The origin tag stamped on everything this fetcher produces.
    fn source(&self) -> ContentSource;

    /// Retrieve and normalize articles from the remote origin.
    async fn fetch(&self) -> Result<Vec<Article>>;

    /// The curated stand-in set for this origin, used when `fetch` fails.
    fn fallback(&self) -> Vec<Article>;
}

/// Common utilities for fetchers.
pub(crate) mod utils {
    use super::*;

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Fetch(format!("Invalid selector {:?}: {}", selector, e)))
    }

    /// Number of elements matching `selector` in the document.
    pub fn count_matches(document: &Html, selector: &str) -> Result<usize> {
        let selector = parse_selector(selector)?;
        Ok(document.select(&selector).count())
    }

    /// Flatten rendered HTML to plain text.
    pub fn strip_tags(html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        fragment
            .root_element()
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// "N min" estimate at roughly 200 words per minute.
    pub fn estimate_read_time(text: &str) -> String {
        let words = text.split_whitespace().count();
        let minutes = (words / 200).max(1);
        format!("{} min", minutes)
    }
}
