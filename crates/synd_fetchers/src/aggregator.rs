use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use synd_core::types::ContentSource;
use synd_core::{Article, ContentStore, Result};

use crate::sources::SourceFetcher;

/// Whether a source's contribution came from the remote origin or from its
/// curated stand-in set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: ContentSource,
    pub count: usize,
    pub origin: Origin,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishResult {
    pub sources: Vec<SourceReport>,
    pub total: usize,
}

/// Merges fetcher output into the store's published view.
pub struct Aggregator {
    fetchers: Vec<Arc<dyn SourceFetcher>>,
    store: Arc<dyn ContentStore>,
}

impl Aggregator {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            fetchers: Vec::new(),
            store,
        }
    }

    pub fn add_fetcher(&mut self, fetcher: Arc<dyn SourceFetcher>) {
        self.fetchers.push(fetcher);
    }

    pub fn sources(&self) -> Vec<ContentSource> {
        self.fetchers.iter().map(|f| f.source()).collect()
    }

    /// Fetch every source, merge with the approved set, and replace the
    /// store contents.
    ///
    /// Fetchers run concurrently; they are independent and I/O-bound. A
    /// failed fetch substitutes the fetcher's curated fallback and the
    /// report marks that source `fallback`, so stand-in content is never
    /// mistaken for live data. The merge with the approved set happens
    /// inside `merge_and_replace`, under the store's write guard: an
    /// approval landing while a fetch is in flight is merged, not erased,
    /// and on an `id` collision the operator-curated version wins.
    pub async fn refresh(&self) -> Result<PublishResult> {
        let fetches = self.fetchers.iter().map(|fetcher| {
            let fetcher = Arc::clone(fetcher);
            async move {
                let outcome = fetcher.fetch().await;
                (fetcher, outcome)
            }
        });

        let mut fetched = Vec::new();
        let mut reports = Vec::with_capacity(self.fetchers.len());

        for (fetcher, outcome) in join_all(fetches).await {
            let source = fetcher.source();
            let (articles, origin) = match outcome {
                Ok(articles) => {
                    info!("Fetched {} articles from {}", articles.len(), source);
                    (articles, Origin::Live)
                }
                Err(e) => {
                    warn!("Fetch from {} failed, using curated fallback: {}", source, e);
                    (fetcher.fallback(), Origin::Fallback)
                }
            };
            reports.push(SourceReport {
                source,
                count: articles.len(),
                origin,
            });
            fetched.extend(articles);
        }

        // merge_and_replace dedups by id (approved entries win) and sorts
        // the published view by publish date descending.
        self.store.merge_and_replace(fetched).await?;
        let total = self.store.get_published().await?.len();

        Ok(PublishResult {
            sources: reports,
            total,
        })
    }
}
