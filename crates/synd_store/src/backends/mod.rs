pub mod json_file;
pub mod memory;

use chrono::Utc;
use synd_core::types::{Article, ArticleStatus, StoreSnapshot};

/// Shared mutation logic over the persisted document. Both backends wrap
/// this in a lock; none of these methods do I/O.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub snapshot: StoreSnapshot,
}

impl StoreState {
    pub fn new(max_published_items: Option<usize>) -> Self {
        Self {
            snapshot: StoreSnapshot {
                max_published_items,
                ..StoreSnapshot::default()
            },
        }
    }

    pub fn from_snapshot(mut snapshot: StoreSnapshot, max_published_items: Option<usize>) -> Self {
        if max_published_items.is_some() {
            snapshot.max_published_items = max_published_items;
        }
        let mut state = Self { snapshot };
        // Re-derive on load so the published invariants hold even if the
        // file was edited by hand.
        state.recompute_published();
        state
    }

    pub fn set_approved(&mut self, articles: Vec<Article>) {
        self.snapshot.approved = dedup_by_id(articles);
        self.recompute_published();
    }

    pub fn add_approved(&mut self, mut article: Article) {
        article.status = ArticleStatus::Approved;
        match self
            .snapshot
            .approved
            .iter_mut()
            .find(|existing| existing.id == article.id)
        {
            Some(existing) => *existing = article,
            None => self.snapshot.approved.push(article),
        }
        self.recompute_published();
    }

    pub fn replace_all(&mut self, articles: Vec<Article>) {
        self.snapshot.approved = dedup_by_id(articles);
        self.recompute_published();
        self.snapshot.content_version += 1;
        self.snapshot.last_published = Some(Utc::now());
    }

    /// Merge fetched articles behind the current approved set and replace.
    /// Approved entries come first, so on an `id` collision the curated
    /// version wins the dedup.
    pub fn merge_and_replace(&mut self, fetched: Vec<Article>) {
        let mut merged = std::mem::take(&mut self.snapshot.approved);
        merged.extend(fetched);
        self.replace_all(merged);
    }

    pub fn clear(&mut self) {
        self.snapshot.approved.clear();
        self.snapshot.published.clear();
        self.snapshot.last_published = None;
    }

    /// published = approved sorted by publish date descending, capped.
    fn recompute_published(&mut self) {
        let mut published = self.snapshot.approved.clone();
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        if let Some(max) = self.snapshot.max_published_items {
            published.truncate(max);
        }
        for article in &mut published {
            article.status = ArticleStatus::Published;
        }
        self.snapshot.published = published;
    }
}

/// First occurrence of an `id` wins.
pub(crate) fn dedup_by_id(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = std::collections::HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(article.id.clone()))
        .collect()
}
