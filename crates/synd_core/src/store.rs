use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::Article;
use crate::Result;

/// Curated content store: the approved set plus its derived published view.
///
/// Implementations own all synchronization. One store is constructed at
/// startup and handed to request handlers as `Arc<dyn ContentStore>`;
/// mutation methods are serialized internally so two racing writers can't
/// lose each other's updates.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Snapshot of the operator-approved set.
    async fn get_approved(&self) -> Result<Vec<Article>>;

    /// Snapshot of the published view: approved, sorted by publish date
    /// descending, capped at the configured maximum.
    async fn get_published(&self) -> Result<Vec<Article>>;

    /// Replace the approved set wholesale and recompute the published view.
    async fn set_approved(&self, articles: Vec<Article>) -> Result<()>;

    /// Insert or update one article by `id` and recompute the published
    /// view. Calling twice with the same `id` keeps a single entry with the
    /// latest content.
    async fn add_approved(&self, article: Article) -> Result<()>;

    /// Clear and replace both sets in one step. Duplicate `id`s in the input
    /// are dropped (first occurrence wins). Bumps the content version and
    /// stamps `last_published`.
    async fn replace_all(&self, articles: Vec<Article>) -> Result<()>;

    /// Merge freshly fetched articles with the current approved set and
    /// replace the store contents, all under one write-guard acquisition.
    /// The approved set is read inside the guard, so an approval landing
    /// while a fetch is in flight is merged, not erased. On an `id`
    /// collision the approved version wins. Bumps the content version and
    /// stamps `last_published`.
    async fn merge_and_replace(&self, fetched: Vec<Article>) -> Result<()>;

    /// Empty both sets and clear `last_published`.
    async fn clear(&self) -> Result<()>;

    /// Clear and additionally remove any backing file.
    async fn purge(&self) -> Result<()>;

    /// Cache-busting counter, bumped on every bulk replace.
    async fn content_version(&self) -> Result<u64>;

    /// Instant of the last publish, if any.
    async fn last_published(&self) -> Result<Option<DateTime<Utc>>>;
}
