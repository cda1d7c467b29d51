use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use synd_core::{Article, ContentStore, Result};

use super::StoreState;

/// Non-persistent store, used by tests and `--storage memory`.
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new(max_published_items: Option<usize>) -> Self {
        Self {
            state: RwLock::new(StoreState::new(max_published_items)),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get_approved(&self) -> Result<Vec<Article>> {
        Ok(self.state.read().await.snapshot.approved.clone())
    }

    async fn get_published(&self) -> Result<Vec<Article>> {
        Ok(self.state.read().await.snapshot.published.clone())
    }

    async fn set_approved(&self, articles: Vec<Article>) -> Result<()> {
        self.state.write().await.set_approved(articles);
        Ok(())
    }

    async fn add_approved(&self, article: Article) -> Result<()> {
        self.state.write().await.add_approved(article);
        Ok(())
    }

    async fn replace_all(&self, articles: Vec<Article>) -> Result<()> {
        self.state.write().await.replace_all(articles);
        Ok(())
    }

    async fn merge_and_replace(&self, fetched: Vec<Article>) -> Result<()> {
        self.state.write().await.merge_and_replace(fetched);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.state.write().await.clear();
        Ok(())
    }

    async fn purge(&self) -> Result<()> {
        self.clear().await
    }

    async fn content_version(&self) -> Result<u64> {
        Ok(self.state.read().await.snapshot.content_version)
    }

    async fn last_published(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.state.read().await.snapshot.last_published)
    }
}
