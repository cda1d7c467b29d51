use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use synd_core::types::StoreSnapshot;
use synd_core::{Article, ContentStore, Error, Result};

use super::StoreState;

/// JSON-document store backed by a single file on local disk.
///
/// All mutation happens under one write lock and every save goes through a
/// temp-file-then-rename, so a crash mid-write leaves the previous snapshot
/// intact and two racing writers can't lose each other's updates.
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing document. A missing
    /// file or unreadable content yields the empty default state; load
    /// failure is logged, never raised.
    pub async fn open(path: PathBuf, max_published_items: Option<usize>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    Error::Store(format!("Failed to create store directory: {}", e))
                })?;
            }
        }

        let state = match load_snapshot(&path).await {
            Some(snapshot) => {
                debug!(
                    "Loaded content store from {} ({} approved, {} published)",
                    path.display(),
                    snapshot.approved.len(),
                    snapshot.published.len()
                );
                StoreState::from_snapshot(snapshot, max_published_items)
            }
            None => StoreState::new(max_published_items),
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the whole document and atomically swap it into place.
    async fn save(&self, state: &StoreState) -> Result<()> {
        let json = serde_json::to_string_pretty(&state.snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

async fn load_snapshot(path: &Path) -> Option<StoreSnapshot> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read content store {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(
                "Content store {} is not valid JSON, starting empty: {}",
                path.display(),
                e
            );
            None
        }
    }
}

#[async_trait]
impl ContentStore for JsonFileStore {
    async fn get_approved(&self) -> Result<Vec<Article>> {
        Ok(self.state.read().await.snapshot.approved.clone())
    }

    async fn get_published(&self) -> Result<Vec<Article>> {
        Ok(self.state.read().await.snapshot.published.clone())
    }

    async fn set_approved(&self, articles: Vec<Article>) -> Result<()> {
        let mut state = self.state.write().await;
        state.set_approved(articles);
        self.save(&state).await
    }

    async fn add_approved(&self, article: Article) -> Result<()> {
        let mut state = self.state.write().await;
        state.add_approved(article);
        self.save(&state).await
    }

    async fn replace_all(&self, articles: Vec<Article>) -> Result<()> {
        let mut state = self.state.write().await;
        state.replace_all(articles);
        self.save(&state).await
    }

    async fn merge_and_replace(&self, fetched: Vec<Article>) -> Result<()> {
        let mut state = self.state.write().await;
        state.merge_and_replace(fetched);
        self.save(&state).await
    }

    async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.clear();
        self.save(&state).await
    }

    async fn purge(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.clear();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn content_version(&self) -> Result<u64> {
        Ok(self.state.read().await.snapshot.content_version)
    }

    async fn last_published(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.state.read().await.snapshot.last_published)
    }
}
