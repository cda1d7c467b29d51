use std::path::PathBuf;
use std::sync::Arc;

use synd_core::{ContentStore, Error, Result};

pub mod backends;

pub use backends::json_file::JsonFileStore;
pub use backends::memory::MemoryStore;

/// Build a store backend by name, the way the CLI selects it.
///
/// `max_published_items` of `None` leaves the published view unbounded.
pub async fn create_store(
    backend: &str,
    path: PathBuf,
    max_published_items: Option<usize>,
) -> Result<Arc<dyn ContentStore>> {
    match backend {
        "json" => {
            let store = JsonFileStore::open(path, max_published_items).await?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryStore::new(max_published_items))),
        other => Err(Error::Store(format!("Unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::{JsonFileStore, MemoryStore};
    pub use synd_core::{Article, ContentStore, Error, Result};
}
