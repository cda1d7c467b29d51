pub mod dates;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use store::ContentStore;
pub use types::{Article, ArticleStatus, ContentSource, StoreSnapshot};
