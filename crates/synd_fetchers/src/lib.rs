pub mod aggregator;
pub mod sources;

pub use aggregator::{Aggregator, Origin, PublishResult, SourceReport};
pub use sources::{LinkedInFetcher, SourceFetcher, WordPressFetcher};

pub mod prelude {
    pub use super::aggregator::Aggregator;
    pub use super::sources::SourceFetcher;
    pub use synd_core::{Article, Error, Result};
}
