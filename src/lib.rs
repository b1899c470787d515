// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod transform;
pub mod utils;
pub mod vespa;

pub use config::{Config, InputConfig, OutputConfig, SearchConfig, VespaConfig};
pub use error::{FeedError, Result};
pub use exporter::{ExportManifest, JsonlExporter, LineFormat};
pub use models::{DocumentRecord, Envelope, HitTable, IdTemplate, ListingRecord, SearchHit};
pub use pipeline::{DocumentSink, ProgressTracker, UploadStats, Uploader};
pub use transform::{ListingReader, ListingTransformer, compose_text};
pub use utils::Validator;
pub use vespa::{QueryBuilder, SearchMode, SearchQuery, VespaClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _transformer = ListingTransformer::new(config.vespa.feed_template().unwrap());
        let _builder = QueryBuilder::from_config(&config.search);
    }
}
