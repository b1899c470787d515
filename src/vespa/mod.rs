// file: src/vespa/mod.rs
// description: search service client and query construction
// reference: internal module structure

pub mod client;
pub mod query;

pub use client::{VespaClient, parse_query_response};
pub use query::{QueryBuilder, SearchMode, SearchQuery};
