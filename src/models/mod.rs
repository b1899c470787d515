// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod listing;
pub mod search_result;

pub use document::{DocumentRecord, Envelope, IdTemplate};
pub use listing::{ListingRecord, NA_TOKENS, REQUIRED_COLUMNS, is_missing};
pub use search_result::{HitTable, SearchHit};
