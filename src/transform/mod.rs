// file: src/transform/mod.rs
// description: listings csv to feed document transformation
// reference: internal module structure

pub mod reader;
pub mod transformer;

pub use reader::{ColumnIndex, ListingReader};
pub use transformer::{ListingTransformer, compose_text};
