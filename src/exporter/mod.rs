// file: src/exporter/mod.rs
// description: feed document export module exports
// reference: internal module structure

pub mod jsonl;

pub use jsonl::{ExportManifest, JsonlExporter, LineFormat};
