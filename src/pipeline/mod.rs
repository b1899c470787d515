// file: src/pipeline/mod.rs
// description: upload pipeline module exports and public api
// reference: pipeline orchestration

mod progress;
mod upload;

pub use progress::{ProgressTracker, UploadStats};
pub use upload::{DocumentSink, Uploader};
