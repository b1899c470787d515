// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input is missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid listing at row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("File operation failed for {}: {source}", .path.display())]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Search service error: {0}")]
    Service(String),

    #[error("Search service returned {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Service(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = FeedError::Schema {
            missing: vec!["room_type".to_string(), "neighbourhood".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Input is missing required column(s): room_type, neighbourhood"
        );
    }

    #[test]
    fn test_service_status_message() {
        let err = FeedError::ServiceStatus {
            status: 400,
            body: "bad request".to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("bad request"));
    }
}
