// file: src/utils/validation.rs
// description: input and settings validation helpers
// reference: input validation patterns

use crate::error::{FeedError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_input_file(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(FeedError::Validation(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(FeedError::Validation(format!(
                "Input path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FeedError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(FeedError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn validate_hits(hits: usize) -> Result<()> {
        if hits == 0 {
            return Err(FeedError::Validation(
                "Hit count must be greater than 0".to_string(),
            ));
        }

        if hits > 400 {
            return Err(FeedError::Validation(
                "Hit count too large (max 400)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_query_text(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(FeedError::Validation("Query text is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("listings.csv");
        fs::write(&file_path, "id,name,room_type,neighbourhood\n").unwrap();

        assert!(Validator::validate_input_file(&file_path).is_ok());
        assert!(Validator::validate_input_file(temp.path()).is_err());
        assert!(Validator::validate_input_file(Path::new("/nonexistent.csv")).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://localhost").is_ok());
        assert!(Validator::validate_url("localhost").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(Validator::validate_port(8080).is_ok());
        assert!(Validator::validate_port(0).is_err());
    }

    #[test]
    fn test_validate_hits() {
        assert!(Validator::validate_hits(5).is_ok());
        assert!(Validator::validate_hits(0).is_err());
        assert!(Validator::validate_hits(401).is_err());
    }

    #[test]
    fn test_validate_query_text() {
        assert!(Validator::validate_query_text("loft").is_ok());
        assert!(Validator::validate_query_text("   ").is_err());
    }
}
