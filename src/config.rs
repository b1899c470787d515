// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{FeedError, Result};
use crate::models::IdTemplate;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub vespa: VespaConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub csv_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub jsonl_path: PathBuf,
    /// Write full `{put, fields}` envelopes instead of bare field objects.
    #[serde(default)]
    pub envelopes: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VespaConfig {
    pub endpoint: String,
    pub port: u16,
    pub namespace: String,
    pub document_type: String,
    pub feed_id_template: String,
    pub upload_id_template: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub hits: usize,
    pub target_hits: usize,
    pub keyword_profile: String,
    pub semantic_profile: String,
    pub recommendation_profile: String,
    pub display_fields: Vec<String>,
}

impl VespaConfig {
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.endpoint.trim_end_matches('/'), self.port)
    }

    pub fn feed_template(&self) -> Result<IdTemplate> {
        IdTemplate::parse(&self.feed_id_template)
    }

    pub fn upload_template(&self) -> Result<IdTemplate> {
        IdTemplate::parse(&self.upload_id_template)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LISTING_FEED")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            input: InputConfig {
                csv_path: PathBuf::from("sc_airbnb_listings.csv"),
            },
            output: OutputConfig {
                jsonl_path: PathBuf::from("clean_listings.jsonl"),
                envelopes: false,
            },
            vespa: VespaConfig {
                endpoint: "http://localhost".to_string(),
                port: 8080,
                namespace: "hybrid-search".to_string(),
                document_type: "doc".to_string(),
                feed_id_template: "id:hybrid-search:doc::{doc_id}".to_string(),
                upload_id_template: "doc::{doc_id}".to_string(),
                timeout_secs: 30,
            },
            search: SearchConfig {
                hits: 5,
                target_hits: 100,
                keyword_profile: "bm25".to_string(),
                semantic_profile: "semantic".to_string(),
                recommendation_profile: "recommendation".to_string(),
                display_fields: vec!["doc_id".to_string(), "title".to_string()],
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.vespa.endpoint)
            .map_err(|e| FeedError::Config(e.to_string()))?;
        Validator::validate_port(self.vespa.port).map_err(|e| FeedError::Config(e.to_string()))?;

        if self.vespa.timeout_secs == 0 {
            return Err(FeedError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Validator::validate_hits(self.search.hits)
            .map_err(|e| FeedError::Config(e.to_string()))?;

        if self.search.target_hits == 0 {
            return Err(FeedError::Config(
                "target_hits must be greater than 0".to_string(),
            ));
        }

        self.vespa.feed_template()?;
        self.vespa.upload_template()?;

        Ok(())
    }
}
