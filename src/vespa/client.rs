// file: src/vespa/client.rs
// description: Vespa http client for document upserts and queries
// reference: https://docs.vespa.ai/en/reference/document-v1-api-reference.html

use crate::config::VespaConfig;
use crate::error::{FeedError, Result};
use crate::models::{DocumentRecord, SearchHit};
use crate::vespa::query::SearchQuery;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct PutRequest<'a> {
    fields: &'a DocumentRecord,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    root: ResultRoot,
}

#[derive(Debug, Deserialize)]
struct ResultRoot {
    #[serde(default)]
    children: Vec<SearchHit>,
    #[serde(default)]
    errors: Vec<Value>,
}

#[derive(Clone)]
pub struct VespaClient {
    client: Client,
    base_url: Url,
    namespace: String,
    document_type: String,
}

impl VespaClient {
    pub fn new(config: &VespaConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url()).map_err(|e| {
            FeedError::Config(format!("Invalid Vespa endpoint {}: {}", config.base_url(), e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Service(format!("Failed to create HTTP client: {}", e)))?;

        info!("Vespa client configured for {}", base_url);

        Ok(Self {
            client,
            base_url,
            namespace: config.namespace.clone(),
            document_type: config.document_type.clone(),
        })
    }

    pub fn document_url(&self, id: &str) -> Result<Url> {
        self.url_with_segments(&[
            "document",
            "v1",
            self.namespace.as_str(),
            self.document_type.as_str(),
            "docid",
            id,
        ])
    }

    pub fn search_url(&self) -> Result<Url> {
        self.url_with_segments(&["search", ""])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FeedError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Upserts one document under `id`.
    pub async fn put_document(&self, id: &str, fields: &DocumentRecord) -> Result<()> {
        let url = self.document_url(id)?;
        debug!("PUT document {} -> {}", id, url);

        let response = self
            .client
            .post(url)
            .json(&PutRequest { fields })
            .send()
            .await
            .map_err(|e| FeedError::Service(format!("Failed to feed document {}: {}", id, e)))?;

        check_status(response).await?;
        Ok(())
    }

    pub async fn query(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        debug!("Query: {}", query.yql());

        let response = self
            .client
            .post(self.search_url()?)
            .json(query)
            .send()
            .await
            .map_err(|e| FeedError::Service(format!("Failed to send query: {}", e)))?;

        let body = check_status(response).await?.text().await?;
        let hits = parse_query_response(&body)?;

        info!("Query returned {} hits", hits.len());
        Ok(hits)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(FeedError::ServiceStatus { status, body })
}

/// Extracts hits from a default-format query result.
pub fn parse_query_response(body: &str) -> Result<Vec<SearchHit>> {
    let response: QueryResponse = serde_json::from_str(body)?;

    if response.root.children.is_empty() && !response.root.errors.is_empty() {
        return Err(FeedError::Service(format!(
            "Query failed: {}",
            Value::Array(response.root.errors)
        )));
    }

    Ok(response.root.children)
}
