// file: src/vespa/query.rs
// description: keyword, semantic and recommendation query construction
// reference: https://docs.vespa.ai/en/reference/query-api-reference.html

use crate::config::SearchConfig;
use crate::error::{FeedError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Flat query-parameter object sent to the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchQuery {
    params: Map<String, Value>,
}

impl SearchQuery {
    pub fn new(yql: impl Into<String>) -> Self {
        let mut params = Map::new();
        params.insert("yql".to_string(), Value::String(yql.into()));
        Self { params }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn yql(&self) -> &str {
        self.params
            .get("yql")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Lexical ranking
    #[default]
    Keyword,
    /// Nearest-neighbour ranking over the embedding field
    Semantic,
}

impl FromStr for SearchMode {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "keyword" | "bm25" => Ok(SearchMode::Keyword),
            "semantic" | "vector" => Ok(SearchMode::Semantic),
            other => Err(FeedError::Validation(format!(
                "Unknown search mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Keyword => f.write_str("keyword"),
            SearchMode::Semantic => f.write_str("semantic"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    hits: usize,
    target_hits: usize,
    keyword_profile: String,
    semantic_profile: String,
    recommendation_profile: String,
}

impl QueryBuilder {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            hits: config.hits,
            target_hits: config.target_hits,
            keyword_profile: config.keyword_profile.clone(),
            semantic_profile: config.semantic_profile.clone(),
            recommendation_profile: config.recommendation_profile.clone(),
        }
    }

    pub fn with_hits(mut self, hits: usize) -> Self {
        self.hits = hits;
        self
    }

    pub fn search(&self, mode: SearchMode, text: &str) -> SearchQuery {
        match mode {
            SearchMode::Keyword => self.keyword(text),
            SearchMode::Semantic => self.semantic(text),
        }
    }

    pub fn keyword(&self, text: &str) -> SearchQuery {
        SearchQuery::new(format!(
            "select * from sources * where userQuery() limit {}",
            self.hits
        ))
        .param("query", text)
        .param("ranking", self.keyword_profile.as_str())
    }

    pub fn semantic(&self, text: &str) -> SearchQuery {
        SearchQuery::new(format!(
            "select * from sources * where ({{targetHits:{}}}nearestNeighbor(embedding,e)) limit {}",
            self.target_hits, self.hits
        ))
        .param("query", text)
        .param("ranking", self.semantic_profile.as_str())
        .param("input.query(e)", "embed(@query)")
    }

    /// Fetches a single stored document including its embedding.
    pub fn embedding_lookup(&self, doc_id: &str) -> SearchQuery {
        SearchQuery::new(format!(
            "select doc_id, title, text, embedding from content.doc where doc_id contains '{}'",
            escape_literal(doc_id)
        ))
        .param("hits", 1)
    }

    pub fn recommendation(&self, embedding: &[f64]) -> Result<SearchQuery> {
        let vector = serde_json::to_string(embedding)?;

        Ok(SearchQuery::new(format!(
            "select * from content.doc where ({{targetHits:{}}}nearestNeighbor(embedding, user_embedding))",
            self.hits
        ))
        .param("ranking.features.query(user_embedding)", vector)
        .param("ranking.profile", self.recommendation_profile.as_str())
        .param("hits", self.hits))
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
