// file: src/models/document.rs
// description: feed document model, bulk-feed envelope and identifier templates
// reference: https://docs.vespa.ai/en/reference/document-json-format.html

use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const DOC_ID_PLACEHOLDER: &str = "{doc_id}";

/// Field payload indexed for a single listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_id: String,
    pub title: String,
    pub text: String,
}

/// Bulk-feed wrapper pairing a document identifier with its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub put: String,
    pub fields: DocumentRecord,
}

impl DocumentRecord {
    pub fn new(doc_id: String, title: String, text: String) -> Self {
        Self {
            doc_id,
            title,
            text,
        }
    }
}

impl Envelope {
    pub fn new(template: &IdTemplate, fields: DocumentRecord) -> Self {
        Self {
            put: template.render(&fields.doc_id),
            fields,
        }
    }

    pub fn doc_id(&self) -> &str {
        &self.fields.doc_id
    }
}

/// Document identifier pattern with a single `{doc_id}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTemplate {
    template: String,
}

impl IdTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        if !template.contains(DOC_ID_PLACEHOLDER) {
            return Err(FeedError::Config(format!(
                "identifier template '{}' must contain {}",
                template, DOC_ID_PLACEHOLDER
            )));
        }

        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Identifier used in bulk-feed files.
    pub fn feed_default() -> Self {
        Self {
            template: "id:hybrid-search:doc::{doc_id}".to_string(),
        }
    }

    /// Identifier sent with per-document upserts.
    pub fn upload_default() -> Self {
        Self {
            template: "doc::{doc_id}".to_string(),
        }
    }

    pub fn render(&self, doc_id: &str) -> String {
        self.template.replace(DOC_ID_PLACEHOLDER, doc_id)
    }
}

impl fmt::Display for IdTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
