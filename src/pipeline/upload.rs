// file: src/pipeline/upload.rs
// description: sequential per-document upload of transformed listings
// reference: https://docs.vespa.ai/en/reference/document-v1-api-reference.html

use crate::error::Result;
use crate::models::{DocumentRecord, Envelope, IdTemplate};
use crate::pipeline::progress::{ProgressTracker, UploadStats};
use crate::vespa::VespaClient;
use tracing::error;

/// Destination accepting one document upsert at a time.
#[allow(async_fn_in_trait)]
pub trait DocumentSink {
    async fn put_document(&self, id: &str, fields: &DocumentRecord) -> Result<()>;
}

impl DocumentSink for VespaClient {
    async fn put_document(&self, id: &str, fields: &DocumentRecord) -> Result<()> {
        VespaClient::put_document(self, id, fields).await
    }
}

pub struct Uploader<'a, S: DocumentSink> {
    sink: &'a S,
    id_template: IdTemplate,
    show_progress: bool,
    colored: bool,
}

impl<'a, S: DocumentSink> Uploader<'a, S> {
    pub fn new(sink: &'a S, id_template: IdTemplate) -> Self {
        Self {
            sink,
            id_template,
            show_progress: false,
            colored: true,
        }
    }

    pub fn with_progress(mut self, colored: bool) -> Self {
        self.show_progress = true;
        self.colored = colored;
        self
    }

    /// Sends every envelope's fields in order. The first failure stops the
    /// upload and is returned as-is.
    pub async fn upload(&self, envelopes: &[Envelope]) -> Result<UploadStats> {
        let mut tracker = if self.show_progress {
            ProgressTracker::with_color(envelopes.len(), self.colored)
        } else {
            ProgressTracker::hidden(envelopes.len())
        };

        for envelope in envelopes {
            let id = self.id_template.render(envelope.doc_id());

            if let Err(e) = self.sink.put_document(&id, &envelope.fields).await {
                error!("Upload stopped at {}: {}", id, e);
                tracker.abandon(format!("failed at {}", id));
                return Err(e);
            }

            tracker.inc_uploaded(envelope.doc_id());
        }

        tracker.finish();
        Ok(tracker.get_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::models::ListingRecord;
    use crate::transform::ListingTransformer;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<(String, DocumentRecord)>>,
        fail_on: Option<String>,
    }

    impl DocumentSink for RecordingSink {
        async fn put_document(&self, id: &str, fields: &DocumentRecord) -> Result<()> {
            if self.fail_on.as_deref() == Some(id) {
                return Err(FeedError::ServiceStatus {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            self.calls
                .borrow_mut()
                .push((id.to_string(), fields.clone()));
            Ok(())
        }
    }

    fn envelopes() -> Vec<Envelope> {
        ListingTransformer::default().transform(vec![
            ListingRecord::new("1", Some("A"), Some("Private room"), Some("North")),
            ListingRecord::new("2", None, Some("Shared room"), None),
            ListingRecord::new("3", Some("C"), None, Some("South")),
        ])
    }

    #[tokio::test]
    async fn test_uploads_each_document_with_upload_id() {
        let sink = RecordingSink::default();
        let uploader = Uploader::new(&sink, IdTemplate::upload_default());

        let stats = uploader.upload(&envelopes()).await.unwrap();

        assert_eq!(stats.documents_uploaded, 3);
        let calls = sink.calls.borrow();
        let ids: Vec<&str> = calls.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["doc::1", "doc::2", "doc::3"]);
        assert_eq!(calls[1].1.title, "");
        assert_eq!(calls[1].1.text, "Room type: Shared room Neighbourhood: ");
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let sink = RecordingSink {
            fail_on: Some("doc::2".to_string()),
            ..Default::default()
        };
        let uploader = Uploader::new(&sink, IdTemplate::upload_default());

        let result = uploader.upload(&envelopes()).await;

        assert!(matches!(
            result,
            Err(FeedError::ServiceStatus { status: 500, .. })
        ));
        assert_eq!(sink.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_upload() {
        let sink = RecordingSink::default();
        let stats = Uploader::new(&sink, IdTemplate::upload_default())
            .upload(&[])
            .await
            .unwrap();
        assert_eq!(stats.documents_uploaded, 0);
    }
}
