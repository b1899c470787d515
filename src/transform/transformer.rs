// file: src/transform/transformer.rs
// description: listing rows to feed documents and envelopes
// reference: https://docs.vespa.ai/en/reference/document-json-format.html

use crate::error::Result;
use crate::models::{DocumentRecord, Envelope, IdTemplate, ListingRecord};
use crate::transform::reader::ListingReader;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Builds the searchable text field of a listing.
pub fn compose_text(room_type: &str, neighbourhood: &str) -> String {
    format!("Room type: {} Neighbourhood: {}", room_type, neighbourhood)
}

#[derive(Debug, Clone)]
pub struct ListingTransformer {
    feed_template: IdTemplate,
}

impl ListingTransformer {
    pub fn new(feed_template: IdTemplate) -> Self {
        Self { feed_template }
    }

    pub fn to_document(listing: &ListingRecord) -> DocumentRecord {
        let or_empty = |value: &Option<String>| value.clone().unwrap_or_default();

        let room_type = or_empty(&listing.room_type);
        let neighbourhood = or_empty(&listing.neighbourhood);

        DocumentRecord::new(
            listing.id.clone(),
            or_empty(&listing.name),
            compose_text(&room_type, &neighbourhood),
        )
    }

    /// One envelope per listing, in input order.
    pub fn transform<I>(&self, listings: I) -> Vec<Envelope>
    where
        I: IntoIterator<Item = ListingRecord>,
    {
        listings
            .into_iter()
            .map(|listing| {
                let envelope = Envelope::new(&self.feed_template, Self::to_document(&listing));
                debug!("Transformed listing {}", envelope.put);
                envelope
            })
            .collect()
    }

    /// Validates the header, then transforms every row. Nothing is returned
    /// unless the whole input is valid.
    pub fn transform_reader<R: Read>(&self, input: R) -> Result<Vec<Envelope>> {
        let listings = ListingReader::from_reader(input)?.read_all()?;
        Ok(self.transform(listings))
    }

    pub fn transform_file(&self, path: &Path) -> Result<Vec<Envelope>> {
        let listings = ListingReader::from_path(path)?.read_all()?;
        let envelopes = self.transform(listings);
        info!(
            "Transformed {} listings from {}",
            envelopes.len(),
            path.display()
        );
        Ok(envelopes)
    }
}

impl Default for ListingTransformer {
    fn default() -> Self {
        Self::new(IdTemplate::feed_default())
    }
}
