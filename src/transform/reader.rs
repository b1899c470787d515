// file: src/transform/reader.rs
// description: listings csv reader with up-front header validation
// reference: https://docs.rs/csv

use crate::error::{FeedError, Result};
use crate::models::{ListingRecord, REQUIRED_COLUMNS, is_missing};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    id: usize,
    name: usize,
    room_type: usize,
    neighbourhood: usize,
}

impl ColumnIndex {
    /// Locates every required column by exact name. All missing columns are
    /// reported together.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let position = |column: &str| headers.iter().position(|h| *h == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(**column).is_none())
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(FeedError::Schema { missing });
        }

        // every lookup below succeeded in the check above
        let [id, name, room_type, neighbourhood] =
            REQUIRED_COLUMNS.map(|column| position(column).unwrap_or_default());

        Ok(Self {
            id,
            name,
            room_type,
            neighbourhood,
        })
    }

    fn listing(&self, record: &StringRecord, row: usize) -> Result<ListingRecord> {
        let cell = |idx: usize| record.get(idx).filter(|value| !is_missing(value));

        // id keeps NA-looking text; only an empty cell is rejected
        let id = record
            .get(self.id)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| FeedError::InvalidRow {
                row,
                message: "id is empty".to_string(),
            })?;

        Ok(ListingRecord::new(
            id,
            cell(self.name),
            cell(self.room_type),
            cell(self.neighbourhood),
        ))
    }
}

pub struct ListingReader<R: Read> {
    reader: csv::Reader<R>,
    columns: ColumnIndex,
}

impl ListingReader<File> {
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Reading listings from {}", path.display());

        let file = File::open(path).map_err(|source| FeedError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file)
    }
}

impl<R: Read> ListingReader<R> {
    pub fn from_reader(input: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        debug!("Input columns: {:?}", headers);

        let columns = ColumnIndex::from_headers(headers.iter())?;

        Ok(Self { reader, columns })
    }

    /// Reads every row. A malformed row aborts the whole read.
    pub fn read_all(mut self) -> Result<Vec<ListingRecord>> {
        let mut listings = Vec::new();

        for (idx, record) in self.reader.records().enumerate() {
            let record = record?;
            listings.push(self.columns.listing(&record, idx + 1)?);
        }

        info!("Read {} listings", listings.len());
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_column_index_ignores_order_and_extras() {
        let columns =
            ColumnIndex::from_headers(["price", "neighbourhood", "id", "room_type", "name"])
                .unwrap();
        assert_eq!(
            columns,
            ColumnIndex {
                id: 2,
                name: 4,
                room_type: 3,
                neighbourhood: 1,
            }
        );
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let err = ColumnIndex::from_headers(["id", "name"]).unwrap_err();
        match err {
            FeedError::Schema { missing } => {
                assert_eq!(missing, vec!["room_type", "neighbourhood"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reads_rows_with_empty_cells() {
        let csv = "id,name,host_id,room_type,neighbourhood\n\
                   12345,Cozy Loft,9,Private room,Downtown\n\
                   777,,9,,Harbour\n";
        let listings = ListingReader::from_reader(csv.as_bytes())
            .unwrap()
            .read_all()
            .unwrap();

        assert_eq!(
            listings,
            vec![
                ListingRecord::new("12345", Some("Cozy Loft"), Some("Private room"), Some("Downtown")),
                ListingRecord::new("777", None, None, Some("Harbour")),
            ]
        );
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let csv = "id,name,room_type,neighbourhood\n5,Studio\n";
        let listings = ListingReader::from_reader(csv.as_bytes())
            .unwrap()
            .read_all()
            .unwrap();

        assert_eq!(listings, vec![ListingRecord::new("5", Some("Studio"), None, None)]);
    }

    #[test]
    fn test_na_tokens_read_as_missing() {
        let csv = "id,name,room_type,neighbourhood\n\
                   1,null,NaN,NA\n\
                   2,None,N/A,<NA>\n\
                   NA,Studio,NULL,nan\n";
        let listings = ListingReader::from_reader(csv.as_bytes())
            .unwrap()
            .read_all()
            .unwrap();

        assert_eq!(
            listings,
            vec![
                ListingRecord::new("1", None, None, None),
                ListingRecord::new("2", None, None, None),
                ListingRecord::new("NA", Some("Studio"), None, None),
            ]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "id,name,room_type,neighbourhood\n1,\"Loft, with view\",Entire home/apt,\"Old \"\"Town\"\"\"\n";
        let listings = ListingReader::from_reader(csv.as_bytes())
            .unwrap()
            .read_all()
            .unwrap();

        assert_eq!(listings[0].name.as_deref(), Some("Loft, with view"));
        assert_eq!(listings[0].neighbourhood.as_deref(), Some("Old \"Town\""));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let csv = "id,name,room_type,neighbourhood\n1,A,B,C\n,D,E,F\n";
        let err = ListingReader::from_reader(csv.as_bytes())
            .unwrap()
            .read_all()
            .unwrap_err();

        assert!(matches!(err, FeedError::InvalidRow { row: 2, .. }));
    }

    #[test]
    fn test_missing_column_fails_before_rows() {
        let csv = "id,name,neighbourhood\n1,A,C\n";
        let result = ListingReader::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(FeedError::Schema { .. })));
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listings.csv");
        fs::write(&path, "id,name,room_type,neighbourhood\n1,A,B,C\n").unwrap();

        let listings = ListingReader::from_path(&path).unwrap().read_all().unwrap();
        assert_eq!(listings.len(), 1);

        let missing = ListingReader::from_path(&dir.path().join("nope.csv"));
        assert!(matches!(missing, Err(FeedError::FileOperation { .. })));
    }
}
