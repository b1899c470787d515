// file: src/models/listing.rs
// description: input listing row as read from the listings export
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// Columns every listings export must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "room_type", "neighbourhood"];

/// Cell values read as missing, matching the default NA set of common
/// dataframe CSV readers.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

/// One row of the listings export. Columns other than the required ones are
/// dropped on read. Empty and NA-token cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub neighbourhood: Option<String>,
}

impl ListingRecord {
    pub fn new(
        id: impl Into<String>,
        name: Option<&str>,
        room_type: Option<&str>,
        neighbourhood: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            room_type: room_type.map(str::to_string),
            neighbourhood: neighbourhood.map(str::to_string),
        }
    }
}
