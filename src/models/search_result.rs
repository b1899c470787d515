// file: src/models/search_result.rs
// description: Query hits and their tabular display
// reference: https://docs.vespa.ai/en/reference/default-result-format.html

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Engine-assigned hit identifier
    #[serde(default)]
    pub id: String,

    /// Rank score from the selected ranking profile
    #[serde(default)]
    pub relevance: f64,

    /// Document fields returned by the query
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl SearchHit {
    pub fn new(id: String, relevance: f64, fields: Map<String, Value>) -> Self {
        Self {
            id,
            relevance,
            fields,
        }
    }

    /// Display form of a field: strings unquoted, other values as JSON text,
    /// missing fields empty.
    pub fn field_text(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Reads a dense tensor field. Accepts a plain number array, a
    /// `{"values": [...]}` object or a `{"cells": [{"value": ..}]}` object.
    pub fn embedding(&self, name: &str) -> Option<Vec<f64>> {
        let numbers = |values: &Vec<Value>| -> Option<Vec<f64>> {
            values.iter().map(Value::as_f64).collect()
        };

        match self.fields.get(name)? {
            Value::Array(values) => numbers(values),
            Value::Object(tensor) => {
                if let Some(Value::Array(values)) = tensor.get("values") {
                    numbers(values)
                } else if let Some(Value::Array(cells)) = tensor.get("cells") {
                    cells
                        .iter()
                        .map(|cell| cell.get("value").and_then(Value::as_f64))
                        .collect()
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Hits flattened into rows of selected fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl HitTable {
    pub fn from_hits(hits: &[SearchHit], fields: &[String]) -> Self {
        let rows = hits
            .iter()
            .map(|hit| fields.iter().map(|f| hit.field_text(f)).collect())
            .collect();

        Self {
            columns: fields.to_vec(),
            rows,
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widths in chars, so double-width glyphs (CJK, emoji) shift later
    /// columns in the rendered preview.
    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for HitTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty result: columns [{}]", self.columns.join(", "));
        }

        let widths = self.column_widths();
        let index_width = (self.rows.len() - 1).to_string().len();

        let mut header = " ".repeat(index_width);
        for (name, width) in self.columns.iter().zip(&widths) {
            header.push_str(&format!("  {:<width$}", name, width = width));
        }
        writeln!(f, "{}", header.trim_end())?;

        for (idx, row) in self.rows.iter().enumerate() {
            let mut line = format!("{:<width$}", idx, width = index_width);
            for (cell, width) in row.iter().zip(&widths) {
                line.push_str(&format!("  {:<width$}", cell, width = width));
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn hit(fields: Value) -> SearchHit {
        let Value::Object(map) = fields else {
            panic!("fields must be an object");
        };
        SearchHit::new("id:hybrid-search:doc::1".to_string(), 0.5, map)
    }

    #[test]
    fn test_hit_deserializes_with_missing_parts() {
        let hit: SearchHit = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(hit.id, "x");
        assert_eq!(hit.relevance, 0.0);
        assert!(hit.fields.is_empty());
    }

    #[test]
    fn test_field_text_forms() {
        let hit = hit(json!({"doc_id": 12345, "title": "Loft", "empty": null}));
        assert_eq!(hit.field_text("doc_id"), "12345");
        assert_eq!(hit.field_text("title"), "Loft");
        assert_eq!(hit.field_text("empty"), "");
        assert_eq!(hit.field_text("missing"), "");
    }

    #[test]
    fn test_embedding_formats() {
        let plain = hit(json!({"embedding": [0.1, 0.2]}));
        assert_eq!(plain.embedding("embedding"), Some(vec![0.1, 0.2]));

        let values = hit(json!({"embedding": {"type": "tensor<float>(x[2])", "values": [1.0, 2.0]}}));
        assert_eq!(values.embedding("embedding"), Some(vec![1.0, 2.0]));

        let cells = hit(json!({"embedding": {"cells": [
            {"address": {"x": "0"}, "value": 3.0},
            {"address": {"x": "1"}, "value": 4.0}
        ]}}));
        assert_eq!(cells.embedding("embedding"), Some(vec![3.0, 4.0]));

        let broken = hit(json!({"embedding": ["a"]}));
        assert_eq!(broken.embedding("embedding"), None);
        assert_eq!(broken.embedding("missing"), None);
    }

    #[test]
    fn test_table_keeps_requested_columns() {
        let hits = vec![
            hit(json!({"doc_id": "1", "title": "Loft", "text": "ignored"})),
            hit(json!({"doc_id": "22"})),
        ];
        let fields = vec!["doc_id".to_string(), "title".to_string()];
        let table = HitTable::from_hits(&hits, &fields);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["1".to_string(), "Loft".to_string()]);
        assert_eq!(table.rows()[1], vec!["22".to_string(), String::new()]);
    }

    #[test]
    fn test_table_display() {
        let hits = vec![
            hit(json!({"doc_id": "1", "title": "Cozy Loft"})),
            hit(json!({"doc_id": "22", "title": "Room"})),
        ];
        let fields = vec!["doc_id".to_string(), "title".to_string()];
        let rendered = HitTable::from_hits(&hits, &fields).to_string();

        assert_eq!(
            rendered,
            "   doc_id  title\n0  1       Cozy Loft\n1  22      Room\n"
        );
    }

    #[test]
    fn test_table_pads_by_char_count() {
        let hits = vec![
            hit(json!({"title": "Café", "doc_id": "1"})),
            hit(json!({"title": "Loft", "doc_id": "2"})),
        ];
        let fields = vec!["title".to_string(), "doc_id".to_string()];
        let rendered = HitTable::from_hits(&hits, &fields).to_string();

        assert_eq!(rendered, "   title  doc_id\n0  Café   1\n1  Loft   2\n");
    }

    #[test]
    fn test_empty_table_display() {
        let fields = vec!["doc_id".to_string()];
        let rendered = HitTable::from_hits(&[], &fields).to_string();
        assert_eq!(rendered, "Empty result: columns [doc_id]\n");
    }
}
