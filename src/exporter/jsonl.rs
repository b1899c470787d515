// file: src/exporter/jsonl.rs
// description: newline-delimited json export of feed documents
// reference: https://jsonlines.org

use crate::error::{FeedError, Result};
use crate::models::Envelope;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Line shape written for each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// The `fields` object only
    #[default]
    Fields,
    /// The whole `{put, fields}` envelope
    Envelope,
}

#[derive(Debug, Clone, Default)]
pub struct JsonlExporter {
    format: LineFormat,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_documents: usize,
    pub output: PathBuf,
}

impl JsonlExporter {
    pub fn new(format: LineFormat) -> Self {
        Self { format }
    }

    pub fn with_envelopes(envelopes: bool) -> Self {
        if envelopes {
            Self::new(LineFormat::Envelope)
        } else {
            Self::new(LineFormat::Fields)
        }
    }

    /// Writes one json object per line and returns the number of lines.
    pub fn write_to<W: Write>(&self, envelopes: &[Envelope], writer: W) -> Result<usize> {
        let mut writer = BufWriter::new(writer);

        for envelope in envelopes {
            match self.format {
                LineFormat::Fields => serde_json::to_writer(&mut writer, &envelope.fields)?,
                LineFormat::Envelope => serde_json::to_writer(&mut writer, envelope)?,
            }
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        Ok(envelopes.len())
    }

    /// Writes to a temporary file next to `path` and persists it over `path`
    /// once every line is written. The temporary file is removed on any
    /// failure.
    pub fn export_file(&self, envelopes: &[Envelope], path: &Path) -> Result<ExportManifest> {
        info!("Starting JSONL export to {}", path.display());

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|source| FeedError::FileOperation {
            path: parent.to_path_buf(),
            source,
        })?;

        let mut staging =
            NamedTempFile::new_in(parent).map_err(|source| FeedError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;

        let written = self.write_to(envelopes, &mut staging)?;

        staging
            .persist(path)
            .map_err(|e| FeedError::FileOperation {
                path: path.to_path_buf(),
                source: e.error,
            })?;
        debug!("Persisted export to {}", path.display());

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_documents: written,
            output: path.to_path_buf(),
        };

        info!(
            "Export complete: {} documents exported",
            manifest.total_documents
        );
        Ok(manifest)
    }
}
