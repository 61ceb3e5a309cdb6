//! Local archive source
//!
//! Reads a CSV export of the channel (`created_at, field1..field6`, plus
//! any extra columns, which are ignored).

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::StringRecord;

use crate::readings::{
    error::SourceError,
    provider::{ReadingSource, SourceResult},
    types::{RawRecord, FEED_COLUMNS},
};

/// Read-only CSV archive at a fixed path.
pub struct ArchiveSource {
    path: PathBuf,
}

impl ArchiveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReadingSource for ArchiveSource {
    async fn load_records(&self) -> SourceResult<Vec<RawRecord>> {
        read_archive(&self.path)
    }

    fn source_name(&self) -> &str {
        "archive"
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

/// Load every row of the archive. Fails as a whole when any of the seven
/// feed columns is absent from the header.
pub fn read_archive(path: &Path) -> SourceResult<Vec<RawRecord>> {
    let file = File::open(path).map_err(|_| SourceError::ArchiveMissing {
        path: path.to_path_buf(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| SourceError::ArchiveRead {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(row) => records.push(to_raw_record(&row, &columns)),
            Err(err) => {
                // Header is line 1, so data starts at line 2.
                tracing::warn!("Skipping unreadable archive line {}: {}", idx + 2, err);
            }
        }
    }

    tracing::debug!("Read {} rows from archive {}", records.len(), path.display());
    Ok(records)
}

/// Map each feed column to its position in the header.
fn resolve_columns(headers: &StringRecord) -> SourceResult<[usize; 7]> {
    let header_map: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();

    let missing: Vec<String> = FEED_COLUMNS
        .iter()
        .filter(|column| !header_map.contains_key(*column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SourceError::ArchiveSchemaInvalid { missing });
    }

    Ok(FEED_COLUMNS.map(|column| header_map[column]))
}

fn to_raw_record(row: &StringRecord, columns: &[usize; 7]) -> RawRecord {
    let cell = |idx: usize| row.get(columns[idx]).map(str::to_string);
    RawRecord {
        created_at: cell(0),
        fields: [cell(1), cell(2), cell(3), cell(4), cell(5), cell(6)],
    }
}
