//! Error types for reading ingestion

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single data source. These never leave `DataProvider`;
/// they only decide whether the next source is tried.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Channel returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Data format error: {message}")]
    Format { message: String },

    #[error("Archive not found: {}", path.display())]
    ArchiveMissing { path: PathBuf },

    #[error("Archive is missing required columns: {}", missing.join(", "))]
    ArchiveSchemaInvalid { missing: Vec<String> },

    #[error("Failed to read archive {}: {source}", path.display())]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Why a raw row was not admitted into the reading set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowRejection {
    #[error("missing value for {field}")]
    MissingField { field: &'static str },

    #[error("non-numeric value '{value}' for {field}")]
    NotNumeric { field: &'static str, value: String },

    #[error("sensor off (power {power})")]
    SensorOff { power: f64 },
}

impl RowRejection {
    /// Short label used for logging and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            RowRejection::MissingField { .. } => "missing_field",
            RowRejection::NotNumeric { .. } => "not_numeric",
            RowRejection::SensorOff { .. } => "sensor_off",
        }
    }
}
