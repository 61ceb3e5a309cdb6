//! Reading Source Interface
//!
//! Abstraction over the places raw telemetry rows can come from.

use async_trait::async_trait;

use crate::readings::{error::SourceError, types::RawRecord};

/// A source of raw, unvalidated telemetry rows.
#[async_trait]
pub trait ReadingSource {
    /// Load every raw row the source currently holds, oldest first.
    ///
    /// An empty vector means the source answered but had nothing.
    async fn load_records(&self) -> Result<Vec<RawRecord>, SourceError>;

    /// Name of this source for logging and metrics labels.
    fn source_name(&self) -> &str;

    /// Whether the source can be consulted right now. Checked at fetch
    /// time, never cached.
    fn is_available(&self) -> bool {
        true
    }
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;
