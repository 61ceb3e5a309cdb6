//! Reading ingestion
//!
//! Fetches raw telemetry rows from the remote channel or the local
//! archive and normalizes them into an ordered `ReadingSet`.

pub mod archive;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod provider;
pub mod remote;
pub mod types;

pub use archive::ArchiveSource;
pub use error::{RowRejection, SourceError};
pub use fetcher::{DataProvider, SharedSource};
pub use provider::ReadingSource;
pub use remote::RemoteChannelSource;
pub use types::{RawRecord, Reading, ReadingSet, SourceMode, FEED_COLUMNS};
