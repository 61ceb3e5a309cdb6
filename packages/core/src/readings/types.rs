//! Core data types for power readings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw column names shared by the remote feed and the local archive, in
/// the order the channel assigns them.
pub const FEED_COLUMNS: [&str; 7] = [
    "created_at",
    "field1",
    "field2",
    "field3",
    "field4",
    "field5",
    "field6",
];

/// A single timestamped sensor sample.
///
/// `timestamp` is passed through untouched; only its position in the
/// sequence matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: String,
    pub voltage: f64,
    pub current: f64,
    pub frequency: f64,
    pub power: f64,
    pub energy: f64,
    #[serde(rename = "pf")]
    pub power_factor: f64,
}

/// Ordered readings from one fetch, oldest first.
pub type ReadingSet = Vec<Reading>;

/// One unvalidated row from either source, columns in `FEED_COLUMNS` order
/// after `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub created_at: Option<String>,
    pub fields: [Option<String>; 6],
}

/// Where `DataProvider::fetch` looks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Remote,
    Local,
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "api" | "remote" => Ok(SourceMode::Remote),
            "csv" | "local" => Ok(SourceMode::Local),
            other => Err(format!(
                "Invalid DATA_SOURCE: {} (expected api or csv)",
                other
            )),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Remote => write!(f, "remote"),
            SourceMode::Local => write!(f, "local"),
        }
    }
}
