//! Data provider: ordered source fallback plus normalization.
//!
//! A fetch walks a short plan of source attempts. The first attempt that
//! yields raw rows wins and its rows are normalized. A source that is
//! unavailable, errors, or answers with nothing hands over to the next
//! attempt, unless the attempt is authoritative (an explicitly requested
//! local archive), in which case its result is final even when empty.

use std::sync::Arc;

use crate::metrics::AppMetrics;
use crate::readings::{
    normalize::{normalize, Normalized},
    provider::ReadingSource,
    types::{ReadingSet, SourceMode},
};

pub type SharedSource = Arc<dyn ReadingSource + Send + Sync>;

struct Attempt<'a> {
    source: &'a SharedSource,
    authoritative: bool,
}

/// Fetches a fresh `ReadingSet` on every call. Holds no data between calls.
#[derive(Clone)]
pub struct DataProvider {
    default_mode: SourceMode,
    remote: SharedSource,
    archive: SharedSource,
    metrics: Option<Arc<AppMetrics>>,
}

impl DataProvider {
    pub fn new(default_mode: SourceMode, remote: SharedSource, archive: SharedSource) -> Self {
        Self {
            default_mode,
            remote,
            archive,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn default_mode(&self) -> SourceMode {
        self.default_mode
    }

    fn plan(&self, mode: SourceMode) -> [Attempt<'_>; 2] {
        match mode {
            SourceMode::Remote => [
                Attempt {
                    source: &self.remote,
                    authoritative: false,
                },
                Attempt {
                    source: &self.archive,
                    authoritative: false,
                },
            ],
            SourceMode::Local => [
                Attempt {
                    source: &self.archive,
                    authoritative: true,
                },
                Attempt {
                    source: &self.remote,
                    authoritative: false,
                },
            ],
        }
    }

    /// Fetch and normalize readings. Never fails: every source error is
    /// logged and converted into "try the next source", and an exhausted
    /// plan yields an empty set.
    pub async fn fetch(&self, mode_override: Option<SourceMode>) -> ReadingSet {
        let mode = mode_override.unwrap_or(self.default_mode);

        for attempt in self.plan(mode) {
            let source = attempt.source;
            let name = source.source_name();

            if !source.is_available() {
                tracing::debug!("Source '{}' unavailable, skipping", name);
                continue;
            }

            match source.load_records().await {
                Ok(records) if records.is_empty() && !attempt.authoritative => {
                    tracing::warn!("Source '{}' returned no records, trying next source", name);
                    self.record_attempt(name, "empty");
                }
                Ok(records) => {
                    let raw_count = records.len();
                    let normalized = normalize(records);
                    tracing::info!(
                        "Loaded {} valid readings from '{}' ({} raw rows)",
                        normalized.readings.len(),
                        name,
                        raw_count
                    );
                    self.record_attempt(name, "ok");
                    self.record_normalized(&normalized);
                    return normalized.readings;
                }
                Err(err) if attempt.authoritative => {
                    tracing::error!("Source '{}' failed: {}", name, err);
                    self.record_attempt(name, "error");
                    self.record_normalized(&Normalized::default());
                    return ReadingSet::new();
                }
                Err(err) => {
                    tracing::warn!("Source '{}' failed: {}, trying next source", name, err);
                    self.record_attempt(name, "error");
                }
            }
        }

        tracing::warn!("No data source produced records");
        self.record_normalized(&Normalized::default());
        ReadingSet::new()
    }

    fn record_attempt(&self, source: &str, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_source_attempt(source, outcome);
        }
    }

    fn record_normalized(&self, normalized: &Normalized) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        let rejected = &normalized.rejected;
        for (reason, count) in [
            ("missing_field", rejected.missing_field),
            ("not_numeric", rejected.not_numeric),
            ("sensor_off", rejected.sensor_off),
        ] {
            if count > 0 {
                metrics
                    .rows_rejected_total
                    .with_label_values(&[reason])
                    .inc_by(count as f64);
            }
        }
        metrics.readings_admitted.set(normalized.readings.len() as f64);
    }
}
