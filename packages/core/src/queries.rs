//! Read-only query operations.
//!
//! Each operation fetches a fresh `ReadingSet` and derives its answer from
//! it; nothing is cached between calls and no two calls are assumed to see
//! the same snapshot. An empty fetch is reported as `AppError::NoData`.

use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::Serialize;

use crate::classifier::{
    alerts::{self, Alert},
    cost::cost_estimate,
    precision::{round_to, CURRENT_DP, ENERGY_DP, FREQUENCY_DP, PF_DP, POWER_DP, VOLTAGE_DP},
    statistics::{distribution, statistics, summarize},
    ClassStatisticsMap, ClassifiedReading, CostEstimate, Distribution, LoadClass,
    LoadClassifier, ReadingSummary,
};
use crate::config::Config;
use crate::error::AppError;
use crate::metrics::AppMetrics;
use crate::readings::{
    ArchiveSource, DataProvider, ReadingSet, RemoteChannelSource, SharedSource,
};
use crate::services::thingspeak::ThingSpeakClient;

pub const CLASSIFY_LIMIT: RangeInclusive<usize> = 1..=100;
pub const DEFAULT_CLASSIFY_LIMIT: usize = 10;
pub const TREND_LIMIT: RangeInclusive<usize> = 10..=200;
pub const DEFAULT_TREND_LIMIT: usize = 50;

/// Most recent reading with its class and alerts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestStatus {
    pub timestamp: String,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub pf: f64,
    pub frequency: f64,
    pub energy: f64,
    pub status: LoadClass,
    pub alerts: Vec<Alert>,
}

/// Parallel series over the most recent readings, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub timestamps: Vec<String>,
    pub power: Vec<f64>,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub pf: Vec<f64>,
}

/// Query facade over a data provider and an immutable classifier.
#[derive(Clone)]
pub struct PowerQueries {
    provider: DataProvider,
    classifier: LoadClassifier,
    default_rate: f64,
}

impl PowerQueries {
    pub fn new(provider: DataProvider, classifier: LoadClassifier, default_rate: f64) -> Self {
        Self {
            provider,
            classifier,
            default_rate,
        }
    }

    /// Wire the remote channel and local archive described by `config`.
    pub fn from_config(config: &Config, metrics: Arc<AppMetrics>) -> Result<Self, AppError> {
        let client = ThingSpeakClient::new(config.feeds_url())?;
        let remote: SharedSource = Arc::new(RemoteChannelSource::new(client));
        let archive: SharedSource = Arc::new(ArchiveSource::new(config.archive_path.clone()));
        let provider =
            DataProvider::new(config.data_source, remote, archive).with_metrics(metrics);

        let classifier = LoadClassifier::new(config.classifier_config())
            .map_err(|err| AppError::Config(err.to_string()))?;

        Ok(Self::new(provider, classifier, config.electricity_rate))
    }

    pub fn classifier(&self) -> &LoadClassifier {
        &self.classifier
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    async fn fetch_nonempty(&self) -> Result<ReadingSet, AppError> {
        let readings = self.provider.fetch(None).await;
        if readings.is_empty() {
            return Err(AppError::no_data());
        }
        Ok(readings)
    }

    /// The `limit` most recent readings, classified.
    pub async fn classified(&self, limit: usize) -> Result<Vec<ClassifiedReading>, AppError> {
        check_limit("limit", limit, &CLASSIFY_LIMIT)?;
        let readings = self.fetch_nonempty().await?;
        Ok(self.classifier.classify_all(tail(&readings, limit)))
    }

    pub async fn latest_status(&self) -> Result<LatestStatus, AppError> {
        let readings = self.fetch_nonempty().await?;
        let latest = readings.last().ok_or_else(AppError::no_data)?;
        let status = self.classifier.classify_reading(latest);

        Ok(LatestStatus {
            timestamp: latest.timestamp.clone(),
            voltage: round_to(latest.voltage, VOLTAGE_DP),
            current: round_to(latest.current, CURRENT_DP),
            power: round_to(latest.power, POWER_DP),
            pf: round_to(latest.power_factor, PF_DP),
            frequency: round_to(latest.frequency, FREQUENCY_DP),
            energy: round_to(latest.energy, ENERGY_DP),
            status,
            alerts: alerts::evaluate_reading(latest),
        })
    }

    /// Aggregates over every admitted reading. Normalization has already
    /// dropped rows with `power <= 0`, so this only ever sees active rows.
    pub async fn summary(&self) -> Result<ReadingSummary, AppError> {
        let readings = self.fetch_nonempty().await?;
        summarize(&readings).ok_or_else(AppError::no_data)
    }

    pub async fn trend(&self, limit: usize) -> Result<Trend, AppError> {
        check_limit("limit", limit, &TREND_LIMIT)?;
        let readings = self.fetch_nonempty().await?;
        let window = tail(&readings, limit);

        Ok(Trend {
            timestamps: window.iter().map(|r| r.timestamp.clone()).collect(),
            power: window.iter().map(|r| round_to(r.power, POWER_DP)).collect(),
            voltage: window.iter().map(|r| round_to(r.voltage, VOLTAGE_DP)).collect(),
            current: window.iter().map(|r| round_to(r.current, CURRENT_DP)).collect(),
            pf: window.iter().map(|r| round_to(r.power_factor, PF_DP)).collect(),
        })
    }

    pub async fn statistics(&self) -> Result<ClassStatisticsMap, AppError> {
        let readings = self.fetch_nonempty().await?;
        Ok(statistics(&self.classifier.classify_all(&readings)))
    }

    /// `Ok(None)` when readings exist but none of them is active.
    pub async fn distribution(&self) -> Result<Option<Distribution>, AppError> {
        let readings = self.fetch_nonempty().await?;
        Ok(distribution(&self.classifier.classify_all(&readings)))
    }

    pub async fn cost_estimate(&self, rate: Option<f64>) -> Result<CostEstimate, AppError> {
        let rate = rate.unwrap_or(self.default_rate);
        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::InvalidQuery(format!(
                "kwh_price must be a non-negative number, got {}",
                rate
            )));
        }

        let readings = self.fetch_nonempty().await?;
        let estimate = cost_estimate(&self.classifier.classify_all(&readings), rate);
        if !estimate.total_cost_idr.is_finite() {
            return Err(AppError::Internal(
                "cost estimate overflowed".to_string(),
            ));
        }
        Ok(estimate)
    }
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

fn check_limit(name: &str, value: usize, range: &RangeInclusive<usize>) -> Result<(), AppError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AppError::InvalidQuery(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}
