//! Row validation shared by every data source.
//!
//! Each raw row is validated on its own: a row either becomes a complete
//! `Reading` or is rejected with a reason. Rejections are counted so a
//! fetch can report what it dropped.

use crate::readings::{
    error::RowRejection,
    types::{RawRecord, Reading},
};

/// Canonical names for the six numeric columns, in channel field order
/// (`field1` through `field6`).
const NUMERIC_FIELDS: [&str; 6] = ["voltage", "current", "frequency", "power", "energy", "pf"];

/// Per-reason counts of rows dropped during one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub missing_field: usize,
    pub not_numeric: usize,
    pub sensor_off: usize,
}

impl RejectionCounts {
    pub fn total(&self) -> usize {
        self.missing_field + self.not_numeric + self.sensor_off
    }

    fn record(&mut self, rejection: &RowRejection) {
        match rejection {
            RowRejection::MissingField { .. } => self.missing_field += 1,
            RowRejection::NotNumeric { .. } => self.not_numeric += 1,
            RowRejection::SensorOff { .. } => self.sensor_off += 1,
        }
    }
}

/// Result of normalizing a batch of raw rows.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub readings: Vec<Reading>,
    pub rejected: RejectionCounts,
}

/// Validate a single raw row.
///
/// All six numeric columns must parse before the power check runs, so a
/// row with a bad voltage is reported as non-numeric even if it is also off.
pub fn validate_record(record: &RawRecord) -> Result<Reading, RowRejection> {
    let timestamp = record
        .created_at
        .as_deref()
        .map(str::trim)
        .filter(|ts| !ts.is_empty())
        .ok_or(RowRejection::MissingField { field: "created_at" })?;

    let mut values = [0.0_f64; 6];
    for (idx, field) in NUMERIC_FIELDS.iter().enumerate() {
        values[idx] = parse_numeric(field, record.fields[idx].as_deref())?;
    }
    let [voltage, current, frequency, power, energy, power_factor] = values;

    if power <= 0.0 {
        return Err(RowRejection::SensorOff { power });
    }

    Ok(Reading {
        timestamp: timestamp.to_string(),
        voltage,
        current,
        frequency,
        power,
        energy,
        power_factor,
    })
}

/// Validate every row, keeping source order for the survivors.
pub fn normalize(records: Vec<RawRecord>) -> Normalized {
    let mut normalized = Normalized {
        readings: Vec::with_capacity(records.len()),
        rejected: RejectionCounts::default(),
    };

    for record in &records {
        match validate_record(record) {
            Ok(reading) => normalized.readings.push(reading),
            Err(rejection) => {
                tracing::trace!("Dropping row: {}", rejection);
                normalized.rejected.record(&rejection);
            }
        }
    }

    if normalized.rejected.total() > 0 {
        tracing::debug!(
            "Normalization dropped {} of {} rows (missing: {}, non-numeric: {}, sensor off: {})",
            normalized.rejected.total(),
            records.len(),
            normalized.rejected.missing_field,
            normalized.rejected.not_numeric,
            normalized.rejected.sensor_off,
        );
    }

    normalized
}

fn parse_numeric(field: &'static str, raw: Option<&str>) -> Result<f64, RowRejection> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RowRejection::MissingField { field })?;

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RowRejection::NotNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}
