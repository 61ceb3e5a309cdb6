//! Core data types for load classification

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::readings::Reading;

/// Load class of a single reading. Serialized as the user-facing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadClass {
    #[serde(rename = "Sensor OFF")]
    SensorOff,
    #[serde(rename = "Beban Ringan")]
    LightLoad,
    #[serde(rename = "Beban Sedang")]
    MediumLoad,
    #[serde(rename = "Beban Tinggi")]
    HighLoad,
}

impl LoadClass {
    pub const ALL: [LoadClass; 4] = [
        LoadClass::SensorOff,
        LoadClass::LightLoad,
        LoadClass::MediumLoad,
        LoadClass::HighLoad,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoadClass::SensorOff => "Sensor OFF",
            LoadClass::LightLoad => "Beban Ringan",
            LoadClass::MediumLoad => "Beban Sedang",
            LoadClass::HighLoad => "Beban Tinggi",
        }
    }

    /// Anything but `SensorOff`.
    pub fn is_active(&self) -> bool {
        !matches!(self, LoadClass::SensorOff)
    }
}

impl fmt::Display for LoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reading paired with its load class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedReading {
    #[serde(flatten)]
    pub reading: Reading,
    pub status: LoadClass,
}

/// Aggregates for one active load class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStatistics {
    pub count: usize,
    /// Share of active readings, 1dp.
    pub percentage: f64,
    pub avg_power: f64,
    pub min_power: f64,
    pub max_power: f64,
    pub avg_current: f64,
    pub avg_voltage: f64,
    pub avg_pf: f64,
    pub total_energy: f64,
}

pub type ClassStatisticsMap = BTreeMap<LoadClass, ClassStatistics>;

/// Whole-set aggregates over unclassified readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingSummary {
    pub total_records: usize,
    pub avg_voltage: f64,
    pub avg_current: f64,
    pub avg_power: f64,
    pub min_power: f64,
    pub max_power: f64,
    pub avg_pf: f64,
    pub total_energy: f64,
}

/// Active-load counts and shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub total_records: usize,
    pub distribution: BTreeMap<LoadClass, usize>,
    pub percentages: BTreeMap<LoadClass, f64>,
}

/// Cost attributed to one active load class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCost {
    pub energy_kwh: f64,
    pub cost_idr: f64,
    pub avg_power_w: f64,
    pub duration_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub total_cost_idr: f64,
    pub kwh_price: f64,
    pub breakdown: BTreeMap<LoadClass, ClassCost>,
}
