//! Alert rules for a single reading.
//!
//! Every rule is checked independently, in a fixed order, and all that
//! fire are reported. When none fire the result is exactly one
//! `AllNormal` entry.

use serde::Serialize;

use crate::readings::Reading;

pub const HIGH_POWER_W: f64 = 600.0;
pub const VOLTAGE_MIN_V: f64 = 200.0;
pub const VOLTAGE_MAX_V: f64 = 230.0;
pub const LOW_POWER_FACTOR: f64 = 0.7;
/// Below this load a poor power factor is not worth flagging.
pub const POWER_FACTOR_MIN_LOAD_W: f64 = 10.0;
pub const OVERLOAD_CURRENT_A: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alert {
    #[serde(rename = "⚠️ Konsumsi daya sangat tinggi!")]
    HighConsumption,
    #[serde(rename = "⚠️ Tegangan tidak stabil")]
    UnstableVoltage,
    #[serde(rename = "⚠️ Power factor rendah - efisiensi buruk")]
    LowPowerFactor,
    #[serde(rename = "⚠️ Arus terlalu tinggi - risiko overload")]
    OverloadRisk,
    #[serde(rename = "✅ Semua parameter normal")]
    AllNormal,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::HighConsumption => "⚠️ Konsumsi daya sangat tinggi!",
            Alert::UnstableVoltage => "⚠️ Tegangan tidak stabil",
            Alert::LowPowerFactor => "⚠️ Power factor rendah - efisiensi buruk",
            Alert::OverloadRisk => "⚠️ Arus terlalu tinggi - risiko overload",
            Alert::AllNormal => "✅ Semua parameter normal",
        }
    }
}

pub fn evaluate(power: f64, voltage: f64, power_factor: f64, current: f64) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if power > HIGH_POWER_W {
        alerts.push(Alert::HighConsumption);
    }
    if !(VOLTAGE_MIN_V..=VOLTAGE_MAX_V).contains(&voltage) {
        alerts.push(Alert::UnstableVoltage);
    }
    if power_factor < LOW_POWER_FACTOR && power > POWER_FACTOR_MIN_LOAD_W {
        alerts.push(Alert::LowPowerFactor);
    }
    if current > OVERLOAD_CURRENT_A {
        alerts.push(Alert::OverloadRisk);
    }

    if alerts.is_empty() {
        alerts.push(Alert::AllNormal);
    }
    alerts
}

pub fn evaluate_reading(reading: &Reading) -> Vec<Alert> {
    evaluate(
        reading.power,
        reading.voltage,
        reading.power_factor,
        reading.current,
    )
}
