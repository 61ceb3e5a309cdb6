//! Aggregates derived from readings and classified readings.
//!
//! `SensorOff` readings never contribute to per-class figures, and their
//! count is left out of every percentage denominator.

use std::collections::BTreeMap;

use crate::classifier::{
    precision::{round_to, CURRENT_DP, ENERGY_DP, PERCENT_DP, PF_DP, POWER_DP, VOLTAGE_DP},
    types::{
        ClassStatistics, ClassStatisticsMap, ClassifiedReading, Distribution, LoadClass,
        ReadingSummary,
    },
};
use crate::readings::Reading;

/// Group active readings by class, keeping source order within a class.
pub(crate) fn group_active(classified: &[ClassifiedReading]) -> BTreeMap<LoadClass, Vec<&Reading>> {
    let mut groups: BTreeMap<LoadClass, Vec<&Reading>> = BTreeMap::new();
    for item in classified.iter().filter(|item| item.status.is_active()) {
        groups.entry(item.status).or_default().push(&item.reading);
    }
    groups
}

pub(crate) fn mean(readings: &[&Reading], value: impl Fn(&Reading) -> f64) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    readings.iter().map(|r| value(*r)).sum::<f64>() / readings.len() as f64
}

fn min_max(readings: &[&Reading], value: impl Fn(&Reading) -> f64) -> (f64, f64) {
    readings
        .iter()
        .map(|r| value(*r))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn percentage(count: usize, total: usize) -> f64 {
    round_to(count as f64 / total as f64 * 100.0, PERCENT_DP)
}

/// Per-class statistics over active readings. Empty when nothing is active.
pub fn statistics(classified: &[ClassifiedReading]) -> ClassStatisticsMap {
    let groups = group_active(classified);
    let active_total: usize = groups.values().map(Vec::len).sum();

    groups
        .into_iter()
        .map(|(class, readings)| {
            let (min_power, max_power) = min_max(&readings, |r| r.power);
            let stats = ClassStatistics {
                count: readings.len(),
                percentage: percentage(readings.len(), active_total),
                avg_power: round_to(mean(&readings, |r| r.power), POWER_DP),
                min_power: round_to(min_power, POWER_DP),
                max_power: round_to(max_power, POWER_DP),
                avg_current: round_to(mean(&readings, |r| r.current), CURRENT_DP),
                avg_voltage: round_to(mean(&readings, |r| r.voltage), VOLTAGE_DP),
                avg_pf: round_to(mean(&readings, |r| r.power_factor), PF_DP),
                total_energy: round_to(readings.iter().map(|r| r.energy).sum(), ENERGY_DP),
            };
            (class, stats)
        })
        .collect()
}

/// Count and share of each active class, or `None` when no reading is
/// active.
pub fn distribution(classified: &[ClassifiedReading]) -> Option<Distribution> {
    let groups = group_active(classified);
    let total_records: usize = groups.values().map(Vec::len).sum();
    if total_records == 0 {
        return None;
    }

    let distribution: BTreeMap<LoadClass, usize> = groups
        .iter()
        .map(|(class, readings)| (*class, readings.len()))
        .collect();
    let percentages = distribution
        .iter()
        .map(|(class, count)| (*class, percentage(*count, total_records)))
        .collect();

    Some(Distribution {
        total_records,
        distribution,
        percentages,
    })
}

/// Whole-set aggregates, or `None` for an empty set.
pub fn summarize(readings: &[Reading]) -> Option<ReadingSummary> {
    if readings.is_empty() {
        return None;
    }

    let refs: Vec<&Reading> = readings.iter().collect();
    let (min_power, max_power) = min_max(&refs, |r| r.power);

    Some(ReadingSummary {
        total_records: readings.len(),
        avg_voltage: round_to(mean(&refs, |r| r.voltage), VOLTAGE_DP),
        avg_current: round_to(mean(&refs, |r| r.current), CURRENT_DP),
        avg_power: round_to(mean(&refs, |r| r.power), POWER_DP),
        min_power: round_to(min_power, POWER_DP),
        max_power: round_to(max_power, POWER_DP),
        avg_pf: round_to(mean(&refs, |r| r.power_factor), PF_DP),
        total_energy: round_to(readings.iter().map(|r| r.energy).sum(), ENERGY_DP),
    })
}
