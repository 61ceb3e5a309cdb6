//! Tests for the load classifier and its derived views
//!
//! Unit tests pin the exact thresholds, alert order and rounding; the
//! property tests cover invariants over arbitrary reading sets.

use crate::classifier::{
    alerts::{self, Alert},
    config::ClassifierConfig,
    cost::cost_estimate,
    error::ClassifierError,
    rules::LoadClassifier,
    statistics::{distribution, statistics, summarize},
    types::*,
};
use crate::readings::Reading;
use proptest::prelude::*;

fn reading(power: f64, current: f64, energy: f64) -> Reading {
    Reading {
        timestamp: format!("t-{}", power),
        voltage: 220.0,
        current,
        frequency: 50.0,
        power,
        energy,
        power_factor: 0.9,
    }
}

fn reading_strategy() -> impl Strategy<Value = Reading> {
    (
        180.0f64..250.0,
        prop_oneof![Just(0.0), 0.001f64..20.0],
        49.0f64..51.0,
        0.01f64..2000.0,
        0.0f64..100_000.0,
        0.0f64..1.0,
    )
        .prop_map(|(voltage, current, frequency, power, energy, power_factor)| Reading {
            timestamp: "2024-05-01T10:00:00Z".to_string(),
            voltage,
            current,
            frequency,
            power,
            energy,
            power_factor,
        })
}

// =============================================================================
// Classification rules
// =============================================================================

#[test]
fn thresholds_are_exclusive_upper_bounds() {
    let classifier = LoadClassifier::default();

    assert_eq!(classifier.classify(49.99, None), LoadClass::LightLoad);
    assert_eq!(classifier.classify(50.0, None), LoadClass::MediumLoad);
    assert_eq!(classifier.classify(499.99, None), LoadClass::MediumLoad);
    assert_eq!(classifier.classify(500.0, None), LoadClass::HighLoad);
    assert_eq!(classifier.classify(5000.0, None), LoadClass::HighLoad);
}

#[test]
fn zero_power_or_zero_current_means_sensor_off() {
    let classifier = LoadClassifier::default();

    assert_eq!(classifier.classify(0.0, None), LoadClass::SensorOff);
    assert_eq!(classifier.classify(0.0, Some(3.0)), LoadClass::SensorOff);
    assert_eq!(classifier.classify(750.0, Some(0.0)), LoadClass::SensorOff);
    assert_eq!(classifier.classify(750.0, Some(3.4)), LoadClass::HighLoad);
}

#[test]
fn custom_thresholds_are_respected() {
    let classifier = LoadClassifier::new(ClassifierConfig {
        light_max_w: 100.0,
        medium_max_w: 1000.0,
    })
    .unwrap();

    assert_eq!(classifier.classify(99.0, Some(1.0)), LoadClass::LightLoad);
    assert_eq!(classifier.classify(100.0, Some(1.0)), LoadClass::MediumLoad);
    assert_eq!(classifier.classify(1000.0, Some(1.0)), LoadClass::HighLoad);
}

#[test]
fn inverted_or_non_finite_thresholds_are_rejected() {
    let inverted = LoadClassifier::new(ClassifierConfig {
        light_max_w: 500.0,
        medium_max_w: 50.0,
    });
    assert!(matches!(
        inverted,
        Err(ClassifierError::InvalidThresholds { .. })
    ));

    let nan = LoadClassifier::new(ClassifierConfig {
        light_max_w: f64::NAN,
        medium_max_w: 500.0,
    });
    assert!(nan.is_err());
}

#[test]
fn classify_all_preserves_order_and_uses_current() {
    let classifier = LoadClassifier::default();
    let readings = vec![
        reading(600.0, 3.0, 0.0),
        reading(10.0, 0.1, 0.0),
        reading(100.0, 0.0, 0.0),
    ];

    let classified = classifier.classify_all(&readings);

    let labels: Vec<LoadClass> = classified.iter().map(|c| c.status).collect();
    assert_eq!(
        labels,
        vec![LoadClass::HighLoad, LoadClass::LightLoad, LoadClass::SensorOff]
    );
    assert_eq!(classified[1].reading, readings[1]);
}

#[test]
fn classified_reading_serialises_with_display_label() {
    let classified = LoadClassifier::default().classify_all(&[reading(75.0, 0.4, 12.0)]);
    let json = serde_json::to_value(&classified[0]).unwrap();

    assert_eq!(json["status"], "Beban Sedang");
    assert_eq!(json["pf"], 0.9);
    assert_eq!(json["power"], 75.0);
    assert!(json.get("power_factor").is_none());
}

#[test]
fn load_class_labels_match_display_strings() {
    let labels: Vec<&str> = LoadClass::ALL.iter().map(|c| c.label()).collect();
    assert_eq!(
        labels,
        vec!["Sensor OFF", "Beban Ringan", "Beban Sedang", "Beban Tinggi"]
    );
    for class in LoadClass::ALL {
        assert_eq!(
            serde_json::to_value(class).unwrap(),
            serde_json::Value::String(class.to_string())
        );
    }
}

// =============================================================================
// Alerts
// =============================================================================

#[test]
fn high_power_alone_raises_exactly_one_alert() {
    assert_eq!(
        alerts::evaluate(700.0, 215.0, 0.9, 5.0),
        vec![Alert::HighConsumption]
    );
}

#[test]
fn quiet_reading_yields_only_the_all_normal_sentinel() {
    assert_eq!(alerts::evaluate(5.0, 215.0, 1.0, 2.0), vec![Alert::AllNormal]);
}

#[test]
fn all_alerts_fire_in_fixed_order() {
    assert_eq!(
        alerts::evaluate(900.0, 240.0, 0.5, 12.0),
        vec![
            Alert::HighConsumption,
            Alert::UnstableVoltage,
            Alert::LowPowerFactor,
            Alert::OverloadRisk,
        ]
    );
}

#[test]
fn voltage_band_is_inclusive() {
    assert_eq!(alerts::evaluate(5.0, 200.0, 1.0, 1.0), vec![Alert::AllNormal]);
    assert_eq!(alerts::evaluate(5.0, 230.0, 1.0, 1.0), vec![Alert::AllNormal]);
    assert_eq!(
        alerts::evaluate(5.0, 199.9, 1.0, 1.0),
        vec![Alert::UnstableVoltage]
    );
}

#[test]
fn low_power_factor_needs_meaningful_load() {
    assert_eq!(alerts::evaluate(10.0, 220.0, 0.3, 1.0), vec![Alert::AllNormal]);
    assert_eq!(
        alerts::evaluate(10.5, 220.0, 0.3, 1.0),
        vec![Alert::LowPowerFactor]
    );
}

#[test]
fn alerts_serialise_to_display_messages() {
    let json = serde_json::to_value(vec![Alert::OverloadRisk, Alert::AllNormal]).unwrap();
    assert_eq!(json[0], Alert::OverloadRisk.message());
    assert_eq!(json[1], "✅ Semua parameter normal");
}

// =============================================================================
// Statistics, distribution and summary
// =============================================================================

#[test]
fn statistics_exclude_sensor_off_and_round_values() {
    let classifier = LoadClassifier::default();
    let mut readings = vec![
        reading(10.126, 0.1234, 100.0),
        reading(20.0, 0.2, 200.0),
        reading(100.0, 0.5, 300.0),
        reading(300.0, 0.0, 999.0),
    ];
    readings[0].voltage = 221.0;

    let stats = statistics(&classifier.classify_all(&readings));

    assert!(!stats.contains_key(&LoadClass::SensorOff));
    let light = &stats[&LoadClass::LightLoad];
    assert_eq!(light.count, 2);
    assert_eq!(light.percentage, 66.7);
    assert_eq!(light.avg_power, 15.06);
    assert_eq!(light.min_power, 10.13);
    assert_eq!(light.max_power, 20.0);
    assert_eq!(light.avg_current, 0.162);
    assert_eq!(light.avg_voltage, 220.5);
    assert_eq!(light.avg_pf, 0.9);
    assert_eq!(light.total_energy, 300.0);

    let medium = &stats[&LoadClass::MediumLoad];
    assert_eq!(medium.count, 1);
    assert_eq!(medium.percentage, 33.3);
}

#[test]
fn statistics_are_empty_without_active_readings() {
    let classified = LoadClassifier::default().classify_all(&[reading(100.0, 0.0, 1.0)]);
    assert!(statistics(&classified).is_empty());
    assert!(statistics(&[]).is_empty());
}

#[test]
fn statistics_serialise_keyed_by_label() {
    let classified = LoadClassifier::default().classify_all(&[reading(700.0, 3.0, 1.0)]);
    let json = serde_json::to_value(statistics(&classified)).unwrap();

    assert_eq!(json["Beban Tinggi"]["count"], 1);
    assert_eq!(json["Beban Tinggi"]["percentage"], 100.0);
}

#[test]
fn distribution_without_active_readings_is_none() {
    let classified = LoadClassifier::default().classify_all(&[
        reading(100.0, 0.0, 1.0),
        reading(200.0, 0.0, 1.0),
    ]);
    assert!(distribution(&classified).is_none());
}

#[test]
fn distribution_counts_active_classes_only() {
    let classified = LoadClassifier::default().classify_all(&[
        reading(10.0, 0.1, 1.0),
        reading(20.0, 0.1, 1.0),
        reading(30.0, 0.1, 1.0),
        reading(600.0, 3.0, 1.0),
        reading(600.0, 0.0, 1.0),
    ]);

    let dist = distribution(&classified).unwrap();

    assert_eq!(dist.total_records, 4);
    assert_eq!(dist.distribution[&LoadClass::LightLoad], 3);
    assert_eq!(dist.distribution[&LoadClass::HighLoad], 1);
    assert_eq!(dist.percentages[&LoadClass::LightLoad], 75.0);
    assert_eq!(dist.percentages[&LoadClass::HighLoad], 25.0);
    assert!(!dist.distribution.contains_key(&LoadClass::SensorOff));
}

#[test]
fn summary_aggregates_whole_set() {
    let summary = summarize(&[reading(10.0, 0.1, 5.0), reading(30.0, 0.3, 7.5)]).unwrap();

    assert_eq!(summary.total_records, 2);
    assert_eq!(summary.avg_power, 20.0);
    assert_eq!(summary.min_power, 10.0);
    assert_eq!(summary.max_power, 30.0);
    assert_eq!(summary.avg_current, 0.2);
    assert_eq!(summary.avg_voltage, 220.0);
    assert_eq!(summary.avg_pf, 0.9);
    assert_eq!(summary.total_energy, 12.5);
    assert!(summarize(&[]).is_none());
}

// =============================================================================
// Cost estimate
// =============================================================================

#[test]
fn cost_estimate_matches_documented_example() {
    let classified = LoadClassifier::default().classify_all(&[
        reading(100.0, 0.5, 3600.0),
        reading(120.0, 0.6, 7200.0),
    ]);

    let estimate = cost_estimate(&classified, 1000.0);

    assert_eq!(estimate.total_cost_idr, 3000.0);
    assert_eq!(estimate.kwh_price, 1000.0);
    let medium = &estimate.breakdown[&LoadClass::MediumLoad];
    assert_eq!(medium.energy_kwh, 3.0);
    assert_eq!(medium.cost_idr, 3000.0);
    assert_eq!(medium.avg_power_w, 110.0);
    assert_eq!(medium.duration_records, 2);
}

#[test]
fn cost_estimate_skips_sensor_off_energy() {
    let classified = LoadClassifier::default().classify_all(&[
        reading(10.0, 0.1, 1800.0),
        reading(700.0, 3.0, 3600.0),
        reading(700.0, 0.0, 360_000.0),
    ]);

    let estimate = cost_estimate(&classified, 1444.70);

    assert_eq!(estimate.breakdown.len(), 2);
    assert!(!estimate.breakdown.contains_key(&LoadClass::SensorOff));
    assert_eq!(estimate.breakdown[&LoadClass::LightLoad].cost_idr, 722.35);
    assert_eq!(estimate.breakdown[&LoadClass::HighLoad].cost_idr, 1444.7);
    assert_eq!(estimate.total_cost_idr, 2167.05);
}

#[test]
fn cost_estimate_of_empty_set_is_zero() {
    let estimate = cost_estimate(&[], 1444.70);
    assert_eq!(estimate.total_cost_idr, 0.0);
    assert!(estimate.breakdown.is_empty());
}

// =============================================================================
// Property tests
// =============================================================================

proptest! {
    #[test]
    fn classify_always_returns_a_known_label(power in -10.0f64..10_000.0, current in 0.0f64..50.0) {
        let class = LoadClassifier::default().classify(power, Some(current));
        prop_assert!(LoadClass::ALL.contains(&class));
    }

    #[test]
    fn zero_power_is_always_sensor_off(current in prop::option::of(0.0f64..50.0)) {
        prop_assert_eq!(LoadClassifier::default().classify(0.0, current), LoadClass::SensorOff);
    }

    #[test]
    fn zero_current_is_always_sensor_off(power in 0.001f64..10_000.0) {
        prop_assert_eq!(LoadClassifier::default().classify(power, Some(0.0)), LoadClass::SensorOff);
    }

    #[test]
    fn classify_all_is_idempotent(readings in prop::collection::vec(reading_strategy(), 0..50)) {
        let classifier = LoadClassifier::default();
        let first: Vec<LoadClass> = classifier.classify_all(&readings).iter().map(|c| c.status).collect();
        let second: Vec<LoadClass> = classifier.classify_all(&readings).iter().map(|c| c.status).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn statistics_counts_cover_active_readings(readings in prop::collection::vec(reading_strategy(), 1..80)) {
        let classified = LoadClassifier::default().classify_all(&readings);
        let stats = statistics(&classified);
        let active = classified.iter().filter(|c| c.status.is_active()).count();

        let counted: usize = stats.values().map(|s| s.count).sum();
        prop_assert_eq!(counted, active);

        if active > 0 {
            // Up to three classes, each rounded to 1dp.
            let pct: f64 = stats.values().map(|s| s.percentage).sum();
            prop_assert!((pct - 100.0).abs() <= 0.15 + 1e-9, "percentages sum to {}", pct);
        } else {
            prop_assert!(stats.is_empty());
        }
    }

    #[test]
    fn cost_total_is_sum_of_class_costs(
        readings in prop::collection::vec(reading_strategy(), 1..40),
        rate in 0.0f64..5000.0,
    ) {
        let classified = LoadClassifier::default().classify_all(&readings);
        let estimate = cost_estimate(&classified, rate);
        let parts: f64 = estimate.breakdown.values().map(|c| c.cost_idr).sum();
        // Each part carries at most half a cent of rounding.
        prop_assert!((estimate.total_cost_idr - parts).abs() <= 0.005 * (estimate.breakdown.len() as f64 + 1.0) + 1e-6);
    }
}
