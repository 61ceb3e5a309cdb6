//! Threshold rules mapping a reading to its load class

use crate::classifier::{
    config::ClassifierConfig,
    error::ClassifierError,
    types::{ClassifiedReading, LoadClass},
};
use crate::readings::Reading;

/// Immutable rule-based classifier. Construct once, share freely.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadClassifier {
    config: ClassifierConfig,
}

impl LoadClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let ClassifierConfig {
            light_max_w,
            medium_max_w,
        } = config;

        let valid = light_max_w.is_finite()
            && medium_max_w.is_finite()
            && light_max_w > 0.0
            && light_max_w < medium_max_w;
        if !valid {
            return Err(ClassifierError::InvalidThresholds {
                light_max_w,
                medium_max_w,
            });
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one power sample.
    ///
    /// Zero power, or a reported current of exactly zero, means the sensor
    /// is off regardless of the other value. Thresholds are exclusive upper
    /// bounds: a reading exactly at `light_max_w` is a medium load.
    pub fn classify(&self, power: f64, current: Option<f64>) -> LoadClass {
        if power == 0.0 || current == Some(0.0) {
            LoadClass::SensorOff
        } else if power < self.config.light_max_w {
            LoadClass::LightLoad
        } else if power < self.config.medium_max_w {
            LoadClass::MediumLoad
        } else {
            LoadClass::HighLoad
        }
    }

    pub fn classify_reading(&self, reading: &Reading) -> LoadClass {
        self.classify(reading.power, Some(reading.current))
    }

    /// Label every reading, preserving order.
    pub fn classify_all(&self, readings: &[Reading]) -> Vec<ClassifiedReading> {
        readings
            .iter()
            .map(|reading| ClassifiedReading {
                reading: reading.clone(),
                status: self.classify_reading(reading),
            })
            .collect()
    }
}

impl Default for LoadClassifier {
    fn default() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }
}
