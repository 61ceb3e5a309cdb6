//! Configuration for the load classifier

use serde::{Deserialize, Serialize};

/// Power thresholds, both exclusive upper bounds in watts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Readings below this are a light load.
    pub light_max_w: f64,
    /// Readings below this (and at or above `light_max_w`) are a medium load.
    pub medium_max_w: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            light_max_w: 50.0,
            medium_max_w: 500.0,
        }
    }
}
