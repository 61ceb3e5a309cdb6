//! Error types for classifier construction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("Invalid thresholds: light max {light_max_w} W must be positive and below medium max {medium_max_w} W")]
    InvalidThresholds { light_max_w: f64, medium_max_w: f64 },
}
