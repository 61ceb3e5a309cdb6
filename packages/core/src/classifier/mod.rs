//! Load Classification Module
//!
//! Stateless rule engine that labels each reading with a load class and
//! derives per-class statistics, distributions, alerts and cost estimates
//! from a classified reading set.

pub mod alerts;
pub mod config;
pub mod cost;
pub mod error;
pub mod precision;
pub mod rules;
pub mod statistics;
pub mod types;

#[cfg(test)]
mod tests;

pub use alerts::Alert;
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use rules::LoadClassifier;
pub use types::*;
