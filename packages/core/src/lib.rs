// Library root, exposing internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod api;
pub mod classifier;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod readings;
pub mod services;

// Startup plumbing used by the binary.
pub mod cli;
pub mod config;
pub mod logging;
