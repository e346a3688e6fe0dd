//! contract-lens: technical snapshots and commentary for option contracts.

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
