//! # Dataset Reports
#![forbid(unsafe_code)]

/// Report configuration
pub mod config;

/// Datasets
pub mod datasets;

/// Aggregators
pub mod aggregate;

/// Classification metrics
pub mod metrics;

/// Document export
pub mod export;

/// CLI indexes and utilities
pub mod cli;
