//! Background jobs.

pub mod pool_metrics;
