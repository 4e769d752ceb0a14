//! Persistence layer for the Regos backend.
//!
//! This crate contains two implementations of the repository traits
//! defined in `domain::repository`:
//! - `memory`: in-memory collections seeded with demo fixtures, used
//!   when no database is configured and as the test substrate
//! - `postgres`: sqlx-backed repositories with SQL migrations
//!
//! It also owns database connection management and query metrics.

pub mod db;
pub mod memory;
pub mod metrics;
pub mod postgres;
