//! Domain layer for the Regos registration platform.
//!
//! This crate contains:
//! - Domain models (User, Category, Registration, Submission)
//! - Repository traits (the persistence seam)
//! - Business logic services (access policy, registration lifecycle,
//!   submission workflow, pricing)
//! - Domain error types

pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::DomainError;
