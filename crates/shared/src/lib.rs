//! Shared utilities and common types for the Regos backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation
//! - Common validation logic

pub mod jwt;
pub mod validation;
