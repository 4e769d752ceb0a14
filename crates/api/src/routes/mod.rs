//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod pricing;
pub mod registrations;
pub mod submissions;
pub mod users;
