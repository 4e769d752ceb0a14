//! Business logic services.

pub mod access;
pub mod pricing;
pub mod registrations;
pub mod submissions;

pub use registrations::RegistrationStore;
pub use submissions::SubmissionStore;
