//! Domain models for the Regos registration platform.

pub mod category;
pub mod registration;
pub mod submission;
pub mod user;

pub use category::Category;
pub use registration::{FormField, Registration, RegistrationStatus};
pub use submission::{Submission, SubmissionStatus};
pub use user::{User, UserRole};
