//! Postgres repository backend.
//!
//! Row entities and sqlx-based implementations of the repository
//! traits. Queries are written with runtime `query_as` and timed with
//! [`crate::metrics::QueryTimer`].

pub mod categories;
pub mod entities;
pub mod registrations;
pub mod submissions;
pub mod users;

pub use categories::PgCategoryRepository;
pub use registrations::PgRegistrationRepository;
pub use submissions::PgSubmissionRepository;
pub use users::PgUserRepository;

use domain::repository::RepositoryError;

/// Maps a sqlx error onto the repository error taxonomy.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return RepositoryError::Duplicate(db_err.message().to_string());
        }
    }
    RepositoryError::Backend(err.to_string())
}

pub(crate) fn map_json_error(err: serde_json::Error) -> RepositoryError {
    tracing::error!("Failed to decode JSON column: {}", err);
    RepositoryError::Backend(format!("JSON column decode failed: {}", err))
}
