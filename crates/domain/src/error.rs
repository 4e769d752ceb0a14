//! Domain error types.
//!
//! Every public store operation returns one of these as its failure mode.
//! They are business-rule outcomes, not defects: the API layer maps each
//! variant to a distinct HTTP status so clients can react appropriately.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Error type for domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied data fails a domain constraint. Carries the names
    /// or labels of the offending fields so clients can enumerate them.
    #[error("Validation failed: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// Actor lacks the role or ownership required for the mutation.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Requested transition is illegal from the entity's current state.
    #[error("Invalid state: cannot {action} while {current}")]
    InvalidState { current: String, action: String },

    /// The registration's window for the action has closed.
    #[error("Registration is closed: {0}")]
    Closed(String),

    /// The registration's end date has passed.
    #[error("Registration has expired: {0}")]
    Expired(String),

    /// The persistence backend failed. Not a business-rule outcome.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        DomainError::Validation { fields }
    }
}

impl DomainError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>) -> Self {
        DomainError::Validation {
            fields: vec![field.into()],
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    pub fn invalid_state(current: impl Into<String>, action: impl Into<String>) -> Self {
        DomainError::InvalidState {
            current: current.into(),
            action: action.into(),
        }
    }
}
