//! Category domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::{validate_not_blank, validate_slug};

/// A browsable registration category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    /// Slug identifier, e.g. "events" or "vehicles".
    pub id: String,
    pub name: String,
    pub description: String,
    /// Icon name rendered by clients.
    pub icon: String,
    /// Admin-only categories are never offered to non-admin hosts.
    #[serde(default)]
    pub admin_only: bool,
    /// Cached count of active registrations in this category.
    #[serde(default)]
    pub count: i64,
}

/// Request payload for creating or updating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertCategoryRequest {
    #[validate(custom(function = "validate_slug"))]
    pub id: String,

    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 80, message = "Name must be at most 80 characters")
    )]
    pub name: String,

    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: String,

    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 50, message = "Icon must be at most 50 characters")
    )]
    pub icon: String,

    #[serde(default)]
    pub admin_only: bool,
}
