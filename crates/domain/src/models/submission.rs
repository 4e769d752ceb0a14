//! Submission domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Review status of a submission.
///
/// `Pending` is the initial state only; once a host or admin classifies
/// a submission, it can move freely between the other three states but
/// never back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    Scheduled,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Scheduled => "scheduled",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            "scheduled" => Ok(SubmissionStatus::Scheduled),
            _ => Err(format!("Invalid submission status: {}", s)),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One respondent's answer set against a registration's form schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Submission {
    pub id: Uuid,
    pub registration_id: Uuid,
    /// Absent for anonymous submissions.
    pub user_id: Option<Uuid>,
    /// Values keyed by form field id.
    pub form_data: HashMap<String, serde_json::Value>,
    /// Opaque references to uploaded files.
    pub files: Vec<String>,
    pub status: SubmissionStatus,
    /// Host-authored note attached during review.
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Request payload for submitting to a registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitRequest {
    #[serde(default)]
    pub form_data: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Returns true when a submitted value counts as empty for a required
/// field: absent, null, blank string, unchecked checkbox, or empty list.
pub fn is_empty_value(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.trim().is_empty(),
        Some(serde_json::Value::Bool(b)) => !b,
        Some(serde_json::Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    }
}
