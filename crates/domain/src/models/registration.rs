//! Registration domain models.
//!
//! A registration is a host-authored form/event definition that others
//! submit responses to. Its status is a small state machine; `expired`
//! is derived lazily from `end_date` at read time rather than written
//! by a background sweep.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Draft,
    Pending,
    Active,
    Paused,
    Expired,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Draft => "draft",
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Active => "active",
            RegistrationStatus::Paused => "paused",
            RegistrationStatus::Expired => "expired",
            RegistrationStatus::Rejected => "rejected",
        }
    }

    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RegistrationStatus::Expired | RegistrationStatus::Rejected)
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(RegistrationStatus::Draft),
            "pending" => Ok(RegistrationStatus::Pending),
            "active" => Ok(RegistrationStatus::Active),
            "paused" => Ok(RegistrationStatus::Paused),
            "expired" => Ok(RegistrationStatus::Expired),
            "rejected" => Ok(RegistrationStatus::Rejected),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who can discover a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => Err(format!("Invalid visibility: {}", s)),
        }
    }
}

/// Published duration of a registration window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublishDuration {
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "3days")]
    ThreeDays,
    #[serde(rename = "5days")]
    FiveDays,
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "15days")]
    FifteenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
}

impl PublishDuration {
    pub fn days(&self) -> i64 {
        match self {
            PublishDuration::OneDay => 1,
            PublishDuration::ThreeDays => 3,
            PublishDuration::FiveDays => 5,
            PublishDuration::SevenDays => 7,
            PublishDuration::FifteenDays => 15,
            PublishDuration::ThirtyDays => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishDuration::OneDay => "1day",
            PublishDuration::ThreeDays => "3days",
            PublishDuration::FiveDays => "5days",
            PublishDuration::SevenDays => "7days",
            PublishDuration::FifteenDays => "15days",
            PublishDuration::ThirtyDays => "30days",
        }
    }
}

impl FromStr for PublishDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1day" => Ok(PublishDuration::OneDay),
            "3days" => Ok(PublishDuration::ThreeDays),
            "5days" => Ok(PublishDuration::FiveDays),
            "7days" => Ok(PublishDuration::SevenDays),
            "15days" => Ok(PublishDuration::FifteenDays),
            "30days" => Ok(PublishDuration::ThirtyDays),
            _ => Err(format!("Invalid duration: {}", s)),
        }
    }
}

impl fmt::Display for PublishDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Email,
    Phone,
    Vin,
    Id,
    Date,
    Time,
    Datetime,
    Select,
    Radio,
    Checkbox,
    File,
    Image,
    Url,
}

impl FieldType {
    /// Select and radio fields present a fixed choice list.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

/// One field in a registration's form schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormField {
    /// Returns the labels of schema problems with this field, if any.
    ///
    /// A field is well-formed when its label is non-empty and, for
    /// choice types, its options list is present and non-empty.
    pub fn schema_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.label.trim().is_empty() {
            errors.push(format!("field '{}' label", self.id));
        }
        if self.field_type.requires_options()
            && self.options.as_ref().map_or(true, |o| o.is_empty())
        {
            errors.push(format!("field '{}' options", self.id));
        }
        errors
    }
}

/// A host-authored form/event definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub host_id: Uuid,
    /// Denormalized host display name, matched by search.
    pub host_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub visibility: Visibility,
    pub duration: PublishDuration,
    pub status: RegistrationStatus,
    pub start_date: DateTime<Utc>,
    /// `start_date + duration`; computed once at creation, immutable.
    pub end_date: DateTime<Utc>,
    pub view_count: i64,
    /// Count of live submissions referencing this registration.
    pub submission_count: i64,
    pub featured: bool,
    pub verified: bool,
    pub form_schema: Vec<FormField>,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Status as observed at `now`, with expiry derived lazily.
    ///
    /// A registration whose window has closed reads as `expired` even
    /// if the stored status is still `active` or `paused`.
    pub fn effective_status(&self, now: DateTime<Utc>) -> RegistrationStatus {
        match self.status {
            RegistrationStatus::Active | RegistrationStatus::Paused if now > self.end_date => {
                RegistrationStatus::Expired
            }
            status => status,
        }
    }

    /// Whether new submissions are accepted at `now`.
    pub fn is_open_for_submissions(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == RegistrationStatus::Active
    }

    /// Schema problems that block leaving `draft`: the schema must have
    /// at least one field and every field must be well-formed.
    pub fn schema_errors(&self) -> Vec<String> {
        if self.form_schema.is_empty() {
            return vec!["form_schema".to_string()];
        }
        self.form_schema
            .iter()
            .flat_map(|f| f.schema_errors())
            .collect()
    }

    /// Computes the end of the window for a registration starting at
    /// `start` with the given published duration.
    pub fn window_end(start: DateTime<Utc>, duration: PublishDuration) -> DateTime<Utc> {
        start + Duration::days(duration.days())
    }
}

/// Request payload for creating a registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateRegistrationRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Title must be between 1 and 150 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Description must be between 1 and 5000 characters"
    ))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    pub visibility: Visibility,

    pub duration: PublishDuration,

    #[serde(default)]
    pub form_schema: Vec<FormField>,
}

/// Sort order for registration search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first by creation time.
    #[default]
    Newest,
    /// Most viewed first.
    Popular,
    /// Most submissions first.
    Submissions,
    /// Soonest-ending first.
    Ending,
}

/// Optional filters for registration search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchFilters {
    pub category: Option<String>,
    pub status: Option<RegistrationStatus>,
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registration(status: RegistrationStatus, end_date: DateTime<Utc>) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            host_name: "Event Organizer Pro".to_string(),
            title: "Tech Innovation Summit".to_string(),
            description: "Annual conference".to_string(),
            category: "events".to_string(),
            visibility: Visibility::Public,
            duration: PublishDuration::SevenDays,
            status,
            start_date: end_date - Duration::days(7),
            end_date,
            view_count: 0,
            submission_count: 0,
            featured: false,
            verified: false,
            form_schema: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_duration_round_trip() {
        for s in ["1day", "3days", "5days", "7days", "15days", "30days"] {
            let d: PublishDuration = s.parse().unwrap();
            assert_eq!(d.as_str(), s);
        }
        assert!("90days".parse::<PublishDuration>().is_err());
    }

    #[test]
    fn test_duration_serde_uses_original_names() {
        let d: PublishDuration = serde_json::from_str("\"15days\"").unwrap();
        assert_eq!(d, PublishDuration::FifteenDays);
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"15days\"");
    }

    #[test]
    fn test_window_end() {
        let start = Utc::now();
        let end = Registration::window_end(start, PublishDuration::SevenDays);
        assert_eq!(end - start, Duration::days(7));
    }

    #[test]
    fn test_effective_status_lazy_expiry() {
        let now = Utc::now();
        let past = now - Duration::seconds(1);
        let future = now + Duration::days(1);

        let active_past = sample_registration(RegistrationStatus::Active, past);
        assert_eq!(active_past.effective_status(now), RegistrationStatus::Expired);
        assert!(!active_past.is_open_for_submissions(now));

        let paused_past = sample_registration(RegistrationStatus::Paused, past);
        assert_eq!(paused_past.effective_status(now), RegistrationStatus::Expired);

        let active_future = sample_registration(RegistrationStatus::Active, future);
        assert_eq!(active_future.effective_status(now), RegistrationStatus::Active);
        assert!(active_future.is_open_for_submissions(now));

        // Pending registrations never expire lazily; they are waiting on
        // payment confirmation, not on the submission window.
        let pending_past = sample_registration(RegistrationStatus::Pending, past);
        assert_eq!(pending_past.effective_status(now), RegistrationStatus::Pending);
    }

    #[test]
    fn test_schema_errors_empty_schema() {
        let reg = sample_registration(RegistrationStatus::Draft, Utc::now());
        assert_eq!(reg.schema_errors(), vec!["form_schema".to_string()]);
    }

    #[test]
    fn test_schema_errors_blank_label_and_missing_options() {
        let mut reg = sample_registration(RegistrationStatus::Draft, Utc::now());
        reg.form_schema = vec![
            FormField {
                id: "f1".to_string(),
                field_type: FieldType::Text,
                label: "  ".to_string(),
                required: true,
                placeholder: None,
                options: None,
            },
            FormField {
                id: "f2".to_string(),
                field_type: FieldType::Select,
                label: "Session".to_string(),
                required: true,
                placeholder: None,
                options: Some(vec![]),
            },
        ];
        let errors = reg.schema_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("f1"));
        assert!(errors[1].contains("f2"));
    }

    #[test]
    fn test_form_field_type_serde_rename() {
        let json = r#"{"id":"f1","type":"select","label":"Session","required":true,"options":["AM","PM"]}"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Select);
        assert!(field.schema_errors().is_empty());
    }
}
