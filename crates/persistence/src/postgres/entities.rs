//! Database entity definitions (row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::registration::{
    PublishDuration, Registration, RegistrationStatus, Visibility,
};
use domain::models::submission::{Submission, SubmissionStatus};
use domain::models::user::{User, UserRole};
use domain::models::Category;

/// Database enum mapping to the PostgreSQL `user_role` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRoleDb {
    Agent,
    Host,
    Admin,
}

impl From<UserRoleDb> for UserRole {
    fn from(role: UserRoleDb) -> Self {
        match role {
            UserRoleDb::Agent => UserRole::Agent,
            UserRoleDb::Host => UserRole::Host,
            UserRoleDb::Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for UserRoleDb {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Agent => UserRoleDb::Agent,
            UserRole::Host => UserRoleDb::Host,
            UserRole::Admin => UserRoleDb::Admin,
        }
    }
}

/// Database enum mapping to the PostgreSQL `registration_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
pub enum RegistrationStatusDb {
    Draft,
    Pending,
    Active,
    Paused,
    Expired,
    Rejected,
}

impl From<RegistrationStatusDb> for RegistrationStatus {
    fn from(status: RegistrationStatusDb) -> Self {
        match status {
            RegistrationStatusDb::Draft => RegistrationStatus::Draft,
            RegistrationStatusDb::Pending => RegistrationStatus::Pending,
            RegistrationStatusDb::Active => RegistrationStatus::Active,
            RegistrationStatusDb::Paused => RegistrationStatus::Paused,
            RegistrationStatusDb::Expired => RegistrationStatus::Expired,
            RegistrationStatusDb::Rejected => RegistrationStatus::Rejected,
        }
    }
}

impl From<RegistrationStatus> for RegistrationStatusDb {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Draft => RegistrationStatusDb::Draft,
            RegistrationStatus::Pending => RegistrationStatusDb::Pending,
            RegistrationStatus::Active => RegistrationStatusDb::Active,
            RegistrationStatus::Paused => RegistrationStatusDb::Paused,
            RegistrationStatus::Expired => RegistrationStatusDb::Expired,
            RegistrationStatus::Rejected => RegistrationStatusDb::Rejected,
        }
    }
}

/// Database enum mapping to the PostgreSQL `submission_status` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "lowercase")]
pub enum SubmissionStatusDb {
    Pending,
    Approved,
    Rejected,
    Scheduled,
}

impl From<SubmissionStatusDb> for SubmissionStatus {
    fn from(status: SubmissionStatusDb) -> Self {
        match status {
            SubmissionStatusDb::Pending => SubmissionStatus::Pending,
            SubmissionStatusDb::Approved => SubmissionStatus::Approved,
            SubmissionStatusDb::Rejected => SubmissionStatus::Rejected,
            SubmissionStatusDb::Scheduled => SubmissionStatus::Scheduled,
        }
    }
}

impl From<SubmissionStatus> for SubmissionStatusDb {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Pending => SubmissionStatusDb::Pending,
            SubmissionStatus::Approved => SubmissionStatusDb::Approved,
            SubmissionStatus::Rejected => SubmissionStatusDb::Rejected,
            SubmissionStatus::Scheduled => SubmissionStatusDb::Scheduled,
        }
    }
}

/// Database enum mapping to the PostgreSQL `visibility` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "visibility", rename_all = "lowercase")]
pub enum VisibilityDb {
    Public,
    Private,
}

impl From<VisibilityDb> for Visibility {
    fn from(visibility: VisibilityDb) -> Self {
        match visibility {
            VisibilityDb::Public => Visibility::Public,
            VisibilityDb::Private => Visibility::Private,
        }
    }
}

impl From<Visibility> for VisibilityDb {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => VisibilityDb::Public,
            Visibility::Private => VisibilityDb::Private,
        }
    }
}

/// Database enum mapping to the PostgreSQL `publish_duration` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "publish_duration")]
pub enum PublishDurationDb {
    #[sqlx(rename = "1day")]
    OneDay,
    #[sqlx(rename = "3days")]
    ThreeDays,
    #[sqlx(rename = "5days")]
    FiveDays,
    #[sqlx(rename = "7days")]
    SevenDays,
    #[sqlx(rename = "15days")]
    FifteenDays,
    #[sqlx(rename = "30days")]
    ThirtyDays,
}

impl From<PublishDurationDb> for PublishDuration {
    fn from(duration: PublishDurationDb) -> Self {
        match duration {
            PublishDurationDb::OneDay => PublishDuration::OneDay,
            PublishDurationDb::ThreeDays => PublishDuration::ThreeDays,
            PublishDurationDb::FiveDays => PublishDuration::FiveDays,
            PublishDurationDb::SevenDays => PublishDuration::SevenDays,
            PublishDurationDb::FifteenDays => PublishDuration::FifteenDays,
            PublishDurationDb::ThirtyDays => PublishDuration::ThirtyDays,
        }
    }
}

impl From<PublishDuration> for PublishDurationDb {
    fn from(duration: PublishDuration) -> Self {
        match duration {
            PublishDuration::OneDay => PublishDurationDb::OneDay,
            PublishDuration::ThreeDays => PublishDurationDb::ThreeDays,
            PublishDuration::FiveDays => PublishDurationDb::FiveDays,
            PublishDuration::SevenDays => PublishDurationDb::SevenDays,
            PublishDuration::FifteenDays => PublishDurationDb::FifteenDays,
            PublishDuration::ThirtyDays => PublishDurationDb::ThirtyDays,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRoleDb,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            phone: entity.phone,
            role: entity.role.into(),
            verified: entity.verified,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the categories table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub admin_only: bool,
    pub count: i64,
}

impl From<CategoryEntity> for Category {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            icon: entity.icon,
            admin_only: entity.admin_only,
            count: entity.count,
        }
    }
}

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub host_id: Uuid,
    pub host_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub visibility: VisibilityDb,
    pub duration: PublishDurationDb,
    pub status: RegistrationStatusDb,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub view_count: i64,
    pub submission_count: i64,
    pub featured: bool,
    pub verified: bool,
    pub form_schema: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationEntity> for Registration {
    type Error = serde_json::Error;

    fn try_from(entity: RegistrationEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            host_id: entity.host_id,
            host_name: entity.host_name,
            title: entity.title,
            description: entity.description,
            category: entity.category,
            visibility: entity.visibility.into(),
            duration: entity.duration.into(),
            status: entity.status.into(),
            start_date: entity.start_date,
            end_date: entity.end_date,
            view_count: entity.view_count,
            submission_count: entity.submission_count,
            featured: entity.featured,
            verified: entity.verified,
            form_schema: serde_json::from_value(entity.form_schema)?,
            created_at: entity.created_at,
        })
    }
}

/// Database row mapping for the submissions table.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionEntity {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub user_id: Option<Uuid>,
    pub form_data: serde_json::Value,
    pub files: Vec<String>,
    pub status: SubmissionStatusDb,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl TryFrom<SubmissionEntity> for Submission {
    type Error = serde_json::Error;

    fn try_from(entity: SubmissionEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            registration_id: entity.registration_id,
            user_id: entity.user_id,
            form_data: serde_json::from_value(entity.form_data)?,
            files: entity.files,
            status: entity.status.into(),
            notes: entity.notes,
            submitted_at: entity.submitted_at,
        })
    }
}
