//! Registration repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::registration::Registration;
use domain::repository::{RegistrationRepository, RepositoryResult};

use super::entities::{
    PublishDurationDb, RegistrationEntity, RegistrationStatusDb, VisibilityDb,
};
use super::{map_json_error, map_sqlx_error};
use crate::metrics::QueryTimer;

const REGISTRATION_COLUMNS: &str = "id, host_id, host_name, title, description, category, \
     visibility, duration, status, start_date, end_date, view_count, submission_count, \
     featured, verified, form_schema, created_at";

/// Postgres-backed registration repository.
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_domain(entity: RegistrationEntity) -> RepositoryResult<Registration> {
    Registration::try_from(entity).map_err(map_json_error)
}

fn all_into_domain(entities: Vec<RegistrationEntity>) -> RepositoryResult<Vec<Registration>> {
    entities.into_iter().map(into_domain).collect()
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn create(&self, registration: Registration) -> RepositoryResult<Registration> {
        let form_schema =
            serde_json::to_value(&registration.form_schema).map_err(map_json_error)?;

        let timer = QueryTimer::new("create_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            INSERT INTO registrations
                (id, host_id, host_name, title, description, category, visibility,
                 duration, status, start_date, end_date, view_count, submission_count,
                 featured, verified, form_schema, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.id)
        .bind(registration.host_id)
        .bind(&registration.host_name)
        .bind(&registration.title)
        .bind(&registration.description)
        .bind(&registration.category)
        .bind(VisibilityDb::from(registration.visibility))
        .bind(PublishDurationDb::from(registration.duration))
        .bind(RegistrationStatusDb::from(registration.status))
        .bind(registration.start_date)
        .bind(registration.end_date)
        .bind(registration.view_count)
        .bind(registration.submission_count)
        .bind(registration.featured)
        .bind(registration.verified)
        .bind(form_schema)
        .bind(registration.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        into_domain(result.map_err(map_sqlx_error)?)
    }

    async fn update(
        &self,
        registration: Registration,
    ) -> RepositoryResult<Option<Registration>> {
        let form_schema =
            serde_json::to_value(&registration.form_schema).map_err(map_json_error)?;

        let timer = QueryTimer::new("update_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE registrations
            SET host_name = $2, title = $3, description = $4, category = $5,
                visibility = $6, duration = $7, status = $8, start_date = $9,
                end_date = $10, view_count = $11, submission_count = $12,
                featured = $13, verified = $14, form_schema = $15
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.id)
        .bind(&registration.host_name)
        .bind(&registration.title)
        .bind(&registration.description)
        .bind(&registration.category)
        .bind(VisibilityDb::from(registration.visibility))
        .bind(PublishDurationDb::from(registration.duration))
        .bind(RegistrationStatusDb::from(registration.status))
        .bind(registration.start_date)
        .bind(registration.end_date)
        .bind(registration.view_count)
        .bind(registration.submission_count)
        .bind(registration.featured)
        .bind(registration.verified)
        .bind(form_schema)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map_err(map_sqlx_error)?
            .map(into_domain)
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Registration>> {
        let timer = QueryTimer::new("find_registration_by_id");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map_err(map_sqlx_error)?
            .map(into_domain)
            .transpose()
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Registration>> {
        let timer = QueryTimer::new("list_registrations");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        all_into_domain(result.map_err(map_sqlx_error)?)
    }

    async fn list_by_host(&self, host_id: Uuid) -> RepositoryResult<Vec<Registration>> {
        let timer = QueryTimer::new("list_registrations_by_host");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS} FROM registrations
            WHERE host_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(host_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        all_into_domain(result.map_err(map_sqlx_error)?)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let timer = QueryTimer::new("delete_registration");
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        result
            .map(|done| done.rows_affected() > 0)
            .map_err(map_sqlx_error)
    }

    async fn increment_view_count(&self, id: Uuid) -> RepositoryResult<()> {
        let timer = QueryTimer::new("increment_view_count");
        let result =
            sqlx::query("UPDATE registrations SET view_count = view_count + 1 WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await;
        timer.record();
        result.map(|_| ()).map_err(map_sqlx_error)
    }
}
