//! Submission repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::submission::Submission;
use domain::repository::{RepositoryResult, SubmissionRepository};

use super::entities::{SubmissionEntity, SubmissionStatusDb};
use super::{map_json_error, map_sqlx_error};
use crate::metrics::QueryTimer;

const SUBMISSION_COLUMNS: &str =
    "id, registration_id, user_id, form_data, files, status, notes, submitted_at";

/// Postgres-backed submission repository.
#[derive(Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_domain(entity: SubmissionEntity) -> RepositoryResult<Submission> {
    Submission::try_from(entity).map_err(map_json_error)
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    async fn create_and_count(&self, submission: Submission) -> RepositoryResult<Submission> {
        let form_data = serde_json::to_value(&submission.form_data).map_err(map_json_error)?;

        // Insert and counter bump share one transaction; a failure of
        // either statement rolls back both.
        let timer = QueryTimer::new("create_submission_counted");
        let result = async {
            let mut tx = self.pool.begin().await?;
            let entity = sqlx::query_as::<_, SubmissionEntity>(&format!(
                r#"
                INSERT INTO submissions
                    (id, registration_id, user_id, form_data, files, status, notes, submitted_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {SUBMISSION_COLUMNS}
                "#
            ))
            .bind(submission.id)
            .bind(submission.registration_id)
            .bind(submission.user_id)
            .bind(form_data)
            .bind(&submission.files)
            .bind(SubmissionStatusDb::from(submission.status))
            .bind(&submission.notes)
            .bind(submission.submitted_at)
            .fetch_one(&mut *tx)
            .await?;
            sqlx::query(
                "UPDATE registrations SET submission_count = submission_count + 1 WHERE id = $1",
            )
            .bind(submission.registration_id)
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(entity)
        }
        .await;
        timer.record();
        into_domain(result.map_err(map_sqlx_error)?)
    }

    async fn update(&self, submission: Submission) -> RepositoryResult<Option<Submission>> {
        let form_data = serde_json::to_value(&submission.form_data).map_err(map_json_error)?;

        let timer = QueryTimer::new("update_submission");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            r#"
            UPDATE submissions
            SET form_data = $2, files = $3, status = $4, notes = $5
            WHERE id = $1
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(submission.id)
        .bind(form_data)
        .bind(&submission.files)
        .bind(SubmissionStatusDb::from(submission.status))
        .bind(&submission.notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map_err(map_sqlx_error)?
            .map(into_domain)
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Submission>> {
        let timer = QueryTimer::new("find_submission_by_id");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = $1"
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

    async fn list_by_registration(
        &self,
        registration_id: Uuid,
    ) -> RepositoryResult<Vec<Submission>> {
        let timer = QueryTimer::new("list_submissions_by_registration");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS} FROM submissions
            WHERE registration_id = $1
            ORDER BY submitted_at
            "#
        ))
        .bind(registration_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Submission>> {
        let timer = QueryTimer::new("list_submissions");
        let result = sqlx::query_as::<_, SubmissionEntity>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions ORDER BY submitted_at"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    async fn delete_and_count(&self, id: Uuid) -> RepositoryResult<bool> {
        // One statement: the CTE deletes the row and feeds the counter
        // update, so both take effect atomically.
        let timer = QueryTimer::new("delete_submission_counted");
        let result = sqlx::query(
            r#"
            WITH removed AS (
                DELETE FROM submissions WHERE id = $1
                RETURNING registration_id
            )
            UPDATE registrations r
            SET submission_count = GREATEST(r.submission_count - 1, 0)
            FROM removed
            WHERE r.id = removed.registration_id
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.record();
        result
            .map(|done| done.rows_affected() > 0)
            .map_err(map_sqlx_error)
    }

    async fn delete_by_registration(&self, registration_id: Uuid) -> RepositoryResult<u64> {
        let timer = QueryTimer::new("delete_submissions_by_registration");
        let result = sqlx::query("DELETE FROM submissions WHERE registration_id = $1")
            .bind(registration_id)
            .execute(&self.pool)
            .await;
        timer.record();
        result
            .map(|done| done.rows_affected())
            .map_err(map_sqlx_error)
    }
}
