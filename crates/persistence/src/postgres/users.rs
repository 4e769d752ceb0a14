//! User repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::user::{User, UserRole};
use domain::repository::{RepositoryResult, UserRepository};

use super::entities::{UserEntity, UserRoleDb};
use super::map_sqlx_error;
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str = "id, email, name, phone, role, verified, created_at";

/// Postgres-backed user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> RepositoryResult<User> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (id, email, name, phone, role, verified, created_at)
            VALUES ($1, LOWER($2), $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(UserRoleDb::from(user.role))
        .bind(user.verified)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(Into::into).map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|entity| entity.map(Into::into))
            .map_err(map_sqlx_error)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|entity| entity.map(Into::into))
            .map_err(map_sqlx_error)
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> RepositoryResult<Option<User>> {
        let timer = QueryTimer::new("update_user_role");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users SET role = $2
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(UserRoleDb::from(role))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|entity| entity.map(Into::into))
            .map_err(map_sqlx_error)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map(|entities| entities.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }
}
