//! Category repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::models::Category;
use domain::repository::{CategoryRepository, RepositoryResult};

use super::entities::CategoryEntity;
use super::map_sqlx_error;
use crate::metrics::QueryTimer;

const CATEGORY_COLUMNS: &str = "id, name, description, icon, admin_only, count";

/// Postgres-backed category repository.
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Category>> {
        let timer = QueryTimer::new("find_category_by_id");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|entity| entity.map(Into::into))
            .map_err(map_sqlx_error)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Category>> {
        let timer = QueryTimer::new("list_categories");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map(|entities| entities.into_iter().map(Into::into).collect())
            .map_err(map_sqlx_error)
    }

    async fn upsert(&self, category: Category) -> RepositoryResult<Category> {
        let timer = QueryTimer::new("upsert_category");
        let result = sqlx::query_as::<_, CategoryEntity>(&format!(
            r#"
            INSERT INTO categories (id, name, description, icon, admin_only, count)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                icon = EXCLUDED.icon,
                admin_only = EXCLUDED.admin_only
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.admin_only)
        .bind(category.count)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(Into::into).map_err(map_sqlx_error)
    }
}
