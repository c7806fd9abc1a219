use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::db::models::{PredictionRecord, User};
use crate::db::{ResultRepository, UserRepository};
use crate::error::AppError;
use crate::Result;

#[derive(Clone)]
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Applies the embedded migrations creating `users` and `results`.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .map_err(AppError::from)?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserRepository for DbOperations {
    async fn insert_user(&self, user: &User) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl ResultRepository for DbOperations {
    async fn append(&self, username: &str, disease: &str, outcome: &str) -> Result<PredictionRecord> {
        let record = sqlx::query_as::<_, PredictionRecord>(
            r#"
            INSERT INTO results (username, disease, outcome, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, username, disease, outcome, created_at
            "#,
        )
        .bind(username)
        .bind(disease)
        .bind(outcome)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn list_for(&self, username: &str) -> Result<Vec<PredictionRecord>> {
        let records = sqlx::query_as::<_, PredictionRecord>(
            "SELECT id, username, disease, outcome, created_at FROM results WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }
}
