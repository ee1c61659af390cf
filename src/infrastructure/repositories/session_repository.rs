use super::traits::SessionRepository;
use crate::domain::Session;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct SessionRepositoryImpl {
    pool: PgPool,
}

impl SessionRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SessionRepositoryImpl {
    async fn create(&self, session: &Session) -> AppResult<Session> {
        let created = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (refresh_token, account_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING refresh_token, account_id, expires_at, created_at
            "#,
        )
        .bind(&session.refresh_token)
        .bind(session.account_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_token(&self, refresh_token: &str) -> AppResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT refresh_token, account_id, expires_at, created_at FROM sessions WHERE refresh_token = $1",
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn delete_by_token(&self, refresh_token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE refresh_token = $1")
            .bind(refresh_token)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_for_account(&self, account_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
