use super::traits::AccountRepository;
use crate::domain::{Account, NewAccount};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use sqlx::PgPool;

const ACCOUNT_COLUMNS: &str = "id, username, storename, email, password_hash, avatar, role, \
     google_id, facebook_id, created_at, updated_at";

pub struct AccountRepositoryImpl {
    pool: PgPool,
}

impl AccountRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn create(&self, account: &NewAccount) -> AppResult<Account> {
        account.ensure_auth_method()?;

        let created = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (username, email, password_hash, avatar, role, google_id, facebook_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.avatar)
        .bind(account.role)
        .bind(&account.google_id)
        .bind(&account.facebook_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: i64,
        username: Option<&str>,
        avatar: Option<&str>,
    ) -> AppResult<Account> {
        let updated = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE accounts
            SET username = COALESCE($2, username),
                avatar = COALESCE($3, avatar),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(username)
        .bind(avatar)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
