use crate::domain::{Account, NewAccount, Session};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    async fn create(&self, account: &NewAccount) -> AppResult<Account>;
    /// Only the given fields are changed; `None` leaves a column as it is.
    async fn update_profile(
        &self,
        id: i64,
        username: Option<&str>,
        avatar: Option<&str>,
    ) -> AppResult<Account>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> AppResult<Session>;
    async fn find_by_token(&self, refresh_token: &str) -> AppResult<Option<Session>>;
    /// Removes the row matching `refresh_token` exactly. Returns whether a row
    /// existed.
    async fn delete_by_token(&self, refresh_token: &str) -> AppResult<bool>;
    async fn count_for_account(&self, account_id: i64) -> AppResult<i64>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
