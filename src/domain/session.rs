use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A persisted refresh token. The token string is the primary key; an account
/// may hold any number of concurrent sessions.
#[derive(Clone, FromRow, PartialEq, Eq)]
pub struct Session {
    pub refresh_token: String,
    pub account_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(account_id: i64, refresh_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            refresh_token,
            account_id,
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account_id", &self.account_id)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
