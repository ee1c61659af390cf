use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Account, Role};

/// The only account shape ever sent to clients. It has no password field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub username: Option<String>,
    pub storename: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub google_id: Option<String>,
    pub facebook_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            storename: account.storename.clone(),
            email: account.email.clone(),
            avatar: account.avatar.clone(),
            role: account.role,
            google_id: account.google_id.clone(),
            facebook_id: account.facebook_id.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
