use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::DomainError;

/// Account role, stored as a plain integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Role(pub i32);

impl Role {
    pub const ADMIN: Role = Role(0);
    pub const CUSTOMER: Role = Role(1);
}

impl Default for Role {
    fn default() -> Self {
        Self::CUSTOMER
    }
}

#[derive(Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: Option<String>,
    pub storename: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub google_id: Option<String>,
    pub facebook_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("has_password", &self.password_hash.is_some())
            .field("google_id", &self.google_id)
            .field("facebook_id", &self.facebook_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialIds {
    pub google_id: Option<String>,
    pub facebook_id: Option<String>,
}

impl SocialIds {
    pub fn new(google_id: Option<String>, facebook_id: Option<String>) -> Self {
        Self {
            google_id: non_blank(google_id),
            facebook_id: non_blank(facebook_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.google_id.is_none() && self.facebook_id.is_none()
    }
}

/// Insert payload for the `accounts` table. The id and timestamps are assigned
/// by the store.
#[derive(Clone)]
pub struct NewAccount {
    pub username: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub google_id: Option<String>,
    pub facebook_id: Option<String>,
}

impl NewAccount {
    pub fn with_password(email: String, username: Option<String>, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash: Some(password_hash),
            avatar: None,
            role: Role::default(),
            google_id: None,
            facebook_id: None,
        }
    }

    pub fn social(
        email: String,
        username: Option<String>,
        avatar: Option<String>,
        ids: SocialIds,
    ) -> Result<Self, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::MissingAuthMethod);
        }

        Ok(Self {
            username,
            email,
            password_hash: None,
            avatar,
            role: Role::default(),
            google_id: ids.google_id,
            facebook_id: ids.facebook_id,
        })
    }

    pub fn ensure_auth_method(&self) -> Result<(), DomainError> {
        if self.password_hash.is_none() && self.google_id.is_none() && self.facebook_id.is_none()
        {
            return Err(DomainError::MissingAuthMethod);
        }
        Ok(())
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(password_hash: Option<&str>, google_id: Option<&str>) -> Account {
        let now = Utc::now();
        Account {
            id: 1,
            username: Some("tester".to_string()),
            storename: None,
            email: "tester@example.com".to_string(),
            password_hash: password_hash.map(str::to_string),
            avatar: None,
            role: Role::CUSTOMER,
            google_id: google_id.map(str::to_string),
            facebook_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn role_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Role::CUSTOMER).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Role::ADMIN).unwrap(), "0");
        assert_eq!(serde_json::from_str::<Role>("1").unwrap(), Role::CUSTOMER);
    }

    #[test]
    fn default_role_is_not_privileged() {
        assert_eq!(Role::default(), Role::CUSTOMER);
        assert_ne!(Role::default(), Role::ADMIN);
    }

    #[test]
    fn social_account_without_ids_is_rejected() {
        let result = NewAccount::social(
            "social@example.com".to_string(),
            None,
            None,
            SocialIds::new(Some("  ".to_string()), None),
        );
        assert_eq!(result.err(), Some(DomainError::MissingAuthMethod));
    }

    #[test]
    fn social_account_keeps_given_ids_and_no_password() {
        let new_account = NewAccount::social(
            "social@example.com".to_string(),
            Some("Anonymous".to_string()),
            None,
            SocialIds::new(Some("g-123".to_string()), None),
        )
        .expect("google id is enough");

        assert_eq!(new_account.google_id.as_deref(), Some("g-123"));
        assert!(new_account.password_hash.is_none());
        assert!(new_account.ensure_auth_method().is_ok());
    }

    #[test]
    fn password_account_satisfies_auth_method_invariant() {
        let new_account = NewAccount::with_password(
            "pw@example.com".to_string(),
            None,
            "$argon2id$hash".to_string(),
        );
        assert!(new_account.ensure_auth_method().is_ok());
    }

    #[test]
    fn debug_output_hides_password_hash() {
        let rendered = format!("{:?}", account(Some("$argon2id$secret"), None));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("has_password: true"));
    }
}
