use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub exp: usize,
    pub iat: usize,
    pub jti: Uuid,
}

#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn sign(account_id: i64, secret: &str, lifetime: Duration) -> AppResult<SignedToken> {
    let now = Utc::now();
    let lifetime = chrono::Duration::from_std(lifetime)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("token lifetime out of range: {e}")))?;
    let expires_at = now + lifetime;

    let claims = TokenClaims {
        user_id: account_id,
        exp: expires_at.timestamp().max(0) as usize,
        iat: now.timestamp().max(0) as usize,
        jti: Uuid::new_v4(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(e.into()))?;

    Ok(SignedToken { token, expires_at })
}

/// Bad signature, malformed input and expiry all surface as
/// `AppError::InvalidToken`.
pub fn verify(token: &str, secret: &str) -> AppResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(AppError::from)
}

/// Signs and verifies both token kinds with their own secret and lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    access_secret: String,
    access_lifetime: Duration,
    refresh_secret: String,
    refresh_lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.access_token_secret.clone(),
            access_lifetime: config.access_token_expires,
            refresh_secret: config.refresh_token_secret.clone(),
            refresh_lifetime: config.refresh_token_expires,
        }
    }

    pub fn issue_access(&self, account_id: i64) -> AppResult<SignedToken> {
        sign(account_id, &self.access_secret, self.access_lifetime)
    }

    pub fn issue_refresh(&self, account_id: i64) -> AppResult<SignedToken> {
        sign(account_id, &self.refresh_secret, self.refresh_lifetime)
    }

    pub fn verify_access(&self, token: &str) -> AppResult<TokenClaims> {
        verify(token, &self.access_secret)
    }

    pub fn verify_refresh(&self, token: &str) -> AppResult<TokenClaims> {
        verify(token, &self.refresh_secret)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish_non_exhaustive()
    }
}
