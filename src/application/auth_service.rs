use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use crate::api::dtos::{
    AccountResponse, AuthPayload, LoginRequest, LogoutRequest, RefreshRequest, RefreshResponse,
    RegisterRequest, SocialLoginRequest, TokenPair,
};
use crate::config::AuthConfig;
use crate::domain::account::non_blank;
use crate::domain::{Account, NewAccount, Session, SocialIds};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{AccountRepository, SessionRepository};
use crate::utils::hash::{dummy_verify, hash_password, verify_password};
use crate::utils::jwt::{TokenClaims, TokenIssuer};

/// Username given to social accounts created without one.
pub const DEFAULT_SOCIAL_USERNAME: &str = "Anonymous";

const INVALID_CREDENTIALS: &str = "Email or password is incorrect";
const SOCIAL_ONLY_ACCOUNT: &str = "This account signs in with Google or Facebook";

#[derive(Clone)]
pub struct AuthService {
    account_repo: Arc<dyn AccountRepository>,
    session_repo: Arc<dyn SessionRepository>,
    tokens: TokenIssuer,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        session_repo: Arc<dyn SessionRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            account_repo,
            session_repo,
            tokens: TokenIssuer::new(&config),
            config,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthPayload> {
        request.validate()?;

        let email = request.email.trim().to_string();
        if self.account_repo.find_by_email(&email).await?.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = hash_password(&request.password)?;
        let mut new_account =
            NewAccount::with_password(email, non_blank(Some(request.username)), password_hash);
        new_account.avatar = non_blank(request.avatar);

        let account = self.account_repo.create(&new_account).await?;

        match self.open_session(&account).await {
            Ok(payload) => {
                info!(account_id = account.id, "account registered");
                Ok(payload)
            }
            Err(error) => {
                // No account may outlive a failed session write.
                if let Err(cleanup) = self.account_repo.delete(account.id).await {
                    warn!(
                        account_id = account.id,
                        error = %cleanup,
                        "failed to remove account after session write failure"
                    );
                }
                Err(error)
            }
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthPayload> {
        request.validate()?;

        let Some(account) = self.account_repo.find_by_email(request.email.trim()).await? else {
            dummy_verify(&request.password);
            warn!(reason = "unknown_email", "login failed");
            return Err(invalid_credentials());
        };

        let Some(password_hash) = account.password_hash.as_deref() else {
            warn!(account_id = account.id, reason = "social_only", "login failed");
            return Err(AppError::field_error(
                "email",
                "social_account",
                SOCIAL_ONLY_ACCOUNT,
            ));
        };

        if !verify_password(&request.password, password_hash)? {
            warn!(account_id = account.id, reason = "wrong_password", "login failed");
            return Err(invalid_credentials());
        }

        let payload = self.open_session(&account).await?;
        info!(account_id = account.id, "login succeeded");
        Ok(payload)
    }

    pub async fn login_social(&self, request: SocialLoginRequest) -> AppResult<AuthPayload> {
        let email = non_blank(request.email)
            .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;
        let ids = SocialIds::new(request.google_id, request.facebook_id);
        if ids.is_empty() {
            return Err(AppError::BadRequest("No social UID provided".to_string()));
        }

        let username = non_blank(request.username);
        let avatar = non_blank(request.avatar);

        let account = match self.account_repo.find_by_email(&email).await? {
            Some(existing) if username.is_some() || avatar.is_some() => {
                self.account_repo
                    .update_profile(existing.id, username.as_deref(), avatar.as_deref())
                    .await?
            }
            Some(existing) => existing,
            None => {
                let new_account = NewAccount::social(
                    email,
                    Some(username.unwrap_or_else(|| DEFAULT_SOCIAL_USERNAME.to_string())),
                    avatar,
                    ids,
                )?;
                let created = self.account_repo.create(&new_account).await?;
                info!(account_id = created.id, "social account created");
                created
            }
        };

        let payload = self.open_session(&account).await?;
        info!(account_id = account.id, "social login succeeded");
        Ok(payload)
    }

    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<RefreshResponse> {
        let refresh_token = non_blank(request.refresh_token)
            .ok_or_else(|| AppError::Unauthorized("Token not found".to_string()))?;

        let session = self
            .session_repo
            .find_by_token(&refresh_token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))?;

        let claims = match self.tokens.verify_refresh(&refresh_token) {
            Ok(claims) if session.is_live(Utc::now()) => claims,
            _ => {
                if !session.is_live(Utc::now()) {
                    match self.session_repo.delete_by_token(&refresh_token).await {
                        Ok(_) => {
                            info!(account_id = session.account_id, "expired session removed")
                        }
                        Err(cleanup) => warn!(
                            account_id = session.account_id,
                            error = %cleanup,
                            "failed to remove expired session"
                        ),
                    }
                }
                warn!(account_id = session.account_id, "refresh rejected");
                return Err(refresh_rejected());
            }
        };

        if claims.user_id != session.account_id {
            warn!(account_id = session.account_id, "refresh token bound to another account");
            return Err(refresh_rejected());
        }

        let access = self.tokens.issue_access(claims.user_id)?;

        let rotated = if self.config.rotate_refresh_tokens {
            if !self.session_repo.delete_by_token(&refresh_token).await? {
                return Err(AppError::Unauthorized("Invalid token".to_string()));
            }
            let session = self.persist_session(claims.user_id).await?;
            Some(session.refresh_token)
        } else {
            None
        };

        info!(
            account_id = claims.user_id,
            rotated = rotated.is_some(),
            "access token refreshed"
        );

        Ok(RefreshResponse {
            access_token: access.token,
            expires_at: access.expires_at,
            refresh_token: rotated,
        })
    }

    pub async fn logout(&self, request: LogoutRequest) -> AppResult<()> {
        let refresh_token = non_blank(request.refresh_token)
            .ok_or_else(|| AppError::BadRequest("Session token is required".to_string()))?;

        if !self.session_repo.delete_by_token(&refresh_token).await? {
            return Err(AppError::NotFound("Session not found".to_string()));
        }

        info!("session revoked");
        Ok(())
    }

    pub async fn current_account(&self, account_id: i64) -> AppResult<AccountResponse> {
        let account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

        Ok(AccountResponse::from(&account))
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<TokenClaims> {
        self.tokens.verify_access(token)
    }

    pub async fn purge_expired_sessions(&self) -> AppResult<u64> {
        let removed = self.session_repo.purge_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "expired sessions purged");
        }
        Ok(removed)
    }

    async fn open_session(&self, account: &Account) -> AppResult<AuthPayload> {
        let access = self.tokens.issue_access(account.id)?;
        let session = self.persist_session(account.id).await?;

        Ok(AuthPayload {
            account: AccountResponse::from(account),
            token: TokenPair {
                access_token: access.token,
                refresh_token: session.refresh_token,
                access_token_expires_in: self.config.access_token_expires_in_ms(),
            },
        })
    }

    async fn persist_session(&self, account_id: i64) -> AppResult<Session> {
        let refresh = self.tokens.issue_refresh(account_id)?;
        let session = Session::new(account_id, refresh.token, refresh.expires_at);
        self.session_repo.create(&session).await
    }
}

fn duplicate_email() -> AppError {
    AppError::field_error("email", "unique", "Email already exists")
}

fn invalid_credentials() -> AppError {
    AppError::field_error("password", "invalid_credentials", INVALID_CREDENTIALS)
}

fn refresh_rejected() -> AppError {
    AppError::Forbidden("Refresh token expired or invalid".to_string())
}
