use std::future::{ready, Ready};

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    middleware::Next,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::utils::jwt::TokenIssuer;

pub const NO_TOKEN_MESSAGE: &str = "Unauthorized: No token provided";
pub const INVALID_TOKEN_MESSAGE: &str = "Forbidden: Invalid token";

/// Paths that skip access-token checks: exact matches plus path prefixes.
#[derive(Debug, Clone, Default)]
pub struct PublicPaths {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl PublicPaths {
    pub fn new(exact: Vec<String>, prefixes: Vec<String>) -> Self {
        let prefixes = prefixes
            .into_iter()
            .map(|prefix| prefix.trim_end_matches('/').to_string())
            .filter(|prefix| !prefix.is_empty())
            .collect();
        Self { exact, prefixes }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.public_paths.clone(),
            config.public_path_prefixes.clone(),
        )
    }

    /// A prefix only matches on a segment boundary, so `/uploads` covers
    /// `/uploads/a.png` but not `/uploadsecret`.
    pub fn is_public(&self, path: &str) -> bool {
        if self.exact.iter().any(|exact| exact == path) {
            return true;
        }

        self.prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

/// App data consulted by [`require_access_token`].
#[derive(Debug, Clone)]
pub struct AccessGate {
    pub public_paths: PublicPaths,
    pub tokens: TokenIssuer,
}

impl AccessGate {
    pub fn new(public_paths: PublicPaths, tokens: TokenIssuer) -> Self {
        Self {
            public_paths,
            tokens,
        }
    }

    /// Resolves the caller for a non-public request.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthenticatedAccount, AppError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or_else(|| AppError::Unauthorized(NO_TOKEN_MESSAGE.to_string()))?;

        let claims = self
            .tokens
            .verify_access(token)
            .map_err(|_| AppError::Forbidden(INVALID_TOKEN_MESSAGE.to_string()))?;

        Ok(AuthenticatedAccount {
            account_id: claims.user_id,
        })
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a valid access token. A rejected request gets
/// exactly one response and never reaches the handler.
pub async fn require_access_token(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, Error> {
    let Some(gate) = req.app_data::<web::Data<AccessGate>>().cloned() else {
        let error = AppError::InternalError(anyhow::anyhow!("missing AccessGate app data"));
        return Ok(req.error_response(error).map_into_right_body());
    };

    if gate.public_paths.is_public(req.path()) {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    }

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match gate.authenticate(authorization) {
        Ok(account) => {
            debug!(account_id = account.account_id, path = %req.path(), "request authenticated");
            req.extensions_mut().insert(account);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(error) => {
            warn!(path = %req.path(), status = %actix_web::ResponseError::status_code(&error), "request rejected");
            Ok(req.error_response(error).map_into_right_body())
        }
    }
}

/// Identity attached by [`require_access_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: i64,
}

impl FromRequest for AuthenticatedAccount {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedAccount>()
                .copied()
                .ok_or_else(|| AppError::Unauthorized(NO_TOKEN_MESSAGE.to_string())),
        )
    }
}
