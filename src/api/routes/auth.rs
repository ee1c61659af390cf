use actix_web::{http::StatusCode, web, HttpResponse};

use crate::api::dtos::{
    ApiResponse, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest, SocialLoginRequest,
};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::AuthenticatedAccount;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/login-social", web::post().to(login_social))
            .route("/refresh-token", web::post().to(refresh_token))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_status(
        StatusCode::CREATED,
        "Register successful",
        result,
    )))
}

async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Login successful", result)))
}

async fn login_social(
    state: web::Data<AppState>,
    payload: web::Json<SocialLoginRequest>,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.login_social(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Login successful", result)))
}

/// A missing or unreadable body is treated as a request without a token.
async fn refresh_token(
    state: web::Data<AppState>,
    payload: Option<web::Json<RefreshRequest>>,
) -> AppResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let result = state.auth_service.refresh(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Refresh successful", result)))
}

async fn logout(
    state: web::Data<AppState>,
    payload: Option<web::Json<LogoutRequest>>,
) -> AppResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    state.auth_service.logout(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Logout success")))
}

async fn me(state: web::Data<AppState>, caller: AuthenticatedAccount) -> AppResult<HttpResponse> {
    let account = state.auth_service.current_account(caller.account_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Request completed successfully", account)))
}
