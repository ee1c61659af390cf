use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::application::AuthService;
use crate::error::{AppError, AppResult};

pub mod auth;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub db_pool: Option<PgPool>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .configure(auth::configure)
        .route("/health", web::get().to(health))
        .route("/ready", web::get().to(ready));
}

fn json_error(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {error}")).into()
}

async fn health() -> &'static str {
    "ok"
}

async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let pool = state
        .db_pool
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: "Service not ready: no database pool".to_string(),
        })?;

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::ServiceUnavailable {
            service: "database".to_string(),
            message: format!("Service not ready: {e}"),
        })?;
    Ok(HttpResponse::Ok().body("ready"))
}
