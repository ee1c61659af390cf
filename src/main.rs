use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware::from_fn, middleware::Logger, web, App, HttpServer};
use template_market::api::routes::{self, AppState};
use template_market::application::AuthService;
use template_market::config::AppConfig;
use template_market::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use template_market::infrastructure::repositories::{
    AccountRepositoryImpl, SessionRepositoryImpl,
};
use template_market::middleware::{log_requests, require_access_token, AccessGate, PublicPaths};
use template_market::observability::init_tracing;
use template_market::security::{cors_middleware, security_headers};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;

    init_tracing(&config.logging)
        .map_err(|e| io::Error::other(format!("failed to install tracing subscriber: {e}")))?;

    config
        .validate()
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| io::Error::other(format!("failed to create database pool: {e}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| io::Error::other(format!("database migrations failed: {e}")))?;

    let account_repo = Arc::new(AccountRepositoryImpl::new(pool.clone()));
    let session_repo = Arc::new(SessionRepositoryImpl::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        account_repo,
        session_repo,
        config.auth.clone(),
    ));

    spawn_session_reaper(
        auth_service.clone(),
        config.auth.session_reaper_interval_seconds,
    );

    let state = web::Data::new(AppState {
        auth_service: auth_service.clone(),
        db_pool: Some(pool),
    });
    let gate = web::Data::new(AccessGate::new(
        PublicPaths::from_config(&config.auth),
        auth_service.tokens().clone(),
    ));

    let security_config = config.security.clone();
    let bind_host = config.host.clone();
    let bind_port = config.port;

    info!(host = %bind_host, port = bind_port, environment = %config.environment, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(require_access_token))
            .wrap(security_headers())
            .wrap(cors_middleware(&security_config))
            .wrap(from_fn(log_requests))
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(gate.clone())
            .configure(routes::configure)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}

fn spawn_session_reaper(auth_service: Arc<AuthService>, interval_seconds: u64) {
    if interval_seconds == 0 {
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
        loop {
            ticker.tick().await;
            if let Err(e) = auth_service.purge_expired_sessions().await {
                error!(error = %e, "session purge failed");
            }
        }
    });
}
