#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::Connection;
use template_market::api::dtos::{LoginRequest, RegisterRequest, SocialLoginRequest};
use template_market::application::AuthService;
use template_market::config::AuthConfig;
use template_market::config::defaults::{default_public_path_prefixes, default_public_paths};
use template_market::infrastructure::db::migrations::run_migrations;
use tokio::sync::{Mutex, MutexGuard};

pub mod mocks;

use mocks::{MockAccountRepository, MockSessionRepository};

static TEST_DB_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestDb {
    pool: PgPool,
    _db_lock_conn: PgConnection,
    _lock: MutexGuard<'static, ()>,
}

impl TestDb {
    /// Returns `None` when no test database is configured, so local runs skip.
    pub async fn new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = env::var("TEST_DATABASE_URL")
            .ok()
            .or_else(|| env::var("DATABASE_URL").ok());

        let Some(url) = url else {
            if env::var("CI").is_ok() {
                panic!("DATABASE_URL or TEST_DATABASE_URL must be set in CI");
            }
            eprintln!("Skipping test: DATABASE_URL or TEST_DATABASE_URL not set");
            return None;
        };

        let lock = Lazy::force(&TEST_DB_MUTEX).lock().await;

        let mut db_lock_conn = PgConnection::connect(&url).await.ok()?;
        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(7_i64)
            .execute(&mut db_lock_conn)
            .await
            .ok()?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .ok()?;

        run_migrations(&pool).await.ok()?;
        sqlx::query("TRUNCATE sessions, accounts RESTART IDENTITY CASCADE")
            .execute(&pool)
            .await
            .ok()?;

        Some(Self {
            pool,
            _db_lock_conn: db_lock_conn,
            _lock: lock,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        access_token_secret: "test-access-secret".to_string(),
        access_token_expires: Duration::from_secs(15 * 60),
        refresh_token_secret: "test-refresh-secret".to_string(),
        refresh_token_expires: Duration::from_secs(7 * 24 * 60 * 60),
        rotate_refresh_tokens: false,
        session_reaper_interval_seconds: 0,
        public_paths: default_public_paths(),
        public_path_prefixes: default_public_path_prefixes(),
    }
}

pub struct Harness {
    pub accounts: Arc<MockAccountRepository>,
    pub sessions: Arc<MockSessionRepository>,
    pub service: Arc<AuthService>,
}

pub fn harness() -> Harness {
    harness_with(test_auth_config())
}

pub fn harness_with(config: AuthConfig) -> Harness {
    let accounts = Arc::new(MockAccountRepository::default());
    let sessions = Arc::new(MockSessionRepository::default());
    let service = Arc::new(AuthService::new(
        accounts.clone(),
        sessions.clone(),
        config,
    ));
    Harness {
        accounts,
        sessions,
        service,
    }
}

pub fn register_request(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: "tester".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
        avatar: None,
    }
}

pub fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn social_request(email: &str, google_id: &str) -> SocialLoginRequest {
    SocialLoginRequest {
        google_id: Some(google_id.to_string()),
        email: Some(email.to_string()),
        ..Default::default()
    }
}
