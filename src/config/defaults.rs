use std::time::Duration;

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_environment() -> String {
    "development".to_string()
}

pub fn default_db_max_connections() -> u32 {
    10
}

pub fn default_db_min_connections() -> u32 {
    1
}

pub fn default_db_acquire_timeout_seconds() -> u64 {
    10
}

pub fn default_db_idle_timeout_seconds() -> u64 {
    600
}

pub fn default_db_max_lifetime_seconds() -> u64 {
    1800
}

pub fn default_db_test_before_acquire() -> bool {
    true
}

pub fn default_access_token_expires() -> Duration {
    Duration::from_secs(15 * 60)
}

pub fn default_refresh_token_expires() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

pub fn default_session_reaper_interval_seconds() -> u64 {
    3600
}

pub fn default_public_paths() -> Vec<String> {
    [
        "/auth/login",
        "/auth/login-social",
        "/auth/register",
        "/auth/refresh-token",
        "/auth/logout",
        "/health",
        "/ready",
    ]
    .iter()
    .map(|path| path.to_string())
    .collect()
}

pub fn default_public_path_prefixes() -> Vec<String> {
    vec!["/uploads".to_string()]
}

pub fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

pub fn default_logging_level() -> String {
    "info".to_string()
}

pub fn default_logging_json_format() -> bool {
    true
}
