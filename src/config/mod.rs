pub mod auth_config;
pub mod database_config;
pub mod defaults;
pub mod duration;
pub mod security_config;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

pub use auth_config::{AuthConfig, ConfigError};
pub use database_config::DatabaseConfig;
pub use duration::{parse_duration, DurationParseError};
pub use security_config::SecurityConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_logging_level(),
            json_format: defaults::default_logging_json_format(),
        }
    }
}

/// Unprefixed environment variables the deployment sets directly.
const RAW_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("PORT", "port"),
    ("ACCESS_TOKEN_SECRET", "auth.access_token_secret"),
    ("ACCESS_TOKEN_EXPIRES", "auth.access_token_expires"),
    ("REFRESH_TOKEN_SECRET", "auth.refresh_token_secret"),
    ("REFRESH_TOKEN_EXPIRES", "auth.refresh_token_expires"),
];

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Self::figment().extract().map_err(Box::new)
    }

    pub fn figment() -> Figment {
        let raw_keys: Vec<&str> = RAW_ENV_KEYS.iter().map(|(env, _)| *env).collect();

        Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config/development.toml"))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::raw().only(&raw_keys).map(|key| {
                let upper = key.as_str().to_ascii_uppercase();
                RAW_ENV_KEYS
                    .iter()
                    .find(|(env, _)| *env == upper)
                    .map(|(_, path)| (*path).into())
                    .unwrap_or_else(|| key.into())
            }))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::AuthConfig(
                "DATABASE_URL must be set via environment variable".to_string(),
            ));
        }

        self.auth.validate()
    }
}
