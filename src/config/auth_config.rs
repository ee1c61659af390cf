use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Auth configuration is invalid: {0}")]
    AuthConfig(String),
}

const PLACEHOLDER_SECRETS: &[&str] = &["change-me-in-production", "secret", "changeme"];

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub access_token_secret: String,
    #[serde(
        default = "crate::config::defaults::default_access_token_expires",
        deserialize_with = "crate::config::duration::deserialize"
    )]
    pub access_token_expires: Duration,
    pub refresh_token_secret: String,
    #[serde(
        default = "crate::config::defaults::default_refresh_token_expires",
        deserialize_with = "crate::config::duration::deserialize"
    )]
    pub refresh_token_expires: Duration,
    #[serde(default)]
    pub rotate_refresh_tokens: bool,
    #[serde(default = "crate::config::defaults::default_session_reaper_interval_seconds")]
    pub session_reaper_interval_seconds: u64,
    #[serde(default = "crate::config::defaults::default_public_paths")]
    pub public_paths: Vec<String>,
    #[serde(default = "crate::config::defaults::default_public_path_prefixes")]
    pub public_path_prefixes: Vec<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("access_token_expires", &self.access_token_expires)
            .field("refresh_token_secret", &"[REDACTED]")
            .field("refresh_token_expires", &self.refresh_token_expires)
            .field("rotate_refresh_tokens", &self.rotate_refresh_tokens)
            .field(
                "session_reaper_interval_seconds",
                &self.session_reaper_interval_seconds,
            )
            .field("public_paths", &self.public_paths)
            .field("public_path_prefixes", &self.public_path_prefixes)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let access = self.access_token_secret.trim();
        let refresh = self.refresh_token_secret.trim();

        if access.is_empty() {
            return Err(ConfigError::AuthConfig(
                "ACCESS_TOKEN_SECRET must be set via environment variable".to_string(),
            ));
        }
        if refresh.is_empty() {
            return Err(ConfigError::AuthConfig(
                "REFRESH_TOKEN_SECRET must be set via environment variable".to_string(),
            ));
        }
        if PLACEHOLDER_SECRETS.contains(&access) || PLACEHOLDER_SECRETS.contains(&refresh) {
            return Err(ConfigError::AuthConfig(
                "token secrets must be set to secure values, not a placeholder".to_string(),
            ));
        }
        if access == refresh {
            return Err(ConfigError::AuthConfig(
                "ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ".to_string(),
            ));
        }
        if self.access_token_expires.is_zero() {
            return Err(ConfigError::AuthConfig(
                "ACCESS_TOKEN_EXPIRES must be a positive duration".to_string(),
            ));
        }
        if self.refresh_token_expires.is_zero() {
            return Err(ConfigError::AuthConfig(
                "REFRESH_TOKEN_EXPIRES must be a positive duration".to_string(),
            ));
        }

        Ok(())
    }

    /// Milliseconds, as reported to clients in `accessTokenExpiresIn`.
    pub fn access_token_expires_in_ms(&self) -> i64 {
        i64::try_from(self.access_token_expires.as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn valid_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret-for-tests".to_string(),
            access_token_expires: Duration::from_secs(900),
            refresh_token_secret: "refresh-secret-for-tests".to_string(),
            refresh_token_expires: Duration::from_secs(7 * 86_400),
            rotate_refresh_tokens: false,
            session_reaper_interval_seconds: 3600,
            public_paths: crate::config::defaults::default_public_paths(),
            public_path_prefixes: crate::config::defaults::default_public_path_prefixes(),
        }
    }

    #[test]
    fn accepts_distinct_non_placeholder_secrets() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn rejects_empty_secret() {
        let config = AuthConfig {
            access_token_secret: "   ".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AuthConfig(msg)) if msg.contains("ACCESS_TOKEN_SECRET")
        ));
    }

    #[test]
    fn rejects_shared_secret() {
        let config = AuthConfig {
            refresh_token_secret: "access-secret-for-tests".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AuthConfig(msg)) if msg.contains("must differ")
        ));
    }

    #[test]
    fn rejects_placeholder_secret() {
        let config = AuthConfig {
            refresh_token_secret: " change-me-in-production ".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_lifetimes() {
        let config = AuthConfig {
            access_token_expires: Duration::ZERO,
            ..valid_config()
        };
        assert!(config.validate().is_err());

        let config = AuthConfig {
            refresh_token_expires: Duration::ZERO,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("access-secret-for-tests"));
        assert!(!rendered.contains("refresh-secret-for-tests"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn expires_in_is_reported_in_milliseconds() {
        assert_eq!(valid_config().access_token_expires_in_ms(), 900_000);
    }
}
