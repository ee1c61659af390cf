mod auth_service;

pub use auth_service::{AuthService, DEFAULT_SOCIAL_USERNAME};
