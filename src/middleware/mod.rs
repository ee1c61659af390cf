pub mod auth;
pub mod request_logging;

pub use auth::{require_access_token, AccessGate, AuthenticatedAccount, PublicPaths};
pub use request_logging::log_requests;
