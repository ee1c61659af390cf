mod cors;
mod headers;

pub use cors::{cors_middleware, normalize_origin};
pub use headers::security_headers;
