use actix_cors::Cors;
use actix_web::http::header;

use crate::config::SecurityConfig;
use crate::middleware::request_logging::REQUEST_ID_HEADER;

/// Origins are compared after trimming whitespace and a trailing slash.
pub fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}

pub fn cors_middleware(config: &SecurityConfig) -> Cors {
    let allowlist: Vec<String> = config
        .cors_allowed_origins
        .iter()
        .map(|origin| normalize_origin(origin))
        .filter(|origin| !origin.is_empty())
        .collect();

    Cors::default()
        .supports_credentials()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(3600)
        .allowed_origin_fn(move |origin, _| {
            origin
                .to_str()
                .ok()
                .map(|value| allowlist.contains(&normalize_origin(value)))
                .unwrap_or(false)
        })
}
