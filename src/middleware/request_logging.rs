use std::time::Instant;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{self, HeaderName, HeaderValue},
    middleware::Next,
    Error, HttpMessage,
};
use tracing::{info, Instrument, Span};
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedAccount;
use crate::observability::error_tracking::capture_unexpected_5xx;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Stamps every response with `x-request-id` and logs one `request completed`
/// event per request.
pub async fn log_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = incoming_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().to_string();
    let path = req.path().to_string();
    let span = create_request_span(
        &request_id,
        &method,
        &path,
        &get_client_ip(&req),
        &get_user_agent(&req),
    );
    let start = Instant::now();

    let mut response = next.call(req).instrument(span.clone()).await?;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    let account_id = response
        .request()
        .extensions()
        .get::<AuthenticatedAccount>()
        .map(|account| account.account_id);

    span.in_scope(|| {
        info!(
            status = status,
            status_class = get_status_class(status),
            latency_ms = latency_ms,
            account_id = ?account_id,
            "request completed"
        );
    });

    if status >= 500 {
        let _ = capture_unexpected_5xx(&path, &method, status, &request_id);
    }

    Ok(response)
}

/// Reuses a caller-supplied request id when it is short printable ASCII.
fn incoming_request_id(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| {
            !value.is_empty()
                && value.len() <= 128
                && value.chars().all(|c| c.is_ascii_graphic())
        })
        .map(str::to_string)
}

/// Uses `realip_remote_addr()`, which honours forwarding headers only as far as
/// actix-web's connection info trusts them.
pub fn get_client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn get_user_agent(req: &ServiceRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub fn create_request_span(
    request_id: &str,
    method: &str,
    path: &str,
    client_ip: &str,
    user_agent: &str,
) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        client_ip = %client_ip,
        user_agent = %user_agent
    )
}

pub fn get_status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_get_status_class() {
        assert_eq!(get_status_class(200), "2xx");
        assert_eq!(get_status_class(301), "3xx");
        assert_eq!(get_status_class(401), "4xx");
        assert_eq!(get_status_class(403), "4xx");
        assert_eq!(get_status_class(503), "5xx");
        assert_eq!(get_status_class(600), "unknown");
    }

    #[test]
    fn test_get_user_agent() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(get_user_agent(&req), "unknown");

        let req = TestRequest::default()
            .insert_header((header::USER_AGENT, "market-client/1.0"))
            .to_srv_request();
        assert_eq!(get_user_agent(&req), "market-client/1.0");
    }

    #[test]
    fn test_get_client_ip() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(get_client_ip(&req), "unknown");
    }

    #[test]
    fn incoming_request_id_is_reused_when_sane() {
        let req = TestRequest::default()
            .insert_header((REQUEST_ID_HEADER, "abc-123"))
            .to_srv_request();
        assert_eq!(incoming_request_id(&req).as_deref(), Some("abc-123"));

        let req = TestRequest::default()
            .insert_header((REQUEST_ID_HEADER, "x".repeat(200)))
            .to_srv_request();
        assert_eq!(incoming_request_id(&req), None);
    }
}
