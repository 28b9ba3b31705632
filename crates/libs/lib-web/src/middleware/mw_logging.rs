//! # Request/Response Logging Middleware
//!
//! One line per request and one per response, correlated by the request ID
//! from [`RequestStamp`]. Credentials and image uploads never reach the logs:
//! sensitive headers are redacted and query strings of the auth, predict and
//! checkout endpoints are dropped.

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key", "x-auth-token"];

const SENSITIVE_ENDPOINTS: &[&str] = &[
    "/api/auth/login",
    "/api/auth/signup",
    "/api/predict",
    "/api/checkout",
];

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let query = match req.uri().query() {
        Some(q) if !is_sensitive(&path) => format!("?{}", q),
        _ => String::new(),
    };

    let (request_id, start) = match req.extensions().get::<RequestStamp>() {
        Some(stamp) => (stamp.id.clone(), stamp.received_at),
        None => ("unknown".to_string(), Instant::now()),
    };

    let user_agent = header_str(req.headers(), header::USER_AGENT.as_str());
    let client_ip = header_str(req.headers(), "x-forwarded-for")
        .or_else(|| header_str(req.headers(), "x-real-ip"));

    info!(
        request_id = %request_id,
        user_agent = ?user_agent,
        client_ip = ?client_ip,
        "[REQUEST] {} {}{}",
        method,
        path,
        query
    );
    debug!(request_id = %request_id, headers = ?redacted_headers(req.headers()), "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let elapsed_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    let size = header_str(response.headers(), header::CONTENT_LENGTH.as_str())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    match status {
        500.. => error!(request_id = %request_id, status, elapsed_ms, "[RESPONSE] {} {} -> {} ({}ms)", method, path, status, elapsed_ms),
        400..=499 => warn!(request_id = %request_id, status, elapsed_ms, "[RESPONSE] {} {} -> {} ({}ms)", method, path, status, elapsed_ms),
        _ => info!(request_id = %request_id, status, elapsed_ms, size, "[RESPONSE] {} {} -> {} ({}ms, {} bytes)", method, path, status, elapsed_ms, size),
    }

    response
}

fn is_sensitive(path: &str) -> bool {
    SENSITIVE_ENDPOINTS.iter().any(|ep| path.starts_with(ep))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}
