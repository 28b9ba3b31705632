//! # Response Mapping Middleware
//!
//! Makes every error response carry the JSON error shape, including the ones
//! axum produces itself (unknown routes, rejected extractors, body limits).

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Axum's own rejections are short plain-text messages.
const MAX_REJECTION_BODY: usize = 16 * 1024;

pub async fn map_res(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if status.is_server_error() {
        error!("[RESPONSE] Server error: {}", status);
    }

    if !(status.is_client_error() || status.is_server_error()) || is_json(&res) {
        return res;
    }

    let (parts, body) = res.into_parts();
    let message = match to_bytes(body, MAX_REJECTION_BODY).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).trim().to_string(),
        Ok(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
        Err(e) => {
            warn!("[RESPONSE] Could not read error body: {}", e);
            status.canonical_reason().unwrap_or("Request failed").to_string()
        }
    };

    let code = status
        .canonical_reason()
        .map(|r| r.replace(' ', ""))
        .unwrap_or_else(|| status.as_u16().to_string());

    let mut mapped = Json(json!({ "error": message, "code": code })).into_response();
    *mapped.status_mut() = parts.status;
    for (name, value) in parts.headers.iter() {
        if name != CONTENT_TYPE && name != axum::http::header::CONTENT_LENGTH {
            mapped.headers_mut().append(name.clone(), value.clone());
        }
    }
    mapped
}

fn is_json(res: &Response<Body>) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
