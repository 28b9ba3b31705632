//! # System Handlers
//!
//! Service banner, health check and the development seeding endpoint.

use axum::extract::{Json, State};
use lib_auth::hash_password;
use lib_core::dto::{HealthResponse, SeedResponse, ServiceInfo};
use lib_core::model::store::seed::{seed_sample_data, DEMO_PASSWORD};
use lib_core::{AppError, Config, DbPool};
use lib_utils::{format_time, now_utc};
use tracing::{debug, info};

/// `GET /`
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Agri Connect API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: format_time(now_utc()),
    })
}

/// `POST /api/seed-data` - only answers when `ENABLE_SEED_ENDPOINT=true`.
pub async fn seed_data(
    State(pool): State<DbPool>,
    State(config): State<Config>,
) -> Result<Json<SeedResponse>, AppError> {
    if !config.seed_endpoint_enabled {
        debug!("[SEED] Seed endpoint called while disabled");
        return Err(AppError::NotFound("Route not found".to_string()));
    }

    let password_hash = hash_password(DEMO_PASSWORD).map_err(|e| AppError::Internal(e.to_string()))?;
    let inserted = seed_sample_data(&pool, &password_hash).await?;

    info!("[SEED] Sample data seeded: {:?}", inserted);
    Ok(Json(SeedResponse {
        message: "Sample data created successfully".to_string(),
        inserted,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_json, get, post_json, test_config, TestApp};
    use axum::http::StatusCode;
    use lib_core::dto::{AuthResponse, ErrorResponse};
    use lib_core::model::store::seed::DEMO_FARMER_EMAIL;
    use serde_json::json;

    #[tokio::test]
    async fn test_root_and_health() {
        let app = TestApp::new().await;

        let response = app.send(get("/", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let info: ServiceInfo = body_json(response).await;
        assert_eq!(info.message, "Agri Connect API");
        assert_eq!(info.status, "running");

        let response = app.send(get("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = body_json(response).await;
        assert_eq!(health.status, "healthy");
        assert!(lib_utils::parse_utc(&health.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_header_is_set() {
        let app = TestApp::new().await;
        let response = app.send(get("/health", None)).await;
        assert!(response.headers().contains_key(crate::middleware::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = TestApp::new().await;
        let response = app.send(get("/api/nothing-here", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Route not found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_json() {
        let app = TestApp::new().await;
        let response = app.send(get("/api/auth/login", None)).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.code, "MethodNotAllowed");
    }

    #[tokio::test]
    async fn test_seed_disabled_by_default() {
        let app = TestApp::new().await;
        let response = app.send(post_json("/api/seed-data", &json!({}), None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.code, "NotFound");

        // nothing was written
        let demo = lib_core::model::store::UserRepository::find_by_email(&app.db, DEMO_FARMER_EMAIL)
            .await
            .unwrap();
        assert!(demo.is_none());
    }

    #[tokio::test]
    async fn test_seed_enabled_creates_demo_login() {
        let config = Config {
            seed_endpoint_enabled: true,
            ..test_config()
        };
        let app = TestApp::with(config, None).await;

        let response = app.send(post_json("/api/seed-data", &json!({}), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let seeded: SeedResponse = body_json(response).await;
        assert_eq!(seeded.inserted.users, 2);

        let response = app
            .send(post_json(
                "/api/auth/login",
                &json!({ "email": DEMO_FARMER_EMAIL, "password": DEMO_PASSWORD }),
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let auth: AuthResponse = body_json(response).await;
        assert_eq!(auth.redirect_to, "/dashboardA");

        let response = app.send(get("/api/listings", None)).await;
        let listings: Vec<serde_json::Value> = body_json(response).await;
        assert_eq!(listings.len(), 4);
    }
}
