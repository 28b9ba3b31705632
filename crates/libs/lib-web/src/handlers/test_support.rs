//! Shared fixtures for handler tests: an in-memory app, request builders and
//! a canned classifier.

use crate::server::{create_router, AppState};
use crate::services::{DiseaseClassifier, ImageUpload};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use lib_core::config::DEFAULT_MAX_UPLOAD_BYTES;
use lib_core::dto::{AuthResponse, ClassifierOutput};
use lib_core::model::store::create_memory_pool;
use lib_core::{Config, DbPool, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "TestPassword123!";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        classifier_url: None,
        classifier_timeout_secs: 5,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        payment_key_id: Some("rzp_test_key".to_string()),
        payment_currency: "INR".to_string(),
        merchant_name: "Agri Connect".to_string(),
        seed_endpoint_enabled: false,
    }
}

/// Classifier that always answers with the same output.
pub struct StubClassifier(pub ClassifierOutput);

#[async_trait]
impl DiseaseClassifier for StubClassifier {
    async fn classify(&self, _image: &ImageUpload) -> Result<ClassifierOutput> {
        Ok(self.0.clone())
    }
}

/// Test harness holding the pool alongside the router, so tests can inspect
/// the database after a request.
pub struct TestApp {
    pub db: DbPool,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(test_config(), None).await
    }

    pub async fn with(config: Config, classifier: Option<Arc<dyn DiseaseClassifier>>) -> Self {
        let db = create_memory_pool().await.unwrap();
        let state = AppState {
            db: db.clone(),
            config,
            classifier,
        };
        let router = create_router(state, vec!["http://localhost:3000".to_string()]);
        Self { db, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sign a user up and return the issued token.
    pub async fn signup(&self, email: &str, role: &str) -> String {
        let response = self
            .send(post_json(
                "/api/auth/signup",
                &serde_json::json!({
                    "email": email,
                    "password": TEST_PASSWORD,
                    "name": "Test User",
                    "role": role,
                }),
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let auth: AuthResponse = body_json(response).await;
        auth.token
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    with_token(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    with_token(Request::builder().method("DELETE").uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    with_token(Request::builder().method("POST").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_token(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
