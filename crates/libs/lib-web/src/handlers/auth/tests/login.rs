//! # Login Tests
//!
//! Tests for user login functionality.

use super::*;
use axum::http::StatusCode;
use lib_core::model::store::UserRepository;

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let app = TestApp::new().await;
    app.signup("farmer@example.com", "farmer").await;

    // Act
    let response = app
        .send(post_json(
            "/api/auth/login",
            &login_body("farmer@example.com", TEST_PASSWORD),
            None,
        ))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let auth_response: AuthResponse = body_json(response).await;
    assert_eq!(auth_response.message, "Login successful");
    assert_eq!(auth_response.redirect_to, "/dashboardA");
    assert!(!auth_response.token.is_empty());
    assert!(auth_response.user.last_login.is_some());
}

#[tokio::test]
async fn test_login_email_case_insensitive() {
    // Arrange
    let app = TestApp::new().await;
    app.signup("mixed@example.com", "customer").await;

    // Act
    let response = app
        .send(post_json(
            "/api/auth/login",
            &login_body("  MIXED@Example.com ", TEST_PASSWORD),
            None,
        ))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    // Arrange
    let app = TestApp::new().await;
    app.signup("farmer@example.com", "farmer").await;

    // Act
    let response = app
        .send(post_json(
            "/api/auth/login",
            &login_body("farmer@example.com", "WrongPassword123!"),
            None,
        ))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error_response: ErrorResponse = body_json(response).await;
    assert_eq!(error_response.error, "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    // Arrange
    let app = TestApp::new().await;

    // Act
    let response = app
        .send(post_json(
            "/api/auth/login",
            &login_body("nobody@example.com", TEST_PASSWORD),
            None,
        ))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error_response: ErrorResponse = body_json(response).await;
    assert_eq!(error_response.error, "Invalid credentials");
}

#[tokio::test]
async fn test_login_deactivated_account() {
    // Arrange
    let app = TestApp::new().await;
    app.signup("inactive@example.com", "customer").await;
    let user = UserRepository::find_by_email(&app.db, "inactive@example.com")
        .await
        .unwrap()
        .unwrap();
    UserRepository::set_active(&app.db, user.id, false).await.unwrap();

    // Act
    let response = app
        .send(post_json(
            "/api/auth/login",
            &login_body("inactive@example.com", TEST_PASSWORD),
            None,
        ))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let error_response: ErrorResponse = body_json(response).await;
    assert_eq!(error_response.error, "Account is deactivated");
}

#[tokio::test]
async fn test_login_deactivated_account_wrong_password_stays_401() {
    // Arrange
    let app = TestApp::new().await;
    app.signup("inactive@example.com", "customer").await;
    let user = UserRepository::find_by_email(&app.db, "inactive@example.com")
        .await
        .unwrap()
        .unwrap();
    UserRepository::set_active(&app.db, user.id, false).await.unwrap();

    // Act
    let response = app
        .send(post_json(
            "/api/auth/login",
            &login_body("inactive@example.com", "WrongPassword123!"),
            None,
        ))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
