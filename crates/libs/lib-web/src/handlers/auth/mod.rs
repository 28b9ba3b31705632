//! # Authentication Handlers
//!
//! HTTP request handlers for user authentication endpoints.
//!
//! ## Overview
//!
//! - User signup with email, password, name and role
//! - User login with email and password
//! - JWT token generation (role included in the claims)
//! - Current user lookup for authenticated requests
//!
//! Both signup and login answer with the dashboard the user should land on.

use crate::handlers::claims_user_id;
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use lib_auth::{encode_jwt, hash_password, verify_password, AuthError, Claims};
use lib_core::dto::{AuthResponse, LoginRequest, SignupRequest, UserInfo};
use lib_core::model::store::models::User;
use lib_core::model::store::UserRepository;
use lib_core::{AppError, Config, DbPool};
use lib_utils::{validate_email, validate_not_empty};
use tracing::{debug, error, info, instrument, warn};

/// Signup handler - creates a new user account.
///
/// # Returns
///
/// * `201 Created` with [`AuthResponse`] - user created, token issued
/// * `400 Bad Request` - invalid email, empty name or weak password
/// * `409 Conflict` - email already registered
#[instrument(skip(pool, config, req), fields(email = %req.email, role = %req.role))]
pub async fn signup(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    info!("[SIGNUP] New user signup request");

    validate_email(&req.email).map_err(|e| {
        warn!("[SIGNUP] Invalid email format");
        AppError::InvalidInput(e)
    })?;
    validate_not_empty(&req.name, "Name").map_err(AppError::InvalidInput)?;

    if UserRepository::find_by_email(&pool, &req.email).await?.is_some() {
        warn!("[SIGNUP] Email already registered: {}", req.email);
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    debug!("[SIGNUP] Hashing password...");
    let password_hash = hash_password(&req.password).map_err(|e| match e {
        AuthError::WeakPassword(msg) => {
            warn!("[SIGNUP] Weak password rejected");
            AppError::InvalidInput(msg)
        }
        other => {
            error!("[SIGNUP] Password hashing failed: {}", other);
            AppError::Internal(other.to_string())
        }
    })?;

    debug!("[SIGNUP] Creating user in database...");
    let user = UserRepository::create(&pool, &req.email, req.name.trim(), req.role, &password_hash)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Email already registered".to_string()),
            other => other,
        })?;

    let token = issue_token(&user, &config)?;

    info!("[SIGNUP] User created: id={} role={}", user.id, user.role);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(&user, token, "Account created successfully")),
    ))
}

/// Login handler - authenticates an existing user.
///
/// Unknown email and wrong password produce the same `401 Invalid credentials`.
/// A deactivated account with correct credentials gets `403`.
#[instrument(skip(pool, config, req), fields(email = %req.email))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("[LOGIN] Login attempt");

    let user = match UserRepository::find_by_email(&pool, &req.email).await? {
        Some(user) => user,
        None => {
            warn!("[LOGIN] Unknown email");
            return Err(invalid_credentials());
        }
    };

    let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        error!("[LOGIN] Password verification error: {}", e);
        AppError::Internal(e.to_string())
    })?;

    if !is_valid {
        warn!("[LOGIN] Invalid password for user id {}", user.id);
        return Err(invalid_credentials());
    }

    if !user.is_active {
        warn!("[LOGIN] Account deactivated: id {}", user.id);
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    UserRepository::update_last_login(&pool, user.id).await?;
    let user = UserRepository::find_by_id(&pool, user.id).await?.unwrap_or(user);

    let token = issue_token(&user, &config)?;

    info!("[LOGIN] User authenticated: id={} role={}", user.id, user.role);

    Ok(Json(AuthResponse::new(&user, token, "Login successful")))
}

/// Current user, looked up from the bearer token's subject.
pub async fn me(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserInfo>, AppError> {
    let user_id = claims_user_id(&claims)?;

    let user = UserRepository::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(UserInfo::from(&user)))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

fn issue_token(user: &User, config: &Config) -> Result<String, AppError> {
    encode_jwt(
        user.id,
        &user.email,
        user.role.as_str(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(|e| {
        error!("[AUTH] JWT encoding failed: {}", e);
        AppError::Internal(e.to_string())
    })
}

#[cfg(test)]
mod tests;
