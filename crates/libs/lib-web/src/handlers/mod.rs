//! # HTTP Request Handlers
//!
//! Axum HTTP request handlers organized by feature domain. Handlers delegate
//! business logic to the store repositories and to [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: signup, login, current user
//!   - `POST /api/auth/signup`, `POST /api/auth/login`, `GET /api/auth/me`
//! - **[`listings`]**: marketplace and the farmer's own items
//!   - `GET /api/listings`, `GET /api/listings/{id}`, `GET /api/listings/mine`,
//!     `POST /api/listings`, `DELETE /api/listings/{id}`
//! - **[`diagnosis`]**: plant-disease prediction and pesticide catalogue
//!   - `POST /api/predict`, `GET /api/pesticides`
//! - **[`checkout`]**: hosted checkout preparation and order history
//!   - `POST /api/checkout`, `GET /api/orders`
//! - **[`rotation`]**: crop rotation planner
//!   - `POST /api/crop-rotation`, `GET /api/crop-rotation/soils`
//! - **[`system`]**: banner, health check, development seeding
//!   - `GET /`, `GET /health`, `POST /api/seed-data`
//!
//! ## Authentication
//!
//! Protected endpoints use `Extension<Claims>`; the auth middleware validates
//! the bearer token before they run.
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; `AppError` renders the status code
//! and the `{"error", "code"}` body.

pub mod auth;
pub mod listings;
pub mod diagnosis;
pub mod checkout;
pub mod rotation;
pub mod system;

use lib_auth::Claims;
use lib_core::model::store::models::Role;
use lib_core::AppError;

/// User id carried by validated claims.
pub(crate) fn claims_user_id(claims: &Claims) -> Result<i64, AppError> {
    claims
        .user_id()
        .map_err(|e| AppError::Unauthorized(e.to_string()))
}

/// Reject callers that are not farmers.
pub(crate) fn require_farmer(claims: &Claims, action: &str) -> Result<i64, AppError> {
    if !claims.has_role(Role::Farmer.as_str()) {
        return Err(AppError::Forbidden(format!("Only farmers can {}", action)));
    }
    claims_user_id(claims)
}

#[cfg(test)]
pub(crate) mod test_support;
