//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/auth/signup` - [`SignupRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `GET /api/auth/me` - [`UserInfo`]
//!
//! ## Wire Format
//!
//! All DTOs use **snake_case** field names in JSON (default serde behavior).
//! Roles are lower-case strings (`"farmer"`, `"customer"`).
//!
//! ### Signup
//!
//! ```text
//! POST /api/auth/signup
//! Content-Type: application/json
//!
//! {
//!   "email": "farmer1@test.com",
//!   "password": "password123",
//!   "name": "John Farmer",
//!   "role": "farmer"
//! }
//! ```
//!
//! Response (`201 Created`):
//! ```text
//! {
//!   "user": {
//!     "id": 1,
//!     "email": "farmer1@test.com",
//!     "name": "John Farmer",
//!     "role": "farmer",
//!     "created_at": "2026-01-01T00:00:00+00:00"
//!   },
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "token_type": "bearer",
//!   "message": "Account created successfully",
//!   "redirect_to": "/dashboardA"
//! }
//! ```

use crate::model::store::models::{Role, User};
use serde::{Deserialize, Serialize};

/// Login request.
///
/// # Security Note
///
/// Password is sent in plaintext over HTTPS and only ever compared against the
/// stored Argon2 hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request for new user registration.
///
/// # Validation Rules (Server-Side)
///
/// - Email must be valid format and not already registered
/// - Name must not be empty
/// - Password must be at least 8 characters
/// - Role is `farmer` or `customer`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Authentication response returned on successful login or signup.
///
/// The `token` field should be included in subsequent API requests as:
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// `redirect_to` is the dashboard the front-end routes the user to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
    pub token_type: String,
    pub message: String,
    pub redirect_to: String,
}

impl AuthResponse {
    pub fn new(user: &User, token: String, message: impl Into<String>) -> Self {
        Self {
            user: UserInfo::from(user),
            token,
            token_type: "bearer".to_string(),
            message: message.into(),
            redirect_to: user.role.dashboard_path().to_string(),
        }
    }
}

/// User information (public, safe to send to client).
///
/// Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
            last_login: user.last_login.map(|t| t.to_rfc3339()),
        }
    }
}

/// Standard error response for all API endpoints.
///
/// Mirrors what [`AppError`](crate::error::AppError) renders:
///
/// ```json
/// {
///   "error": "Invalid credentials",
///   "code": "Unauthorized"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
