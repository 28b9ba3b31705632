//! # Auth Handler Tests
//!
//! Test suite for authentication handlers (signup, login and current user),
//! driven through the full router.

mod login;

use super::*;
use crate::handlers::test_support::{body_json, get, post_json, TestApp, TEST_PASSWORD};
use lib_core::dto::ErrorResponse;
use serde_json::json;

/// Signup body with the usual test password.
pub fn signup_body(email: &str, name: &str, role: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": TEST_PASSWORD,
        "name": name,
        "role": role,
    })
}

pub fn login_body(email: &str, password: &str) -> serde_json::Value {
    json!({ "email": email, "password": password })
}
