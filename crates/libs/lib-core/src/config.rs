//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is placed in the server's shared state and reaches
//! handlers and middleware through axum's `State` extractor.

use lib_utils::envs::{get_env, get_env_opt, get_env_or, get_env_parse_or};

/// Default upload limit for plant images (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Endpoint of the remote plant-disease classifier.
    ///
    /// When unset, `/api/predict` answers 503.
    pub classifier_url: Option<String>,

    /// Request timeout for the classifier, in seconds.
    pub classifier_timeout_secs: u64,

    /// Largest accepted plant image, in bytes.
    pub max_upload_bytes: usize,

    /// Public key id handed to the hosted checkout widget.
    pub payment_key_id: Option<String>,

    /// ISO currency code for checkout amounts.
    pub payment_currency: String,

    /// Merchant name shown in the checkout widget.
    pub merchant_name: String,

    /// Expose `POST /api/seed-data`. Development only.
    pub seed_endpoint_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/agri.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| e.to_string())?;

        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 24)
            .map_err(|_| "JWT_EXPIRATION_HOURS must be a valid number".to_string())?;

        let classifier_timeout_secs = get_env_parse_or("CLASSIFIER_TIMEOUT_SECS", 30)
            .map_err(|_| "CLASSIFIER_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_upload_bytes = get_env_parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
            .map_err(|_| "MAX_UPLOAD_BYTES must be a valid number".to_string())?;

        let seed_endpoint_enabled = get_env_parse_or("ENABLE_SEED_ENDPOINT", false)
            .map_err(|_| "ENABLE_SEED_ENDPOINT must be true or false".to_string())?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            classifier_url: get_env_opt("CLASSIFIER_URL"),
            classifier_timeout_secs,
            max_upload_bytes,
            payment_key_id: get_env_opt("RAZORPAY_KEY_ID"),
            payment_currency: get_env_or("PAYMENT_CURRENCY", "INR").to_uppercase(),
            merchant_name: get_env_or("MERCHANT_NAME", "Agri Connect"),
            seed_endpoint_enabled,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if self.classifier_timeout_secs == 0 {
            return Err("CLASSIFIER_TIMEOUT_SECS must be greater than 0".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_BYTES must be greater than 0".to_string());
        }

        if let Some(url) = &self.classifier_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err("CLASSIFIER_URL must be an http(s) URL".to_string());
            }
        }

        if self.payment_currency.len() != 3 || !self.payment_currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err("PAYMENT_CURRENCY must be a 3-letter ISO code".to_string());
        }

        Ok(())
    }

    /// Upload limit rendered for error messages, e.g. `10MB`.
    pub fn max_upload_label(&self) -> String {
        format!("{}MB", self.max_upload_bytes / (1024 * 1024))
    }
}
