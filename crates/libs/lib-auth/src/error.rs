//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Rejected before hashing; carries the user-facing message.
    #[error("{0}")]
    WeakPassword(String),

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to parse hash: {0}")]
    MalformedHash(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    #[error("Failed to decode JWT: {0}")]
    TokenDecode(String),

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),
}
