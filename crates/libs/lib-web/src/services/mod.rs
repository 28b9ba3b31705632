//! # Services Layer
//!
//! Business logic that sits between the HTTP handlers and the store or
//! external integrations:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repository/Database/External APIs
//! ```
//!
//! - [`diagnosis`] - Plant-disease prediction via the remote classifier
//! - [`checkout`] - Hosted checkout preparation
//!
//! All services return `Result<T, AppError>`.

pub mod diagnosis;
pub mod checkout;

pub use diagnosis::{DiagnosisService, DiseaseClassifier, HttpClassifier, ImageUpload};
pub use checkout::CheckoutService;
