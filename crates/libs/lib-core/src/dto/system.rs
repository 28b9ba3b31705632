//! # System Data Transfer Objects
//!
//! Service banner, health check and development seeding.

use crate::model::store::seed::SeedReport;
use serde::{Deserialize, Serialize};

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// `POST /api/seed-data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedResponse {
    pub message: String,
    pub inserted: SeedReport,
}
