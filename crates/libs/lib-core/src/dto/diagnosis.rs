//! # Diagnosis Data Transfer Objects
//!
//! - `POST /api/predict` (multipart field `file`) -> [`PredictionResponse`]
//! - `GET /api/pesticides?plant=&disease=` - [`PesticideQuery`] -> `[Pesticide]`
//!
//! [`ClassifierOutput`] is what the remote classifier answers with.

use crate::model::store::models::Pesticide;
use serde::{Deserialize, Serialize};

/// Enriched classifier verdict shown on the disease-detection screen.
///
/// `confidence` is a percentage rounded to two decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub plant: String,
    pub scientific_name: String,
    pub disease: String,
    pub confidence: f64,
    pub is_healthy: bool,
    /// Symptoms text.
    pub disease_info: String,
    pub treatment: String,
    pub prevention: String,
    pub recommended_pesticides: Vec<PesticideRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PesticideRecommendation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub active_ingredient: Option<String>,
    pub application_rate: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl From<Pesticide> for PesticideRecommendation {
    fn from(p: Pesticide) -> Self {
        Self {
            name: p.name,
            kind: p.kind,
            active_ingredient: p.active_ingredient,
            application_rate: p.application_rate,
            price: p.price,
            description: p.description,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PesticideQuery {
    pub plant: Option<String>,
    pub disease: Option<String>,
}

/// Response body of the remote classifier.
///
/// Either raw class probabilities over the PlantVillage label table, or an
/// already resolved label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ClassifierOutput {
    Probabilities { predictions: Vec<f64> },
    Label { label: String, confidence: f64 },
}
