//! # Crop Rotation Data Transfer Objects
//!
//! - `POST /api/crop-rotation` - [`RotationRequest`] -> [`RotationPlan`]
//! - `GET /api/crop-rotation/soils` -> `[SoilInfo]`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationRequest {
    pub soil_type: String,
    #[serde(default)]
    pub previous_crops: PreviousCrops,
}

/// Previously grown crops, as typed into a text box (`"corn, wheat"`) or as
/// a JSON list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PreviousCrops {
    List(Vec<String>),
    Text(String),
}

impl Default for PreviousCrops {
    fn default() -> Self {
        PreviousCrops::List(Vec::new())
    }
}

impl PreviousCrops {
    /// Trimmed, non-empty crop names in input order.
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            PreviousCrops::List(items) => items,
            PreviousCrops::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedCrop {
    pub name: String,
    pub reason: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RotationPlan {
    pub soil_type: String,
    pub recommended: Vec<RecommendedCrop>,
    pub avoided: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoilInfo {
    pub id: String,
    pub label: String,
    pub emoji: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_crops_from_text_or_list() {
        let request: RotationRequest =
            serde_json::from_str(r#"{"soil_type":"clay","previous_crops":" corn, ,wheat "}"#).unwrap();
        assert_eq!(request.previous_crops.into_list(), vec!["corn", "wheat"]);

        let request: RotationRequest =
            serde_json::from_str(r#"{"soil_type":"clay","previous_crops":["Beans", ""]}"#).unwrap();
        assert_eq!(request.previous_crops.into_list(), vec!["Beans"]);

        let request: RotationRequest = serde_json::from_str(r#"{"soil_type":"clay"}"#).unwrap();
        assert!(request.previous_crops.into_list().is_empty());
    }
}
