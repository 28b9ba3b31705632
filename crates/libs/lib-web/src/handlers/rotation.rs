//! # Crop Rotation Handlers

use axum::extract::Json;
use lib_core::agronomy::{plan_rotation, SoilType};
use lib_core::dto::{RotationPlan, RotationRequest, SoilInfo};
use lib_core::AppError;
use tracing::{debug, instrument};

/// `POST /api/crop-rotation`
#[instrument(skip_all, fields(soil = %req.soil_type))]
pub async fn plan(Json(req): Json<RotationRequest>) -> Result<Json<RotationPlan>, AppError> {
    let soil: SoilType = req.soil_type.parse().map_err(AppError::InvalidInput)?;
    let previous = req.previous_crops.into_list();

    debug!("[ROTATION] {} soil, {} previous crops", soil, previous.len());
    Ok(Json(plan_rotation(soil, &previous)))
}

/// `GET /api/crop-rotation/soils`
pub async fn soils() -> Json<Vec<SoilInfo>> {
    Json(SoilType::ALL.iter().map(SoilType::info).collect())
}
