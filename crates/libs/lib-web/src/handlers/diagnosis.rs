//! # Diagnosis Handlers
//!
//! `POST /api/predict` validates the uploaded leaf image and hands it to the
//! [`DiagnosisService`]; `GET /api/pesticides` lists the stored catalogue.

use crate::services::{DiagnosisService, DiseaseClassifier, ImageUpload};
use axum::{
    extract::{multipart::MultipartError, Json, Multipart, Query, State},
    http::StatusCode,
};
use lib_core::dto::{PesticideQuery, PredictionResponse};
use lib_core::model::store::models::Pesticide;
use lib_core::model::store::PesticideRepository;
use lib_core::{AppError, Config, DbPool};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

#[instrument(skip_all)]
pub async fn predict(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(classifier): State<Option<Arc<dyn DiseaseClassifier>>>,
    multipart: Multipart,
) -> Result<Json<PredictionResponse>, AppError> {
    info!("[PREDICT] Prediction request");

    let image = read_image(multipart, &config).await?;

    let Some(classifier) = classifier else {
        warn!("[PREDICT] No classifier configured");
        return Err(AppError::Unavailable("Disease classifier not available".to_string()));
    };

    let prediction = DiagnosisService::new(pool, classifier).predict(&image).await?;
    Ok(Json(prediction))
}

/// Pull the `file` field out of the form and validate it.
async fn read_image(mut multipart: Multipart, config: &Config) -> Result<ImageUpload, AppError> {
    let too_large = || AppError::InvalidInput(format!("File size too large (max {})", config.max_upload_label()));

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(e, config))? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            warn!("[PREDICT] Rejected content type {:?}", content_type);
            return Err(AppError::InvalidInput("File must be an image".to_string()));
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, config))?;

        if bytes.is_empty() {
            return Err(AppError::InvalidInput("Empty image file".to_string()));
        }
        if bytes.len() > config.max_upload_bytes {
            warn!("[PREDICT] Upload of {} bytes over limit", bytes.len());
            return Err(too_large());
        }

        return Ok(ImageUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::InvalidInput("No file uploaded".to_string()))
}

fn multipart_error(err: MultipartError, config: &Config) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::InvalidInput(format!("File size too large (max {})", config.max_upload_label()));
    }
    AppError::InvalidInput(format!("Invalid upload: {}", err.body_text()))
}

/// `GET /api/pesticides?plant=&disease=`
pub async fn list_pesticides(
    State(pool): State<DbPool>,
    Query(query): Query<PesticideQuery>,
) -> Result<Json<Vec<Pesticide>>, AppError> {
    let plant = query.plant.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let disease = query.disease.as_deref().map(str::trim).filter(|d| !d.is_empty());

    let pesticides = PesticideRepository::list(&pool, plant, disease).await?;
    Ok(Json(pesticides))
}
