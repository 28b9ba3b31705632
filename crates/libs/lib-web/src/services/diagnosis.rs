//! # Diagnosis Service
//!
//! Turns an uploaded plant image into an enriched [`PredictionResponse`].
//!
//! ## Flow
//!
//! ```text
//! ImageUpload → DiseaseClassifier (remote HTTP) → ClassifierOutput
//!             → label + confidence → disease info, pesticides, scientific name
//! ```
//!
//! The classifier sits behind the [`DiseaseClassifier`] trait so the model
//! endpoint can be swapped (or stubbed in tests) without touching handlers.

use async_trait::async_trait;
use axum::body::Bytes;
use lib_core::agronomy::catalog::{
    builtin_disease_info, default_pesticides, generic_disease_info, scientific_name, DiseaseInfo,
};
use lib_core::agronomy::labels::{argmax, confidence_percent, label_for_index, parse_label, ParsedLabel};
use lib_core::dto::{ClassifierOutput, PesticideRecommendation, PredictionResponse};
use lib_core::model::store::{DiseaseRepository, PesticideRepository};
use lib_core::{AppError, Config, DbPool, Result};
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Most treatments listed for one diagnosis.
const MAX_RECOMMENDATIONS: i64 = 10;

/// An image received from the client, already validated.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Remote plant-disease model.
#[async_trait]
pub trait DiseaseClassifier: Send + Sync {
    async fn classify(&self, image: &ImageUpload) -> Result<ClassifierOutput>;
}

// region: --- HttpClassifier

/// Classifier reached over HTTP. The image is posted as multipart form data
/// in a field named `file`.
pub struct HttpClassifier {
    client: reqwest::Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build classifier client: {}", e)))?;

        Ok(Self { client, url: url.into() })
    }

    /// `None` when no `CLASSIFIER_URL` is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        config
            .classifier_url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_secs(config.classifier_timeout_secs)))
            .transpose()
    }
}

#[async_trait]
impl DiseaseClassifier for HttpClassifier {
    async fn classify(&self, image: &ImageUpload) -> Result<ClassifierOutput> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|_| AppError::InvalidInput("File must be an image".to_string()))?;

        let form = Form::new().part("file", part);

        debug!("[CLASSIFIER] POST {} ({} bytes)", self.url, image.bytes.len());
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("[CLASSIFIER] Request failed: {}", e);
                AppError::Classifier(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("[CLASSIFIER] Classifier answered {}", status);
            return Err(AppError::Classifier(format!("classifier answered {}", status)));
        }

        response.json::<ClassifierOutput>().await.map_err(|e| {
            warn!("[CLASSIFIER] Unreadable response: {}", e);
            AppError::Classifier(format!("unreadable response: {}", e))
        })
    }
}

// endregion: --- HttpClassifier

// region: --- DiagnosisService

pub struct DiagnosisService {
    db: DbPool,
    classifier: Arc<dyn DiseaseClassifier>,
}

impl DiagnosisService {
    pub fn new(db: DbPool, classifier: Arc<dyn DiseaseClassifier>) -> Self {
        Self { db, classifier }
    }

    #[instrument(skip(self, image), fields(file = %image.file_name, size = image.bytes.len()))]
    pub async fn predict(&self, image: &ImageUpload) -> Result<PredictionResponse> {
        let output = self.classifier.classify(image).await?;
        let (label, confidence) = resolve_output(output)?;

        info!(
            "[PREDICT] {} / {} ({:.2}%)",
            label.plant, label.disease, confidence
        );

        self.enrich(label, confidence).await
    }

    /// Attach disease info, treatments and the scientific name to a verdict.
    pub async fn enrich(&self, label: ParsedLabel, confidence: f64) -> Result<PredictionResponse> {
        let is_healthy = label.is_healthy();
        let info = self.disease_info(&label).await?;
        let recommended_pesticides = if is_healthy {
            Vec::new()
        } else {
            self.recommend_pesticides(&label).await?
        };

        Ok(PredictionResponse {
            scientific_name: scientific_name(&label.plant),
            plant: label.plant,
            disease: label.disease,
            confidence,
            is_healthy,
            disease_info: info.symptoms,
            treatment: info.treatment,
            prevention: info.prevention,
            recommended_pesticides,
        })
    }

    async fn disease_info(&self, label: &ParsedLabel) -> Result<DiseaseInfo> {
        if let Some(record) = DiseaseRepository::find(&self.db, &label.plant, &label.disease).await? {
            return Ok(record.into());
        }

        Ok(builtin_disease_info(&label.disease)
            .unwrap_or_else(|| generic_disease_info(&label.plant, &label.disease)))
    }

    async fn recommend_pesticides(&self, label: &ParsedLabel) -> Result<Vec<PesticideRecommendation>> {
        let stored = PesticideRepository::find_for(&self.db, &label.plant, &label.disease, MAX_RECOMMENDATIONS).await?;

        if stored.is_empty() {
            debug!("[PREDICT] No stored pesticides, using defaults for {}", label.disease);
            return Ok(default_pesticides(&label.disease));
        }

        Ok(stored.into_iter().map(PesticideRecommendation::from).collect())
    }
}

// endregion: --- DiagnosisService

/// Reduce classifier output to a parsed label and a percentage confidence.
pub fn resolve_output(output: ClassifierOutput) -> Result<(ParsedLabel, f64)> {
    match output {
        ClassifierOutput::Probabilities { predictions } => {
            let (index, probability) = argmax(&predictions)
                .ok_or_else(|| AppError::Classifier("empty prediction vector".to_string()))?;

            let label = label_for_index(index).ok_or_else(|| {
                AppError::Classifier(format!("class index {} outside label table", index))
            })?;

            Ok((parse_label(label), confidence_percent(probability)))
        }
        ClassifierOutput::Label { label, confidence } => {
            if label.trim().is_empty() || !confidence.is_finite() || confidence < 0.0 {
                return Err(AppError::Classifier(format!(
                    "invalid verdict: label={:?} confidence={}",
                    label, confidence
                )));
            }

            // Probabilities in [0, 1]; anything larger is already a percentage.
            let percent = if confidence <= 1.0 {
                confidence_percent(confidence)
            } else {
                (confidence * 100.0).round() / 100.0
            };

            Ok((parse_label(&label), percent))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::model::store::create_memory_pool;
    use lib_core::model::store::models::PesticideForCreate;

    struct FixedClassifier(ClassifierOutput);

    #[async_trait]
    impl DiseaseClassifier for FixedClassifier {
        async fn classify(&self, _image: &ImageUpload) -> Result<ClassifierOutput> {
            Ok(self.0.clone())
        }
    }

    fn image() -> ImageUpload {
        ImageUpload {
            file_name: "leaf.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::from_static(b"\xff\xd8\xff"),
        }
    }

    fn one_hot(index: usize, p: f64) -> Vec<f64> {
        let rest = (1.0 - p) / 37.0;
        (0..38).map(|i| if i == index { p } else { rest }).collect()
    }

    async fn service(output: ClassifierOutput) -> DiagnosisService {
        let pool = create_memory_pool().await.unwrap();
        DiagnosisService::new(pool, Arc::new(FixedClassifier(output)))
    }

    #[test]
    fn test_resolve_probabilities() {
        let (label, confidence) =
            resolve_output(ClassifierOutput::Probabilities { predictions: one_hot(29, 0.93456) }).unwrap();
        assert_eq!(label.plant, "Tomato");
        assert_eq!(label.disease, "Early blight");
        assert_eq!(confidence, 93.46);
    }

    #[test]
    fn test_resolve_rejects_out_of_table_index() {
        let mut predictions = vec![0.0; 40];
        predictions[39] = 1.0;
        let err = resolve_output(ClassifierOutput::Probabilities { predictions }).unwrap_err();
        assert!(matches!(err, AppError::Classifier(_)));

        let err = resolve_output(ClassifierOutput::Probabilities { predictions: vec![] }).unwrap_err();
        assert!(matches!(err, AppError::Classifier(_)));
    }

    #[test]
    fn test_resolve_label_confidence_scales() {
        let (_, fraction) = resolve_output(ClassifierOutput::Label {
            label: "Apple___Apple_scab".to_string(),
            confidence: 0.8765,
        })
        .unwrap();
        assert_eq!(fraction, 87.65);

        let (_, percent) = resolve_output(ClassifierOutput::Label {
            label: "Apple___Apple_scab".to_string(),
            confidence: 87.654,
        })
        .unwrap();
        assert_eq!(percent, 87.65);
    }

    #[tokio::test]
    async fn test_predict_uses_builtin_data_when_store_empty() {
        let service = service(ClassifierOutput::Probabilities { predictions: one_hot(0, 0.9) }).await;

        let result = service.predict(&image()).await.unwrap();
        assert_eq!(result.plant, "Apple");
        assert_eq!(result.disease, "Apple scab");
        assert_eq!(result.scientific_name, "Malus domestica");
        assert!(!result.is_healthy);
        assert!(result.disease_info.contains("Olive-green"));
        assert_eq!(result.recommended_pesticides.len(), 1);
        assert_eq!(result.recommended_pesticides[0].name, "Myclobutanil 10% WP");
    }

    #[tokio::test]
    async fn test_healthy_plant_gets_no_pesticides() {
        let service = service(ClassifierOutput::Label {
            label: "Tomato___healthy".to_string(),
            confidence: 0.99,
        })
        .await;

        let result = service.predict(&image()).await.unwrap();
        assert!(result.is_healthy);
        assert!(result.recommended_pesticides.is_empty());
        assert_eq!(result.treatment, "No treatment needed - continue regular care");
    }

    #[tokio::test]
    async fn test_stored_data_takes_precedence() {
        let service = service(ClassifierOutput::Label {
            label: "Tomato___Early_blight".to_string(),
            confidence: 0.9,
        })
        .await;

        DiseaseRepository::upsert(&service.db, "tomato", "early_blight", "Stored symptoms", "Stored", "Stored", "high")
            .await
            .unwrap();
        for (name, price) in [("Expensive", 900.0), ("Cheap", 100.0)] {
            PesticideRepository::create(
                &service.db,
                &PesticideForCreate {
                    name: name.to_string(),
                    kind: "Fungicide".to_string(),
                    target_disease: "early_blight".to_string(),
                    target_plant: Some("tomato".to_string()),
                    active_ingredient: None,
                    application_rate: None,
                    price: Some(price),
                    description: None,
                },
            )
            .await
            .unwrap();
        }

        let result = service.predict(&image()).await.unwrap();
        assert_eq!(result.disease_info, "Stored symptoms");
        let names: Vec<_> = result.recommended_pesticides.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cheap", "Expensive"]);
    }

    #[tokio::test]
    async fn test_unknown_disease_gets_generic_text() {
        let service = service(ClassifierOutput::Label {
            label: "Grape___Esca_(Black_Measles)".to_string(),
            confidence: 0.7,
        })
        .await;

        let result = service.predict(&image()).await.unwrap();
        assert_eq!(result.disease_info, "Symptoms of Esca (Black Measles) detected on Grape");
        assert!(result.recommended_pesticides.is_empty());
    }
}
