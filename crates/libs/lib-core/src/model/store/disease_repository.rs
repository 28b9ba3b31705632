//! # Disease Repository
//!
//! Reference information for diagnosed diseases. Keys are stored normalized:
//! plant in lower case, disease in lower snake_case (`early_blight`).

use super::models::DiseaseRecord;
use super::DbPool;
use sqlx::query_as;

/// Normalized lookup key for a `(plant, disease)` pair.
pub fn disease_key(plant: &str, disease: &str) -> (String, String) {
    let plant = plant.trim().to_lowercase();
    let disease = disease
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    (plant, disease)
}

pub struct DiseaseRepository;

impl DiseaseRepository {
    pub async fn find(pool: &DbPool, plant: &str, disease: &str) -> Result<Option<DiseaseRecord>, sqlx::Error> {
        let (plant, disease) = disease_key(plant, disease);
        query_as::<_, DiseaseRecord>("SELECT * FROM diseases WHERE plant_name = ? AND disease_name = ?")
            .bind(plant)
            .bind(disease)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the information for a `(plant, disease)` pair.
    pub async fn upsert(
        pool: &DbPool,
        plant: &str,
        disease: &str,
        symptoms: &str,
        treatment: &str,
        prevention: &str,
        severity: &str,
    ) -> Result<DiseaseRecord, sqlx::Error> {
        let (plant, disease) = disease_key(plant, disease);
        sqlx::query(
            "INSERT INTO diseases (plant_name, disease_name, symptoms, treatment, prevention, severity)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (plant_name, disease_name) DO UPDATE SET
                symptoms = excluded.symptoms,
                treatment = excluded.treatment,
                prevention = excluded.prevention,
                severity = excluded.severity"
        )
        .bind(&plant)
        .bind(&disease)
        .bind(symptoms)
        .bind(treatment)
        .bind(prevention)
        .bind(severity)
        .execute(pool)
        .await?;

        query_as::<_, DiseaseRecord>("SELECT * FROM diseases WHERE plant_name = ? AND disease_name = ?")
            .bind(plant)
            .bind(disease)
            .fetch_one(pool)
            .await
    }

    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diseases").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::create_memory_pool;

    #[test]
    fn test_disease_key() {
        assert_eq!(
            disease_key("Tomato", " Early  Blight "),
            ("tomato".to_string(), "early_blight".to_string())
        );
    }

    #[tokio::test]
    async fn test_upsert_and_find() {
        let pool = create_memory_pool().await.unwrap();

        DiseaseRepository::upsert(&pool, "Tomato", "Early Blight", "Spots", "Spray", "Rotate", "Moderate")
            .await
            .unwrap();
        let updated = DiseaseRepository::upsert(&pool, "tomato", "early_blight", "Rings", "Spray", "Rotate", "High")
            .await
            .unwrap();
        assert_eq!(updated.severity.as_deref(), Some("High"));

        let found = DiseaseRepository::find(&pool, "TOMATO", "Early Blight").await.unwrap().unwrap();
        assert_eq!(found.symptoms.as_deref(), Some("Rings"));
        assert!(DiseaseRepository::find(&pool, "Tomato", "Late Blight").await.unwrap().is_none());
    }
}
