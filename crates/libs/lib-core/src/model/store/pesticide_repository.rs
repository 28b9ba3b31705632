//! # Pesticide Repository
//!
//! Treatment catalogue. Names are matched case-insensitively against the
//! plant and disease a classifier reports.

use super::disease_repository::disease_key;
use super::models::{Pesticide, PesticideForCreate};
use super::DbPool;
use sqlx::{query_as, QueryBuilder, Sqlite};

pub struct PesticideRepository;

impl PesticideRepository {
    /// List pesticides, optionally narrowed by plant and/or disease.
    ///
    /// Both filters are case-insensitive substring matches. Diseases are
    /// compared in snake_case, so `Early blight` and `early_blight` find the
    /// same rows. Cheapest first.
    pub async fn list(
        pool: &DbPool,
        plant: Option<&str>,
        disease: Option<&str>,
    ) -> Result<Vec<Pesticide>, sqlx::Error> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM pesticides WHERE 1 = 1");

        if let Some(plant) = plant.map(str::trim).filter(|p| !p.is_empty()) {
            builder
                .push(" AND LOWER(COALESCE(target_plant, '')) LIKE ")
                .push_bind(like_pattern(&plant.to_lowercase()))
                .push(" ESCAPE '\\'");
        }
        if let Some(disease) = disease.map(str::trim).filter(|d| !d.is_empty()) {
            let (_, disease) = disease_key("", disease);
            builder
                .push(" AND REPLACE(LOWER(target_disease), ' ', '_') LIKE ")
                .push_bind(like_pattern(&disease))
                .push(" ESCAPE '\\'");
        }

        builder.push(" ORDER BY price IS NULL, price ASC, id ASC");

        builder.build_query_as::<Pesticide>().fetch_all(pool).await
    }

    /// Treatments for a diagnosed disease: rows whose target plant OR target
    /// disease matches, cheapest first.
    ///
    /// Matching is exact after normalization, so `Early blight` finds rows
    /// stored as `early_blight`.
    pub async fn find_for(
        pool: &DbPool,
        plant: &str,
        disease: &str,
        limit: i64,
    ) -> Result<Vec<Pesticide>, sqlx::Error> {
        let (plant, disease) = disease_key(plant, disease);
        query_as::<_, Pesticide>(
            "SELECT * FROM pesticides
             WHERE LOWER(COALESCE(target_plant, '')) = ?
                OR REPLACE(LOWER(target_disease), ' ', '_') = ?
             ORDER BY price IS NULL, price ASC, id ASC
             LIMIT ?"
        )
        .bind(plant)
        .bind(disease)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &DbPool, data: &PesticideForCreate) -> Result<Pesticide, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO pesticides (name, kind, target_disease, target_plant, active_ingredient, application_rate, price, description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&data.name)
        .bind(&data.kind)
        .bind(&data.target_disease)
        .bind(data.target_plant.as_deref())
        .bind(data.active_ingredient.as_deref())
        .bind(data.application_rate.as_deref())
        .bind(data.price)
        .bind(data.description.as_deref())
        .execute(pool)
        .await?;

        query_as::<_, Pesticide>("SELECT * FROM pesticides WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pesticides")
            .fetch_one(pool)
            .await
    }

    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pesticides").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

/// `%term%` for a `LIKE ... ESCAPE '\'` clause. `%`, `_` and `\` in the
/// term are escaped so they match themselves.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
