//! # Listing Repository
//!
//! Marketplace listings. Farmers manage their own items here and the same rows
//! back the public marketplace, so there is a single source of truth.

use super::models::{Listing, ListingForCreate, ListingKind};
use super::DbPool;
use sqlx::{query_as, QueryBuilder, Sqlite};

/// Optional marketplace filters.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub kind: Option<ListingKind>,
    pub category: Option<String>,
    pub farmer_id: Option<i64>,
}

impl ListingFilter {
    pub fn kind(mut self, kind: ListingKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn farmer(mut self, farmer_id: i64) -> Self {
        self.farmer_id = Some(farmer_id);
        self
    }
}

pub struct ListingRepository;

impl ListingRepository {
    /// List listings matching `filter`, newest first.
    pub async fn list(pool: &DbPool, filter: &ListingFilter) -> Result<Vec<Listing>, sqlx::Error> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM listings WHERE 1 = 1");

        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ").push_bind(kind.as_str());
        }
        if let Some(category) = &filter.category {
            builder.push(" AND category = ").push_bind(category.trim().to_lowercase());
        }
        if let Some(farmer_id) = filter.farmer_id {
            builder.push(" AND farmer_id = ").push_bind(farmer_id);
        }

        builder.push(" ORDER BY created_at DESC, id DESC");

        builder.build_query_as::<Listing>().fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Listing>, sqlx::Error> {
        query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a validated listing and return the stored row.
    pub async fn create(pool: &DbPool, data: &ListingForCreate) -> Result<Listing, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO listings (kind, name, category, price, quantity, description, rental_duration_days, farmer_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(data.kind.as_str())
        .bind(data.name.trim())
        .bind(data.category.trim().to_lowercase())
        .bind(data.price)
        .bind(data.quantity)
        .bind(data.description.as_deref())
        .bind(data.rental_duration_days)
        .bind(data.farmer_id)
        .execute(pool)
        .await?;

        query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    /// Delete a listing only if it belongs to `farmer_id`.
    ///
    /// Returns `false` when no such listing is owned by that farmer.
    pub async fn delete_owned(pool: &DbPool, id: i64, farmer_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = ? AND farmer_id = ?")
            .bind(id)
            .bind(farmer_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings").execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::create_memory_pool;
    use crate::model::store::models::Role;
    use crate::model::store::UserRepository;

    fn tomato(farmer_id: Option<i64>) -> ListingForCreate {
        ListingForCreate {
            kind: ListingKind::Product,
            name: "Fresh Tomatoes".to_string(),
            category: "Vegetable".to_string(),
            price: 50.0,
            quantity: 100,
            description: Some("Organic red tomatoes".to_string()),
            rental_duration_days: None,
            farmer_id,
        }
    }

    fn tractor(farmer_id: Option<i64>) -> ListingForCreate {
        ListingForCreate {
            kind: ListingKind::Tool,
            name: "John Deere Tractor".to_string(),
            category: "tractor".to_string(),
            price: 1500.0,
            quantity: 1,
            description: None,
            rental_duration_days: Some(7),
            farmer_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = create_memory_pool().await.unwrap();

        let listing = ListingRepository::create(&pool, &tomato(None)).await.unwrap();
        assert_eq!(listing.kind, ListingKind::Product);
        assert_eq!(listing.category, "vegetable");

        let found = ListingRepository::find_by_id(&pool, listing.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Fresh Tomatoes");
        assert!(ListingRepository::find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let pool = create_memory_pool().await.unwrap();
        let farmer = UserRepository::create(&pool, "f@example.com", "F", Role::Farmer, "hash")
            .await
            .unwrap();

        ListingRepository::create(&pool, &tomato(Some(farmer.id))).await.unwrap();
        ListingRepository::create(&pool, &tractor(None)).await.unwrap();

        let all = ListingRepository::list(&pool, &ListingFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].kind, ListingKind::Tool);

        let tools = ListingRepository::list(&pool, &ListingFilter::default().kind(ListingKind::Tool))
            .await
            .unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].rental_duration_days, Some(7));

        let vegetables = ListingRepository::list(&pool, &ListingFilter::default().category("VEGETABLE"))
            .await
            .unwrap();
        assert_eq!(vegetables.len(), 1);

        let mine = ListingRepository::list(&pool, &ListingFilter::default().farmer(farmer.id))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].farmer_id, Some(farmer.id));
    }

    #[tokio::test]
    async fn test_delete_owned_only() {
        let pool = create_memory_pool().await.unwrap();
        let owner = UserRepository::create(&pool, "o@example.com", "O", Role::Farmer, "hash")
            .await
            .unwrap();
        let other = UserRepository::create(&pool, "x@example.com", "X", Role::Farmer, "hash")
            .await
            .unwrap();
        let listing = ListingRepository::create(&pool, &tomato(Some(owner.id))).await.unwrap();

        assert!(!ListingRepository::delete_owned(&pool, listing.id, other.id).await.unwrap());
        assert!(ListingRepository::delete_owned(&pool, listing.id, owner.id).await.unwrap());
        assert!(ListingRepository::find_by_id(&pool, listing.id).await.unwrap().is_none());
    }
}
