//! # Order Repository
//!
//! Orders prepared for the hosted checkout widget. Payment capture happens on
//! the gateway side; rows here stay in `created` status.

use super::models::Order;
use super::DbPool;
use sqlx::query_as;

pub struct OrderRepository;

impl OrderRepository {
    pub async fn create(
        pool: &DbPool,
        listing_id: i64,
        buyer_id: i64,
        quantity: i64,
        amount_minor: i64,
        currency: &str,
    ) -> Result<Order, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO orders (listing_id, buyer_id, quantity, amount_minor, currency)
             VALUES (?, ?, ?, ?, ?)"
        )
        .bind(listing_id)
        .bind(buyer_id)
        .bind(quantity)
        .bind(amount_minor)
        .bind(currency)
        .execute(pool)
        .await?;

        query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
        query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_buyer(pool: &DbPool, buyer_id: i64) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<_, Order>("SELECT * FROM orders WHERE buyer_id = ? ORDER BY created_at DESC, id DESC")
            .bind(buyer_id)
            .fetch_all(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::create_memory_pool;
    use crate::model::store::models::{ListingForCreate, ListingKind, Role};
    use crate::model::store::{ListingRepository, UserRepository};

    #[tokio::test]
    async fn test_create_and_list_orders() {
        let pool = create_memory_pool().await.unwrap();
        let buyer = UserRepository::create(&pool, "c@example.com", "C", Role::Customer, "hash")
            .await
            .unwrap();
        let listing = ListingRepository::create(
            &pool,
            &ListingForCreate {
                kind: ListingKind::Product,
                name: "Rice".to_string(),
                category: "grain".to_string(),
                price: 40.0,
                quantity: 500,
                description: None,
                rental_duration_days: None,
                farmer_id: None,
            },
        )
        .await
        .unwrap();

        let order = OrderRepository::create(&pool, listing.id, buyer.id, 3, 12000, "INR").await.unwrap();
        assert_eq!(order.status, "created");
        assert_eq!(order.amount_minor, 12000);

        let found = OrderRepository::find_by_id(&pool, order.id).await.unwrap().unwrap();
        assert_eq!(found.listing_id, listing.id);

        let orders = OrderRepository::list_by_buyer(&pool, buyer.id).await.unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn test_order_requires_existing_listing() {
        let pool = create_memory_pool().await.unwrap();
        let buyer = UserRepository::create(&pool, "c@example.com", "C", Role::Customer, "hash")
            .await
            .unwrap();

        let result = OrderRepository::create(&pool, 42, buyer.id, 1, 100, "INR").await;
        assert!(result.is_err());
    }
}
