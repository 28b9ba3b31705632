//! # Checkout Handler

use crate::handlers::claims_user_id;
use crate::services::CheckoutService;
use axum::extract::{Extension, Json, State};
use lib_auth::Claims;
use lib_core::dto::{CheckoutOptions, CheckoutRequest};
use lib_core::model::store::models::Order;
use lib_core::model::store::OrderRepository;
use lib_core::{AppError, Config, DbPool};
use tracing::{info, instrument};

/// `POST /api/checkout` - price the order server-side and return the options
/// the hosted checkout widget is opened with.
#[instrument(skip(pool, config, claims), fields(listing_id = req.listing_id, quantity = req.quantity))]
pub async fn checkout(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutOptions>, AppError> {
    let buyer_id = claims_user_id(&claims)?;
    info!("[CHECKOUT] Checkout request from user {}", buyer_id);

    let options = CheckoutService::new(pool, config).prepare(buyer_id, req).await?;
    Ok(Json(options))
}

/// `GET /api/orders` - the caller's orders, newest first.
pub async fn my_orders(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Order>>, AppError> {
    let buyer_id = claims_user_id(&claims)?;
    let orders = OrderRepository::list_by_buyer(&pool, buyer_id).await?;
    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{body_json, post_json, test_config, TestApp};
    use axum::http::StatusCode;
    use crate::handlers::test_support::get;
    use lib_core::dto::{CreateListingResponse, ErrorResponse};
    use serde_json::json;

    async fn listing(app: &TestApp) -> i64 {
        let farmer = app.signup("farmer@example.com", "farmer").await;
        let response = app
            .send(post_json(
                "/api/listings",
                &json!({
                    "type": "product",
                    "name": "Fresh Tomatoes",
                    "category": "vegetable",
                    "price": 49.99,
                    "quantity": 10
                }),
                Some(&farmer),
            ))
            .await;
        let created: CreateListingResponse = body_json(response).await;
        created.id
    }

    #[tokio::test]
    async fn test_checkout_returns_widget_options() {
        let app = TestApp::new().await;
        let listing_id = listing(&app).await;
        let token = app.signup("customer@example.com", "customer").await;

        let response = app
            .send(post_json(
                "/api/checkout",
                &json!({ "listing_id": listing_id, "quantity": 3 }),
                Some(&token),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let options: CheckoutOptions = body_json(response).await;
        assert_eq!(options.amount, 14997);
        assert_eq!(options.currency, "INR");
        assert_eq!(options.key, "rzp_test_key");
        assert_eq!(options.description, "Purchase of Fresh Tomatoes");
        assert_eq!(options.notes.quantity, 3);
        assert_eq!(options.prefill.email, "customer@example.com");

        let order = OrderRepository::find_by_id(&app.db, options.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.amount_minor, 14997);
    }

    #[tokio::test]
    async fn test_checkout_requires_token() {
        let app = TestApp::new().await;
        let response = app
            .send(post_json("/api/checkout", &json!({ "listing_id": 1 }), None))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_checkout_validation() {
        let app = TestApp::new().await;
        let listing_id = listing(&app).await;
        let token = app.signup("customer@example.com", "customer").await;

        let response = app
            .send(post_json("/api/checkout", &json!({ "listing_id": 999 }), Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .send(post_json(
                "/api/checkout",
                &json!({ "listing_id": listing_id, "quantity": 11 }),
                Some(&token),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Quantity must be between 1 and 10");
    }

    #[tokio::test]
    async fn test_checkout_without_payment_key() {
        let config = Config {
            payment_key_id: None,
            ..test_config()
        };
        let app = TestApp::with(config, None).await;
        let listing_id = listing(&app).await;
        let token = app.signup("customer@example.com", "customer").await;

        let response = app
            .send(post_json("/api/checkout", &json!({ "listing_id": listing_id }), Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Payment gateway not configured");
    }

    #[tokio::test]
    async fn test_orders_are_listed_per_buyer() {
        let app = TestApp::new().await;
        let listing_id = listing(&app).await;
        let buyer = app.signup("customer@example.com", "customer").await;
        let other = app.signup("other@example.com", "customer").await;

        for quantity in [1, 2] {
            let response = app
                .send(post_json(
                    "/api/checkout",
                    &json!({ "listing_id": listing_id, "quantity": quantity }),
                    Some(&buyer),
                ))
                .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.send(get("/api/orders", Some(&buyer))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let orders: Vec<Order> = body_json(response).await;
        let quantities: Vec<i64> = orders.iter().map(|o| o.quantity).collect();
        assert_eq!(quantities, vec![2, 1]);
        assert!(orders.iter().all(|o| o.status == "created"));

        let response = app.send(get("/api/orders", Some(&other))).await;
        let orders: Vec<Order> = body_json(response).await;
        assert!(orders.is_empty());

        let response = app.send(get("/api/orders", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
