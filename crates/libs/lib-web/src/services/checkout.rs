//! # Checkout Service
//!
//! Prepares the options object the hosted checkout widget is opened with.
//! The service never talks to the payment gateway; it prices the order from
//! the stored listing and records it.

use lib_core::dto::{CheckoutNotes, CheckoutOptions, CheckoutPrefill, CheckoutRequest};
use lib_core::model::store::{ListingRepository, OrderRepository, UserRepository};
use lib_core::{AppError, Config, DbPool, Result};
use tracing::{info, instrument};

pub struct CheckoutService {
    db: DbPool,
    config: Config,
}

impl CheckoutService {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self { db, config }
    }

    #[instrument(skip(self))]
    pub async fn prepare(&self, buyer_id: i64, req: CheckoutRequest) -> Result<CheckoutOptions> {
        let listing = ListingRepository::find_by_id(&self.db, req.listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))?;

        if req.quantity < 1 || req.quantity > listing.quantity {
            return Err(AppError::InvalidInput(format!(
                "Quantity must be between 1 and {}",
                listing.quantity
            )));
        }

        let key = self
            .config
            .payment_key_id
            .clone()
            .ok_or_else(|| AppError::Unavailable("Payment gateway not configured".to_string()))?;

        let buyer = UserRepository::find_by_id(&self.db, buyer_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        let amount = amount_minor(listing.price, req.quantity)?;
        let currency = self.config.payment_currency.clone();

        let order = OrderRepository::create(&self.db, listing.id, buyer.id, req.quantity, amount, &currency).await?;

        info!(
            "[CHECKOUT] Order {} for listing {} x{} = {} {} (minor units)",
            order.id, listing.id, req.quantity, amount, currency
        );

        Ok(CheckoutOptions {
            order_id: order.id,
            key,
            amount,
            currency,
            name: self.config.merchant_name.clone(),
            description: format!("Purchase of {}", listing.name),
            notes: CheckoutNotes {
                listing_id: listing.id,
                quantity: req.quantity,
            },
            prefill: CheckoutPrefill {
                name: buyer.name,
                email: buyer.email,
            },
        })
    }
}

/// `price × quantity` in minor currency units, rounded to the nearest unit.
pub fn amount_minor(price: f64, quantity: i64) -> Result<i64> {
    let amount = (price * quantity as f64 * 100.0).round();
    if !amount.is_finite() || amount < 1.0 || amount >= i64::MAX as f64 {
        return Err(AppError::InvalidInput("Order amount is out of range".to_string()));
    }
    Ok(amount as i64)
}
