//! # Checkout Data Transfer Objects
//!
//! `POST /api/checkout` - [`CheckoutRequest`] -> [`CheckoutOptions`]
//!
//! [`CheckoutOptions`] is handed verbatim to the hosted checkout widget. The
//! amount is always computed server-side from the stored listing price.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub listing_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub order_id: i64,
    /// Public key id of the payment account.
    pub key: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    /// Merchant name.
    pub name: String,
    pub description: String,
    pub notes: CheckoutNotes,
    pub prefill: CheckoutPrefill,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutNotes {
    pub listing_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let request: CheckoutRequest = serde_json::from_str(r#"{"listing_id":4}"#).unwrap();
        assert_eq!(request.quantity, 1);
    }
}
