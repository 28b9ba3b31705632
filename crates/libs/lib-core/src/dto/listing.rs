//! # Listing Data Transfer Objects
//!
//! - `GET /api/listings?type=&category=` - [`ListingQuery`] -> `[Listing]`
//! - `POST /api/listings` - [`CreateListingRequest`] -> [`CreateListingResponse`]
//! - `DELETE /api/listings/{id}` - [`MessageResponse`]

use crate::error::{AppError, Result};
use crate::model::store::models::{ListingForCreate, ListingKind};
use crate::model::store::ListingFilter;
use serde::{Deserialize, Serialize};

/// Marketplace filters. Empty values are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
}

impl ListingQuery {
    pub fn into_filter(self) -> Result<ListingFilter> {
        let mut filter = ListingFilter::default();

        if let Some(kind) = self.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            filter = filter.kind(kind.parse::<ListingKind>().map_err(AppError::InvalidInput)?);
        }
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            filter = filter.category(category);
        }

        Ok(filter)
    }
}

/// New listing submitted from the item-management screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListingRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rental_duration_days: Option<i64>,
}

impl CreateListingRequest {
    /// Validate the request and attach the owning farmer.
    pub fn into_listing(self, farmer_id: i64) -> Result<ListingForCreate> {
        let kind: ListingKind = self.kind.parse().map_err(AppError::InvalidInput)?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("Name is required".to_string()));
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(AppError::InvalidInput("Price must be greater than 0".to_string()));
        }

        if self.quantity < 1 {
            return Err(AppError::InvalidInput("Quantity must be at least 1".to_string()));
        }

        let category = self.category.trim().to_lowercase();
        if !kind.accepts_category(&category) {
            return Err(AppError::InvalidInput(format!(
                "Invalid category '{}' for {}; expected one of: {}",
                self.category.trim(),
                kind,
                kind.categories().join(", ")
            )));
        }

        if let Some(days) = self.rental_duration_days {
            if !kind.is_rentable() {
                return Err(AppError::InvalidInput(
                    "Rental duration is only allowed for tools".to_string(),
                ));
            }
            if days < 1 {
                return Err(AppError::InvalidInput(
                    "Rental duration must be at least 1 day".to_string(),
                ));
            }
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(ListingForCreate {
            kind,
            name: name.to_string(),
            category,
            price: self.price,
            quantity: self.quantity,
            description,
            rental_duration_days: self.rental_duration_days,
            farmer_id: Some(farmer_id),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateListingResponse {
    pub id: i64,
    pub message: String,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
