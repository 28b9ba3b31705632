//! # Listing Handlers
//!
//! Marketplace browsing is public; publishing, listing one's own items and
//! deleting require a farmer token.

use crate::handlers::{claims_user_id, require_farmer};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::dto::{CreateListingRequest, CreateListingResponse, ListingQuery, MessageResponse};
use lib_core::model::store::models::Listing;
use lib_core::model::store::{ListingFilter, ListingRepository};
use lib_core::{AppError, DbPool};
use tracing::{debug, info, instrument, warn};

/// `GET /api/listings` - newest first, optionally filtered by type and category.
#[instrument(skip(pool))]
pub async fn list_listings(
    State(pool): State<DbPool>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<Listing>>, AppError> {
    let filter = query.into_filter()?;
    let listings = ListingRepository::list(&pool, &filter).await?;
    debug!("[LISTINGS] {} listings matched", listings.len());
    Ok(Json(listings))
}

/// `GET /api/listings/{id}`
pub async fn get_listing(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<Json<Listing>, AppError> {
    ListingRepository::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))
}

/// `GET /api/listings/mine` - the calling farmer's listings.
pub async fn my_listings(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Listing>>, AppError> {
    let farmer_id = require_farmer(&claims, "manage listings")?;
    let listings = ListingRepository::list(&pool, &ListingFilter::default().farmer(farmer_id)).await?;
    Ok(Json(listings))
}

/// `POST /api/listings`
#[instrument(skip(pool, claims, req), fields(kind = %req.kind, name = %req.name))]
pub async fn create_listing(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<CreateListingResponse>), AppError> {
    let farmer_id = require_farmer(&claims, "create listings")?;

    let data = req.into_listing(farmer_id).map_err(|e| {
        warn!("[LISTINGS] Rejected listing from farmer {}: {}", farmer_id, e);
        e
    })?;

    let listing = ListingRepository::create(&pool, &data).await?;
    info!("[LISTINGS] Listing {} created by farmer {}", listing.id, farmer_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateListingResponse {
            id: listing.id,
            message: "Listing created successfully".to_string(),
        }),
    ))
}

/// `DELETE /api/listings/{id}` - only the owner may delete.
///
/// A listing owned by someone else answers exactly like a missing one.
pub async fn delete_listing(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = claims_user_id(&claims)?;

    if !ListingRepository::delete_owned(&pool, id, user_id).await? {
        warn!("[LISTINGS] Delete of listing {} refused for user {}", id, user_id);
        return Err(AppError::NotFound("Listing not found or not authorized".to_string()));
    }

    info!("[LISTINGS] Listing {} deleted by user {}", id, user_id);
    Ok(Json(MessageResponse::new("Listing deleted successfully")))
}
