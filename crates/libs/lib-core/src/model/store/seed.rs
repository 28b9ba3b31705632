//! # Sample Data
//!
//! Demo accounts, listings and agronomy reference rows for local development.
//! Seeding is idempotent: existing accounts are reused, listings and
//! pesticides are only added once, disease rows are upserted.

use super::models::{ListingForCreate, ListingKind, PesticideForCreate, Role, User};
use super::{DbPool, DiseaseRepository, ListingFilter, ListingRepository, PesticideRepository, UserRepository};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEMO_FARMER_EMAIL: &str = "farmer1@test.com";
pub const DEMO_CUSTOMER_EMAIL: &str = "customer1@test.com";
pub const DEMO_PASSWORD: &str = "password123";

/// What a seeding run actually inserted.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u64,
    pub listings: u64,
    pub pesticides: u64,
    pub diseases: u64,
}

/// Seed the demo data set. `password_hash` is the hash of [`DEMO_PASSWORD`]
/// and is used for both demo accounts.
pub async fn seed_sample_data(pool: &DbPool, password_hash: &str) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    let farmer = ensure_user(pool, DEMO_FARMER_EMAIL, "John Farmer", Role::Farmer, password_hash, &mut report).await?;
    ensure_user(pool, DEMO_CUSTOMER_EMAIL, "Jane Customer", Role::Customer, password_hash, &mut report).await?;

    let existing = ListingRepository::list(pool, &ListingFilter::default().farmer(farmer.id)).await?;
    if existing.is_empty() {
        for listing in sample_listings(farmer.id) {
            ListingRepository::create(pool, &listing).await?;
            report.listings += 1;
        }
    }

    if PesticideRepository::count(pool).await? == 0 {
        for pesticide in sample_pesticides() {
            PesticideRepository::create(pool, &pesticide).await?;
            report.pesticides += 1;
        }
    }

    for (plant, disease, symptoms, treatment, prevention, severity) in SAMPLE_DISEASES {
        DiseaseRepository::upsert(pool, plant, disease, symptoms, treatment, prevention, severity).await?;
        report.diseases += 1;
    }

    info!("[SEED] Seeded sample data: {:?}", report);
    Ok(report)
}

async fn ensure_user(
    pool: &DbPool,
    email: &str,
    name: &str,
    role: Role,
    password_hash: &str,
    report: &mut SeedReport,
) -> Result<User, sqlx::Error> {
    if let Some(user) = UserRepository::find_by_email(pool, email).await? {
        return Ok(user);
    }
    let user = UserRepository::create(pool, email, name, role, password_hash).await?;
    report.users += 1;
    Ok(user)
}

fn sample_listings(farmer_id: i64) -> Vec<ListingForCreate> {
    let listing = |kind, name: &str, category: &str, price, quantity, description: &str, rental| ListingForCreate {
        kind,
        name: name.to_string(),
        category: category.to_string(),
        price,
        quantity,
        description: Some(description.to_string()),
        rental_duration_days: rental,
        farmer_id: Some(farmer_id),
    };

    vec![
        listing(ListingKind::Product, "Tomato", "vegetable", 50.0, 100, "Fresh organic tomatoes", None),
        listing(ListingKind::Product, "Potato", "vegetable", 30.0, 200, "High quality potatoes", None),
        listing(ListingKind::Tool, "Tractor", "machinery", 5000.0, 1, "John Deere tractor for rent", Some(7)),
        listing(ListingKind::Fertilizer, "Organic Fertilizer", "organic", 25.0, 50, "NPK organic fertilizer", None),
    ]
}

fn sample_pesticides() -> Vec<PesticideForCreate> {
    let pesticide = |name: &str, kind: &str, disease: &str, plant: &str, ingredient: &str, rate: &str, price, description: &str| {
        PesticideForCreate {
            name: name.to_string(),
            kind: kind.to_string(),
            target_disease: disease.to_string(),
            target_plant: Some(plant.to_string()),
            active_ingredient: Some(ingredient.to_string()),
            application_rate: Some(rate.to_string()),
            price: Some(price),
            description: Some(description.to_string()),
        }
    };

    vec![
        pesticide("Copper Hydroxide", "Bactericide", "bacterial_spot", "tomato", "Copper Hydroxide 53.8%", "2-3g/L", 250.0, "Effective against bacterial diseases"),
        pesticide("Mancozeb", "Fungicide", "early_blight", "tomato", "Mancozeb 75%", "2g/L", 180.0, "Broad spectrum fungicide"),
        pesticide("Metalaxyl + Mancozeb", "Fungicide", "late_blight", "potato", "Metalaxyl 8% + Mancozeb 64%", "2.5g/L", 320.0, "Systemic fungicide"),
    ]
}

const SAMPLE_DISEASES: [(&str, &str, &str, &str, &str, &str); 3] = [
    ("tomato", "bacterial_spot", "Small dark spots on leaves", "Apply copper-based bactericides", "Avoid overhead watering", "medium"),
    ("tomato", "early_blight", "Brown spots with concentric rings", "Apply fungicides regularly", "Ensure good air circulation", "high"),
    ("potato", "late_blight", "Dark lesions on leaves", "Apply systemic fungicides", "Plant resistant varieties", "high"),
];
