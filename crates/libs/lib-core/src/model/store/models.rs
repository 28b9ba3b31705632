use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// region: --- Role

/// Account role. Decides which dashboard a user lands on and whether they may
/// publish listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Customer => "customer",
        }
    }

    /// Front-end route the user is sent to after authenticating.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Farmer => "/dashboardA",
            Role::Customer => "/dashboardB",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "customer" => Ok(Role::Customer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// endregion: --- Role

// region: --- User

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
}

// endregion: --- User

// region: --- Listing

/// What a listing offers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Product,
    Tool,
    Fertilizer,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [ListingKind::Product, ListingKind::Tool, ListingKind::Fertilizer];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Product => "product",
            ListingKind::Tool => "tool",
            ListingKind::Fertilizer => "fertilizer",
        }
    }

    /// Categories a farmer may pick for this kind of listing.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            ListingKind::Product => &["vegetable", "fruit", "grain"],
            ListingKind::Tool => &["tractor", "harvester", "plow", "machinery"],
            ListingKind::Fertilizer => &["organic", "chemical"],
        }
    }

    pub fn accepts_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    /// Only tools are rented out for a duration.
    pub fn is_rentable(&self) -> bool {
        matches!(self, ListingKind::Tool)
    }
}

impl std::fmt::Display for ListingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(ListingKind::Product),
            "tool" => Ok(ListingKind::Tool),
            "fertilizer" => Ok(ListingKind::Fertilizer),
            _ => Err(format!("Invalid listing type: {}", s)),
        }
    }
}

impl TryFrom<String> for ListingKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub kind: ListingKind,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rental_duration_days: Option<i64>,
    pub farmer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Validated data for a new listing.
#[derive(Debug, Clone)]
pub struct ListingForCreate {
    pub kind: ListingKind,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub description: Option<String>,
    pub rental_duration_days: Option<i64>,
    pub farmer_id: Option<i64>,
}

// endregion: --- Listing

// region: --- Agronomy reference data

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Pesticide {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target_disease: String,
    pub target_plant: Option<String>,
    pub active_ingredient: Option<String>,
    pub application_rate: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PesticideForCreate {
    pub name: String,
    pub kind: String,
    pub target_disease: String,
    pub target_plant: Option<String>,
    pub active_ingredient: Option<String>,
    pub application_rate: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub id: i64,
    pub plant_name: String,
    pub disease_name: String,
    pub symptoms: Option<String>,
    pub treatment: Option<String>,
    pub prevention: Option<String>,
    pub severity: Option<String>,
}

// endregion: --- Agronomy reference data

// region: --- Order

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub listing_id: i64,
    pub buyer_id: i64,
    pub quantity: i64,
    /// Amount in the currency's minor unit (paise for INR).
    pub amount_minor: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// endregion: --- Order

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Farmer".parse::<Role>().unwrap(), Role::Farmer);
        assert_eq!(" customer ".parse::<Role>().unwrap(), Role::Customer);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_dashboards() {
        assert_eq!(Role::Farmer.dashboard_path(), "/dashboardA");
        assert_eq!(Role::Customer.dashboard_path(), "/dashboardB");
    }

    #[test]
    fn test_listing_categories() {
        assert!(ListingKind::Product.accepts_category("grain"));
        assert!(!ListingKind::Product.accepts_category("tractor"));
        assert!(ListingKind::Tool.accepts_category("machinery"));
        assert!(ListingKind::Fertilizer.accepts_category("organic"));
        assert!(ListingKind::Tool.is_rentable());
        assert!(!ListingKind::Fertilizer.is_rentable());
    }

    #[test]
    fn test_listing_serializes_kind_as_type() {
        let listing = Listing {
            id: 1,
            kind: ListingKind::Tool,
            name: "Tractor".to_string(),
            category: "tractor".to_string(),
            price: 1500.0,
            quantity: 1,
            description: None,
            rental_duration_days: Some(7),
            farmer_id: Some(3),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["type"], "tool");
        assert_eq!(json["rental_duration_days"], 7);
    }
}
