//! # Seed Data Utility
//!
//! Loads the demo accounts, marketplace listings, pesticides and disease
//! notes into the database named by `DATABASE_URL`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package seed-data --bin seed_data
//! cargo run --package seed-data --bin seed_data -- --reset
//! ```
//!
//! The program will:
//! 1. Connect to the database and apply migrations
//! 2. Ask for confirmation
//! 3. With `--reset`, delete users, listings, pesticides and disease notes
//! 4. Seed the demo data (existing rows are kept)
//! 5. Report what was inserted
//!
//! **WARNING**: `--reset` is destructive and cannot be undone.

use lib_auth::hash_password;
use lib_core::model::store::seed::{seed_sample_data, DEMO_CUSTOMER_EMAIL, DEMO_FARMER_EMAIL, DEMO_PASSWORD};
use lib_core::model::store::{DiseaseRepository, ListingRepository, PesticideRepository, UserRepository};
use lib_core::{create_pool, run_migrations, DbPool};
use lib_utils::get_env_or;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let reset = std::env::args().skip(1).any(|arg| arg == "--reset");
    let database_url = get_env_or("DATABASE_URL", "sqlite:data/agri.db");

    println!("============================================");
    println!("  Seed Data Utility");
    println!("============================================");
    println!();
    println!("Database: {}", database_url);
    if reset {
        println!("WARNING: --reset will delete ALL users, listings, pesticides and disease notes!");
        println!("This operation cannot be undone.");
    }
    println!();

    println!("Connecting to database...");
    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    println!("Connected successfully.");
    println!();

    if !confirm(reset)? {
        println!("Operation cancelled.");
        return Ok(());
    }

    if reset {
        println!();
        println!("Clearing existing data...");
        clear_all(&pool).await?;
    }

    println!();
    println!("Seeding sample data...");
    let password_hash = hash_password(DEMO_PASSWORD)?;
    let report = seed_sample_data(&pool, &password_hash).await?;

    println!("Inserted {} user(s), {} listing(s), {} pesticide(s), {} disease note(s).",
        report.users, report.listings, report.pesticides, report.diseases);
    println!();
    println!("Demo logins (password: {}):", DEMO_PASSWORD);
    println!("  farmer:   {}", DEMO_FARMER_EMAIL);
    println!("  customer: {}", DEMO_CUSTOMER_EMAIL);

    Ok(())
}

fn confirm(reset: bool) -> anyhow::Result<bool> {
    if reset {
        print!("Are you sure you want to clear and re-seed the database? (yes/no): ");
    } else {
        print!("Seed sample data into this database? (yes/no): ");
    }
    io::stdout().flush()?;

    let mut confirmation = String::new();
    io::stdin().read_line(&mut confirmation)?;
    let confirmation = confirmation.trim().to_lowercase();

    Ok(confirmation == "yes" || confirmation == "y")
}

async fn clear_all(pool: &DbPool) -> anyhow::Result<()> {
    // Orders go with their listings and users (ON DELETE CASCADE).
    let listings = ListingRepository::delete_all(pool).await?;
    let users = UserRepository::delete_all(pool).await?;
    let pesticides = PesticideRepository::delete_all(pool).await?;
    let diseases = DiseaseRepository::delete_all(pool).await?;

    println!("Deleted {} user(s), {} listing(s), {} pesticide(s), {} disease note(s).",
        users, listings, pesticides, diseases);
    Ok(())
}
