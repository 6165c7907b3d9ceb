//! # Seed Data Generator
//!
//! Populates the database with the sample catalog and demo accounts for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p mercado-db --bin seed
//!
//! # Specify database path
//! cargo run -p mercado-db --bin seed -- --db ./data/mercado.db
//! ```
//!
//! ## Seeded Data
//! - The administrator account (`admin@admin.com` / `admin123`) plus two
//!   demo shopper accounts
//! - The 8-product sample catalog (electronics, audio, wearables)
//!
//! Seeding is idempotent: tables that already have rows are left alone, and
//! the administrator is keyed by email so re-running never duplicates it.

use chrono::Utc;
use std::env;

use mercado_core::{
    Product, User, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME, DEFAULT_ADMIN_PASSWORD,
};
use mercado_db::{Database, DbConfig};

/// Demo shopper accounts: (name, email, password)
const SAMPLE_USERS: &[(&str, &str, &str)] = &[
    ("Juan Pérez", "juan@test.com", "password"),
    ("María García", "maria@test.com", "password"),
];

/// Sample catalog: (name, description, price_cents, category, stock)
const SAMPLE_PRODUCTS: &[(&str, &str, i64, &str, i64)] = &[
    (
        "Pro Gaming Laptop",
        "Powerful gaming laptop with a dedicated graphics card",
        129999,
        "Tech",
        5,
    ),
    (
        "Ultra Smartphone",
        "Latest-generation smartphone with 5G",
        79999,
        "Tech",
        15,
    ),
    (
        "Premium Bluetooth Headphones",
        "Wireless headphones with noise cancellation",
        19999,
        "Audio",
        20,
    ),
    (
        "Tablet Pro 12.9",
        "Professional tablet for design and productivity",
        89999,
        "Tech",
        8,
    ),
    (
        "Smart Watch Series 8",
        "Smartwatch with advanced health monitoring",
        34999,
        "Wearables",
        12,
    ),
    (
        "Pro DSLR Camera",
        "Professional camera with interchangeable lenses",
        149999,
        "Photo",
        3,
    ),
    (
        "Smart Speaker",
        "Speaker with a built-in virtual assistant",
        12999,
        "Audio",
        25,
    ),
    (
        "4K Monitor 32\"",
        "Ultra HD monitor for work and entertainment",
        49999,
        "Tech",
        7,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug surfaces the repository-level tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mercado_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mercado Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mercado_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mercado Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    seed_users(&db).await?;
    seed_products(&db).await?;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Installs the administrator and the demo shopper accounts.
///
/// The administrator is keyed by email, so running the seed against a
/// database that already has one is a no-op for that row.
async fn seed_users(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let users = db.users();

    if users.find_by_email(DEFAULT_ADMIN_EMAIL).await?.is_none() {
        let next_id = users.count().await? + 1;
        users
            .insert(&User {
                id: next_id,
                name: DEFAULT_ADMIN_NAME.to_string(),
                email: DEFAULT_ADMIN_EMAIL.to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
                is_admin: true,
                created_at: Utc::now(),
            })
            .await?;
        println!("✓ Created administrator ({})", DEFAULT_ADMIN_EMAIL);
    } else {
        println!("⚠ Administrator already present, skipping");
    }

    for (name, email, password) in SAMPLE_USERS {
        if users.find_by_email(email).await?.is_some() {
            println!("⚠ Account {} already present, skipping", email);
            continue;
        }

        let next_id = users
            .list()
            .await?
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            + 1;
        users
            .insert(&User {
                id: next_id,
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                is_admin: false,
                created_at: Utc::now(),
            })
            .await?;
        println!("✓ Created account {}", email);
    }

    Ok(())
}

/// Installs the sample catalog.
///
/// Skipped entirely when the catalog already has rows, so repeated runs
/// never duplicate products.
async fn seed_products(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} products, skipping", existing);
        return Ok(());
    }

    let now = Utc::now();
    for (index, (name, description, price_cents, category, stock)) in
        SAMPLE_PRODUCTS.iter().enumerate()
    {
        let id = index as i64 + 1;
        products
            .insert(&Product {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price_cents: *price_cents,
                image_url: format!("https://picsum.photos/200/300?random={}", id),
                category: category.to_string(),
                stock: *stock,
                created_at: now,
            })
            .await?;
    }

    println!("✓ Created {} catalog products", SAMPLE_PRODUCTS.len());
    Ok(())
}
