//! # Seed Data Generator
//!
//! Populates the database with products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p store-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p store-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p store-db --bin seed -- --db ./data/store.db
//! ```
//!
//! ## Generated Products
//! Names are `{product} {size}`, unique across the run. Each product has:
//! - Price: $1.99 - $9.99 plus a size addon
//! - Original (purchase) price: 60-80% of the price
//! - Stock: 0 - 100
//!
//! After seeding, one unit of the first in-stock product is sold to show the
//! sale path end to end.

use std::env;
use store_core::SaleReceipt;
use store_db::{new_product, Database, DbConfig};

/// Product families for realistic test data
const PRODUCTS: &[&str] = &[
    "Coca-Cola",
    "Pepsi",
    "Sprite",
    "Fanta",
    "Orange Juice",
    "Apple Juice",
    "Iced Tea",
    "Mineral Water",
    "Lays Classic",
    "Pringles",
    "Snickers",
    "Oreos",
    "Whole Milk",
    "Greek Yogurt",
    "Cheddar Cheese",
    "Butter",
    "Vanilla Ice Cream",
    "Frozen Pizza",
    "White Bread",
    "Pasta Penne",
    "Rice White",
    "Canned Beans",
    "Peanut Butter",
    "Honey",
];

/// Size variants with their price addon in cents
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 100),
    ("Large", 200),
    ("330ml", 0),
    ("500ml", 50),
    ("1L", 100),
    ("2L", 150),
    ("6-Pack", 300),
    ("12-Pack", 500),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./store.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Store API Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./store.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Store API Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    let mut first_in_stock: Option<String> = None;
    let start = std::time::Instant::now();

    'outer: for (product_idx, product_name) in PRODUCTS.iter().enumerate() {
        for (size_idx, (size_name, price_addon)) in SIZES.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let seed = product_idx * SIZES.len() + size_idx;
            let product = generate_product(product_name, size_name, *price_addon, seed);

            if let Err(e) = products.insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }

            if first_in_stock.is_none() && product.quantity > 0 {
                first_in_stock = Some(product.name.clone());
            }

            generated += 1;

            if generated % 50 == 0 {
                println!("  Generated {} products...", generated);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    if let Some(name) = first_in_stock {
        println!();
        println!("Selling one unit of '{}'...", name);
        let sold = products.sell(&name, 1).await?;
        let receipt = SaleReceipt::new(sold, 1);
        println!(
            "  Total {} (margin {}), {} left",
            receipt.total_cents, receipt.margin_cents, receipt.product.quantity
        );
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(
    name: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
) -> store_core::Product {
    // Price: base $1.99-$9.99 + size addon
    let base_price = 199 + ((seed * 17) % 800) as i64;
    let price_cents = base_price + price_addon;

    // Purchase price: 60-80% of the selling price
    let cost_pct = 60 + (seed % 20) as i64;
    let original_price_cents = price_cents * cost_pct / 100;

    let quantity = (seed % 101) as i64;

    new_product(format!("{} {}", name, size), quantity, price_cents, original_price_cents)
}
