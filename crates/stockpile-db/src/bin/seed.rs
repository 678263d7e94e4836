//! # Seed Data Generator
//!
//! Populates the database with test inventory for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 items (default)
//! cargo run -p stockpile-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockpile-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p stockpile-db --bin seed -- --db ./data/stockpile.db
//! ```
//!
//! ## Generated Items
//! Creates realistic inventory data across categories:
//! - Hardware (fasteners, fittings)
//! - Consumables (tape, labels, solder)
//! - Electrical (wire, fuses, connectors)
//! - Packaging (boxes, fillers)
//!
//! Each item has a brand, supplier, shelf location, unit of measure, a
//! deterministic pseudo-random price, stock level and reorder threshold.
//! Rows go through the bulk-create path, so the run exercises the same
//! code the shell uses.

use std::env;

use stockpile_core::ItemInput;
use stockpile_db::{Database, DbConfig};

/// Item categories for realistic test data: (item_type, names).
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Hardware",
        &[
            "M3 Hex Bolt",
            "M4 Hex Bolt",
            "M6 Hex Bolt",
            "M8 Hex Bolt",
            "Wood Screw 3x20",
            "Wood Screw 4x40",
            "Machine Screw M5",
            "Lock Washer M6",
            "Flat Washer M8",
            "Hex Nut M6",
            "Wing Nut M5",
            "Rivet 4mm",
            "Threaded Rod M10",
            "Corner Bracket",
            "Shelf Pin",
        ],
    ),
    (
        "Consumables",
        &[
            "Packing Tape",
            "Masking Tape",
            "Duct Tape",
            "Label Roll 57mm",
            "Label Roll 102mm",
            "Solder Wire 0.8mm",
            "Flux Pen",
            "Epoxy 5min",
            "Super Glue",
            "Sandpaper P120",
            "Sandpaper P240",
            "Cleaning Wipes",
            "Nitrile Gloves M",
            "Nitrile Gloves L",
            "Cable Ties 200mm",
        ],
    ),
    (
        "Electrical",
        &[
            "Hookup Wire Red",
            "Hookup Wire Black",
            "Fuse 5A",
            "Fuse 10A",
            "Spade Connector",
            "Ring Terminal M6",
            "Heat Shrink 3mm",
            "Heat Shrink 6mm",
            "Terminal Block 12way",
            "Toggle Switch",
            "Rocker Switch",
            "LED Indicator 12V",
            "Relay 12V 30A",
            "Battery AA",
            "Battery 9V",
        ],
    ),
    (
        "Packaging",
        &[
            "Box Small 20x15",
            "Box Medium 40x30",
            "Box Large 60x40",
            "Bubble Wrap Roll",
            "Foam Filler",
            "Mailer Bag A4",
            "Mailer Bag A3",
            "Pallet Wrap",
            "Strapping Band",
            "Edge Protector",
        ],
    ),
];

/// Brand / supplier pairs rotated across generated items.
const SUPPLIERS: &[(&str, &str)] = &[
    ("Fastenal", "Fastenal Inc"),
    ("Bossard", "Bossard Group"),
    ("3M", "3M Industrial"),
    ("Kester", "Kester Supply Co"),
    ("TE", "TE Connectivity"),
    ("RS", "RS Components"),
    ("Generic", "Wholesale Direct"),
];

/// Storage locations rotated across generated items.
const LOCATIONS: &[&str] = &[
    "Shelf A-1", "Shelf A-2", "Shelf A-3", "Shelf B-1", "Shelf B-2", "Rack C-1", "Rack C-2",
    "Backroom",
];

/// Units of measure per category index.
const UNITS: &[&str] = &["pcs", "pcs", "pcs", "roll", "box", "pack", "m"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./stockpile_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
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
                println!("Stockpile Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockpile_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockpile Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("Connected, migrations applied");

    // Check existing items
    let existing = db.items().count().await?;
    if existing > 0 {
        println!("Database already has {} items", existing);
        println!("Skipping seed to avoid duplicates.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate items
    println!();
    println!("Generating items...");

    let mut rows = Vec::with_capacity(count);
    let mut generated = 0;
    let mut variant = 0usize;

    'outer: loop {
        for (category_idx, (item_type, names)) in CATEGORIES.iter().enumerate() {
            for (name_idx, name) in names.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                rows.push(generate_item(
                    item_type,
                    name,
                    category_idx,
                    name_idx,
                    variant,
                ));
                generated += 1;
            }
        }
        // Re-enter the category tables with a new variant suffix once the
        // requested count exceeds the base catalogue.
        variant += 1;
    }

    let start = std::time::Instant::now();
    let report = db.items().bulk_create(rows).await;
    let elapsed = start.elapsed();

    println!();
    println!(
        "Done: {} created, {} failed in {:.2}s",
        report.summary.successful,
        report.summary.failed,
        elapsed.as_secs_f64()
    );
    for failure in &report.failures {
        println!("  row {}: {}", failure.index, failure.error);
    }

    db.close().await;
    Ok(())
}

/// Builds one item payload with deterministic pseudo-variation.
///
/// No RNG: the mix of indices spreads prices, stock levels and thresholds
/// widely enough for UI testing, and reruns produce identical data.
fn generate_item(
    item_type: &str,
    name: &str,
    category_idx: usize,
    name_idx: usize,
    variant: usize,
) -> ItemInput {
    let salt = category_idx * 31 + name_idx * 7 + variant * 131;

    let (brand, supplier) = SUPPLIERS[salt % SUPPLIERS.len()];
    let location = LOCATIONS[salt % LOCATIONS.len()];
    let unit = UNITS[salt % UNITS.len()];

    // $0.05 .. ~$25.00
    let price_per_unit_cents = 5 + (salt as i64 * 37) % 2500;
    // 0 .. 199, with a few zero-stock rows for "Out Of Stock" states
    let balance = (salt as i64 * 13) % 200;
    // 0 .. 24
    let min_stock = (salt as i64 * 5) % 25;

    let item_name = if variant == 0 {
        name.to_string()
    } else {
        format!("{name} (lot {variant})")
    };

    ItemInput {
        item_name,
        brand: brand.to_string(),
        item_type: item_type.to_string(),
        location: location.to_string(),
        unit_of_measure: unit.to_string(),
        supplier: supplier.to_string(),
        last_po: format!("PO-{:04}", 1000 + salt % 9000),
        price_per_unit_cents,
        min_stock,
        balance,
    }
}
