//! # Seed Data Generator
//!
//! Populates a store directory with demo pharmacy data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default store directory
//! cargo run -p medipos-store --bin seed
//!
//! # Specify a store directory
//! cargo run -p medipos-store --bin seed -- --dir ./medipos_data
//! ```
//!
//! ## Generated Data
//! - A realistic medicine inventory covering every stock status:
//!   healthy, low stock, out of stock, near expiry, and expired
//! - A few customers alongside the walk-in record
//! - Default store settings with a demo store name

use std::env;

use chrono::{Duration, Local, NaiveDate};

use medipos_core::types::{Customer, Medicine, StoreSettings};
use medipos_store::Store;

/// Demo inventory: (brand, generic, strength, form, hsn, stock, mrp, gst, batch, expiry offset days)
///
/// Offsets are relative to today so every status bucket stays populated
/// no matter when the seed runs.
const MEDICINES: &[(&str, &str, &str, &str, &str, i64, f64, f64, &str, i64)] = &[
    ("Dolo 650", "Paracetamol", "650mg", "Tablet", "3004", 120, 33.5, 12.0, "DL2401", 400),
    ("Crocin Advance", "Paracetamol", "500mg", "Tablet", "3004", 80, 20.0, 12.0, "CR2402", 365),
    ("Azithral 500", "Azithromycin", "500mg", "Tablet", "3004", 45, 119.5, 12.0, "AZ2403", 300),
    ("Pan 40", "Pantoprazole", "40mg", "Tablet", "3004", 60, 145.0, 12.0, "PN2404", 280),
    ("Allegra 120", "Fexofenadine", "120mg", "Tablet", "3004", 35, 218.0, 12.0, "AL2405", 320),
    ("Augmentin 625", "Amoxicillin + Clavulanate", "625mg", "Tablet", "3004", 25, 204.0, 12.0, "AG2406", 250),
    ("Zerodol SP", "Aceclofenac + Serratiopeptidase", "100mg", "Tablet", "3004", 50, 115.0, 12.0, "ZD2407", 340),
    ("Benadryl Syrup", "Diphenhydramine", "50ml", "Syrup", "3004", 30, 125.0, 12.0, "BD2408", 200),
    // Low stock
    ("Montair LC", "Montelukast + Levocetirizine", "10mg", "Tablet", "3004", 5, 189.0, 12.0, "MT2409", 300),
    ("Shelcal 500", "Calcium + Vitamin D3", "500mg", "Tablet", "3004", 3, 110.0, 12.0, "SH2410", 280),
    // Out of stock
    ("Telma 40", "Telmisartan", "40mg", "Tablet", "3004", 0, 215.0, 12.0, "TL2411", 350),
    // Near expiry
    ("Cetzine", "Cetirizine", "10mg", "Tablet", "3004", 70, 27.0, 12.0, "CZ2412", 30),
    ("Digene Gel", "Antacid", "200ml", "Syrup", "3004", 22, 132.0, 12.0, "DG2413", 45),
    // Expired
    ("Volini Spray", "Diclofenac", "100g", "Spray", "3004", 12, 335.0, 18.0, "VL2414", -20),
];

/// Demo customers: (name, mobile, address)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Ramesh Kumar", "9876543210", "12 Gandhi Road"),
    ("Suresh Patil", "9123456780", "4 Nehru Street"),
    ("Anita Sharma", "9988776655", "88 MG Road"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut dir = String::from("./medipos_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("MediPOS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Store directory (default: ./medipos_data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("🌱 MediPOS Seed Data Generator");
    println!("==============================");
    println!("Store: {}", dir);
    println!();

    let store = Store::open(&dir)?;
    println!("✓ Opened store directory");

    // Avoid duplicate key errors on re-run
    let existing = store.medicines().get_all()?;
    if !existing.is_empty() {
        println!("⚠ Store already has {} medicines", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the store directory to regenerate.");
        return Ok(());
    }

    let today = Local::now().date_naive();

    println!();
    println!("Seeding medicines...");
    for row in MEDICINES {
        let medicine = make_medicine(row, today);
        store.medicines().add(medicine)?;
    }
    println!("✓ Seeded {} medicines", MEDICINES.len());

    println!("Seeding customers...");
    for (name, mobile, address) in CUSTOMERS {
        store.customers().add(Customer {
            id: 0,
            name: name.to_string(),
            mobile: mobile.to_string(),
            address: address.to_string(),
            age: None,
            gender: None,
            prescriptions: 0,
        })?;
    }
    // +1 for the walk-in record seeded on first read
    println!("✓ Seeded {} customers", CUSTOMERS.len() + 1);

    println!("Writing settings...");
    let mut settings = StoreSettings::default();
    settings.store_name = "Jeevan Aushadhi Medical Store".to_string();
    settings.address = "15 Station Road, Pune".to_string();
    settings.phone = "020-24451234".to_string();
    settings.gstin = "27AABCJ1234A1Z5".to_string();
    store.settings().save(&settings)?;
    println!("✓ Settings written");

    // Show the alert mix the demo data produces
    println!();
    println!("Stock alerts as of {}:", today.format("%d/%m/%Y"));
    for alert in store.medicines().alerts(today)? {
        println!("  {:12} {}: {}", alert.alert_type.label(), alert.medicine, alert.details);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one medicine record from a seed table row.
fn make_medicine(
    row: &(&str, &str, &str, &str, &str, i64, f64, f64, &str, i64),
    today: NaiveDate,
) -> Medicine {
    let (brand, generic, strength, form, hsn, stock, mrp, gst, batch, expiry_offset) = *row;

    Medicine {
        id: 0,
        brand_name: brand.to_string(),
        generic_name: generic.to_string(),
        strength: strength.to_string(),
        form: form.to_string(),
        hsn: hsn.to_string(),
        stock,
        mrp,
        expiry_date: today + Duration::days(expiry_offset),
        batch_no: batch.to_string(),
        gst,
    }
}
