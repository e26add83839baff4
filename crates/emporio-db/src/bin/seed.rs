//! # Seed Data Generator
//!
//! Populates a development store with categories and products.
//!
//! ## Usage
//! ```bash
//! # Seed ./emporio_dev.db
//! cargo run -p emporio-db --bin seed
//!
//! # Specify database path
//! cargo run -p emporio-db --bin seed -- --db ./data/emporio.db
//!
//! # Repeat the product list N times with fresh ids (pagination testing)
//! cargo run -p emporio-db --bin seed -- --copies 20
//! ```
//!
//! Every fifth copy of a product is written out of stock so the in-stock
//! filter has something to hide.

use anyhow::Context;
use emporio_core::{Category, Money, Product};
use emporio_db::{Database, DbConfig};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// `(id, name, description)`
const CATEGORIES: &[(i64, &str, Option<&str>)] = &[
    (2, "Chás e infusões", Some("Chás e infusões de ervas")),
    (3, "Ervas e Temperos", Some("Ervas e temperos para culinária")),
    (12, "Suplementos", None),
    (15, "Amendoins", None),
    (17, "Creatina", None),
    (21, "Cereais / Grãos", None),
];

/// `(category_id, name, description, price_cents, units, kilograms)`
const PRODUCTS: &[(i64, &str, &str, i64, i64, Option<f64>)] = &[
    (21, "Feijão Carioca Orgânico", "500g de feijão carioca orgânico, rico em fibras.", 850, 150, None),
    (21, "Arroz Integral Cateto", "1kg de arroz integral cateto, ideal para risotos.", 1200, 200, None),
    (21, "Quinoa em Grãos", "250g de quinoa real, superalimento nutritivo.", 1575, 120, None),
    (21, "Aveia em Flocos a Granel", "Aveia em flocos finos, vendida por quilo.", 1490, 0, Some(12.5)),
    (2, "Chá de Camomila", "Caixa com 20 sachês de chá de camomila orgânico.", 990, 80, None),
    (2, "Chá Verde Sencha", "50g de chá verde sencha a granel, importado.", 2250, 60, None),
    (3, "Açafrão da Terra (Cúrcuma)", "50g de açafrão da terra em pó, 100% puro.", 720, 180, None),
    (3, "Páprica Defumada", "50g de páprica defumada, ideal para carnes e legumes.", 680, 250, None),
    (15, "Amendoim Torrado sem Sal", "Amendoim torrado vendido por quilo.", 2490, 0, Some(8.0)),
    (17, "Creatina Monohidratada", "300g de creatina monohidratada pura.", 8990, 50, None),
    (12, "Whey Protein Concentrado", "900g de whey protein sabor baunilha.", 15990, 40, None),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut copies: i64 = 1;
    let mut db_path = String::from("./emporio_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--copies" | "-n" => {
                if i + 1 < args.len() {
                    copies = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid --copies value: {}", args[i + 1]))?;
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
                println!("Empório Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --copies <N>   Copies of the product list (default: 1)");
                println!("  -d, --db <PATH>    Database file path (default: ./emporio_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => DbConfig::from_url(url),
        _ => DbConfig::new(&db_path),
    };
    info!(url = %config.url, copies, "Seeding catalog");

    let db = Database::new(config)
        .await
        .context("failed to open the database")?;
    let catalog = db.catalog();

    let existing = catalog.count_all_products().await?;
    if existing > 0 {
        warn!(existing, "Database already has products; delete it to regenerate");
        return Ok(());
    }

    for (id, name, description) in CATEGORIES {
        catalog
            .insert_category(&Category {
                id: *id,
                name: name.to_string(),
                description: description.map(str::to_string),
                product_count: 0,
            })
            .await
            .with_context(|| format!("failed to insert category {}", name))?;
    }

    let start = std::time::Instant::now();
    let mut next_id = 1;
    let mut out_of_stock = 0;

    for copy in 0..copies.max(1) {
        for (category_id, name, description, cents, units, kilograms) in PRODUCTS {
            let hidden = copy % 5 == 4;
            let product = Product {
                id: next_id,
                name: if copy == 0 {
                    name.to_string()
                } else {
                    format!("{} #{}", name, copy + 1)
                },
                price: Money::from_cents(*cents),
                description: Some(description.to_string()),
                image: Some(format!("/images/produtos/{}.jpg", next_id)),
                category_id: *category_id,
                stock_quantity: if hidden { 0 } else { *units },
                stock_weight: if hidden { None } else { *kilograms },
                is_bulk: kilograms.is_some(),
            };

            catalog
                .insert_product(&product)
                .await
                .with_context(|| format!("failed to insert product {}", product.name))?;

            if hidden {
                out_of_stock += 1;
            }
            next_id += 1;
        }
    }

    let generated = next_id - 1;
    info!(
        generated,
        out_of_stock,
        elapsed = ?start.elapsed(),
        "Products generated"
    );

    for category in catalog.list_categories().await? {
        info!(category = %category.name, in_stock = category.product_count, "Category ready");
    }

    db.close().await;
    Ok(())
}
