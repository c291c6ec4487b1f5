//! # Demo Data Seeder
//!
//! Initializes a data directory and records a batch of activity so the
//! reports screen has something to show. Every record is stamped with the
//! current time, so it all lands in today's and this month's figures.
//!
//! ## Usage
//! ```bash
//! # Seed the platform data directory (or $KIRANA_DATA_DIR)
//! cargo run -p kirana-store --bin seed
//!
//! # Seed a specific directory with 25 bills
//! cargo run -p kirana-store --bin seed -- --dir ./data --bills 25
//!
//! # Also spool the receipts as text files
//! cargo run -p kirana-store --bin seed -- --dir ./data --print
//! ```
//!
//! ## Generated Data
//! - Bills drawn from the catalog, 1–4 lines each, some discounted
//! - Udhaar for a handful of regular customers, the first one settled
//! - Routine shop expenses

use std::env;
use std::path::PathBuf;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kirana_core::{CartItem, Money, NewExpense, NewUdhaarEntry};
use kirana_store::{Printer, Store, StoreConfig, TextFileSurface};

const CUSTOMERS: &[(&str, i64, Option<&str>)] = &[
    ("Ramesh", 250, Some("Monthly groceries")),
    ("Lakshmi", 120, None),
    ("Suresh", 480, Some("Will pay on Friday")),
    ("Geetha", 75, None),
];

const EXPENSES: &[(&str, i64)] = &[
    ("Shop rent", 3000),
    ("Electricity bill", 850),
    ("Transport", 200),
    ("Carry bags", 120),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = StoreConfig::from_env();
    let mut bills: usize = 10;
    let mut print = false;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if let Some(dir) = args.get(i + 1) {
                    config.data_dir = PathBuf::from(dir);
                    i += 1;
                }
            }
            "--bills" | "-b" => {
                if let Some(n) = args.get(i + 1) {
                    bills = n.parse().unwrap_or(bills);
                    i += 1;
                }
            }
            "--print" | "-p" => print = true,
            "--help" | "-h" => {
                println!("Kirana POS Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Data directory (default: platform data dir)");
                println!("  -b, --bills <N>    Number of bills to record (default: 10)");
                println!("  -p, --print        Spool receipts as text files");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut store = Store::open(&config)?;
    if !store.sales().is_empty() {
        warn!(
            sales = store.sales().len(),
            "Data directory already has sales, skipping seed"
        );
        return Ok(());
    }

    let catalog = store.items();
    if catalog.is_empty() {
        warn!("Catalog is empty, nothing to sell");
        return Ok(());
    }

    let mut printer = print.then(|| {
        let surface = TextFileSurface::new(config.data_dir.join("spool"), config.paper_width);
        Printer::from_config(surface, &config)
    });

    for bill in 0..bills {
        let line_count = 1 + bill % 4;
        let lines: Vec<CartItem> = (0..line_count)
            .filter_map(|n| {
                let item = catalog[(bill * 3 + n) % catalog.len()].clone();
                let quantity = Decimal::new(5 * (1 + ((bill + n) % 6) as i64), 1);
                let discount = if bill % 5 == 0 { Decimal::from(5) } else { Decimal::ZERO };
                CartItem::new(item, quantity, discount).ok()
            })
            .collect();

        let sale = store.add_sale(lines)?;
        info!(id = %sale.id, total = %sale.total, "Recorded bill");

        if let (Some(printer), Some(receipt)) = (printer.as_mut(), store.receipt(&sale.id)) {
            printer.print(&receipt);
        }
    }

    for &(name, rupees, note) in CUSTOMERS {
        store.add_udhaar_entry(NewUdhaarEntry {
            customer_name: name.to_string(),
            amount: Money::from_rupees_paise(rupees, 0),
            note: note.map(str::to_string),
        })?;
    }
    if let Some(first) = store.udhaar().first() {
        store.mark_udhaar_paid(&first.id);
    }

    for &(description, rupees) in EXPENSES {
        store.add_expense(NewExpense {
            description: description.to_string(),
            amount: Money::from_rupees_paise(rupees, 0),
        })?;
    }

    let summary = store.summary(Utc::now());
    info!(
        dir = %config.data_dir.display(),
        bills = summary.today_bill_count,
        revenue = %summary.today_revenue,
        net_profit = %summary.net_profit,
        outstanding = %summary.outstanding_udhaar,
        "Seed complete"
    );

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kirana=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
