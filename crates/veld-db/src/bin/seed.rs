//! # Seed Data Generator
//!
//! Populates the database with demo reconciliation data for development.
//!
//! ## Usage
//! ```bash
//! # Seed 14 days for 4 agents (default)
//! cargo run -p veld-db --bin seed
//!
//! # Custom shape
//! cargo run -p veld-db --bin seed -- --agents 8 --days 30
//!
//! # Specify database path
//! cargo run -p veld-db --bin seed -- --db ./data/veld.db
//! ```
//!
//! ## Generated Data
//! For each agent and day, a full session lifecycle driven through the
//! real repositories (so every status guard and derived figure is the
//! production path):
//! - opening float derived from the agent/day index
//! - 2-5 collections (cash and mobile money) against synthetic orders
//! - close with a deterministic variance: balanced, small (within
//!   tolerance), or large (escalates past the 5% threshold)
//! - approval/rejection decisions for a share of closed sessions
//! - a bank deposit for most closed sessions, some confirmed
//!
//! Values are derived from indices, not random, so reseeding a fresh
//! database always produces the same fleet.

use std::env;

use chrono::{Duration, Utc};
use veld_core::report::summarize;
use veld_core::{requires_approval, PaymentMethod};

use veld_db::{Database, DbConfig, NewBankDeposit, NewCashCollection, NewCashSession, SessionFilter};

/// Agent roster for demo data.
const AGENTS: &[(&str, &str)] = &[
    ("AGT-001", "Thandi Mokoena"),
    ("AGT-002", "Sipho Dlamini"),
    ("AGT-003", "Lerato Ndlovu"),
    ("AGT-004", "Pieter van Wyk"),
    ("AGT-005", "Naledi Khumalo"),
    ("AGT-006", "Johan Botha"),
    ("AGT-007", "Zanele Mthembu"),
    ("AGT-008", "Kagiso Molefe"),
];

/// Customer roster for collection records.
const CUSTOMERS: &[(&str, &str)] = &[
    ("CUST-101", "Khayelitsha Spaza"),
    ("CUST-102", "Soweto Corner Store"),
    ("CUST-103", "Mamelodi Mini-Mart"),
    ("CUST-104", "Umlazi Trading"),
    ("CUST-105", "Tembisa Wholesalers"),
];

const BANKS: &[&str] = &["First National", "Standard", "Capitec"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug surfaces the repository-level tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut agents: usize = 4;
    let mut days: i64 = 14;
    let mut db_path = String::from("./veld_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--agents" | "-a" => {
                if i + 1 < args.len() {
                    agents = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "--days" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14);
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
                println!("Veld Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -a, --agents <N>   Number of agents (default: 4, max: 8)");
                println!("      --days <N>     Days of history (default: 14)");
                println!("  -d, --db <PATH>    Database file path (default: ./veld_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let agents = agents.min(AGENTS.len());

    println!("🌱 Veld Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Agents:   {}", agents);
    println!("Days:     {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check for existing data
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cash_sessions")
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} sessions", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating sessions...");

    let today = Utc::now().date_naive();
    let mut generated = 0_usize;
    let start = std::time::Instant::now();

    for (agent_idx, (agent_id, agent_name)) in AGENTS.iter().take(agents).enumerate() {
        // Oldest day first so each session can be closed before the
        // agent's next one starts (one open session per agent).
        for day in (0..days).rev() {
            let seed = agent_idx * 1000 + day as usize;
            let session_date = today - Duration::days(day);

            let opening_float_cents = 20_000 + ((seed * 13) % 8) as i64 * 5_000;

            let session = db
                .sessions()
                .start_session(NewCashSession {
                    agent_id: agent_id.to_string(),
                    agent_name: agent_name.to_string(),
                    session_date: Some(session_date),
                    opening_float_cents,
                    notes: None,
                })
                .await?;

            // 2-5 collections per session
            let collection_count = 2 + seed % 4;
            let mut collected_cents = 0_i64;
            for c in 0..collection_count {
                let (customer_id, customer_name) = CUSTOMERS[(seed + c) % CUSTOMERS.len()];
                let amount_cents = 5_000 + ((seed * 7 + c * 31) % 450) as i64 * 100;
                collected_cents += amount_cents;

                let method = if (seed + c) % 3 == 0 {
                    PaymentMethod::MobileMoney
                } else {
                    PaymentMethod::Cash
                };

                db.collections()
                    .record(NewCashCollection {
                        session_id: session.id.clone(),
                        order_id: format!("ORD-{:03}-{:04}-{}", agent_idx + 1, seed, c),
                        customer_id: customer_id.to_string(),
                        customer_name: customer_name.to_string(),
                        amount_cents,
                        payment_method: method,
                    })
                    .await?;
            }

            // Today's session stays open for one agent in three.
            if day == 0 && agent_idx % 3 == 0 {
                generated += 1;
                continue;
            }

            let expected_cents = opening_float_cents + collected_cents;

            // Deterministic variance mix: mostly balanced, some small
            // shortages/overages, the occasional large shortage.
            let variance_cents = match seed % 7 {
                0 => -(expected_cents / 8), // ~12.5% short, escalates
                1 => -2_00 - (seed % 15) as i64 * 100,
                2 => 1_00 + (seed % 10) as i64 * 100,
                _ => 0,
            };
            let actual_cents = (expected_cents + variance_cents).max(0);

            let closed = db
                .sessions()
                .close_session(&session.id, actual_cents, None)
                .await?;

            // Managers decide flagged sessions, and some in-tolerance ones.
            if requires_approval(&closed) {
                if seed % 2 == 0 {
                    db.sessions()
                        .approve_variance(&closed.id, "MGR-001", Some("recount confirmed"))
                        .await?;
                } else {
                    db.sessions()
                        .reject_variance(&closed.id, "MGR-001", Some("sent back for recount"))
                        .await?;
                }
            } else if seed % 5 == 0 {
                db.sessions()
                    .approve_variance(&closed.id, "MGR-002", None)
                    .await?;
            }

            // Most closed sessions bank their takings.
            if seed % 4 != 3 && collected_cents > 0 {
                let deposit = db
                    .deposits()
                    .record(NewBankDeposit {
                        session_id: session.id.clone(),
                        amount_cents: collected_cents,
                        bank_name: BANKS[seed % BANKS.len()].to_string(),
                        reference_number: format!("DEP-{:03}-{:05}", agent_idx + 1, seed),
                        deposit_date: Some(session_date),
                    })
                    .await?;
                if seed % 3 == 0 {
                    db.deposits().confirm(&deposit.id).await?;
                }
            }

            generated += 1;
            if generated % 25 == 0 {
                println!("  Generated {} sessions...", generated);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} sessions in {:?}", generated, elapsed);

    // Fleet summary over everything just seeded
    let sessions = db.sessions().list(SessionFilter::default()).await?;
    let summary = summarize(&sessions);
    println!();
    println!("Fleet summary:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
