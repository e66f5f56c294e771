//! # veld-db: Database Layer for Veld Cash Reconciliation
//!
//! This crate provides database access for the reconciliation subsystem.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Veld Data Flow                                   │
//! │                                                                         │
//! │  API layer (record_collection, close_session, …)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     veld-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ session.rs    │    │  (embedded)  │  │   │
//! │  │   │               │    │ collection.rs │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ deposit.rs    │    │ 001_init.sql │  │   │
//! │  │   │ WAL, FKs      │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (one file per deployment)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (session, collection, deposit)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veld_db::{Database, DbConfig};
//! use veld_db::repository::session::NewCashSession;
//!
//! let db = Database::new(DbConfig::new("path/to/veld.db")).await?;
//!
//! let session = db.sessions().start_session(NewCashSession {
//!     agent_id: "A1".into(),
//!     agent_name: "Thandi M.".into(),
//!     session_date: None,
//!     opening_float_cents: 50_000,
//!     notes: None,
//! }).await?;
//!
//! // ... collections land during the day ...
//!
//! let closed = db.sessions().close_session(&session.id, 98_000, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::collection::{CashCollectionRepository, MethodTotals, NewCashCollection};
pub use repository::deposit::{BankDepositRepository, NewBankDeposit};
pub use repository::session::{CashSessionRepository, NewCashSession, SessionFilter};
