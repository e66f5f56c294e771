//! # Repository Module
//!
//! Database repository implementations for cash reconciliation.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  API layer                                                             │
//! │       │                                                                 │
//! │       │  db.sessions().close_session(id, actual, notes)                │
//! │       ▼                                                                 │
//! │  CashSessionRepository                                                 │
//! │  ├── start_session / close_session                                     │
//! │  ├── approve_variance / reject_variance                                │
//! │  └── get_by_id / list                                                  │
//! │       │                                                                 │
//! │       │  status-guarded SQL                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  The repositories are the ONLY write path: every state-machine         │
//! │  mutation goes through them, which is what keeps the ledgers and       │
//! │  the session record consistent under concurrency.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`session::CashSessionRepository`] - Session lifecycle and approval
//! - [`collection::CashCollectionRepository`] - Append-only collection ledger
//! - [`deposit::BankDepositRepository`] - Bank deposit ledger

pub mod collection;
pub mod deposit;
pub mod session;
