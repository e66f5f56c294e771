//! # veld-core: Pure Business Logic for Veld Cash Reconciliation
//!
//! This crate is the **heart** of Veld's cash-handling subsystem. It
//! contains all reconciliation business logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Veld Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Admin Front End (React)                         │   │
//! │  │   Collections UI ──► Close/Count UI ──► Approval UI ──► Reports │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST (out of scope here)               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ veld-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  session  │  │  policy   │  │   │
//! │  │   │  Session  │  │   Money   │  │ close math│  │ 5% rule   │  │   │
//! │  │   │Collection │  │  pct_of   │  │ guards    │  │ banding   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │  report   │  │ validation│                                 │   │
//! │  │   │ rollups   │  │   rules   │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    veld-db (Database Layer)                     │   │
//! │  │         SQLite ledgers, sessions, migrations, repositories      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CashSession, CashCollection, BankDeposit)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`session`] - Close-time arithmetic and transition guards
//! - [`policy`] - Variance approval threshold and banding
//! - [`report`] - Fleet-level reconciliation rollups
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use veld_core::money::Money;
//! use veld_core::session::compute_close;
//!
//! // R500 float, R500 collected, R980 counted
//! let figures = compute_close(
//!     Money::from_cents(50_000),
//!     Money::from_cents(50_000),
//!     Money::from_cents(98_000),
//! );
//!
//! assert_eq!(figures.variance.cents(), -2_000); // R20 short
//! assert_eq!(figures.variance_percentage, -2.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod policy;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use veld_core::Money` instead of
// `use veld_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use policy::{requires_approval, VarianceBand, APPROVAL_THRESHOLD_PERCENT};
pub use report::{largest_variances, summarize, ReconciliationSummary};
pub use session::{compute_close, CloseFigures};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tenant ID for v0.1 (single-tenant runtime with multi-tenant schema)
///
/// ## Why a constant?
/// v0.1 is single-tenant, but the database schema includes tenant_id for
/// future multi-tenancy. This constant is used throughout the codebase
/// and will be replaced with dynamic tenant resolution later.
pub const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";
