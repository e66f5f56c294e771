//! # Session Close Arithmetic
//!
//! The pure math behind the cash session state machine.
//!
//! ## Close-Time Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Closing a Session                                 │
//! │                                                                         │
//! │  opening_float ─────────┐                                               │
//! │                         ├──► expected_cash = float + collected          │
//! │  Σ collection ledger ───┘              │                                │
//! │                                        ▼                                │
//! │  actual_cash (counted) ──────► variance = actual - expected             │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                     variance_percentage = variance / expected × 100     │
//! │                     (defined as 0 when expected == 0)                   │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                     approval policy (policy module)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module is deliberately free of persistence concerns: the
//! repository layer reads the ledger total, calls [`compute_close`], and
//! writes the resulting figures in one transaction. Keeping the
//! arithmetic here means the conservation and sign-convention properties
//! are testable without a database.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CashSession, SessionStatus};

// =============================================================================
// Close Figures
// =============================================================================

/// The derived figures written exactly once when a session closes.
///
/// ## Invariant
/// Once computed these never change, even if the session is later
/// approved or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloseFigures {
    /// opening_float + total collected.
    pub expected_cash: Money,
    /// Operator-counted cash.
    pub actual_cash: Money,
    /// actual - expected. Negative = shortage, positive = overage.
    pub variance: Money,
    /// variance as a percentage of expected cash; 0 when expected is 0.
    pub variance_percentage: f64,
}

/// Computes the close-time figures for a session.
///
/// ## Arguments
/// * `opening_float` - cash the agent started with (non-negative)
/// * `total_collected` - exact sum of the session's collection ledger
/// * `actual_cash` - cash counted by the operator at close (non-negative)
///
/// ## The Zero-Expected Edge Case
/// If `expected_cash == 0` (no opening float and no collections) the
/// percentage is 0 even though the variance amount may be nonzero (an
/// unexplained positive count). The amount/percentage asymmetry is part
/// of the reconciliation contract — see [`Money::percentage_of`].
///
/// ## Example
/// ```rust
/// use veld_core::money::Money;
/// use veld_core::session::compute_close;
///
/// let figures = compute_close(
///     Money::from_cents(50_000),  // R500 float
///     Money::from_cents(50_000),  // R500 collected
///     Money::from_cents(98_000),  // R980 counted
/// );
/// assert_eq!(figures.expected_cash.cents(), 100_000);
/// assert_eq!(figures.variance.cents(), -2_000);
/// assert_eq!(figures.variance_percentage, -2.0);
/// ```
pub fn compute_close(
    opening_float: Money,
    total_collected: Money,
    actual_cash: Money,
) -> CloseFigures {
    let expected_cash = opening_float + total_collected;
    let variance = actual_cash - expected_cash;
    let variance_percentage = variance.percentage_of(expected_cash);

    CloseFigures {
        expected_cash,
        actual_cash,
        variance,
        variance_percentage,
    }
}

// =============================================================================
// Transition Guards
// =============================================================================

/// Checks that `session` is in `required` status before an operation.
///
/// Repositories enforce the same rule again with status-guarded SQL (the
/// authoritative check under concurrency); this guard exists so callers
/// holding a session in memory get the typed failure without a round
/// trip.
pub fn ensure_status(
    session: &CashSession,
    required: SessionStatus,
    operation: &'static str,
) -> CoreResult<()> {
    if session.status != required {
        return Err(CoreError::InvalidSessionState {
            session_id: session.id.clone(),
            current_status: session.status,
            operation,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
