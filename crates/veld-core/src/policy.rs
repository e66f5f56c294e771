//! # Variance Approval Policy
//!
//! Decides whether a closed session needs a manager's eyes.
//!
//! ## Policy Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 |variance %|  banding                                   │
//! │                                                                         │
//! │   0%          2%              5%                                        │
//! │   ├───────────┼───────────────┼──────────────────────────────►          │
//! │   within      review          escalate                                  │
//! │   tolerance   (yellow badge)  (requires approval)                       │
//! │                                                                         │
//! │   The 5% boundary is EXCLUSIVE on the "requires" side:                  │
//! │   exactly 5.0% does NOT require approval; 5.0001% does.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The threshold drives review prioritization, not a hard gate: a
//! manager may approve or reject any closed session, including one
//! within tolerance. Sessions within tolerance may also stay `closed`
//! indefinitely without blocking anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CashSession;

// =============================================================================
// Thresholds
// =============================================================================

/// Sessions with |variance %| strictly above this require approval.
pub const APPROVAL_THRESHOLD_PERCENT: f64 = 5.0;

/// Sessions with |variance %| strictly above this are flagged for review.
pub const REVIEW_THRESHOLD_PERCENT: f64 = 2.0;

// =============================================================================
// Variance Band
// =============================================================================

/// Severity banding of a variance percentage, as surfaced in the
/// approval queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VarianceBand {
    /// |variance %| ≤ 2: acceptable, no action needed.
    WithinTolerance,
    /// 2 < |variance %| ≤ 5: worth a look, does not block.
    Review,
    /// |variance %| > 5: flagged for manager approval.
    Escalate,
}

impl VarianceBand {
    /// Classifies a variance percentage. The sign is irrelevant:
    /// shortages and overages escalate alike.
    pub fn classify(variance_percentage: f64) -> Self {
        let magnitude = variance_percentage.abs();
        if magnitude > APPROVAL_THRESHOLD_PERCENT {
            VarianceBand::Escalate
        } else if magnitude > REVIEW_THRESHOLD_PERCENT {
            VarianceBand::Review
        } else {
            VarianceBand::WithinTolerance
        }
    }
}

// =============================================================================
// Policy Functions
// =============================================================================

/// Whether a session's variance is large enough to require manager
/// approval.
///
/// ## Rules
/// - `true` when the session has a recorded variance percentage with
///   `|pct| > 5`
/// - `false` at exactly 5.0 (boundary is exclusive)
/// - `false` for open sessions (no figures recorded yet)
///
/// ## Example
/// ```rust
/// use veld_core::policy::requires_approval;
/// # use chrono::Utc;
/// # use veld_core::types::{CashSession, SessionStatus};
/// # fn closed_session_with_pct(pct: f64) -> CashSession {
/// #     let now = Utc::now();
/// #     CashSession {
/// #         id: "s".into(), tenant_id: "t".into(), agent_id: "a".into(),
/// #         agent_name: "A".into(), session_date: now.date_naive(),
/// #         opening_float_cents: 0, status: SessionStatus::Closed,
/// #         expected_cash_cents: Some(0), actual_cash_cents: Some(0),
/// #         variance_cents: Some(0), variance_percentage: Some(pct),
/// #         opening_notes: None, closing_notes: None,
/// #         approval_notes: None, approved_by: None,
/// #         opened_at: now, closed_at: Some(now), approved_at: None,
/// #         updated_at: now,
/// #     }
/// # }
/// assert!(!requires_approval(&closed_session_with_pct(-2.0)));
/// assert!(requires_approval(&closed_session_with_pct(-20.0)));
/// ```
pub fn requires_approval(session: &CashSession) -> bool {
    match session.variance_percentage {
        Some(pct) => pct.abs() > APPROVAL_THRESHOLD_PERCENT,
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionStatus;
    use chrono::Utc;

    fn closed_session(variance_percentage: Option<f64>) -> CashSession {
        let now = Utc::now();
        CashSession {
            id: "s-1".to_string(),
            tenant_id: "t-1".to_string(),
            agent_id: "A1".to_string(),
            agent_name: "Agent One".to_string(),
            session_date: now.date_naive(),
            opening_float_cents: 50_000,
            status: SessionStatus::Closed,
            expected_cash_cents: Some(100_000),
            actual_cash_cents: Some(98_000),
            variance_cents: Some(-2_000),
            variance_percentage,
            opening_notes: None,
            closing_notes: None,
            approval_notes: None,
            approved_by: None,
            opened_at: now,
            closed_at: Some(now),
            approved_at: None,
            updated_at: now,
        }
    }

    /// The boundary is exclusive: exactly 5.0 passes, 5.0001 escalates.
    #[test]
    fn test_threshold_boundary() {
        assert!(!requires_approval(&closed_session(Some(5.0))));
        assert!(requires_approval(&closed_session(Some(5.0001))));
        assert!(!requires_approval(&closed_session(Some(-5.0))));
        assert!(requires_approval(&closed_session(Some(-5.0001))));
    }

    #[test]
    fn test_requires_approval_sign_agnostic() {
        assert!(requires_approval(&closed_session(Some(-20.0))));
        assert!(requires_approval(&closed_session(Some(12.5))));
        assert!(!requires_approval(&closed_session(Some(-2.0))));
        assert!(!requires_approval(&closed_session(Some(0.0))));
    }

    #[test]
    fn test_open_session_never_requires_approval() {
        assert!(!requires_approval(&closed_session(None)));
    }

    #[test]
    fn test_band_classification() {
        assert_eq!(VarianceBand::classify(0.0), VarianceBand::WithinTolerance);
        assert_eq!(VarianceBand::classify(-2.0), VarianceBand::WithinTolerance);
        assert_eq!(VarianceBand::classify(2.1), VarianceBand::Review);
        assert_eq!(VarianceBand::classify(-5.0), VarianceBand::Review);
        assert_eq!(VarianceBand::classify(5.0001), VarianceBand::Escalate);
        assert_eq!(VarianceBand::classify(-20.0), VarianceBand::Escalate);
    }
}
