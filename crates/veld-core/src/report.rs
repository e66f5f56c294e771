//! # Reporting Aggregator
//!
//! Read-only rollups across many sessions for management reporting.
//!
//! ## Properties
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  summarize() is a PURE function over a slice of sessions:               │
//! │                                                                         │
//! │  • No side effects — safe to call repeatedly on evolving data          │
//! │  • Idempotent — same input, same output, every time                    │
//! │  • Order-independent — sums and counts only, no sequence dependence    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Different Percentage Aggregates
//! The fleet average of |variance %| is UNWEIGHTED (mean of per-session
//! percentages over all sessions), matching the management screens. The
//! WEIGHTED view is `accuracy_rate`, which compares total absolute
//! variance against total expected cash. They answer different
//! questions and are deliberately not interchangeable.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CashSession;

// =============================================================================
// Summary Type
// =============================================================================

/// Fleet-level reconciliation rollup.
///
/// ## Note on `total_collected_cents`
/// This sums the *actual counted cash* across sessions — the figure the
/// "Total Collected" report card shows. Per-session collected totals
/// (ledger sums) come from the collection repository instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReconciliationSummary {
    pub total_sessions: usize,
    pub open_count: usize,
    pub closed_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,

    /// Σ actual_cash over sessions that recorded one.
    pub total_collected_cents: i64,
    /// Σ expected_cash over sessions that recorded one.
    pub total_expected_cents: i64,
    /// Σ variance (signed; shortages and overages net against each other).
    pub total_variance_cents: i64,

    /// Unweighted mean of |variance %| across ALL sessions; sessions
    /// without figures contribute 0.
    pub average_abs_variance_percentage: f64,

    /// Sessions whose variance is nonzero.
    pub sessions_with_variance: usize,
    /// Sessions with variance < 0, and their total as an absolute value.
    pub shortage_count: usize,
    pub shortage_total_cents: i64,
    /// Sessions with variance > 0, and their total.
    pub overage_count: usize,
    pub overage_total_cents: i64,

    /// (1 - |total variance| / total expected) × 100.
    /// Defined as 100.0 when total expected is 0 — no expected cash
    /// means nothing to miss.
    pub accuracy_rate: f64,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Rolls a set of sessions up into a [`ReconciliationSummary`].
///
/// ## Example
/// ```rust
/// use veld_core::report::summarize;
///
/// let summary = summarize(&[]);
/// assert_eq!(summary.total_sessions, 0);
/// assert_eq!(summary.accuracy_rate, 100.0);
/// ```
pub fn summarize(sessions: &[CashSession]) -> ReconciliationSummary {
    let mut summary = ReconciliationSummary {
        total_sessions: sessions.len(),
        open_count: 0,
        closed_count: 0,
        approved_count: 0,
        rejected_count: 0,
        total_collected_cents: 0,
        total_expected_cents: 0,
        total_variance_cents: 0,
        average_abs_variance_percentage: 0.0,
        sessions_with_variance: 0,
        shortage_count: 0,
        shortage_total_cents: 0,
        overage_count: 0,
        overage_total_cents: 0,
        accuracy_rate: 100.0,
    };

    let mut abs_percentage_sum = 0.0_f64;

    for session in sessions {
        match session.status {
            crate::types::SessionStatus::Open => summary.open_count += 1,
            crate::types::SessionStatus::Closed => summary.closed_count += 1,
            crate::types::SessionStatus::Approved => summary.approved_count += 1,
            crate::types::SessionStatus::Rejected => summary.rejected_count += 1,
        }

        summary.total_collected_cents += session.actual_cash_cents.unwrap_or(0);
        summary.total_expected_cents += session.expected_cash_cents.unwrap_or(0);

        let variance = session.variance_cents.unwrap_or(0);
        summary.total_variance_cents += variance;
        abs_percentage_sum += session.variance_percentage.unwrap_or(0.0).abs();

        if variance != 0 {
            summary.sessions_with_variance += 1;
        }
        if variance < 0 {
            summary.shortage_count += 1;
            summary.shortage_total_cents += variance.abs();
        } else if variance > 0 {
            summary.overage_count += 1;
            summary.overage_total_cents += variance;
        }
    }

    if summary.total_sessions > 0 {
        summary.average_abs_variance_percentage =
            abs_percentage_sum / summary.total_sessions as f64;
    }

    if summary.total_expected_cents > 0 {
        let missed = Money::from_cents(summary.total_variance_cents).abs();
        summary.accuracy_rate =
            (1.0 - missed.cents() as f64 / summary.total_expected_cents as f64) * 100.0;
    }

    summary
}

/// The sessions with the largest absolute variances, descending.
///
/// Sessions that balanced exactly (or have no figures yet) are excluded;
/// at most `limit` are returned. Backs the "largest variances" report
/// table.
pub fn largest_variances(sessions: &[CashSession], limit: usize) -> Vec<&CashSession> {
    let mut with_variance: Vec<&CashSession> = sessions
        .iter()
        .filter(|s| s.variance_cents.is_some_and(|v| v != 0))
        .collect();

    with_variance.sort_by_key(|s| std::cmp::Reverse(s.variance_cents.unwrap_or(0).abs()));
    with_variance.truncate(limit);
    with_variance
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionStatus;
    use chrono::Utc;

    fn session(
        id: &str,
        status: SessionStatus,
        figures: Option<(i64, i64)>, // (expected, actual)
    ) -> CashSession {
        let now = Utc::now();
        let (expected, actual, variance, pct) = match figures {
            Some((e, a)) => {
                let v = a - e;
                let pct = Money::from_cents(v).percentage_of(Money::from_cents(e));
                (Some(e), Some(a), Some(v), Some(pct))
            }
            None => (None, None, None, None),
        };
        CashSession {
            id: id.to_string(),
            tenant_id: "t-1".to_string(),
            agent_id: "A1".to_string(),
            agent_name: "Agent One".to_string(),
            session_date: now.date_naive(),
            opening_float_cents: 0,
            status,
            expected_cash_cents: expected,
            actual_cash_cents: actual,
            variance_cents: variance,
            variance_percentage: pct,
            opening_notes: None,
            closing_notes: None,
            approval_notes: None,
            approved_by: None,
            opened_at: now,
            closed_at: None,
            approved_at: None,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.open_count, 0);
        assert_eq!(summary.shortage_count, 0);
        assert_eq!(summary.total_variance_cents, 0);
        assert_eq!(summary.average_abs_variance_percentage, 0.0);
        assert_eq!(summary.accuracy_rate, 100.0);
    }

    /// Worked scenario: two closed sessions at -20 and -200 against
    /// 1000 expected each.
    #[test]
    fn test_summary_of_two_shortages() {
        let sessions = vec![
            session("s-1", SessionStatus::Closed, Some((100_000, 98_000))),
            session("s-2", SessionStatus::Closed, Some((100_000, 80_000))),
        ];

        let summary = summarize(&sessions);
        assert_eq!(summary.total_sessions, 2);
        assert_eq!(summary.closed_count, 2);
        assert_eq!(summary.total_variance_cents, -22_000);
        assert_eq!(summary.shortage_count, 2);
        assert_eq!(summary.shortage_total_cents, 22_000);
        assert_eq!(summary.overage_count, 0);
        assert_eq!(summary.overage_total_cents, 0);

        // Unweighted mean of |−2%| and |−20%|.
        assert!((summary.average_abs_variance_percentage - 11.0).abs() < 1e-9);

        // Weighted: 22_000 missed of 200_000 expected → 89%.
        assert!((summary.accuracy_rate - 89.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_mixed_statuses_and_signs() {
        let sessions = vec![
            session("s-1", SessionStatus::Open, None),
            session("s-2", SessionStatus::Closed, Some((50_000, 50_000))),
            session("s-3", SessionStatus::Approved, Some((100_000, 101_000))),
            session("s-4", SessionStatus::Rejected, Some((100_000, 90_000))),
        ];

        let summary = summarize(&sessions);
        assert_eq!(summary.open_count, 1);
        assert_eq!(summary.closed_count, 1);
        assert_eq!(summary.approved_count, 1);
        assert_eq!(summary.rejected_count, 1);

        assert_eq!(summary.sessions_with_variance, 2);
        assert_eq!(summary.shortage_count, 1);
        assert_eq!(summary.shortage_total_cents, 10_000);
        assert_eq!(summary.overage_count, 1);
        assert_eq!(summary.overage_total_cents, 1_000);
        assert_eq!(summary.total_variance_cents, -9_000);
    }

    /// Idempotent and order-independent: same sessions, any order,
    /// identical summary.
    #[test]
    fn test_summary_is_order_independent() {
        let mut sessions = vec![
            session("s-1", SessionStatus::Closed, Some((100_000, 98_000))),
            session("s-2", SessionStatus::Approved, Some((50_000, 51_000))),
            session("s-3", SessionStatus::Open, None),
        ];

        let first = summarize(&sessions);
        let again = summarize(&sessions);
        assert_eq!(first, again);

        sessions.reverse();
        let reversed = summarize(&sessions);
        assert_eq!(first, reversed);
    }

    #[test]
    fn test_zero_expected_fleet_reports_full_accuracy() {
        // A session with zero expected and an unexplained count: the
        // variance amount flows into totals, but accuracy stays 100
        // because there was nothing to miss.
        let sessions = vec![session("s-1", SessionStatus::Closed, Some((0, 700)))];
        let summary = summarize(&sessions);
        assert_eq!(summary.total_variance_cents, 700);
        assert_eq!(summary.accuracy_rate, 100.0);
        assert_eq!(summary.average_abs_variance_percentage, 0.0);
    }

    #[test]
    fn test_largest_variances() {
        let sessions = vec![
            session("small", SessionStatus::Closed, Some((100_000, 99_500))),
            session("balanced", SessionStatus::Closed, Some((100_000, 100_000))),
            session("large", SessionStatus::Closed, Some((100_000, 80_000))),
            session("medium", SessionStatus::Approved, Some((100_000, 105_000))),
        ];

        let top = largest_variances(&sessions, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "large");
        assert_eq!(top[1].id, "medium");

        let all = largest_variances(&sessions, 10);
        assert_eq!(all.len(), 3); // balanced session excluded
    }
}
