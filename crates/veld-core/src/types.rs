//! # Domain Types
//!
//! Core domain types for cash-session reconciliation.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CashSession   │   │ CashCollection  │   │   BankDeposit   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  agent_id       │   │  session_id(FK) │   │  session_id(FK) │       │
//! │  │  status         │   │  order_id       │   │  reference_no   │       │
//! │  │  opening_float  │   │  amount_cents   │   │  amount_cents   │       │
//! │  │  variance …     │   │  payment_method │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  SessionStatus  │   │ PaymentMethod   │   │  DepositStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Open           │   │  Cash           │   │  Pending        │       │
//! │  │  Closed         │   │  MobileMoney    │   │  Confirmed      │       │
//! │  │  Approved       │   └─────────────────┘   │  Rejected       │       │
//! │  │  Rejected       │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `CashSession` exclusively owns its collections and deposits
//! (composition). Sessions are never deleted, only superseded by status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Session Status
// =============================================================================

/// The status of a cash session.
///
/// ## State Machine
/// ```text
/// open ──► closed ──► approved   (terminal)
///                └──► rejected   (terminal)
/// ```
/// No transition returns to `open`, and nothing leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is accepting collections; no derived figures yet.
    Open,
    /// Session has been counted; expected/actual/variance are frozen.
    Closed,
    /// A manager accepted the variance.
    Approved,
    /// A manager rejected the variance.
    Rejected,
}

impl SessionStatus {
    /// Checks whether the state machine permits `self → next`.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Open, SessionStatus::Closed)
                | (SessionStatus::Closed, SessionStatus::Approved)
                | (SessionStatus::Closed, SessionStatus::Rejected)
        )
    }

    /// Approved and Rejected are terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Approved | SessionStatus::Rejected)
    }

    /// Only open sessions accept collection appends.
    pub fn accepts_collections(self) -> bool {
        matches!(self, SessionStatus::Open)
    }

    /// The lowercase wire name (matches the database and REST payloads).
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Closed => "closed",
            SessionStatus::Approved => "approved",
            SessionStatus::Rejected => "rejected",
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Open
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a collection was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash handed to the agent.
    Cash,
    /// Mobile money transfer recorded against the session.
    MobileMoney,
}

// =============================================================================
// Deposit Status
// =============================================================================

/// Bank-side confirmation state of a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// Recorded by the agent, awaiting bank confirmation.
    Pending,
    /// Matched against a bank statement line.
    Confirmed,
    /// Could not be matched; needs investigation.
    Rejected,
}

impl Default for DepositStatus {
    fn default() -> Self {
        DepositStatus::Pending
    }
}

// =============================================================================
// Cash Session
// =============================================================================

/// A field agent's cash-handling session, from opening float to approval.
///
/// ## Derived Figure Lifecycle
/// `expected_cash_cents`, `actual_cash_cents`, `variance_cents` and
/// `variance_percentage` are `None` while the session is open. The close
/// transaction writes them exactly once; approve/reject never touch them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CashSession {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this session belongs to.
    pub tenant_id: String,

    /// Agent who owns the session.
    pub agent_id: String,

    /// Agent display name, frozen at session start.
    pub agent_name: String,

    /// Calendar date the session covers.
    #[ts(as = "String")]
    pub session_date: NaiveDate,

    /// Cash the agent started with. Non-negative, immutable after start.
    pub opening_float_cents: i64,

    /// Lifecycle status (see [`SessionStatus`]).
    pub status: SessionStatus,

    /// Derived at close: opening float + total collected.
    pub expected_cash_cents: Option<i64>,

    /// Operator-counted cash at close. Non-negative.
    pub actual_cash_cents: Option<i64>,

    /// Derived at close: actual - expected.
    /// Negative = shortage, positive = overage, zero = balanced.
    pub variance_cents: Option<i64>,

    /// Derived at close: variance as a percentage of expected cash.
    /// Defined as 0 when expected cash is 0, even for a nonzero variance.
    pub variance_percentage: Option<f64>,

    /// Free-text notes entered at session start.
    pub opening_notes: Option<String>,

    /// Free-text notes entered at close.
    pub closing_notes: Option<String>,

    /// Free-text notes entered at approval/rejection.
    pub approval_notes: Option<String>,

    /// Manager who approved or rejected; present only once decided.
    pub approved_by: Option<String>,

    /// When the session was opened.
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,

    /// When the session was closed.
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,

    /// When the variance was approved or rejected.
    #[ts(as = "Option<String>")]
    pub approved_at: Option<DateTime<Utc>>,

    /// Last mutation timestamp.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl CashSession {
    /// Returns the opening float as Money.
    #[inline]
    pub fn opening_float(&self) -> Money {
        Money::from_cents(self.opening_float_cents)
    }

    /// Returns the expected cash as Money, if the session has closed.
    #[inline]
    pub fn expected_cash(&self) -> Option<Money> {
        self.expected_cash_cents.map(Money::from_cents)
    }

    /// Returns the counted cash as Money, if the session has closed.
    #[inline]
    pub fn actual_cash(&self) -> Option<Money> {
        self.actual_cash_cents.map(Money::from_cents)
    }

    /// Returns the variance as Money, if the session has closed.
    #[inline]
    pub fn variance(&self) -> Option<Money> {
        self.variance_cents.map(Money::from_cents)
    }

    /// Checks if the session is still collecting.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }

    /// Shortage ⇒ variance < 0.
    pub fn is_shortage(&self) -> bool {
        self.variance_cents.is_some_and(|v| v < 0)
    }

    /// Overage ⇒ variance > 0.
    pub fn is_overage(&self) -> bool {
        self.variance_cents.is_some_and(|v| v > 0)
    }
}

// =============================================================================
// Cash Collection
// =============================================================================

/// A single cash or mobile-money payment recorded against an order
/// during a session. Append-only: immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CashCollection {
    pub id: String,
    /// Owning session (many-to-one).
    pub session_id: String,
    /// Order the payment settles.
    pub order_id: String,
    pub customer_id: String,
    /// Customer display name, frozen at collection time.
    pub customer_name: String,
    /// Collected amount in cents. Always positive.
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub collected_at: DateTime<Utc>,
}

impl CashCollection {
    /// Returns the collected amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Bank Deposit
// =============================================================================

/// A bank deposit attributed to a session.
///
/// Deposits form an independent ledger: they never participate in the
/// variance computation, only in post-hoc bank-side reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BankDeposit {
    pub id: String,
    /// Owning session (many-to-one).
    pub session_id: String,
    /// Deposited amount in cents. Always positive.
    pub amount_cents: i64,
    pub bank_name: String,
    /// Bank slip / transfer reference for statement matching.
    pub reference_number: String,
    #[ts(as = "String")]
    pub deposit_date: NaiveDate,
    pub status: DepositStatus,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl BankDeposit {
    /// Returns the deposited amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use SessionStatus::*;

        assert!(Open.can_transition_to(Closed));
        assert!(Closed.can_transition_to(Approved));
        assert!(Closed.can_transition_to(Rejected));

        // Nothing returns to open, nothing leaves a terminal state.
        assert!(!Closed.can_transition_to(Open));
        assert!(!Approved.can_transition_to(Closed));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Open.can_transition_to(Approved));
        assert!(!Open.can_transition_to(Rejected));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SessionStatus::Open.is_terminal());
        assert!(!SessionStatus::Closed.is_terminal());
        assert!(SessionStatus::Approved.is_terminal());
        assert!(SessionStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_only_open_accepts_collections() {
        assert!(SessionStatus::Open.accepts_collections());
        assert!(!SessionStatus::Closed.accepts_collections());
        assert!(!SessionStatus::Approved.accepts_collections());
        assert!(!SessionStatus::Rejected.accepts_collections());
    }

    #[test]
    fn test_status_default() {
        assert_eq!(SessionStatus::default(), SessionStatus::Open);
        assert_eq!(DepositStatus::default(), DepositStatus::Pending);
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&SessionStatus::Open).unwrap();
        assert_eq!(json, "\"open\"");
        let json = serde_json::to_string(&PaymentMethod::MobileMoney).unwrap();
        assert_eq!(json, "\"mobile_money\"");
        let json = serde_json::to_string(&DepositStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
