//! # Cash Session Repository
//!
//! Database operations for the cash session state machine.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cash Session Lifecycle                              │
//! │                                                                         │
//! │  1. START                                                              │
//! │     └── start_session() → CashSession { status: Open }                 │
//! │                                                                         │
//! │  2. COLLECT (collection repository)                                    │
//! │     └── record() → CashCollection  (append-only, open sessions only)   │
//! │                                                                         │
//! │  3. CLOSE                                                              │
//! │     └── close_session() → status: Closed                               │
//! │         ├── First effect: status leaves Open (no more collections)     │
//! │         ├── Reads the ledger SUM inside the same transaction           │
//! │         └── Writes expected/actual/variance figures exactly once       │
//! │                                                                         │
//! │  4. DECIDE                                                             │
//! │     ├── approve_variance() → status: Approved (terminal)               │
//! │     └── reject_variance()  → status: Rejected (terminal)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Guards
//! Every transition is a status-guarded `UPDATE … WHERE status = …`
//! checked via `rows_affected()`. Under concurrency the guard is the
//! authoritative check: a lost race surfaces as the same typed
//! `InvalidSessionState` a stale caller would get, never as a silent
//! double transition.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use veld_core::session::compute_close;
use veld_core::validation::{
    validate_actual_cash, validate_notes, validate_opening_float, validate_required_id,
};
use veld_core::{CashSession, CoreError, Money, SessionStatus, DEFAULT_TENANT_ID};

/// Column list shared by every SELECT returning a full session row.
const SESSION_COLUMNS: &str = "id, tenant_id, agent_id, agent_name, session_date, \
     opening_float_cents, status, expected_cash_cents, actual_cash_cents, \
     variance_cents, variance_percentage, opening_notes, closing_notes, \
     approval_notes, approved_by, opened_at, closed_at, approved_at, updated_at";

// =============================================================================
// Input Types
// =============================================================================

/// Input for starting a session.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewCashSession {
    pub agent_id: String,
    pub agent_name: String,
    /// Defaults to today (UTC) when not supplied.
    pub session_date: Option<NaiveDate>,
    /// Cash the agent starts with. Must be >= 0.
    pub opening_float_cents: i64,
    pub notes: Option<String>,
}

/// Filter for session listings (approval queue, reports, agent views).
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub status: Option<SessionStatus>,
    pub agent_id: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl SessionFilter {
    /// Restricts to a single status.
    pub fn status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a single agent.
    pub fn agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Restricts to an inclusive session-date range.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cash session database operations.
#[derive(Debug, Clone)]
pub struct CashSessionRepository {
    pool: SqlitePool,
}

impl CashSessionRepository {
    /// Creates a new CashSessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashSessionRepository { pool }
    }

    /// Gets a session by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CashSession>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM cash_sessions WHERE id = ?1");
        let session = sqlx::query_as::<_, CashSession>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Gets the agent's currently open session, if any.
    pub async fn find_open_by_agent(&self, agent_id: &str) -> DbResult<Option<CashSession>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM cash_sessions \
             WHERE agent_id = ?1 AND status = 'open' LIMIT 1"
        );
        let session = sqlx::query_as::<_, CashSession>(&sql)
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Lists sessions matching a filter, newest first.
    pub async fn list(&self, filter: SessionFilter) -> DbResult<Vec<CashSession>> {
        let mut qb = sqlx::QueryBuilder::new(format!(
            "SELECT {SESSION_COLUMNS} FROM cash_sessions WHERE 1 = 1"
        ));

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(agent_id) = filter.agent_id {
            qb.push(" AND agent_id = ").push_bind(agent_id);
        }
        if let Some(from) = filter.from_date {
            qb.push(" AND session_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to_date {
            qb.push(" AND session_date <= ").push_bind(to);
        }

        qb.push(" ORDER BY session_date DESC, opened_at DESC");

        let sessions = qb
            .build_query_as::<CashSession>()
            .fetch_all(&self.pool)
            .await?;

        Ok(sessions)
    }

    /// Starts a new session for an agent.
    ///
    /// ## Preconditions
    /// - `opening_float_cents >= 0`
    /// - the agent has no other open session (checked here, backstopped
    ///   by a partial unique index on `(agent_id) WHERE status = 'open'`)
    ///
    /// ## Returns
    /// The created session in Open status with no derived figures.
    pub async fn start_session(&self, new: NewCashSession) -> DbResult<CashSession> {
        validate_required_id("agent_id", &new.agent_id).map_err(CoreError::from)?;
        validate_required_id("agent_name", &new.agent_name).map_err(CoreError::from)?;
        validate_opening_float(new.opening_float_cents)?;
        validate_notes(new.notes.as_deref()).map_err(CoreError::from)?;

        if let Some(existing) = self.find_open_by_agent(&new.agent_id).await? {
            return Err(CoreError::InvalidSessionState {
                session_id: existing.id,
                current_status: existing.status,
                operation: "start another session for the same agent",
            }
            .into());
        }

        let now = Utc::now();
        let session = CashSession {
            id: Uuid::new_v4().to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            agent_id: new.agent_id,
            agent_name: new.agent_name,
            session_date: new.session_date.unwrap_or_else(|| now.date_naive()),
            opening_float_cents: new.opening_float_cents,
            status: SessionStatus::Open,
            expected_cash_cents: None,
            actual_cash_cents: None,
            variance_cents: None,
            variance_percentage: None,
            opening_notes: new.notes,
            closing_notes: None,
            approval_notes: None,
            approved_by: None,
            opened_at: now,
            closed_at: None,
            approved_at: None,
            updated_at: now,
        };

        debug!(id = %session.id, agent = %session.agent_id, "Creating cash session");

        sqlx::query(
            "INSERT INTO cash_sessions (
                id, tenant_id, agent_id, agent_name, session_date,
                opening_float_cents, status, expected_cash_cents,
                actual_cash_cents, variance_cents, variance_percentage,
                opening_notes, closing_notes, approval_notes, approved_by,
                opened_at, closed_at, approved_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13, ?14, ?15,
                ?16, ?17, ?18, ?19
            )",
        )
        .bind(&session.id)
        .bind(&session.tenant_id)
        .bind(&session.agent_id)
        .bind(&session.agent_name)
        .bind(session.session_date)
        .bind(session.opening_float_cents)
        .bind(session.status)
        .bind(session.expected_cash_cents)
        .bind(session.actual_cash_cents)
        .bind(session.variance_cents)
        .bind(session.variance_percentage)
        .bind(&session.opening_notes)
        .bind(&session.closing_notes)
        .bind(&session.approval_notes)
        .bind(&session.approved_by)
        .bind(session.opened_at)
        .bind(session.closed_at)
        .bind(session.approved_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            session_id = %session.id,
            agent_id = %session.agent_id,
            opening_float = %session.opening_float(),
            "Cash session started"
        );

        Ok(session)
    }

    /// Closes a session against an operator-counted cash amount.
    ///
    /// ## What This Does (one transaction)
    /// 1. Flips `status` Open → Closed as the FIRST effect, so no
    ///    further collection append can pass its status guard
    /// 2. Reads the ledger `SUM` — every append that serialized before
    ///    the flip is included, nothing after can exist
    /// 3. Computes the derived figures in veld-core and writes them
    ///    exactly once
    ///
    /// ## Failures
    /// - `InvalidAmount` if `actual_cash_cents < 0`
    /// - `SessionNotFound` if the session does not exist
    /// - `InvalidSessionState` if already closed/approved/rejected
    pub async fn close_session(
        &self,
        session_id: &str,
        actual_cash_cents: i64,
        notes: Option<&str>,
    ) -> DbResult<CashSession> {
        validate_actual_cash(actual_cash_cents)?;
        validate_notes(notes).map_err(CoreError::from)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // First effect: leave Open. Concurrent collection appends
        // serialize against this write and are rejected afterwards.
        let flipped = sqlx::query(
            "UPDATE cash_sessions SET status = 'closed', updated_at = ?2
             WHERE id = ?1 AND status = 'open'",
        )
        .bind(session_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            let current: Option<SessionStatus> =
                sqlx::query_scalar("SELECT status FROM cash_sessions WHERE id = ?1")
                    .bind(session_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match current {
                None => CoreError::SessionNotFound(session_id.to_string()).into(),
                Some(current_status) => CoreError::InvalidSessionState {
                    session_id: session_id.to_string(),
                    current_status,
                    operation: "close",
                }
                .into(),
            });
        }

        let opening_float_cents: i64 =
            sqlx::query_scalar("SELECT opening_float_cents FROM cash_sessions WHERE id = ?1")
                .bind(session_id)
                .fetch_one(&mut *tx)
                .await?;

        // Recomputed from the append-only ledger, never a cached counter.
        let total_collected: Option<i64> =
            sqlx::query_scalar("SELECT SUM(amount_cents) FROM cash_collections WHERE session_id = ?1")
                .bind(session_id)
                .fetch_one(&mut *tx)
                .await?;

        let figures = compute_close(
            Money::from_cents(opening_float_cents),
            Money::from_cents(total_collected.unwrap_or(0)),
            Money::from_cents(actual_cash_cents),
        );

        sqlx::query(
            "UPDATE cash_sessions SET
                expected_cash_cents = ?2,
                actual_cash_cents = ?3,
                variance_cents = ?4,
                variance_percentage = ?5,
                closing_notes = ?6,
                closed_at = ?7,
                updated_at = ?7
             WHERE id = ?1",
        )
        .bind(session_id)
        .bind(figures.expected_cash.cents())
        .bind(figures.actual_cash.cents())
        .bind(figures.variance.cents())
        .bind(figures.variance_percentage)
        .bind(notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            session_id = %session_id,
            expected = %figures.expected_cash,
            actual = %figures.actual_cash,
            variance = %figures.variance,
            variance_pct = figures.variance_percentage,
            "Cash session closed"
        );

        self.get_by_id(session_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashSession", session_id))
    }

    /// Approves a closed session's variance.
    ///
    /// Approval is a manual, auditable action regardless of whether the
    /// policy flags the session — a manager may approve an in-tolerance
    /// variance.
    pub async fn approve_variance(
        &self,
        session_id: &str,
        approver_id: &str,
        notes: Option<&str>,
    ) -> DbResult<CashSession> {
        self.decide(session_id, approver_id, notes, SessionStatus::Approved, "approve")
            .await
    }

    /// Rejects a closed session's variance. Symmetric with approval.
    pub async fn reject_variance(
        &self,
        session_id: &str,
        approver_id: &str,
        notes: Option<&str>,
    ) -> DbResult<CashSession> {
        self.decide(session_id, approver_id, notes, SessionStatus::Rejected, "reject")
            .await
    }

    /// Shared approve/reject transition.
    ///
    /// A second decision on an already-decided session fails the status
    /// guard and surfaces as `InvalidSessionState` — one audit trail per
    /// session, never a silent overwrite.
    async fn decide(
        &self,
        session_id: &str,
        approver_id: &str,
        notes: Option<&str>,
        verdict: SessionStatus,
        operation: &'static str,
    ) -> DbResult<CashSession> {
        validate_required_id("approver_id", approver_id).map_err(CoreError::from)?;
        validate_notes(notes).map_err(CoreError::from)?;

        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE cash_sessions SET
                status = ?2,
                approved_by = ?3,
                approval_notes = ?4,
                approved_at = ?5,
                updated_at = ?5
             WHERE id = ?1 AND status = 'closed'",
        )
        .bind(session_id)
        .bind(verdict)
        .bind(approver_id)
        .bind(notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current: Option<SessionStatus> =
                sqlx::query_scalar("SELECT status FROM cash_sessions WHERE id = ?1")
                    .bind(session_id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match current {
                None => CoreError::SessionNotFound(session_id.to_string()).into(),
                Some(current_status) => CoreError::InvalidSessionState {
                    session_id: session_id.to_string(),
                    current_status,
                    operation,
                }
                .into(),
            });
        }

        info!(
            session_id = %session_id,
            approver_id = %approver_id,
            verdict = ?verdict,
            "Variance decision recorded"
        );

        self.get_by_id(session_id)
            .await?
            .ok_or_else(|| DbError::not_found("CashSession", session_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::collection::NewCashCollection;
    use veld_core::{requires_approval, PaymentMethod};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_session(agent_id: &str, opening_float_cents: i64) -> NewCashSession {
        NewCashSession {
            agent_id: agent_id.to_string(),
            agent_name: format!("Agent {agent_id}"),
            session_date: None,
            opening_float_cents,
            notes: None,
        }
    }

    fn collection(session_id: &str, cents: i64, method: PaymentMethod) -> NewCashCollection {
        NewCashCollection {
            session_id: session_id.to_string(),
            order_id: format!("ord-{cents}"),
            customer_id: "c-1".to_string(),
            customer_name: "Spaza One".to_string(),
            amount_cents: cents,
            payment_method: method,
        }
    }

    fn domain(err: DbError) -> CoreError {
        match err {
            DbError::Domain(core) => core,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_session() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 50_000))
            .await
            .unwrap();

        assert_eq!(session.status, SessionStatus::Open);
        assert_eq!(session.opening_float_cents, 50_000);
        assert!(session.expected_cash_cents.is_none());
        assert!(session.actual_cash_cents.is_none());
        assert!(session.variance_cents.is_none());
        assert!(session.approved_by.is_none());

        let fetched = db.sessions().get_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.agent_id, "A1");
        assert_eq!(fetched.status, SessionStatus::Open);
    }

    #[tokio::test]
    async fn test_start_session_rejects_negative_float() {
        let db = test_db().await;
        let err = db
            .sessions()
            .start_session(new_session("A1", -1))
            .await
            .unwrap_err();

        assert!(matches!(
            domain(err),
            CoreError::InvalidAmount {
                field: "opening_float",
                cents: -1
            }
        ));
    }

    #[tokio::test]
    async fn test_one_open_session_per_agent() {
        let db = test_db().await;
        let first = db
            .sessions()
            .start_session(new_session("A1", 10_000))
            .await
            .unwrap();

        let err = db
            .sessions()
            .start_session(new_session("A1", 20_000))
            .await
            .unwrap_err();
        match domain(err) {
            CoreError::InvalidSessionState { session_id, .. } => {
                assert_eq!(session_id, first.id);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Closing the first frees the agent to start again.
        db.sessions()
            .close_session(&first.id, 10_000, None)
            .await
            .unwrap();
        db.sessions()
            .start_session(new_session("A1", 20_000))
            .await
            .unwrap();
    }

    /// Worked scenario: R500 float + collections 120/80/300 → expected
    /// R1000; counted R980 → R20 short, -2%, within tolerance.
    #[tokio::test]
    async fn test_close_session_computes_figures() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 50_000))
            .await
            .unwrap();

        for cents in [12_000, 8_000, 30_000] {
            db.collections()
                .record(collection(&session.id, cents, PaymentMethod::Cash))
                .await
                .unwrap();
        }

        let total = db.collections().total_collected(&session.id).await.unwrap();
        assert_eq!(total.cents(), 50_000);

        let closed = db
            .sessions()
            .close_session(&session.id, 98_000, Some("till counted twice"))
            .await
            .unwrap();

        assert_eq!(closed.status, SessionStatus::Closed);
        assert_eq!(closed.expected_cash_cents, Some(100_000));
        assert_eq!(closed.actual_cash_cents, Some(98_000));
        assert_eq!(closed.variance_cents, Some(-2_000));
        assert_eq!(closed.variance_percentage, Some(-2.0));
        assert_eq!(closed.closing_notes.as_deref(), Some("till counted twice"));
        assert!(closed.closed_at.is_some());
        assert!(closed.is_shortage());
        assert!(!requires_approval(&closed));
    }

    /// Worked scenario: counted R800 against R1000 expected → -20%,
    /// flagged for approval; manager approves.
    #[tokio::test]
    async fn test_large_shortage_flagged_and_approved() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A2", 50_000))
            .await
            .unwrap();
        db.collections()
            .record(collection(&session.id, 50_000, PaymentMethod::MobileMoney))
            .await
            .unwrap();

        let closed = db
            .sessions()
            .close_session(&session.id, 80_000, None)
            .await
            .unwrap();
        assert_eq!(closed.variance_cents, Some(-20_000));
        assert_eq!(closed.variance_percentage, Some(-20.0));
        assert!(requires_approval(&closed));

        let approved = db
            .sessions()
            .approve_variance(&session.id, "M1", Some("accepted, recount confirmed"))
            .await
            .unwrap();

        assert_eq!(approved.status, SessionStatus::Approved);
        assert_eq!(approved.approved_by.as_deref(), Some("M1"));
        assert_eq!(
            approved.approval_notes.as_deref(),
            Some("accepted, recount confirmed")
        );
        assert!(approved.approved_at.is_some());

        // Close-time figures are frozen by the decision.
        assert_eq!(approved.expected_cash_cents, closed.expected_cash_cents);
        assert_eq!(approved.actual_cash_cents, closed.actual_cash_cents);
        assert_eq!(approved.variance_cents, closed.variance_cents);
        assert_eq!(approved.variance_percentage, closed.variance_percentage);
    }

    #[tokio::test]
    async fn test_close_rejects_bad_inputs_and_states() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 10_000))
            .await
            .unwrap();

        // Negative count.
        let err = db
            .sessions()
            .close_session(&session.id, -1, None)
            .await
            .unwrap_err();
        assert!(matches!(domain(err), CoreError::InvalidAmount { .. }));

        // Unknown session.
        let err = db
            .sessions()
            .close_session("missing", 0, None)
            .await
            .unwrap_err();
        assert!(matches!(domain(err), CoreError::SessionNotFound(_)));

        // Double close.
        db.sessions()
            .close_session(&session.id, 10_000, None)
            .await
            .unwrap();
        let err = db
            .sessions()
            .close_session(&session.id, 10_000, None)
            .await
            .unwrap_err();
        assert!(matches!(
            domain(err),
            CoreError::InvalidSessionState {
                current_status: SessionStatus::Closed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_decisions_require_closed_status() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 10_000))
            .await
            .unwrap();

        // Approving an open session fails.
        let err = db
            .sessions()
            .approve_variance(&session.id, "M1", None)
            .await
            .unwrap_err();
        assert!(matches!(
            domain(err),
            CoreError::InvalidSessionState {
                current_status: SessionStatus::Open,
                ..
            }
        ));

        db.sessions()
            .close_session(&session.id, 10_000, None)
            .await
            .unwrap();
        db.sessions()
            .approve_variance(&session.id, "M1", None)
            .await
            .unwrap();

        // A second decision fails: terminal states stay terminal.
        let err = db
            .sessions()
            .approve_variance(&session.id, "M2", None)
            .await
            .unwrap_err();
        assert!(matches!(
            domain(err),
            CoreError::InvalidSessionState {
                current_status: SessionStatus::Approved,
                ..
            }
        ));
        let err = db
            .sessions()
            .reject_variance(&session.id, "M2", None)
            .await
            .unwrap_err();
        assert!(matches!(domain(err), CoreError::InvalidSessionState { .. }));

        // The first decision's audit fields survived.
        let final_state = db.sessions().get_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(final_state.approved_by.as_deref(), Some("M1"));
    }

    #[tokio::test]
    async fn test_reject_variance() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 10_000))
            .await
            .unwrap();
        db.sessions()
            .close_session(&session.id, 5_000, None)
            .await
            .unwrap();

        let rejected = db
            .sessions()
            .reject_variance(&session.id, "M1", Some("send for recount"))
            .await
            .unwrap();
        assert_eq!(rejected.status, SessionStatus::Rejected);
        assert_eq!(rejected.approved_by.as_deref(), Some("M1"));
        // Rejection does not erase the close figures.
        assert_eq!(rejected.variance_cents, Some(-5_000));
    }

    /// Zero-expected edge: no float, no collections, nonzero count.
    #[tokio::test]
    async fn test_close_zero_expected_session() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 0))
            .await
            .unwrap();

        let closed = db
            .sessions()
            .close_session(&session.id, 700, None)
            .await
            .unwrap();
        assert_eq!(closed.expected_cash_cents, Some(0));
        assert_eq!(closed.variance_cents, Some(700));
        assert_eq!(closed.variance_percentage, Some(0.0));
        assert!(!requires_approval(&closed));
    }

    /// Conservation through the database: expected equals float plus
    /// the exact ledger sum across hundreds of small appends.
    #[tokio::test]
    async fn test_close_conserves_ledger_sum() {
        let db = test_db().await;
        let session = db
            .sessions()
            .start_session(new_session("A1", 12_345))
            .await
            .unwrap();

        let mut expected_total = 0_i64;
        for i in 0..250 {
            let cents = 1 + (i % 97);
            expected_total += cents;
            db.collections()
                .record(collection(&session.id, cents, PaymentMethod::Cash))
                .await
                .unwrap();
        }

        let closed = db
            .sessions()
            .close_session(&session.id, 12_345 + expected_total, None)
            .await
            .unwrap();
        assert_eq!(closed.expected_cash_cents, Some(12_345 + expected_total));
        assert_eq!(closed.variance_cents, Some(0));
        assert_eq!(closed.variance_percentage, Some(0.0));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = test_db().await;
        let s1 = db
            .sessions()
            .start_session(new_session("A1", 10_000))
            .await
            .unwrap();
        let s2 = db
            .sessions()
            .start_session(new_session("A2", 20_000))
            .await
            .unwrap();
        db.sessions().close_session(&s2.id, 20_000, None).await.unwrap();

        let open = db
            .sessions()
            .list(SessionFilter::default().status(SessionStatus::Open))
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, s1.id);

        let closed = db
            .sessions()
            .list(SessionFilter::default().status(SessionStatus::Closed))
            .await
            .unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, s2.id);

        let for_agent = db
            .sessions()
            .list(SessionFilter::default().agent("A1"))
            .await
            .unwrap();
        assert_eq!(for_agent.len(), 1);

        let all = db.sessions().list(SessionFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let today = Utc::now().date_naive();
        let dated = db
            .sessions()
            .list(SessionFilter::default().between(today, today))
            .await
            .unwrap();
        assert_eq!(dated.len(), 2);
    }
}
