//! # Bank Deposit Repository
//!
//! Database operations for the bank deposit ledger.
//!
//! ## An Independent Ledger
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Deposits are attributed to a session but NEVER feed its variance:     │
//! │                                                                         │
//! │    collections ──► expected_cash ──► variance        (session close)   │
//! │    deposits    ──► bank statement matching           (afterwards)      │
//! │                                                                         │
//! │  A session can therefore close with a variance while its deposits      │
//! │  are still pending — by design, the bank-side check runs downstream.   │
//! │                                                                         │
//! │  Decision lifecycle:  pending ──► confirmed                            │
//! │                              └──► rejected                             │
//! │  One decision per deposit; a second fails the status guard.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use veld_core::validation::{validate_deposit_amount, validate_reference_number};
use veld_core::{BankDeposit, CoreError, DepositStatus, Money};

// =============================================================================
// Input Types
// =============================================================================

/// Input for recording a bank deposit against a session.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewBankDeposit {
    pub session_id: String,
    /// Deposited amount in cents. Must be > 0.
    pub amount_cents: i64,
    pub bank_name: String,
    /// Bank slip / transfer reference for statement matching.
    pub reference_number: String,
    /// Defaults to today (UTC) when not supplied.
    pub deposit_date: Option<NaiveDate>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for bank deposit database operations.
#[derive(Debug, Clone)]
pub struct BankDepositRepository {
    pool: SqlitePool,
}

impl BankDepositRepository {
    /// Creates a new BankDepositRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BankDepositRepository { pool }
    }

    /// Records a deposit against a session, in Pending status.
    ///
    /// Any session status is acceptable — deposits typically land after
    /// the session has already closed.
    ///
    /// ## Failures
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `SessionNotFound` if the session does not exist
    pub async fn record(&self, new: NewBankDeposit) -> DbResult<BankDeposit> {
        validate_deposit_amount(new.amount_cents)?;
        validate_reference_number(&new.reference_number).map_err(CoreError::from)?;

        let now = Utc::now();
        let deposit = BankDeposit {
            id: Uuid::new_v4().to_string(),
            session_id: new.session_id,
            amount_cents: new.amount_cents,
            bank_name: new.bank_name,
            reference_number: new.reference_number,
            deposit_date: new.deposit_date.unwrap_or_else(|| now.date_naive()),
            status: DepositStatus::Pending,
            recorded_at: now,
            updated_at: now,
        };

        debug!(
            session_id = %deposit.session_id,
            reference = %deposit.reference_number,
            amount = %deposit.amount(),
            "Recording bank deposit"
        );

        // Guarded insert: only lands if the session exists.
        let result = sqlx::query(
            "INSERT INTO bank_deposits (
                id, session_id, amount_cents, bank_name, reference_number,
                deposit_date, status, recorded_at, updated_at
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9
            WHERE EXISTS (SELECT 1 FROM cash_sessions WHERE id = ?2)",
        )
        .bind(&deposit.id)
        .bind(&deposit.session_id)
        .bind(deposit.amount_cents)
        .bind(&deposit.bank_name)
        .bind(&deposit.reference_number)
        .bind(deposit.deposit_date)
        .bind(deposit.status)
        .bind(deposit.recorded_at)
        .bind(deposit.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::SessionNotFound(deposit.session_id).into());
        }

        info!(
            deposit_id = %deposit.id,
            session_id = %deposit.session_id,
            amount = %deposit.amount(),
            "Bank deposit recorded"
        );

        Ok(deposit)
    }

    /// Gets a deposit by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<BankDeposit>> {
        let deposit = sqlx::query_as::<_, BankDeposit>(
            "SELECT id, session_id, amount_cents, bank_name, reference_number,
                    deposit_date, status, recorded_at, updated_at
             FROM bank_deposits
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deposit)
    }

    /// Gets all deposits for a session, oldest first.
    pub async fn list_by_session(&self, session_id: &str) -> DbResult<Vec<BankDeposit>> {
        let deposits = sqlx::query_as::<_, BankDeposit>(
            "SELECT id, session_id, amount_cents, bank_name, reference_number,
                    deposit_date, status, recorded_at, updated_at
             FROM bank_deposits
             WHERE session_id = ?1
             ORDER BY recorded_at, rowid",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(deposits)
    }

    /// Marks a pending deposit as matched against a bank statement line.
    pub async fn confirm(&self, deposit_id: &str) -> DbResult<BankDeposit> {
        self.decide(deposit_id, DepositStatus::Confirmed, "confirm").await
    }

    /// Marks a pending deposit as unmatched; it needs investigation.
    pub async fn reject(&self, deposit_id: &str) -> DbResult<BankDeposit> {
        self.decide(deposit_id, DepositStatus::Rejected, "reject").await
    }

    /// Shared confirm/reject transition, one decision per deposit.
    async fn decide(
        &self,
        deposit_id: &str,
        verdict: DepositStatus,
        operation: &'static str,
    ) -> DbResult<BankDeposit> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE bank_deposits SET status = ?2, updated_at = ?3
             WHERE id = ?1 AND status = 'pending'",
        )
        .bind(deposit_id)
        .bind(verdict)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current: Option<DepositStatus> =
                sqlx::query_scalar("SELECT status FROM bank_deposits WHERE id = ?1")
                    .bind(deposit_id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match current {
                None => CoreError::DepositNotFound(deposit_id.to_string()).into(),
                Some(current_status) => CoreError::InvalidDepositState {
                    deposit_id: deposit_id.to_string(),
                    current_status,
                    operation,
                }
                .into(),
            });
        }

        info!(deposit_id = %deposit_id, verdict = ?verdict, "Deposit decision recorded");

        self.get_by_id(deposit_id)
            .await?
            .ok_or_else(|| crate::error::DbError::not_found("BankDeposit", deposit_id))
    }

    /// Total deposited for a session, excluding rejected deposits.
    ///
    /// Used by the downstream bank reconciliation views to compare
    /// against the session's collected total.
    pub async fn total_deposited(&self, session_id: &str) -> DbResult<Money> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(amount_cents) FROM bank_deposits
             WHERE session_id = ?1 AND status != 'rejected'",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(total.unwrap_or(0)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::repository::session::NewCashSession;

    async fn db_with_session() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = db
            .sessions()
            .start_session(NewCashSession {
                agent_id: "A1".to_string(),
                agent_name: "Agent One".to_string(),
                session_date: None,
                opening_float_cents: 50_000,
                notes: None,
            })
            .await
            .unwrap();
        (db, session.id)
    }

    fn new_deposit(session_id: &str, cents: i64, reference: &str) -> NewBankDeposit {
        NewBankDeposit {
            session_id: session_id.to_string(),
            amount_cents: cents,
            bank_name: "First National".to_string(),
            reference_number: reference.to_string(),
            deposit_date: None,
        }
    }

    fn domain(err: DbError) -> CoreError {
        match err {
            DbError::Domain(core) => core,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_deposit() {
        let (db, session_id) = db_with_session().await;

        let deposit = db
            .deposits()
            .record(new_deposit(&session_id, 45_000, "DEP-0001"))
            .await
            .unwrap();

        assert_eq!(deposit.status, DepositStatus::Pending);
        assert_eq!(deposit.amount_cents, 45_000);

        let listed = db.deposits().list_by_session(&session_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reference_number, "DEP-0001");
    }

    #[tokio::test]
    async fn test_record_rejects_bad_inputs() {
        let (db, session_id) = db_with_session().await;

        let err = db
            .deposits()
            .record(new_deposit(&session_id, 0, "DEP-0001"))
            .await
            .unwrap_err();
        assert!(matches!(domain(err), CoreError::InvalidAmount { .. }));

        let err = db
            .deposits()
            .record(new_deposit(&session_id, 1_000, ""))
            .await
            .unwrap_err();
        assert!(matches!(domain(err), CoreError::Validation(_)));

        let err = db
            .deposits()
            .record(new_deposit("missing", 1_000, "DEP-0001"))
            .await
            .unwrap_err();
        assert!(matches!(domain(err), CoreError::SessionNotFound(_)));
    }

    /// Deposits attach to closed sessions too — they usually arrive
    /// after the agent has banked the day's takings.
    #[tokio::test]
    async fn test_record_against_closed_session() {
        let (db, session_id) = db_with_session().await;
        db.sessions()
            .close_session(&session_id, 50_000, None)
            .await
            .unwrap();

        db.deposits()
            .record(new_deposit(&session_id, 45_000, "DEP-0002"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_confirm_and_reject_lifecycle() {
        let (db, session_id) = db_with_session().await;

        let first = db
            .deposits()
            .record(new_deposit(&session_id, 30_000, "DEP-0001"))
            .await
            .unwrap();
        let second = db
            .deposits()
            .record(new_deposit(&session_id, 15_000, "DEP-0002"))
            .await
            .unwrap();

        let confirmed = db.deposits().confirm(&first.id).await.unwrap();
        assert_eq!(confirmed.status, DepositStatus::Confirmed);

        let rejected = db.deposits().reject(&second.id).await.unwrap();
        assert_eq!(rejected.status, DepositStatus::Rejected);

        // One decision per deposit.
        let err = db.deposits().confirm(&first.id).await.unwrap_err();
        assert!(matches!(
            domain(err),
            CoreError::InvalidDepositState {
                current_status: DepositStatus::Confirmed,
                ..
            }
        ));
        let err = db.deposits().confirm(&second.id).await.unwrap_err();
        assert!(matches!(domain(err), CoreError::InvalidDepositState { .. }));

        // Unknown deposit.
        let err = db.deposits().confirm("missing").await.unwrap_err();
        assert!(matches!(domain(err), CoreError::DepositNotFound(_)));
    }

    #[tokio::test]
    async fn test_total_deposited_excludes_rejected() {
        let (db, session_id) = db_with_session().await;

        let kept = db
            .deposits()
            .record(new_deposit(&session_id, 30_000, "DEP-0001"))
            .await
            .unwrap();
        let dropped = db
            .deposits()
            .record(new_deposit(&session_id, 15_000, "DEP-0002"))
            .await
            .unwrap();
        db.deposits()
            .record(new_deposit(&session_id, 5_000, "DEP-0003"))
            .await
            .unwrap();

        db.deposits().confirm(&kept.id).await.unwrap();
        db.deposits().reject(&dropped.id).await.unwrap();

        // Confirmed + pending count; rejected does not.
        let total = db.deposits().total_deposited(&session_id).await.unwrap();
        assert_eq!(total.cents(), 35_000);
    }
}
