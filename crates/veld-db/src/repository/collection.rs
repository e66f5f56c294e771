//! # Cash Collection Repository
//!
//! Database operations for the append-only collection ledger.
//!
//! ## Ledger Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Collection Ledger Rules                               │
//! │                                                                         │
//! │  • APPEND-ONLY: collections are never updated or deleted               │
//! │  • OPEN SESSIONS ONLY: the append carries its own status guard         │
//! │  • NO CACHED TOTALS: totals are recomputed from the ledger on every    │
//! │    read, so the ledger and its sum can never drift apart               │
//! │                                                                         │
//! │  The append is a single statement:                                     │
//! │                                                                         │
//! │    INSERT INTO cash_collections (…)                                    │
//! │    SELECT …                                                            │
//! │    WHERE EXISTS (SELECT 1 FROM cash_sessions                           │
//! │                  WHERE id = ? AND status = 'open')                     │
//! │                                                                         │
//! │  SQLite's single-writer discipline makes this atomic against both      │
//! │  concurrent appends (no interleaving, no double counts) and against    │
//! │  close_session, whose first effect is flipping the status guard.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use veld_core::validation::{validate_collection_amount, validate_required_id};
use veld_core::{CashCollection, CoreError, Money, PaymentMethod, SessionStatus};

// =============================================================================
// Input & Summary Types
// =============================================================================

/// Input for recording a collection against an order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewCashCollection {
    pub session_id: String,
    pub order_id: String,
    pub customer_id: String,
    pub customer_name: String,
    /// Collected amount in cents. Must be > 0.
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
}

/// Per-method rollup for a session's collection summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MethodTotals {
    pub count: i64,
    pub total_cents: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cash collection database operations.
#[derive(Debug, Clone)]
pub struct CashCollectionRepository {
    pool: SqlitePool,
}

impl CashCollectionRepository {
    /// Creates a new CashCollectionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CashCollectionRepository { pool }
    }

    /// Appends a collection to an open session's ledger.
    ///
    /// ## Preconditions
    /// - `amount_cents > 0`
    /// - the target session exists and is Open
    ///
    /// ## Failures
    /// - `InvalidAmount` if the amount is zero or negative
    /// - `SessionNotFound` if the session does not exist
    /// - `InvalidSessionState` if the session is closed/approved/rejected
    ///
    /// The session record itself is not mutated; totals are computed on
    /// demand from the ledger.
    pub async fn record(&self, new: NewCashCollection) -> DbResult<CashCollection> {
        validate_collection_amount(new.amount_cents)?;
        validate_required_id("order_id", &new.order_id).map_err(CoreError::from)?;
        validate_required_id("customer_id", &new.customer_id).map_err(CoreError::from)?;

        let collection = CashCollection {
            id: Uuid::new_v4().to_string(),
            session_id: new.session_id,
            order_id: new.order_id,
            customer_id: new.customer_id,
            customer_name: new.customer_name,
            amount_cents: new.amount_cents,
            payment_method: new.payment_method,
            collected_at: Utc::now(),
        };

        debug!(
            session_id = %collection.session_id,
            order_id = %collection.order_id,
            amount = %collection.amount(),
            "Recording collection"
        );

        // Guarded append: only lands if the session is still open.
        let result = sqlx::query(
            "INSERT INTO cash_collections (
                id, session_id, order_id, customer_id, customer_name,
                amount_cents, payment_method, collected_at
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
            WHERE EXISTS (
                SELECT 1 FROM cash_sessions WHERE id = ?2 AND status = 'open'
            )",
        )
        .bind(&collection.id)
        .bind(&collection.session_id)
        .bind(&collection.order_id)
        .bind(&collection.customer_id)
        .bind(&collection.customer_name)
        .bind(collection.amount_cents)
        .bind(collection.payment_method)
        .bind(collection.collected_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current: Option<SessionStatus> =
                sqlx::query_scalar("SELECT status FROM cash_sessions WHERE id = ?1")
                    .bind(&collection.session_id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match current {
                None => CoreError::SessionNotFound(collection.session_id).into(),
                Some(current_status) => CoreError::InvalidSessionState {
                    session_id: collection.session_id,
                    current_status,
                    operation: "record a collection",
                }
                .into(),
            });
        }

        info!(
            collection_id = %collection.id,
            session_id = %collection.session_id,
            amount = %collection.amount(),
            method = ?collection.payment_method,
            "Collection recorded"
        );

        Ok(collection)
    }

    /// Gets all collections for a session, oldest first.
    pub async fn list_by_session(&self, session_id: &str) -> DbResult<Vec<CashCollection>> {
        let collections = sqlx::query_as::<_, CashCollection>(
            "SELECT id, session_id, order_id, customer_id, customer_name,
                    amount_cents, payment_method, collected_at
             FROM cash_collections
             WHERE session_id = ?1
             ORDER BY collected_at, rowid",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// The session's collected total, recomputed from the ledger.
    ///
    /// Empty session → 0.
    pub async fn total_collected(&self, session_id: &str) -> DbResult<Money> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT SUM(amount_cents) FROM cash_collections WHERE session_id = ?1")
                .bind(session_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(Money::from_cents(total.unwrap_or(0)))
    }

    /// Count and total for one payment method within a session.
    ///
    /// Backs the cash vs mobile-money summary tiles on the collection
    /// screen.
    pub async fn method_totals(
        &self,
        session_id: &str,
        method: PaymentMethod,
    ) -> DbResult<MethodTotals> {
        let (count, total_cents): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(amount_cents), 0)
             FROM cash_collections
             WHERE session_id = ?1 AND payment_method = ?2",
        )
        .bind(session_id)
        .bind(method)
        .fetch_one(&self.pool)
        .await?;

        Ok(MethodTotals { count, total_cents })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
