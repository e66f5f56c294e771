//! # Error Types
//!
//! Domain-specific error types for veld-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  veld-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  veld-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → API layer → Frontend   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (session ID, status, amount)
//! 3. Errors are enum variants, never String
//! 4. Every variant is a caller/business-rule violation detected BEFORE
//!    any mutation — none are recovered or retried internally

use thiserror::Error;

use crate::types::{DepositStatus, SessionStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic
/// failures. They should be caught and translated to user-friendly
/// messages by the API layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary input is negative or otherwise out of domain.
    ///
    /// ## When This Occurs
    /// - `opening_float < 0` at session start
    /// - collection `amount <= 0`
    /// - `actual_cash < 0` at close
    /// - deposit `amount <= 0`
    #[error("Invalid amount for {field}: {cents}")]
    InvalidAmount { field: &'static str, cents: i64 },

    /// An operation was attempted against a session whose status does
    /// not permit it.
    ///
    /// ## When This Occurs
    /// - Closing an already-closed session
    /// - Approving/rejecting a non-closed session (including a second
    ///   decision on an already-decided session)
    /// - Recording a collection against a closed session
    /// - Starting a session while the agent still has one open
    #[error("Session {session_id} is {current_status:?}, cannot {operation}")]
    InvalidSessionState {
        session_id: String,
        current_status: SessionStatus,
        operation: &'static str,
    },

    /// Referenced session does not exist.
    #[error("Cash session not found: {0}")]
    SessionNotFound(String),

    /// Referenced deposit does not exist.
    #[error("Bank deposit not found: {0}")]
    DepositNotFound(String),

    /// A deposit decision was attempted against a deposit whose status
    /// does not permit it (only pending deposits can be decided).
    #[error("Deposit {deposit_id} is {current_status:?}, cannot {operation}")]
    InvalidDepositState {
        deposit_id: String,
        current_status: DepositStatus,
        operation: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount {
            field: "opening_float",
            cents: -500,
        };
        assert_eq!(err.to_string(), "Invalid amount for opening_float: -500");

        let err = CoreError::InvalidSessionState {
            session_id: "s-1".to_string(),
            current_status: SessionStatus::Closed,
            operation: "record a collection",
        };
        assert_eq!(
            err.to_string(),
            "Session s-1 is Closed, cannot record a collection"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "agent_id".to_string(),
        };
        assert_eq!(err.to_string(), "agent_id is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "agent_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
