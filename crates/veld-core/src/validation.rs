//! # Validation Module
//!
//! Input validation for reconciliation operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust, before any mutation)                      │
//! │  ├── Monetary domain rules → CoreError::InvalidAmount                  │
//! │  └── Identity/text rules   → ValidationError                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints on amounts and statuses                         │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Monetary validators return [`CoreError::InvalidAmount`] directly —
//! that is the variant callers of the reconciliation operations match
//! on. String/identity validators return [`ValidationError`].

use crate::error::{CoreError, CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of free-text note fields.
pub const MAX_NOTES_LEN: usize = 500;

/// Maximum length of bank reference numbers.
pub const MAX_REFERENCE_LEN: usize = 50;

// =============================================================================
// Monetary Validators
// =============================================================================

/// Validates an opening float.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (agent starts empty)
///
/// ## Example
/// ```rust
/// use veld_core::validation::validate_opening_float;
///
/// assert!(validate_opening_float(50_000).is_ok());
/// assert!(validate_opening_float(0).is_ok());
/// assert!(validate_opening_float(-1).is_err());
/// ```
pub fn validate_opening_float(cents: i64) -> CoreResult<()> {
    if cents < 0 {
        return Err(CoreError::InvalidAmount {
            field: "opening_float",
            cents,
        });
    }
    Ok(())
}

/// Validates a collection amount.
///
/// ## Rules
/// - Must be positive (> 0); you cannot collect nothing
pub fn validate_collection_amount(cents: i64) -> CoreResult<()> {
    if cents <= 0 {
        return Err(CoreError::InvalidAmount {
            field: "amount",
            cents,
        });
    }
    Ok(())
}

/// Validates the cash counted at close.
///
/// ## Rules
/// - Must be non-negative (>= 0); an empty drawer is a valid count
pub fn validate_actual_cash(cents: i64) -> CoreResult<()> {
    if cents < 0 {
        return Err(CoreError::InvalidAmount {
            field: "actual_cash",
            cents,
        });
    }
    Ok(())
}

/// Validates a bank deposit amount.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_deposit_amount(cents: i64) -> CoreResult<()> {
    if cents <= 0 {
        return Err(CoreError::InvalidAmount {
            field: "deposit_amount",
            cents,
        });
    }
    Ok(())
}

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates a required identifier (agent, approver, order, customer):
/// non-empty after trimming.
pub fn validate_required_id(field: &'static str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use veld_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Text Validators
// =============================================================================

/// Validates optional free-text notes.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<()> {
    if let Some(notes) = notes {
        if notes.len() > MAX_NOTES_LEN {
            return Err(ValidationError::TooLong {
                field: "notes".to_string(),
                max: MAX_NOTES_LEN,
            });
        }
    }
    Ok(())
}

/// Validates a bank deposit reference number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
pub fn validate_reference_number(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference_number".to_string(),
        });
    }

    if reference.len() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference_number".to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
