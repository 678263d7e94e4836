//! # Error Types
//!
//! Domain-specific error types for stockpile-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockpile-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockpile-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  ├── LedgerError      - CoreError ∪ DbError at the operation level     │
//! │  └── ApiError         - What the shell boundary sees (serialized)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → ApiError → Shell    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item_no, available/requested)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger rule violations.
///
/// These errors represent business rule failures raised by the
/// reconciliation engine or the operations built on it. They should be
/// caught and translated to user-facing messages at the boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No ledger record exists for the given item number.
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// An issue would drive the item's balance negative.
    ///
    /// ## When This Occurs
    /// - Stock-out of more than the available balance
    /// - A checkout line requesting more than the item holds
    ///
    /// Carries the available vs. requested quantities so the caller can act
    /// on the shortfall.
    #[error("Insufficient stock for item {item_no}: available {available}, requested {requested}")]
    InsufficientStock {
        item_no: i64,
        available: i64,
        requested: i64,
    },

    /// A quantity operand is unusable for the requested update.
    ///
    /// ## When This Occurs
    /// - Zero or negative delta on receive/issue
    /// - Negative value where a non-negative quantity is required
    /// - A direct update whose resulting balance would be negative
    #[error("Invalid quantity for item {item_no}: {reason}")]
    InvalidQuantity { item_no: i64, reason: String },

    /// Checkout batch has exceeded the maximum allowed line items.
    #[error("Checkout cannot have more than {max} line items")]
    CheckoutTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidQuantity error.
    pub fn invalid_quantity(item_no: i64, reason: impl Into<String>) -> Self {
        CoreError::InvalidQuantity {
            item_no,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before ledger logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

impl ValidationError {
    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
