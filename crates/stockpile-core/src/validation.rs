//! # Validation Module
//!
//! Input validation utilities for Stockpile.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell boundary (TypeScript)                                  │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + the reconciliation engine (Rust)               │
//! │  ├── Required fields, sign checks                                      │
//! │  └── Engine guards the balance invariant itself                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (in_qty >= out_qty) and sign constraints                    │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::ItemInput;
use crate::MAX_ITEM_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::validate_item_name;
///
/// assert!(validate_item_name("M6 Hex Bolt").is_ok());
/// assert!(validate_item_name("").is_err());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("item_name"));
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item_name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a quantity is strictly positive.
///
/// Used by stock-insert, stock-out and checkout lines, where a zero or
/// negative delta is meaningless.
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that a value is not negative.
///
/// Used for balances, thresholds and prices, where zero is a legal value.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a creation / full-update payload.
pub fn validate_item_input(input: &ItemInput) -> ValidationResult<()> {
    validate_item_name(&input.item_name)?;
    validate_non_negative("balance", input.balance)?;
    validate_non_negative("min_stock", input.min_stock)?;
    validate_non_negative("price_per_unit_cents", input.price_per_unit_cents)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Packing Tape").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("  \t ").is_err());
        assert!(validate_item_name(&"x".repeat(MAX_ITEM_NAME_LEN + 1)).is_err());
        assert!(validate_item_name(&"x".repeat(MAX_ITEM_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("quantity", 1).is_ok());
        assert!(validate_positive("quantity", 0).is_err());
        assert!(validate_positive("quantity", -5).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("balance", 0).is_ok());
        assert!(validate_non_negative("balance", 10).is_ok());
        assert!(validate_non_negative("balance", -1).is_err());
    }

    #[test]
    fn test_validate_item_input() {
        let mut input = ItemInput {
            item_name: "Label Roll".to_string(),
            balance: 10,
            ..Default::default()
        };
        assert!(validate_item_input(&input).is_ok());

        input.balance = -1;
        assert!(validate_item_input(&input).is_err());

        input.balance = 10;
        input.item_name = String::new();
        assert!(validate_item_input(&input).is_err());
    }
}
