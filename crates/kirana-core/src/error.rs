//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kirana-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kirana-store errors (separate crate)                                  │
//! │  ├── StorageError     - Swallowed at the persistence boundary          │
//! │  └── PrintError       - Swallowed at the print boundary                │
//! │                                                                         │
//! │  Only CoreError ever reaches the UI layer.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup misses (unknown ids) are not errors at all: update/delete on a
//! missing id is a no-op.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is raised *before* any mutation happens, so a rejected
/// operation never leaves partial state behind.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A bill cannot be saved without any lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// The current PIN supplied to a PIN change did not match.
    #[error("Current PIN is incorrect")]
    PinMismatch,

    /// New PIN and its confirmation differ.
    #[error("PINs do not match")]
    PinConfirmationMismatch,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric amount, PIN with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(CoreError::PinMismatch.to_string(), "Current PIN is incorrect");
        assert_eq!(
            CoreError::CartTooLarge { max: 100 }.to_string(),
            "Cart cannot have more than 100 items"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::must_be_positive("price").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
