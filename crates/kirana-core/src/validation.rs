//! # Validation Module
//!
//! Input validation for every store operation that accepts user data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI layer                                                      │
//! │  ├── Digit-only keypads, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by the entity store)                     │
//! │  ├── Runs BEFORE any mutation                                          │
//! │  └── A rejection leaves every collection untouched                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregation engine                                           │
//! │  └── Clamps discount to 0–100 even for hand-built cart lines          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kirana_core::validation::{validate_name, validate_pin};
//!
//! assert_eq!(validate_name("name", "  Rice ").unwrap(), "Rice");
//! assert!(validate_pin("12a4").is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    MAX_AMOUNT, MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_PIN_LEN, MIN_PIN_LEN, MIN_QUANTITY,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LEN` characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(value.to_string())
}

/// Normalizes an optional text field: trimmed, and blank becomes `None`.
///
/// ```rust
/// use kirana_core::validation::normalize_optional;
///
/// assert_eq!(normalize_optional(Some("  ".to_string())), None);
/// assert_eq!(normalize_optional(Some(" ಅಕ್ಕಿ ".to_string())), Some("ಅಕ್ಕಿ".to_string()));
/// ```
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns the full catalog)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a PIN: 4 to 6 ASCII digits, nothing else.
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.is_empty() {
        return Err(ValidationError::required("pin"));
    }

    let len = pin.len();
    if !pin.chars().all(|c| c.is_ascii_digit()) || !(MIN_PIN_LEN..=MAX_PIN_LEN).contains(&len) {
        return Err(ValidationError::invalid_format("pin", "must be 4–6 digits"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a money amount (price, udhaar amount, expense amount).
///
/// ## Rules
/// - Must be positive (> 0)
/// - At most `MAX_AMOUNT` (₹1,00,00,000.00)
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::must_be_positive(field));
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Money::from_paise(1).to_string(),
            max: MAX_AMOUNT.to_string(),
        });
    }

    Ok(())
}

/// Validates a cart line quantity.
///
/// ## Rules
/// - At least `MIN_QUANTITY` (0.5)
/// - At most `MAX_ITEM_QUANTITY` (999)
///
/// ```text
/// User enters quantity: 1.5 kg
///      │
///      ▼
/// validate_quantity(1.5) ← THIS FUNCTION
///      │
///      ├── qty <= 0?   → "quantity must be positive"
///      ├── qty < 0.5?  → "quantity must be between 0.5 and 999"
///      ├── qty > 999?  → "quantity must be between 0.5 and 999"
///      └── OK → line is added to the cart
/// ```
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    let max = Decimal::from(MAX_ITEM_QUANTITY);
    if quantity < MIN_QUANTITY || quantity > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_QUANTITY.to_string(),
            max: max.to_string(),
        });
    }

    Ok(())
}

/// Validates a line discount percentage (0–100 inclusive).
pub fn validate_discount(discount: Decimal) -> ValidationResult<()> {
    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
