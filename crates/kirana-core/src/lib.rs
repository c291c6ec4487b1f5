//! # kirana-core: Pure Business Logic for Kirana POS
//!
//! This crate is the **heart** of Kirana POS, a single-store point-of-sale
//! helper for recording bills, tracking udhaar (store credit), logging
//! expenses and reading daily/monthly profit. Everything here is a pure
//! function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kirana POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (not in this workspace)             │   │
//! │  │    PIN gate ──► Billing ──► Items ──► Udhaar ──► Reports        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots / store operations           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kirana-store (Entity Store)                  │   │
//! │  │    add_item, add_sale, mark_udhaar_paid, update_settings ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ reports │ │ receipt │  │   │
//! │  │   │  Item   │ │  Money  │ │  Cart   │ │ Bucket  │ │ Receipt │  │   │
//! │  │   │  Sale   │ │  paise  │ │CartItem │ │ Summary │ │ text/html│ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO FILESYSTEM • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Sale, UdhaarEntry, Expense, Settings)
//! - [`money`] - Money type with integer paise
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation run before every mutation
//! - [`cart`] - Bill composition
//! - [`reports`] - Subtotals, day/month rollups, outstanding udhaar
//! - [`search`] - Catalog filter used by the billing screen
//! - [`receipt`] - Printable receipt document
//!
//! ## Example Usage
//!
//! ```rust
//! use kirana_core::money::Money;
//! use kirana_core::reports::line_subtotal;
//! use rust_decimal::Decimal;
//!
//! // ₹10.00 at 33% off
//! let line = line_subtotal(Money::from_paise(1000), Decimal::ONE, Decimal::from(33));
//! assert_eq!(line.to_string(), "₹6.70");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod reports;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
pub use reports::{Bucket, ReportSummary};
pub use types::*;

use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single bill.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Catches keypad slips (typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest price, udhaar amount or expense amount accepted (₹1 crore).
pub const MAX_AMOUNT: Money = Money::from_paise(1_000_000_000);

/// Smallest quantity a cart line may hold (half a unit).
pub const MIN_QUANTITY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Maximum length of names, descriptions and notes.
pub const MAX_NAME_LEN: usize = 200;

/// PIN length bounds.
pub const MIN_PIN_LEN: usize = 4;
pub const MAX_PIN_LEN: usize = 6;

/// Number of bills shown in the recent-sales list.
pub const DEFAULT_RECENT_SALES: usize = 10;
