//! # Cart
//!
//! The bill being composed on the billing screen.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Method                  Cart Change          │
//! │  ─────────                 ──────                  ───────────          │
//! │                                                                         │
//! │  Tap item, enter qty ─────► add() ──────────────► push or merge line   │
//! │                                                                         │
//! │  Tap + / − ───────────────► adjust_quantity() ──► qty ± 0.5, min 0.5   │
//! │                                                                         │
//! │  Edit discount ───────────► set_discount() ─────► clamp 0–100          │
//! │                                                                         │
//! │  Swipe away ──────────────► remove() ───────────► line dropped         │
//! │                                                                         │
//! │  Print bill ──────────────► into_lines() ───────► Store::add_sale      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is never persisted. Lines hold a copy of the item taken when the
//! line was first added.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartItem, Item};
use crate::validation::{validate_discount, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MIN_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by item id (adding the same item merges)
/// - Every quantity is within `MIN_QUANTITY..=MAX_ITEM_QUANTITY`
/// - Every discount is within 0–100
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an item, or merges into the existing line for that item.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity increases, discount is replaced
    /// - Item not in cart: new line appended
    pub fn add(&mut self, item: &Item, quantity: Decimal, discount: Decimal) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_discount(discount)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            let merged = line.quantity + quantity;
            validate_quantity(merged)?;
            line.quantity = merged;
            line.discount = discount;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.lines
            .push(CartItem::new(item.clone(), quantity, discount)?);
        Ok(())
    }

    /// Changes a line's quantity by `delta`, never going below half a unit.
    ///
    /// Returns `false` if the item is not in the cart.
    pub fn adjust_quantity(&mut self, item_id: &str, delta: Decimal) -> bool {
        let max = Decimal::from(MAX_ITEM_QUANTITY);
        match self.lines.iter_mut().find(|l| l.item.id == item_id) {
            Some(line) => {
                line.quantity = (line.quantity + delta).clamp(MIN_QUANTITY, max);
                true
            }
            None => false,
        }
    }

    /// Sets a line's discount, clamped to 0–100.
    ///
    /// Returns `false` if the item is not in the cart.
    pub fn set_discount(&mut self, item_id: &str, discount: Decimal) -> bool {
        match self.lines.iter_mut().find(|l| l.item.id == item_id) {
            Some(line) => {
                line.discount = discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                true
            }
            None => false,
        }
    }

    /// Removes the line for an item. Returns `false` if it was not there.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item.id != item_id);
        self.lines.len() != before
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    /// Bill total: sum of rounded line subtotals.
    pub fn total(&self) -> Money {
        crate::reports::cart_total(&self.lines)
    }

    /// Hands the lines over for recording a sale.
    pub fn into_lines(self) -> Vec<CartItem> {
        self.lines
    }
}
