//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Sale       │   │  UdhaarEntry    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id, date       │   │  id, date       │       │
//! │  │  name_en/kn     │   │  items (frozen) │   │  customer_name  │       │
//! │  │  price, unit    │   │  total          │   │  amount, paid   │       │
//! │  └────────┬────────┘   └────────▲────────┘   └─────────────────┘       │
//! │           │ copied into         │                                       │
//! │           ▼                     │             ┌─────────────────┐       │
//! │  ┌─────────────────┐            │             │    Expense      │       │
//! │  │    CartItem     │────────────┘             │  id, date       │       │
//! │  │  item snapshot  │                          │  description    │       │
//! │  │  qty, discount  │                          │  amount         │       │
//! │  └─────────────────┘                          └─────────────────┘       │
//! │                                                                         │
//! │  Settings (singleton): store names, phone, PIN, receipt language       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Sale` owns full copies of its `CartItem`s, and each `CartItem` owns a
//! full copy of the `Item`. Editing or deleting an item in the catalog never
//! changes a recorded bill.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    normalize_optional, validate_amount, validate_discount, validate_name, validate_quantity,
    ValidationResult,
};

// =============================================================================
// Unit
// =============================================================================

/// Selling unit of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Pcs,
    Litre,
    Packet,
    Dozen,
    Box,
    Gm,
    Ml,
}

impl Unit {
    /// Every unit, in the order the item form lists them.
    pub const ALL: [Unit; 8] = [
        Unit::Kg,
        Unit::Pcs,
        Unit::Litre,
        Unit::Packet,
        Unit::Dozen,
        Unit::Box,
        Unit::Gm,
        Unit::Ml,
    ];

    /// Lowercase label, identical to the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Pcs => "pcs",
            Unit::Litre => "litre",
            Unit::Packet => "packet",
            Unit::Dozen => "dozen",
            Unit::Box => "box",
            Unit::Gm => "gm",
            Unit::Ml => "ml",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == wanted)
            .ok_or_else(|| ValidationError::invalid_format("unit", "unknown unit"))
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog item.
///
/// `id` never changes after creation; everything else is editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Opaque unique identifier.
    pub id: String,

    /// Primary (English) display name.
    pub name_en: String,

    /// Secondary (Kannada) display name.
    #[serde(default)]
    pub name_kn: Option<String>,

    /// Price per unit.
    pub price: Money,

    pub unit: Unit,
}

impl Item {
    /// The secondary name, treating a blank string as absent.
    pub fn secondary_name(&self) -> Option<&str> {
        self.name_kn
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Builds an item from a validated creation payload.
    pub fn from_new(id: String, data: NewItem) -> Self {
        Item {
            id,
            name_en: data.name_en,
            name_kn: data.name_kn,
            price: data.price,
            unit: data.unit,
        }
    }

    /// Applies a validated patch. The id is never touched.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(name_en) = patch.name_en {
            self.name_en = name_en;
        }
        if let Some(name_kn) = patch.name_kn {
            self.name_kn = normalize_optional(Some(name_kn));
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
    }
}

/// Payload for creating an item (everything but the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name_en: String,
    #[serde(default)]
    pub name_kn: Option<String>,
    pub price: Money,
    pub unit: Unit,
}

impl NewItem {
    /// Convenience constructor used by seeds and tests.
    pub fn new(name_en: &str, name_kn: Option<&str>, price: Money, unit: Unit) -> Self {
        NewItem {
            name_en: name_en.to_string(),
            name_kn: name_kn.map(str::to_string),
            price,
            unit,
        }
    }

    /// Checks the payload and returns it with names trimmed.
    pub fn validated(self) -> ValidationResult<Self> {
        validate_amount("price", self.price)?;
        Ok(NewItem {
            name_en: validate_name("name", &self.name_en)?,
            name_kn: normalize_optional(self.name_kn),
            price: self.price,
            unit: self.unit,
        })
    }
}

/// Partial update for an item. `None` leaves a field unchanged.
///
/// Sending `name_kn: Some("")` clears the secondary name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub name_kn: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub unit: Option<Unit>,
}

impl ItemPatch {
    /// Checks every field that is present.
    pub fn validated(self) -> ValidationResult<Self> {
        if let Some(price) = self.price {
            validate_amount("price", price)?;
        }
        let name_en = match self.name_en {
            Some(name) => Some(validate_name("name", &name)?),
            None => None,
        };
        Ok(ItemPatch { name_en, ..self })
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One line of a bill: a frozen copy of the item, a quantity and a discount.
///
/// Transient while the bill is composed; persisted only inside a [`Sale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Item as it was when added to the cart.
    pub item: Item,

    /// Quantity in the item's unit (0.5 steps on the keypad).
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Discount percentage, 0–100.
    #[ts(as = "String")]
    #[serde(default)]
    pub discount: Decimal,
}

impl CartItem {
    /// Creates a validated cart line.
    pub fn new(item: Item, quantity: Decimal, discount: Decimal) -> ValidationResult<Self> {
        validate_quantity(quantity)?;
        validate_discount(discount)?;
        Ok(CartItem {
            item,
            quantity,
            discount,
        })
    }

    /// Rounded line subtotal; see [`crate::reports::line_subtotal`].
    pub fn subtotal(&self) -> Money {
        crate::reports::line_subtotal(self.item.price, self.quantity, self.discount)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded bill. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    /// When the bill was saved.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Lines in the order they were added.
    pub items: Vec<CartItem>,

    /// Sum of line subtotals at the time of sale.
    pub total: Money,

    /// Primary store name at the time of sale.
    pub store_name: String,
}

// =============================================================================
// Udhaar
// =============================================================================

/// Credit extended to a customer, tracked until marked paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UdhaarEntry {
    pub id: String,
    pub customer_name: String,
    pub amount: Money,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub paid: bool,
}

/// Payload for recording udhaar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewUdhaarEntry {
    pub customer_name: String,
    pub amount: Money,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewUdhaarEntry {
    pub fn validated(self) -> ValidationResult<Self> {
        validate_amount("amount", self.amount)?;
        Ok(NewUdhaarEntry {
            customer_name: validate_name("customer name", &self.customer_name)?,
            amount: self.amount,
            note: normalize_optional(self.note),
        })
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A shop expense (rent, transport, ...). Immutable except via delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount: Money,
}

/// Payload for logging an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
}

impl NewExpense {
    pub fn validated(self) -> ValidationResult<Self> {
        validate_amount("amount", self.amount)?;
        Ok(NewExpense {
            description: validate_name("description", &self.description)?,
            amount: self.amount,
        })
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Which language(s) the receipt prints in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PrintLang {
    /// English only.
    En,
    /// Kannada, falling back to English where a name is missing.
    Kn,
    /// Both, "English / Kannada".
    #[default]
    Both,
}

/// Store settings (singleton).
///
/// Persisted objects missing a field pick up the default for that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub store_name_en: String,
    pub store_name_kn: Option<String>,
    pub phone: Option<String>,
    /// 4–6 digits. Changed only through the PIN-change path.
    pub pin: String,
    pub print_lang: PrintLang,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            store_name_en: "My Kirana Store".to_string(),
            store_name_kn: Some("ನನ್ನ ಕಿರಾಣಾ ಅಂಗಡಿ".to_string()),
            phone: None,
            pin: "1234".to_string(),
            print_lang: PrintLang::Both,
        }
    }
}

impl Settings {
    /// The secondary store name, treating a blank string as absent.
    pub fn secondary_store_name(&self) -> Option<&str> {
        self.store_name_kn
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Phone number, treating a blank string as absent.
    pub fn phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }

    /// Exact comparison of an entered PIN with the stored one.
    pub fn pin_matches(&self, entered: &str) -> bool {
        self.pin == entered
    }

    /// Merges a validated patch.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(name) = patch.store_name_en {
            self.store_name_en = name;
        }
        if let Some(name) = patch.store_name_kn {
            self.store_name_kn = normalize_optional(Some(name));
        }
        if let Some(phone) = patch.phone {
            self.phone = normalize_optional(Some(phone));
        }
        if let Some(lang) = patch.print_lang {
            self.print_lang = lang;
        }
    }
}

/// Partial settings update. The PIN is not part of it.
///
/// For the optional text fields, `Some("")` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub store_name_en: Option<String>,
    #[serde(default)]
    pub store_name_kn: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub print_lang: Option<PrintLang>,
}

impl SettingsPatch {
    pub fn validated(self) -> ValidationResult<Self> {
        let store_name_en = match self.store_name_en {
            Some(name) => Some(validate_name("store name", &name)?),
            None => None,
        };
        Ok(SettingsPatch {
            store_name_en,
            ..self
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> Item {
        Item {
            id: "i-1".to_string(),
            name_en: "Rice".to_string(),
            name_kn: Some("ಅಕ್ಕಿ".to_string()),
            price: Money::from_paise(6000),
            unit: Unit::Kg,
        }
    }

    #[test]
    fn test_unit_round_trips_through_label() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>().unwrap(), unit);
        }
        assert_eq!(" KG ".parse::<Unit>().unwrap(), Unit::Kg);
        assert!("sack".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Unit::Litre).unwrap(), "\"litre\"");
        assert_eq!(serde_json::from_str::<Unit>("\"box\"").unwrap(), Unit::Box);
    }

    #[test]
    fn test_item_patch_keeps_id_and_unpatched_fields() {
        let mut item = rice();
        let patch = ItemPatch {
            price: Some(Money::from_paise(6500)),
            ..Default::default()
        };
        item.apply(patch.validated().unwrap());

        assert_eq!(item.id, "i-1");
        assert_eq!(item.price.paise(), 6500);
        assert_eq!(item.name_en, "Rice");
        assert_eq!(item.secondary_name(), Some("ಅಕ್ಕಿ"));
    }

    #[test]
    fn test_item_patch_clears_secondary_name() {
        let mut item = rice();
        item.apply(ItemPatch {
            name_kn: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(item.name_kn, None);
    }

    #[test]
    fn test_item_patch_rejects_bad_values() {
        let bad_price = ItemPatch {
            price: Some(Money::zero()),
            ..Default::default()
        };
        assert!(bad_price.validated().is_err());

        let bad_name = ItemPatch {
            name_en: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(bad_name.validated().is_err());
    }

    #[test]
    fn test_new_item_validation_trims() {
        let item = NewItem::new("  Dal ", Some(" "), Money::from_paise(12000), Unit::Kg)
            .validated()
            .unwrap();
        assert_eq!(item.name_en, "Dal");
        assert_eq!(item.name_kn, None);

        assert!(NewItem::new("", None, Money::from_paise(100), Unit::Kg)
            .validated()
            .is_err());
        assert!(NewItem::new("Dal", None, Money::zero(), Unit::Kg)
            .validated()
            .is_err());
    }

    #[test]
    fn test_cart_item_validation() {
        assert!(CartItem::new(rice(), Decimal::ONE, Decimal::ZERO).is_ok());
        assert!(CartItem::new(rice(), Decimal::ZERO, Decimal::ZERO).is_err());
        assert!(CartItem::new(rice(), Decimal::ONE, Decimal::from(150)).is_err());
    }

    #[test]
    fn test_cart_item_json_shape() {
        let line = CartItem::new(rice(), Decimal::new(15, 1), Decimal::from(10)).unwrap();
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["item"]["nameEn"], "Rice");
        assert_eq!(json["item"]["price"], 6000);
        assert_eq!(json["quantity"], "1.5");
        assert_eq!(json["discount"], "10");
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.pin, "1234");
        assert_eq!(settings.print_lang, PrintLang::Both);
        assert_eq!(settings.phone(), None);
        assert!(settings.pin_matches("1234"));
        assert!(!settings.pin_matches("12345"));
    }

    #[test]
    fn test_settings_fill_missing_fields_from_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"storeNameEn":"Sri Ganesh Stores","printLang":"en"}"#)
                .unwrap();
        assert_eq!(settings.store_name_en, "Sri Ganesh Stores");
        assert_eq!(settings.print_lang, PrintLang::En);
        assert_eq!(settings.pin, "1234");
    }

    #[test]
    fn test_settings_patch_merges() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            phone: Some(" 98450 12345 ".to_string()),
            store_name_kn: Some(String::new()),
            ..Default::default()
        };
        settings.apply(patch.validated().unwrap());

        assert_eq!(settings.phone(), Some("98450 12345"));
        assert_eq!(settings.secondary_store_name(), None);
        assert_eq!(settings.store_name_en, "My Kirana Store");
    }

    #[test]
    fn test_settings_patch_rejects_blank_store_name() {
        let patch = SettingsPatch {
            store_name_en: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(patch.validated().is_err());
    }
}
