//! # Item Search
//!
//! The catalog filter behind the billing screen's search box.
//!
//! ## Matching Rules
//! ```text
//! query (trimmed, lowercased)
//!    │
//!    ├── empty ─────────────────────────► whole catalog, original order
//!    │
//!    ├── all digits, 1 ≤ n ≤ len ───────► [ nth item ] (1-based), nothing else
//!    │
//!    └── otherwise, an item matches if ANY of:
//!          • name_en (lowercased) contains the query
//!          • name_kn contains the query (no case folding)
//!          • name_en (lowercased) starts with the query
//! ```
//!
//! The numeral branch lets the shopkeeper type "3" to jump to the third item
//! on the list. An out-of-range number falls through to name matching.

use crate::types::Item;

/// Filters the catalog, preserving catalog order.
///
/// ```rust
/// use kirana_core::search::filter_items;
/// use kirana_core::{Item, Money, Unit};
///
/// let items: Vec<Item> = ["Rice", "Sugar", "Salt"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| Item {
///         id: i.to_string(),
///         name_en: name.to_string(),
///         name_kn: None,
///         price: Money::from_paise(100),
///         unit: Unit::Kg,
///     })
///     .collect();
///
/// let hits: Vec<&str> = filter_items(&items, "2").iter().map(|i| i.name_en.as_str()).collect();
/// assert_eq!(hits, ["Sugar"]);
/// ```
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    if let Some(item) = positional_match(items, &query) {
        return vec![item];
    }

    items
        .iter()
        .filter(|item| name_matches(item, &query))
        .collect()
}

/// A pure numeral selects the nth item (1-based) when in range.
fn positional_match<'a>(items: &'a [Item], query: &str) -> Option<&'a Item> {
    if !query.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let position: usize = query.parse().ok()?;
    position.checked_sub(1).and_then(|index| items.get(index))
}

fn name_matches(item: &Item, query: &str) -> bool {
    let name_en = item.name_en.to_lowercase();
    name_en.contains(query)
        || item
            .name_kn
            .as_deref()
            .is_some_and(|name_kn| name_kn.contains(query))
        || name_en.starts_with(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Unit;

    fn catalog(names: &[(&str, Option<&str>)]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(i, (en, kn))| Item {
                id: format!("id-{}", i),
                name_en: en.to_string(),
                name_kn: kn.map(str::to_string),
                price: Money::from_paise(1000),
                unit: Unit::Kg,
            })
            .collect()
    }

    fn names<'a>(hits: &[&'a Item]) -> Vec<&'a str> {
        hits.iter().map(|item| item.name_en.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let items = catalog(&[("Rice", None), ("Sugar", None), ("Salt", None)]);
        assert_eq!(names(&filter_items(&items, "")), ["Rice", "Sugar", "Salt"]);
        assert_eq!(names(&filter_items(&items, "   ")), ["Rice", "Sugar", "Salt"]);
    }

    #[test]
    fn test_numeral_selects_position() {
        let items = catalog(&[("Rice", None), ("Sugar", None), ("Salt", None)]);
        assert_eq!(names(&filter_items(&items, "2")), ["Sugar"]);
        assert_eq!(names(&filter_items(&items, " 3 ")), ["Salt"]);
    }

    #[test]
    fn test_out_of_range_numeral_falls_through_to_names() {
        let items = catalog(&[("Rice", None), ("7 Up", None)]);
        assert_eq!(names(&filter_items(&items, "7")), ["7 Up"]);
        assert!(filter_items(&items, "0").is_empty());
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let items = catalog(&[("Rice", None), ("Sugar", None), ("Salt", None)]);
        assert_eq!(names(&filter_items(&items, "sa")), ["Salt"]);
        assert_eq!(names(&filter_items(&items, "SA")), ["Salt"]);
        assert_eq!(names(&filter_items(&items, "ug")), ["Sugar"]);
    }

    #[test]
    fn test_secondary_name_match() {
        let items = catalog(&[("Rice", Some("ಅಕ್ಕಿ")), ("Salt", Some("ಉಪ್ಪು"))]);
        assert_eq!(names(&filter_items(&items, "ಉಪ್ಪು")), ["Salt"]);
        assert_eq!(names(&filter_items(&items, "ಅಕ್")), ["Rice"]);
    }

    #[test]
    fn test_no_match() {
        let items = catalog(&[("Rice", None)]);
        assert!(filter_items(&items, "oil").is_empty());
    }
}
