//! Starter catalog written on first launch.

use kirana_core::{Item, Money, Unit};

const CATALOG: [(&str, &str, &str, i64, Unit); 8] = [
    ("1", "Rice", "ಅಕ್ಕಿ", 60, Unit::Kg),
    ("2", "Sugar", "ಸಕ್ಕರೆ", 45, Unit::Kg),
    ("3", "Salt", "ಉಪ್ಪು", 20, Unit::Kg),
    ("4", "Oil", "ಎಣ್ಣೆ", 180, Unit::Litre),
    ("5", "Dal", "ಬೇಳೆ", 120, Unit::Kg),
    ("6", "Atta / Flour", "ಹಿಟ್ಟು", 50, Unit::Kg),
    ("7", "Tea Powder", "ಚಹಾ", 300, Unit::Kg),
    ("8", "Soap", "ಸಾಬೂನು", 40, Unit::Pcs),
];

/// The eight everyday grocery items, in display order.
pub fn default_items() -> Vec<Item> {
    CATALOG
        .iter()
        .map(|&(id, en, kn, rupees, unit)| Item {
            id: id.to_string(),
            name_en: en.to_string(),
            name_kn: Some(kn.to_string()),
            price: Money::from_rupees_paise(rupees, 0),
            unit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let items = default_items();
        assert_eq!(items.len(), 8);
        assert_eq!(items[0].name_en, "Rice");
        assert_eq!(items[3].unit, Unit::Litre);
        assert_eq!(items[6].price, Money::from_paise(30000));
        assert!(items.iter().all(|i| i.secondary_name().is_some()));
    }
}
