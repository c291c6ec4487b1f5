//! # Entity Identifiers
//!
//! ```text
//! Uuid::now_v7()
//!   018f3c2a-7b1e-7xxx-yyyy-zzzzzzzzzzzz
//!   └── ms timestamp ──┘    └─ random ─┘
//! ```
//!
//! v7 ids sort roughly by creation time, which keeps slot files readable when
//! debugging. The generator also tracks every live id it has handed out or
//! been told about, so a duplicate can never be issued within one store.
//! Deleted records are released so the set tracks the live collections.

use std::collections::HashSet;

use uuid::Uuid;

/// Issues ids unique within one store instance.
#[derive(Debug, Default)]
pub struct IdGenerator {
    seen: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers ids that already exist (loaded from storage).
    pub fn reserve<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.seen.extend(ids.into_iter().map(str::to_string));
    }

    /// Forgets an id whose record was deleted.
    pub fn release(&mut self, id: &str) -> bool {
        self.seen.remove(id)
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Returns a fresh id.
    pub fn next_id(&mut self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if self.seen.insert(id.clone()) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_in_a_tight_loop() {
        let mut ids = IdGenerator::new();
        let issued: HashSet<String> = (0..10_000).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 10_000);
    }

    #[test]
    fn test_ids_are_v7() {
        let id = IdGenerator::new().next_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_reserved_ids_are_never_issued() {
        let mut ids = IdGenerator::new();
        ids.reserve(["1", "2"]);
        assert!(!ids.seen.insert("1".to_string()));
        assert_ne!(ids.next_id(), "1");
    }

    #[test]
    fn test_release() {
        let mut ids = IdGenerator::new();
        ids.reserve(["1"]);
        let issued = ids.next_id();
        assert_eq!(ids.len(), 2);

        assert!(ids.release(&issued));
        assert!(!ids.release(&issued));
        assert!(!ids.is_reserved(&issued));
        assert!(ids.is_reserved("1"));
        assert_eq!(ids.len(), 1);
    }
}
