//! # Change Observers
//!
//! Lets a view layer react to collection changes without polling.
//!
//! ## Notification Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Publication                                 │
//! │                                                                         │
//! │  store.add_expense(..)                                                 │
//! │       │                                                                 │
//! │       ├──► persistence.save("kirana_expenses")   (1) durable           │
//! │       ├──► self.expenses = Arc::new(next)        (2) visible to reads  │
//! │       └──► observers.publish(Snapshot::Expenses) (3) callbacks         │
//! │                 │                                                       │
//! │                 ├──► sub #1 (Expenses)  ✔ called                       │
//! │                 ├──► sub #2 (Sales)     ✘ skipped                      │
//! │                 └──► sub #3 (Expenses)  ✔ called                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callbacks run synchronously, in subscription order, and receive the same
//! `Arc` a subsequent read would return.

use std::sync::Arc;

use kirana_core::{Expense, Item, Sale, Settings, UdhaarEntry};

use crate::storage::Collection;

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The new value of one collection.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Items(Arc<Vec<Item>>),
    Sales(Arc<Vec<Sale>>),
    Udhaar(Arc<Vec<UdhaarEntry>>),
    Expenses(Arc<Vec<Expense>>),
    Settings(Arc<Settings>),
}

impl Snapshot {
    pub fn collection(&self) -> Collection {
        match self {
            Snapshot::Items(_) => Collection::Items,
            Snapshot::Sales(_) => Collection::Sales,
            Snapshot::Udhaar(_) => Collection::Udhaar,
            Snapshot::Expenses(_) => Collection::Expenses,
            Snapshot::Settings(_) => Collection::Settings,
        }
    }
}

/// Observer callback.
pub type Callback = Box<dyn FnMut(&Snapshot)>;

struct Subscription {
    id: SubscriptionId,
    collection: Collection,
    callback: Callback,
}

/// Ordered list of subscriptions.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, collection: Collection, callback: Callback) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            collection,
            callback,
        });
        id
    }

    /// Returns `false` if the id was unknown (or already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn publish(&mut self, snapshot: &Snapshot) {
        let collection = snapshot.collection();
        for sub in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.collection == collection)
        {
            (sub.callback)(snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_filters_by_collection_and_keeps_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        for tag in ["first", "second"] {
            let calls = Rc::clone(&calls);
            observers.subscribe(
                Collection::Expenses,
                Box::new(move |_: &Snapshot| calls.borrow_mut().push(tag)),
            );
        }
        let other = Rc::clone(&calls);
        observers.subscribe(
            Collection::Sales,
            Box::new(move |_: &Snapshot| other.borrow_mut().push("sales")),
        );

        observers.publish(&Snapshot::Expenses(Arc::new(Vec::new())));
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        let counter = Rc::clone(&hits);
        let id = observers.subscribe(
            Collection::Items,
            Box::new(move |_: &Snapshot| *counter.borrow_mut() += 1),
        );

        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));

        observers.publish(&Snapshot::Items(Arc::new(Vec::new())));
        assert_eq!(*hits.borrow(), 0);
        assert!(observers.is_empty());
    }
}
