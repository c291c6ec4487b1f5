//! # Entity Store
//!
//! The single source of truth for the five collections.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutation                                       │
//! │                                                                         │
//! │  store.add_expense(NewExpense { .. })                                  │
//! │       │                                                                 │
//! │       ├── validate payload ──── Err ──► CoreError, nothing changes     │
//! │       │                                                                 │
//! │       ├── lookup miss? ─────── yes ──► debug!, no write, no publish    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = f(&current)             (a new Vec; current is untouched)      │
//! │       │                                                                 │
//! │       ├──► persistence.save(slot, &next)   failure: warn!, continue    │
//! │       ├──► current = Arc::new(next)                                    │
//! │       └──► observers.publish(snapshot)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! Readers get an `Arc` of the current collection. Mutations replace the
//! `Arc`, never the data behind it, so a snapshot taken before a write keeps
//! describing the state at the time it was taken.
//!
//! ## Threading
//! The store is a plain single-owner value. Wrap it in a `Mutex` if more than
//! one thread needs it; every operation is short and synchronous.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use kirana_core::reports::{self, ReportSummary};
use kirana_core::validation::{
    validate_amount, validate_discount, validate_pin, validate_quantity,
};
use kirana_core::{
    CartItem, CoreError, CoreResult, Expense, Item, ItemPatch, NewExpense, NewItem,
    NewUdhaarEntry, Receipt, Sale, Settings, SettingsPatch, UdhaarEntry, MAX_CART_ITEMS,
};

use crate::config::StoreConfig;
use crate::defaults::default_items;
use crate::error::StorageResult;
use crate::ids::IdGenerator;
use crate::observer::{Observers, Snapshot, SubscriptionId};
use crate::storage::{Collection, FileStorage, Persistence, SlotStorage};

/// In-memory collections backed by slot storage.
#[derive(Debug)]
pub struct Store<S> {
    persistence: Persistence<S>,
    ids: IdGenerator,
    observers: Observers,
    items: Arc<Vec<Item>>,
    sales: Arc<Vec<Sale>>,
    udhaar: Arc<Vec<UdhaarEntry>>,
    expenses: Arc<Vec<Expense>>,
    settings: Arc<Settings>,
    utc_offset: FixedOffset,
}

impl Store<FileStorage> {
    /// Opens the data directory named by `config` and loads every slot.
    pub fn open(config: &StoreConfig) -> StorageResult<Self> {
        let store = Store::init(FileStorage::open(&config.data_dir)?);
        Ok(store.with_utc_offset(config.utc_offset))
    }
}

impl<S: SlotStorage> Store<S> {
    // =========================================================================
    // Initialization
    // =========================================================================

    /// Loads all five slots.
    ///
    /// ## Fallbacks
    /// - items: missing or unreadable → default catalog, persisted at once
    /// - sales, udhaar, expenses: → empty
    /// - settings: → defaults (missing fields are filled individually)
    pub fn init(backend: S) -> Self {
        let mut persistence = Persistence::new(backend);

        let items = match persistence.try_load::<Vec<Item>>(Collection::Items.key()) {
            Ok(Some(items)) => items,
            outcome => {
                if let Err(e) = outcome {
                    warn!(error = %e, "Item catalog unreadable, reseeding");
                }
                let items = default_items();
                persistence.save(Collection::Items.key(), &items);
                info!(count = items.len(), "Seeded default item catalog");
                items
            }
        };
        let sales: Vec<Sale> = persistence.load(Collection::Sales.key(), Vec::new());
        let udhaar: Vec<UdhaarEntry> = persistence.load(Collection::Udhaar.key(), Vec::new());
        let expenses: Vec<Expense> = persistence.load(Collection::Expenses.key(), Vec::new());
        let settings: Settings = persistence.load(Collection::Settings.key(), Settings::default());

        let mut ids = IdGenerator::new();
        ids.reserve(items.iter().map(|i| i.id.as_str()));
        ids.reserve(sales.iter().map(|s| s.id.as_str()));
        ids.reserve(udhaar.iter().map(|e| e.id.as_str()));
        ids.reserve(expenses.iter().map(|e| e.id.as_str()));

        info!(
            items = items.len(),
            sales = sales.len(),
            udhaar = udhaar.len(),
            expenses = expenses.len(),
            "Store initialized"
        );

        Store {
            persistence,
            ids,
            observers: Observers::new(),
            items: Arc::new(items),
            sales: Arc::new(sales),
            udhaar: Arc::new(udhaar),
            expenses: Arc::new(expenses),
            settings: Arc::new(settings),
            utc_offset: Utc.fix(),
        }
    }

    /// Sets the offset receipts print their date in. Defaults to UTC.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn items(&self) -> Arc<Vec<Item>> {
        Arc::clone(&self.items)
    }

    pub fn sales(&self) -> Arc<Vec<Sale>> {
        Arc::clone(&self.sales)
    }

    pub fn udhaar(&self) -> Arc<Vec<UdhaarEntry>> {
        Arc::clone(&self.udhaar)
    }

    pub fn expenses(&self) -> Arc<Vec<Expense>> {
        Arc::clone(&self.expenses)
    }

    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Dashboard figures as of `now`.
    pub fn summary(&self, now: DateTime<Utc>) -> ReportSummary {
        ReportSummary::compute(&self.sales, &self.expenses, &self.udhaar, now)
    }

    /// Receipt for a recorded sale, using the current settings.
    pub fn receipt(&self, sale_id: &str) -> Option<Receipt> {
        self.sale(sale_id)
            .map(|sale| Receipt::render_in(sale, &self.settings, self.utc_offset))
    }

    pub fn backend(&self) -> &S {
        self.persistence.backend()
    }

    // =========================================================================
    // Functional Updates
    // =========================================================================

    /// Replaces the item list with `f(current)`, persists, then publishes.
    pub fn update_items(&mut self, f: impl FnOnce(&[Item]) -> Vec<Item>) -> Arc<Vec<Item>> {
        let next = f(self.items.as_slice());
        commit(
            &mut self.persistence,
            &mut self.observers,
            &mut self.items,
            next,
            Collection::Items,
            Snapshot::Items,
        )
    }

    pub fn update_sales(&mut self, f: impl FnOnce(&[Sale]) -> Vec<Sale>) -> Arc<Vec<Sale>> {
        let next = f(self.sales.as_slice());
        commit(
            &mut self.persistence,
            &mut self.observers,
            &mut self.sales,
            next,
            Collection::Sales,
            Snapshot::Sales,
        )
    }

    pub fn update_udhaar(
        &mut self,
        f: impl FnOnce(&[UdhaarEntry]) -> Vec<UdhaarEntry>,
    ) -> Arc<Vec<UdhaarEntry>> {
        let next = f(self.udhaar.as_slice());
        commit(
            &mut self.persistence,
            &mut self.observers,
            &mut self.udhaar,
            next,
            Collection::Udhaar,
            Snapshot::Udhaar,
        )
    }

    pub fn update_expenses(
        &mut self,
        f: impl FnOnce(&[Expense]) -> Vec<Expense>,
    ) -> Arc<Vec<Expense>> {
        let next = f(self.expenses.as_slice());
        commit(
            &mut self.persistence,
            &mut self.observers,
            &mut self.expenses,
            next,
            Collection::Expenses,
            Snapshot::Expenses,
        )
    }

    pub fn update_settings_with(
        &mut self,
        f: impl FnOnce(&Settings) -> Settings,
    ) -> Arc<Settings> {
        let next = f(&*self.settings);
        commit(
            &mut self.persistence,
            &mut self.observers,
            &mut self.settings,
            next,
            Collection::Settings,
            Snapshot::Settings,
        )
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Appends a new catalog item.
    pub fn add_item(&mut self, data: NewItem) -> CoreResult<Item> {
        let data = data.validated()?;
        let item = Item::from_new(self.ids.next_id(), data);
        debug!(id = %item.id, name = %item.name_en, price = %item.price, "Adding item");

        self.update_items(|items| appended(items, item.clone()));
        Ok(item)
    }

    /// Applies a patch to one item. `Ok(None)` when the id is unknown.
    ///
    /// Past sales keep their own copy of the item and are not affected.
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> CoreResult<Option<Item>> {
        let patch = patch.validated()?;
        let Some(position) = self.items.iter().position(|i| i.id == id) else {
            debug!(id = %id, "update_item: no such item");
            return Ok(None);
        };

        let mut updated = self.items[position].clone();
        updated.apply(patch);
        debug!(id = %id, "Updating item");

        self.update_items(|items| {
            let mut next = items.to_vec();
            next[position] = updated.clone();
            next
        });
        Ok(Some(updated))
    }

    /// Removes an item from the catalog. Returns `false` if it was not there.
    pub fn delete_item(&mut self, id: &str) -> bool {
        if !self.items.iter().any(|i| i.id == id) {
            debug!(id = %id, "delete_item: no such item");
            return false;
        }
        debug!(id = %id, "Deleting item");
        self.update_items(|items| items.iter().filter(|i| i.id != id).cloned().collect());
        self.ids.release(id);
        true
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a bill.
    ///
    /// The total is computed here from the lines, and the store name is
    /// frozen from the current settings.
    pub fn add_sale(&mut self, lines: Vec<CartItem>) -> CoreResult<Sale> {
        if lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        if lines.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        for line in &lines {
            validate_amount("price", line.item.price)?;
            validate_quantity(line.quantity)?;
            validate_discount(line.discount)?;
        }

        let sale = Sale {
            id: self.ids.next_id(),
            date: Utc::now(),
            total: reports::cart_total(&lines),
            items: lines,
            store_name: self.settings.store_name_en.clone(),
        };
        debug!(
            id = %sale.id,
            lines = sale.items.len(),
            total = %sale.total,
            "Recording sale"
        );

        self.update_sales(|sales| appended(sales, sale.clone()));
        Ok(sale)
    }

    // =========================================================================
    // Udhaar
    // =========================================================================

    /// Records credit given to a customer. New entries start unpaid.
    pub fn add_udhaar_entry(&mut self, data: NewUdhaarEntry) -> CoreResult<UdhaarEntry> {
        let data = data.validated()?;
        let entry = UdhaarEntry {
            id: self.ids.next_id(),
            customer_name: data.customer_name,
            amount: data.amount,
            date: Utc::now(),
            note: data.note,
            paid: false,
        };
        debug!(id = %entry.id, customer = %entry.customer_name, amount = %entry.amount, "Adding udhaar");

        self.update_udhaar(|entries| appended(entries, entry.clone()));
        Ok(entry)
    }

    /// Marks an entry settled. Returns `false` if the id is unknown.
    pub fn mark_udhaar_paid(&mut self, id: &str) -> bool {
        let Some(entry) = self.udhaar.iter().find(|e| e.id == id) else {
            debug!(id = %id, "mark_udhaar_paid: no such entry");
            return false;
        };
        if entry.paid {
            return true;
        }
        debug!(id = %id, "Marking udhaar paid");

        self.update_udhaar(|entries| {
            entries
                .iter()
                .map(|e| {
                    let mut e = e.clone();
                    if e.id == id {
                        e.paid = true;
                    }
                    e
                })
                .collect()
        });
        true
    }

    pub fn delete_udhaar_entry(&mut self, id: &str) -> bool {
        if !self.udhaar.iter().any(|e| e.id == id) {
            debug!(id = %id, "delete_udhaar_entry: no such entry");
            return false;
        }
        debug!(id = %id, "Deleting udhaar");
        self.update_udhaar(|entries| entries.iter().filter(|e| e.id != id).cloned().collect());
        self.ids.release(id);
        true
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    pub fn add_expense(&mut self, data: NewExpense) -> CoreResult<Expense> {
        let data = data.validated()?;
        let expense = Expense {
            id: self.ids.next_id(),
            date: Utc::now(),
            description: data.description,
            amount: data.amount,
        };
        debug!(id = %expense.id, amount = %expense.amount, "Adding expense");

        self.update_expenses(|expenses| appended(expenses, expense.clone()));
        Ok(expense)
    }

    pub fn delete_expense(&mut self, id: &str) -> bool {
        if !self.expenses.iter().any(|e| e.id == id) {
            debug!(id = %id, "delete_expense: no such expense");
            return false;
        }
        debug!(id = %id, "Deleting expense");
        self.update_expenses(|expenses| expenses.iter().filter(|e| e.id != id).cloned().collect());
        self.ids.release(id);
        true
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Merges a partial update into the settings.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> CoreResult<Arc<Settings>> {
        let patch = patch.validated()?;
        debug!("Updating settings");
        Ok(self.update_settings_with(|current| {
            let mut next = current.clone();
            next.apply(patch);
            next
        }))
    }

    /// Changes the PIN.
    ///
    /// ## Checks (in order)
    /// 1. `current` equals the stored PIN
    /// 2. `new_pin` is 4–6 digits
    /// 3. `confirm` equals `new_pin`
    pub fn change_pin(&mut self, current: &str, new_pin: &str, confirm: &str) -> CoreResult<()> {
        if !self.settings.pin_matches(current) {
            return Err(CoreError::PinMismatch);
        }
        validate_pin(new_pin)?;
        if new_pin != confirm {
            return Err(CoreError::PinConfirmationMismatch);
        }

        info!("PIN changed");
        self.update_settings_with(|settings| Settings {
            pin: new_pin.to_string(),
            ..settings.clone()
        });
        Ok(())
    }

    /// Checks an entered PIN at the lock screen.
    pub fn verify_pin(&self, entered: &str) -> bool {
        self.settings.pin_matches(entered)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers a callback for changes to one collection.
    pub fn subscribe(
        &mut self,
        collection: Collection,
        callback: impl FnMut(&Snapshot) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(collection, Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

/// Persist, swap in, publish.
fn commit<S: SlotStorage, T: Serialize>(
    persistence: &mut Persistence<S>,
    observers: &mut Observers,
    slot: &mut Arc<T>,
    next: T,
    collection: Collection,
    wrap: fn(Arc<T>) -> Snapshot,
) -> Arc<T> {
    let next = Arc::new(next);
    persistence.save(collection.key(), &*next);
    *slot = Arc::clone(&next);
    observers.publish(&wrap(Arc::clone(&next)));
    next
}

fn appended<T: Clone>(current: &[T], value: T) -> Vec<T> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(value);
    next
}

// =============================================================================
// Unit Tests
// =============================================================================
