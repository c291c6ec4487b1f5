//! # kirana-store: Persistence & Entity Store for Kirana POS
//!
//! Holds the shop's collections in memory, writes every change to named JSON
//! slots, and tells observers about it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kirana POS Data Flow                             │
//! │                                                                         │
//! │  UI action (save bill)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   kirana-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Store      │    │  Persistence  │    │  Observers   │   │   │
//! │  │   │  (store.rs)   │───►│  (storage/)   │    │(observer.rs) │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ Arc snapshots │    │ FileStorage   │    │ callbacks    │   │   │
//! │  │   │ CRUD, PIN     │───────────────────────►│ per slot     │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │           │                                                     │   │
//! │  │           ▼                                                     │   │
//! │  │   Printer (print.rs) ── Receipt from kirana-core               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  <data_dir>/kirana_items.json, kirana_sales.json, ...           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The entity store: snapshots, CRUD, PIN
//! - [`storage`] - Slot backends and the load/save policy
//! - [`observer`] - Change subscriptions
//! - [`ids`] - Entity id generation
//! - [`print`] - Receipt handoff to a print surface
//! - [`config`] - Data directory and print settings
//! - [`error`] - Storage and print error types
//!
//! ## Usage
//!
//! ```rust
//! use kirana_store::{MemoryStorage, Store};
//! use kirana_core::{CartItem, Money};
//! use rust_decimal::Decimal;
//!
//! let mut store = Store::init(MemoryStorage::new());
//! let rice = store.items()[0].clone();
//!
//! let line = CartItem::new(rice, Decimal::from(2), Decimal::ZERO).unwrap();
//! let sale = store.add_sale(vec![line]).unwrap();
//! assert_eq!(sale.total, Money::from_paise(12000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod defaults;
pub mod error;
pub mod ids;
pub mod observer;
pub mod print;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{PrintError, StorageError, StorageResult};
pub use observer::{Snapshot, SubscriptionId};
pub use print::{PrintSurface, Printer, TextFileSurface};
pub use storage::{Collection, FileStorage, MemoryStorage, Persistence, SlotStorage};
pub use store::Store;
