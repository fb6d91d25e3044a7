//! # orion-store: Domain Store for Orion Nexus
//!
//! Holds the in-memory domain collections, the workflows that mutate them,
//! and the demo session gate with its durable key/value slots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Dashboard screens                    orion-pos (bridge, scheduler)    │
//! │        │                                      │ StoreHandle             │
//! │        ▼                                      ▼                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 orion-store (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────┐ │   │
//! │  │  │ DomainStore │  │  workflows  │  │SessionStore │  │   kv   │ │   │
//! │  │  │ seed data   │◄─│ approve/PO  │  │ demo login  │─►│ slots  │ │   │
//! │  │  └─────────────┘  └─────────────┘  └─────────────┘  └────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   orion-core (types, money, order rules, validation)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orion_core::ProductPatch;
//! use orion_store::DomainStore;
//!
//! let mut store = DomainStore::seeded();
//! assert!(store.update_product("5", ProductPatch::stock(15)));
//! assert_eq!(store.low_stock_products().len(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod kv;
pub mod seed;
pub mod session;
pub mod store;
pub mod workflows;

pub use error::{StoreError, StoreResult};
pub use ids::IdGenerator;
pub use kv::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, LAST_POS_SYNC_KEY, POS_SALES_CURSOR_KEY,
    SESSION_KEY,
};
pub use session::{SessionStore, DEMO_PASSWORD};
pub use store::{
    DashboardSummary, DomainStore, InventorySummary, NotificationFilter, StockChange, StoreHandle,
};
