//! # orion-pos: POS Bridge for Orion Nexus
//!
//! Connects a wholesaler's catalog to their point-of-sale system over HTTP:
//! products go out, sales and stock levels come back, and everything the
//! bridge learns lands in the dashboard as notifications.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌───────────────┐   ticks    ┌──────────────────────────────────────┐ │
//! │  │ PollScheduler │──────────► │              PosBridge               │ │
//! │  │ backoff,      │            │                                      │ │
//! │  │ shutdown      │            │  test_connection   sync_products     │ │
//! │  └───────────────┘            │  sync_sales        pull_stock        │ │
//! │                               │  setup_webhook     handle_webhook    │ │
//! │  webhook body ──► PosWebhookEvent ──►                                │ │
//! │                               └───┬──────────────┬───────────────┬───┘ │
//! │                                   │              │               │     │
//! │                                   ▼              ▼               ▼     │
//! │                           dyn PosApi      StoreHandle     PosEventEmitter
//! │                          (HttpPosClient)  SessionStore    (toasts)     │
//! │                                           KeyValueStore                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`bridge`] - `PosBridge`, connection status, sales/stock reconciliation
//! - [`client`] - `PosApi` trait and the reqwest client
//! - [`config`] - `pos.toml` + environment configuration
//! - [`error`] - POS error types
//! - [`events`] - Toast surface (`PosEventEmitter`)
//! - [`protocol`] - Wire DTOs
//! - [`scheduler`] - Background sales polling
//! - [`webhook`] - Push event decoding
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = PosConfig::load_or_default(None);
//! let api = Arc::new(HttpPosClient::new(&config)?);
//! let bridge = Arc::new(PosBridge::new(api, store, session, kv));
//!
//! if bridge.test_connection().await {
//!     bridge.sync_products_to_pos().await?;
//! }
//! let scheduler = PollScheduler::spawn(bridge.clone(), config.schedule.clone());
//! // ...
//! scheduler.shutdown().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod protocol;
pub mod scheduler;
pub mod webhook;

// =============================================================================
// Re-exports
// =============================================================================

pub use bridge::{ConnectionStatus, PosBridge, PosStatus, SalesSyncReport};
pub use client::{HttpPosClient, PosApi};
pub use config::{ApiSettings, PosConfig, ScheduleSettings, StorageSettings};
pub use error::{PosError, PosResult};
pub use events::{NoOpEmitter, PosEventEmitter, TracingEmitter};
pub use protocol::{PosProduct, PosSale, PosSaleItem, StockLevel};
pub use scheduler::{PollScheduler, SchedulerHandle};
pub use webhook::PosWebhookEvent;
