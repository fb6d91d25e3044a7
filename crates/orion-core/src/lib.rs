//! # orion-core: Pure Domain Logic for Orion Nexus
//!
//! Entities, money/VAT arithmetic, order building and status rules for the
//! distributor/wholesaler back office. Zero I/O: every function here is
//! deterministic and testable without mocks.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Orion Nexus Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard (TypeScript, out of tree)             │   │
//! │  │     Products ─► Orders ─► Requests ─► Notifications ─► POS     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs bindings                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orion-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ OrderLine │  │   rules   │  │   │
//! │  │   │  Order    │  │  VatRate  │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   orion-store (DomainStore, session)  ◄──  orion-pos (bridge)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Product, Order, Company, Notification, ...)
//! - [`money`] - Integer NPR money and VAT rates
//! - [`order`] - Order line pricing, totals, status transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation for workflows
//!
//! ## Example Usage
//!
//! ```rust
//! use orion_core::money::{Money, VatRate};
//!
//! let line_total = Money::from_paisa(250_000); // NPR 2500.00
//! let vat = line_total.calculate_vat(VatRate::from_bps(1300)); // 13 %
//! assert_eq!(vat.paisa(), 32_500); // NPR 325.00
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, VatRate};
pub use order::{OrderLine, OrderTotals};
pub use types::*;

/// Maximum quantity of a single product on one order line.
///
/// Guards purchase-order forms against typos (1000 instead of 100).
pub const MAX_LINE_QUANTITY: u32 = 100_000;

/// Default quantity proposed for each product when a wholesaler accepts a
/// partnership request.
pub const DEFAULT_REQUEST_QUANTITY: u32 = 10;

/// Payment terms stamped on purchase orders created from the dashboard.
pub const DEFAULT_PAYMENT_TERMS: &str = "Net 30 days";
