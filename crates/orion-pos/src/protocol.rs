//! # POS Wire Format
//!
//! JSON bodies exchanged with the point-of-sale HTTP API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  /health                          ◄── HealthStatus                 │
//! │  POST /products/sync                   ──► ProductSyncRequest           │
//! │  PUT  /products/{id}/sync              ──► PosProduct                   │
//! │  GET  /sales?wholesalerId=&fromDate=   ◄── [PosSale]                    │
//! │  POST /sales/acknowledge               ──► SaleAck                      │
//! │  GET  /stock/updates?wholesalerId=     ◄── [StockLevel]                 │
//! │  POST /webhooks/setup                  ──► WebhookSetup                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are camelCase. Money travels as decimal rupees and VAT as a
//! percentage; both are converted to [`Money`] / [`VatRate`] at this edge
//! and nowhere else.

use serde::{Deserialize, Serialize};

use orion_core::{Money, NewProduct, Product, VatRate};

/// Events a webhook subscription can ask for.
pub const WEBHOOK_EVENTS: [&str; 3] = ["sale_completed", "stock_updated", "product_added"];

// =============================================================================
// Products
// =============================================================================

/// A catalog entry as the POS sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosProduct {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub barcode: String,
    /// Rupees.
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub brand: String,
    pub image: String,
    /// Percent, e.g. `13.0`.
    pub vat_rate: f64,
    pub wholesaler_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<String>,
}

impl PosProduct {
    /// Projects a catalog product for the wholesaler pushing it.
    pub fn from_product(product: &Product, wholesaler_id: &str) -> Self {
        PosProduct {
            id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            barcode: product.barcode.clone(),
            price: product.price.to_rupees_f64(),
            stock: product.stock,
            category: product.category.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            vat_rate: product.vat_rate.percentage(),
            wholesaler_id: wholesaler_id.to_string(),
            distributor_id: product.distributor_id.clone(),
        }
    }

    /// A local product for one first seen on the POS.
    ///
    /// The POS knows nothing of compliance fields, so those stay empty and
    /// the reorder threshold starts at zero.
    pub fn into_product(self) -> Product {
        let id = self.id.clone();
        NewProduct {
            name: self.name,
            sku: self.sku,
            barcode: self.barcode,
            category: self.category,
            brand: self.brand,
            price: Money::from_rupees_f64(self.price),
            stock: self.stock,
            image: self.image,
            distributor_id: self.distributor_id,
            vat_rate: VatRate::from_percentage(self.vat_rate),
            ..Default::default()
        }
        .into_product(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSyncRequest {
    pub products: Vec<PosProduct>,
}

// =============================================================================
// Sales
// =============================================================================

/// One line of a POS sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosSaleItem {
    pub product_id: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

/// A completed checkout on the POS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosSale {
    pub id: String,
    pub products: Vec<PosSaleItem>,
    pub total: f64,
    #[serde(default)]
    pub vat_amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// ISO-8601, as the POS sent it.
    pub timestamp: String,
    pub wholesaler_id: String,
}

impl PosSale {
    pub fn total_money(&self) -> Money {
        Money::from_rupees_f64(self.total)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleAck {
    pub sale_ids: Vec<String>,
}

// =============================================================================
// Stock, Health, Webhooks
// =============================================================================

/// An absolute stock level reported by the POS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: String,
    /// May be negative when the till oversold; clamped on apply.
    pub stock: i64,
}

impl StockLevel {
    pub fn clamped(&self) -> u32 {
        self.stock.clamp(0, u32::MAX as i64) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSetup {
    pub url: String,
    pub events: Vec<String>,
}
