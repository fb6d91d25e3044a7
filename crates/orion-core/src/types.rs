//! # Domain Types
//!
//! Core domain types shared by the store, the POS bridge and the dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │    Company      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  sku / barcode  │   │  order_number   │   │  pan / vat no.  │       │
//! │  │  price, stock   │   │  items[] ───────┼──►│  business_type  │       │
//! │  │  vat_rate, hs   │   │  total, vat     │   └─────────────────┘       │
//! │  └────────▲────────┘   │  status         │                              │
//! │           │ snapshot   └─────────────────┘   ┌─────────────────┐       │
//! │  ┌────────┴────────┐                         │  Notification   │       │
//! │  │WholesalerRequest│                         │  ─────────────  │       │
//! │  │  products[]     │                         │  type, priority │       │
//! │  │  status         │                         │  read flag      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is keyed by a string `id` assigned by the store. References
//! between entities are plain id strings; nothing cascades. Orders keep the
//! product name and price of each line, and requests keep a full product
//! snapshot, so deleting a product never rewrites history.
//!
//! ## Create / Patch Shapes
//! `New*` records are the entity without its id (what `add_*` accepts).
//! `*Patch` records carry `Some` for each field to overwrite.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Money, VatRate};

// =============================================================================
// Product
// =============================================================================

/// A catalog product with Inland Revenue compliance fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub barcode: String,
    pub category: String,
    pub brand: String,
    /// Distributor list price.
    pub price: Money,
    /// Units on hand. Never negative.
    pub stock: u32,
    /// Reorder threshold: at or below this the product is low stock.
    pub min_stock: u32,
    pub description: String,
    pub image: String,
    pub distributor_id: Option<String>,
    pub wholesaler_price: Option<Money>,

    /// Harmonized System code.
    pub hs_code: String,
    pub vat_rate: VatRate,
    pub manufacturer_name: String,
    pub manufacturer_address: String,
    pub importer_name: Option<String>,
    #[serde(rename = "importerPAN")]
    pub importer_pan: Option<String>,
    pub batch_number: Option<String>,
    #[ts(as = "Option<String>")]
    pub manufacturing_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub unit_of_measure: String,
    /// Net weight in grams (or millilitres for liquids).
    pub net_weight: Option<f64>,
    pub gross_weight: Option<f64>,
}

impl Product {
    /// A product is low stock iff `stock <= min_stock`.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Value of the units on hand at list price.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price * self.stock
    }
}

/// Fields for a new product (a `Product` without its id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub barcode: String,
    pub category: String,
    pub brand: String,
    pub price: Money,
    pub stock: u32,
    pub min_stock: u32,
    pub description: String,
    pub image: String,
    pub distributor_id: Option<String>,
    pub wholesaler_price: Option<Money>,
    pub hs_code: String,
    pub vat_rate: VatRate,
    pub manufacturer_name: String,
    pub manufacturer_address: String,
    pub importer_name: Option<String>,
    #[serde(rename = "importerPAN")]
    pub importer_pan: Option<String>,
    pub batch_number: Option<String>,
    #[ts(as = "Option<String>")]
    pub manufacturing_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub unit_of_measure: String,
    pub net_weight: Option<f64>,
    pub gross_weight: Option<f64>,
}

impl NewProduct {
    /// Attaches a store-assigned id.
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            sku: self.sku,
            barcode: self.barcode,
            category: self.category,
            brand: self.brand,
            price: self.price,
            stock: self.stock,
            min_stock: self.min_stock,
            description: self.description,
            image: self.image,
            distributor_id: self.distributor_id,
            wholesaler_price: self.wholesaler_price,
            hs_code: self.hs_code,
            vat_rate: self.vat_rate,
            manufacturer_name: self.manufacturer_name,
            manufacturer_address: self.manufacturer_address,
            importer_name: self.importer_name,
            importer_pan: self.importer_pan,
            batch_number: self.batch_number,
            manufacturing_date: self.manufacturing_date,
            expiry_date: self.expiry_date,
            unit_of_measure: self.unit_of_measure,
            net_weight: self.net_weight,
            gross_weight: self.gross_weight,
        }
    }
}

/// Partial product update; every `Some` field overwrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Money>,
    pub stock: Option<u32>,
    pub min_stock: Option<u32>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub distributor_id: Option<String>,
    pub wholesaler_price: Option<Money>,
    pub hs_code: Option<String>,
    pub vat_rate: Option<VatRate>,
    pub manufacturer_name: Option<String>,
    pub manufacturer_address: Option<String>,
    pub importer_name: Option<String>,
    #[serde(rename = "importerPAN")]
    pub importer_pan: Option<String>,
    pub batch_number: Option<String>,
    #[ts(as = "Option<String>")]
    pub manufacturing_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub unit_of_measure: Option<String>,
    pub net_weight: Option<f64>,
    pub gross_weight: Option<f64>,
}

impl ProductPatch {
    /// Patch that only sets the stock level.
    pub fn stock(stock: u32) -> Self {
        ProductPatch {
            stock: Some(stock),
            ..Default::default()
        }
    }

    /// Merges the `Some` fields into `product`.
    pub fn apply(self, product: &mut Product) {
        macro_rules! merge {
            ($($field:ident),* ; $($opt:ident),*) => {
                $(if let Some(v) = self.$field { product.$field = v; })*
                $(if let Some(v) = self.$opt { product.$opt = Some(v); })*
            };
        }
        merge!(
            name, sku, barcode, category, brand, price, stock, min_stock,
            description, image, hs_code, vat_rate, manufacturer_name,
            manufacturer_address, unit_of_measure ;
            distributor_id, wholesaler_price, importer_name, importer_pan,
            batch_number, manufacturing_date, expiry_date, net_weight, gross_weight
        );
    }
}

// =============================================================================
// Company
// =============================================================================

/// Closed set of business kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Distributor,
    Wholesaler,
    Retailer,
}

/// A registered business with its tax and banking identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    /// Permanent Account Number (9 digits).
    pub pan: String,
    pub vat_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub registration_number: String,
    #[ts(as = "String")]
    pub establishment_date: NaiveDate,
    pub business_type: BusinessType,
    pub owner_name: String,
    pub owner_citizenship: String,
    pub bank_account_number: String,
    pub bank_name: String,
    pub license_number: Option<String>,
    #[ts(as = "Option<String>")]
    pub license_expiry_date: Option<NaiveDate>,
}

/// Fields for a new company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    pub pan: String,
    pub vat_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub registration_number: String,
    #[ts(as = "String")]
    pub establishment_date: NaiveDate,
    pub business_type: BusinessType,
    pub owner_name: String,
    pub owner_citizenship: String,
    pub bank_account_number: String,
    pub bank_name: String,
    pub license_number: Option<String>,
    #[ts(as = "Option<String>")]
    pub license_expiry_date: Option<NaiveDate>,
}

impl NewCompany {
    pub fn into_company(self, id: String) -> Company {
        Company {
            id,
            name: self.name,
            pan: self.pan,
            vat_number: self.vat_number,
            address: self.address,
            phone: self.phone,
            email: self.email,
            registration_number: self.registration_number,
            establishment_date: self.establishment_date,
            business_type: self.business_type,
            owner_name: self.owner_name,
            owner_citizenship: self.owner_citizenship,
            bank_account_number: self.bank_account_number,
            bank_name: self.bank_name,
            license_number: self.license_number,
            license_expiry_date: self.license_expiry_date,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// Dashboard role; decides which screens a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Distributor,
    Wholesaler,
}

/// A dashboard user and the company they act for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company: Company,
    pub avatar: Option<String>,
    pub citizenship_number: String,
    pub phone_number: String,
}

// =============================================================================
// Order
// =============================================================================

/// Lifecycle of an order. Transition rules live in [`crate::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order (dashboard counters iterate this).
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line on an order. Name and price are frozen at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of order (frozen).
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at time of order (frozen).
    pub price: Money,
    /// `price × quantity`, before VAT.
    pub total: Money,
    /// `total × vat_rate / 100`.
    pub vat_amount: Money,
    pub discount_amount: Option<Money>,
}

/// An order placed by a wholesaler with a distributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(rename = "products")]
    pub items: Vec<OrderItem>,
    /// Sum of item totals plus `vat_amount`.
    pub total: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub invoice_number: Option<String>,
    pub vat_amount: Money,
    pub discount_amount: Option<Money>,
    pub delivery_address: String,
    pub payment_terms: String,
    /// Id of the user who created the order.
    pub created_by: String,
}

/// Fields for a new order. The caller pre-computes totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub order_number: String,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(rename = "products")]
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub invoice_number: Option<String>,
    pub vat_amount: Money,
    pub discount_amount: Option<Money>,
    pub delivery_address: String,
    pub payment_terms: String,
    pub created_by: String,
}

impl NewOrder {
    pub fn into_order(self, id: String) -> Order {
        Order {
            id,
            order_number: self.order_number,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            items: self.items,
            total: self.total,
            status: self.status,
            date: self.date,
            invoice_number: self.invoice_number,
            vat_amount: self.vat_amount,
            discount_amount: self.discount_amount,
            delivery_address: self.delivery_address,
            payment_terms: self.payment_terms,
            created_by: self.created_by,
        }
    }
}

// =============================================================================
// Wholesaler Request
// =============================================================================

/// Lifecycle of a partnership request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        })
    }
}

/// A product the wholesaler picked when approving, with its opening quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    pub product_id: String,
    pub quantity: u32,
}

/// A partnership proposal from a distributor to a wholesaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerRequest {
    pub id: String,
    pub distributor_id: String,
    pub distributor_name: String,
    pub wholesaler_id: String,
    pub wholesaler_name: String,
    /// Distributor catalog at request time (snapshot).
    pub products: Vec<Product>,
    pub status: RequestStatus,
    #[ts(as = "String")]
    pub request_date: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub response_date: Option<DateTime<Utc>>,
    pub selected_products: Option<Vec<SelectedProduct>>,
    pub message: Option<String>,
}

/// Fields for a new wholesaler request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewWholesalerRequest {
    pub distributor_id: String,
    pub distributor_name: String,
    pub wholesaler_id: String,
    pub wholesaler_name: String,
    pub products: Vec<Product>,
    pub status: RequestStatus,
    #[ts(as = "String")]
    pub request_date: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub response_date: Option<DateTime<Utc>>,
    pub selected_products: Option<Vec<SelectedProduct>>,
    pub message: Option<String>,
}

impl NewWholesalerRequest {
    pub fn into_request(self, id: String) -> WholesalerRequest {
        WholesalerRequest {
            id,
            distributor_id: self.distributor_id,
            distributor_name: self.distributor_name,
            wholesaler_id: self.wholesaler_id,
            wholesaler_name: self.wholesaler_name,
            products: self.products,
            status: self.status,
            request_date: self.request_date,
            response_date: self.response_date,
            selected_products: self.selected_products,
            message: self.message,
        }
    }
}

/// Partial request update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestPatch {
    pub status: Option<RequestStatus>,
    #[ts(as = "Option<String>")]
    pub response_date: Option<DateTime<Utc>>,
    pub selected_products: Option<Vec<SelectedProduct>>,
    pub products: Option<Vec<Product>>,
    pub message: Option<String>,
}

impl RequestPatch {
    pub fn apply(self, request: &mut WholesalerRequest) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(products) = self.products {
            request.products = products;
        }
        if self.response_date.is_some() {
            request.response_date = self.response_date;
        }
        if self.selected_products.is_some() {
            request.selected_products = self.selected_products;
        }
        if self.message.is_some() {
            request.message = self.message;
        }
    }
}

// =============================================================================
// Notification
// =============================================================================

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    LowStock,
    OrderPlaced,
    PaymentReceived,
    OrderShipped,
    System,
    WholesalerRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A dashboard event shown in the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
    pub wholesaler: Option<String>,
    pub product: Option<String>,
    pub order_number: Option<String>,
    pub amount: Option<Money>,
    pub request_id: Option<String>,
    pub distributor_id: Option<String>,
    pub wholesaler_id: Option<String>,
}

/// Fields for a new notification.
///
/// ```rust
/// use chrono::Utc;
/// use orion_core::{NewNotification, NotificationType, Priority};
///
/// let n = NewNotification::new(
///     NotificationType::LowStock,
///     Priority::High,
///     "Low Stock Alert",
///     "Daal - Moong is running low (15 remaining)",
///     Utc::now(),
/// )
/// .with_product("Daal - Moong");
/// assert!(!n.read);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
    pub wholesaler: Option<String>,
    pub product: Option<String>,
    pub order_number: Option<String>,
    pub amount: Option<Money>,
    pub request_id: Option<String>,
    pub distributor_id: Option<String>,
    pub wholesaler_id: Option<String>,
}

impl NewNotification {
    /// Unread notification with no correlation fields.
    pub fn new(
        kind: NotificationType,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        NewNotification {
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            read: false,
            priority,
            wholesaler: None,
            product: None,
            order_number: None,
            amount: None,
            request_id: None,
            distributor_id: None,
            wholesaler_id: None,
        }
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_wholesaler(mut self, wholesaler: impl Into<String>) -> Self {
        self.wholesaler = Some(wholesaler.into());
        self
    }

    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn into_notification(self, id: String) -> Notification {
        Notification {
            id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            timestamp: self.timestamp,
            read: self.read,
            priority: self.priority,
            wholesaler: self.wholesaler,
            product: self.product,
            order_number: self.order_number,
            amount: self.amount,
            request_id: self.request_id,
            distributor_id: self.distributor_id,
            wholesaler_id: self.wholesaler_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u32, min_stock: u32) -> Product {
        NewProduct {
            name: "Daal - Moong".into(),
            sku: "DL-MNG-001".into(),
            price: Money::from_rupees(120),
            stock,
            min_stock,
            ..Default::default()
        }
        .into_product("5".into())
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(product(15, 20).is_low_stock());
        assert!(product(20, 20).is_low_stock());
        assert!(!product(21, 20).is_low_stock());
        assert!(product(0, 0).is_low_stock());
    }

    #[test]
    fn test_patch_only_touches_some_fields() {
        let original = product(75, 20);
        let mut patched = original.clone();
        ProductPatch::stock(15).apply(&mut patched);

        assert_eq!(patched.stock, 15);
        assert_eq!(
            Product {
                stock: original.stock,
                ..patched
            },
            original
        );
    }

    #[test]
    fn test_patch_sets_optional_fields() {
        let mut p = product(75, 20);
        ProductPatch {
            batch_number: Some("DL2025002".into()),
            name: Some("Moong Dal".into()),
            ..Default::default()
        }
        .apply(&mut p);

        assert_eq!(p.batch_number.as_deref(), Some("DL2025002"));
        assert_eq!(p.name, "Moong Dal");
        assert_eq!(p.sku, "DL-MNG-001");
    }

    #[test]
    fn test_json_shape_matches_dashboard() {
        let json = serde_json::to_value(product(75, 20)).unwrap();
        assert_eq!(json["minStock"], 20);
        assert_eq!(json["price"], 12_000);
        assert!(json.get("importerPAN").is_some());

        let n = NewNotification::new(
            NotificationType::LowStock,
            Priority::High,
            "t",
            "m",
            Utc::now(),
        )
        .into_notification("1".into());
        let json = serde_json::to_value(n).unwrap();
        assert_eq!(json["type"], "low_stock");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(RequestStatus::Approved.to_string(), "approved");
    }
}
