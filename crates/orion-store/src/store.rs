//! # Domain Store
//!
//! In-memory collections for products, orders, wholesaler requests,
//! notifications and companies, plus every mutation the dashboard performs.
//!
//! ## Mutation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_*            fresh time-ordered id, append (notifications prepend) │
//! │  update_* / mark  merge into the matching entity; unknown id → no-op    │
//! │  delete_product   remove; orders and requests keep their snapshots      │
//! │  order status     checked against the transition table                  │
//! │                                                                         │
//! │  No sku/barcode uniqueness, no stock check on orders, no cascade.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sharing
//! The dashboard owns one `DomainStore`. The POS bridge and its polling
//! task reach it through a [`StoreHandle`]; the lock is only held for the
//! duration of a synchronous mutation, never across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use orion_core::{
    Company, CoreResult, Money, NewCompany, NewNotification, NewOrder, NewProduct,
    NewWholesalerRequest, Notification, NotificationType, Order, OrderStatus, Priority, Product,
    ProductPatch, RequestPatch, RequestStatus, WholesalerRequest,
};

use crate::ids::IdGenerator;

/// Shared handle used by background tasks.
pub type StoreHandle = Arc<Mutex<DomainStore>>;

/// Notification feed filter (the notification page tabs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFilter {
    All,
    Unread,
    HighPriority,
    OfType(NotificationType),
}

impl NotificationFilter {
    fn matches(&self, n: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !n.read,
            NotificationFilter::HighPriority => n.priority == Priority::High,
            NotificationFilter::OfType(kind) => n.kind == *kind,
        }
    }
}

/// Inventory page header figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_units: u64,
    pub total_value: Money,
    pub low_stock_count: usize,
}

/// Home page header figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub total_revenue: Money,
    pub pending_orders: usize,
    pub low_stock_count: usize,
    pub unread_notifications: usize,
    pub pending_requests: usize,
}

/// Result of taking units out of stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub product_id: String,
    pub product_name: String,
    pub previous: u32,
    pub current: u32,
    pub min_stock: u32,
}

impl StockChange {
    #[inline]
    pub fn is_low(&self) -> bool {
        self.current <= self.min_stock
    }
}

/// The single source of truth for domain data.
#[derive(Debug, Default)]
pub struct DomainStore {
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
    pub(crate) wholesaler_requests: Vec<WholesalerRequest>,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) companies: Vec<Company>,
    pub(crate) ids: IdGenerator,
}

impl DomainStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the store for sharing with background tasks.
    pub fn into_handle(self) -> StoreHandle {
        Arc::new(Mutex::new(self))
    }

    // =========================================================================
    // Collections
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn wholesaler_requests(&self) -> &[WholesalerRequest] {
        &self.wholesaler_requests
    }

    /// Newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn wholesaler_request(&self, id: &str) -> Option<&WholesalerRequest> {
        self.wholesaler_requests.iter().find(|r| r.id == id)
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Appends a product under a fresh id. Always succeeds.
    pub fn add_product(&mut self, product: NewProduct) -> String {
        let id = self.ids.next_id();
        debug!(id = %id, sku = %product.sku, "Adding product");
        self.products.push(product.into_product(id.clone()));
        id
    }

    /// Appends a product that already carries an id (e.g. one created on
    /// the POS). Returns false and changes nothing when the id is taken.
    pub fn insert_product(&mut self, product: Product) -> bool {
        if self.product(&product.id).is_some() {
            debug!(id = %product.id, "insert_product: id already present, ignoring");
            return false;
        }
        debug!(id = %product.id, sku = %product.sku, "Inserting product");
        self.products.push(product);
        true
    }

    /// Merges `patch` into the product. Returns false for an unknown id.
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                patch.apply(product);
                true
            }
            None => {
                debug!(id = %id, "update_product: unknown id, ignoring");
                false
            }
        }
    }

    /// Removes the product. Orders and requests that mention it are untouched.
    pub fn delete_product(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != before;
        if !removed {
            debug!(id = %id, "delete_product: unknown id, ignoring");
        }
        removed
    }

    /// Takes `quantity` units out of stock, flooring at zero.
    ///
    /// Returns `None` when the product is unknown.
    pub fn decrement_stock(&mut self, id: &str, quantity: u32) -> Option<StockChange> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        let previous = product.stock;
        product.stock = previous.saturating_sub(quantity);
        Some(StockChange {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            previous,
            current: product.stock,
            min_stock: product.min_stock,
        })
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Appends an order as given. Totals are the caller's responsibility.
    pub fn add_order(&mut self, order: NewOrder) -> String {
        let id = self.ids.next_id();
        info!(id = %id, order_number = %order.order_number, "Adding order");
        self.orders.push(order.into_order(id.clone()));
        id
    }

    /// Sets an order's status.
    ///
    /// ## Returns
    /// * `Ok(true)` - status set (or already equal)
    /// * `Ok(false)` - no order with that id
    /// * `Err(InvalidStatusTransition)` - move not allowed from current status
    pub fn update_order_status(&mut self, id: &str, status: OrderStatus) -> CoreResult<bool> {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == id) else {
            debug!(id = %id, "update_order_status: unknown id, ignoring");
            return Ok(false);
        };

        order.status.check_transition(id, status)?;
        if order.status != status {
            info!(id = %id, from = %order.status, to = %status, "Order status changed");
            order.status = status;
        }
        Ok(true)
    }

    // =========================================================================
    // Wholesaler Requests
    // =========================================================================

    pub fn add_wholesaler_request(&mut self, request: NewWholesalerRequest) -> String {
        let id = self.ids.next_id();
        debug!(id = %id, wholesaler = %request.wholesaler_name, "Adding wholesaler request");
        self.wholesaler_requests.push(request.into_request(id.clone()));
        id
    }

    /// Merges `patch` into the request. Returns false for an unknown id.
    pub fn update_wholesaler_request(&mut self, id: &str, patch: RequestPatch) -> bool {
        match self.wholesaler_requests.iter_mut().find(|r| r.id == id) {
            Some(request) => {
                patch.apply(request);
                true
            }
            None => {
                debug!(id = %id, "update_wholesaler_request: unknown id, ignoring");
                false
            }
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Inserts at the front so the feed stays newest first.
    pub fn add_notification(&mut self, notification: NewNotification) -> String {
        let id = self.ids.next_id();
        debug!(id = %id, kind = ?notification.kind, title = %notification.title, "Adding notification");
        self.notifications
            .insert(0, notification.into_notification(id.clone()));
        id
    }

    pub fn mark_notification_as_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => {
                debug!(id = %id, "mark_notification_as_read: unknown id, ignoring");
                false
            }
        }
    }

    /// Returns how many notifications flipped from unread to read.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        changed
    }

    // =========================================================================
    // Companies
    // =========================================================================

    pub fn add_company(&mut self, company: NewCompany) -> String {
        let id = self.ids.next_id();
        debug!(id = %id, name = %company.name, "Adding company");
        self.companies.push(company.into_company(id.clone()));
        id
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Case-insensitive substring match over name, sku and brand.
    /// An empty (or blank) term matches everything.
    pub fn search_products(&self, term: &str) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.name.to_lowercase().contains(&term)
                    || p.sku.to_lowercase().contains(&term)
                    || p.brand.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    pub fn products_by_distributor(&self, distributor_id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.distributor_id.as_deref() == Some(distributor_id))
            .collect()
    }

    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn orders_by_creator(&self, user_id: &str) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.created_by == user_id).collect()
    }

    /// Orders addressed to a customer. Purchase orders name the supplying
    /// distributor here.
    pub fn orders_for_customer(&self, customer_id: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .collect()
    }

    /// Count per status, every status present (zero when unused).
    pub fn order_status_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> =
            OrderStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
        for order in &self.orders {
            *counts.entry(order.status.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn filter_notifications(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| filter.matches(n))
            .collect()
    }

    pub fn requests_for_wholesaler(&self, wholesaler_id: &str) -> Vec<&WholesalerRequest> {
        self.wholesaler_requests
            .iter()
            .filter(|r| r.wholesaler_id == wholesaler_id)
            .collect()
    }

    pub fn inventory_summary(&self) -> InventorySummary {
        InventorySummary {
            total_products: self.products.len(),
            total_units: self.products.iter().map(|p| u64::from(p.stock)).sum(),
            total_value: self.products.iter().map(Product::stock_value).sum(),
            low_stock_count: self.products.iter().filter(|p| p.is_low_stock()).count(),
        }
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        DashboardSummary {
            total_orders: self.orders.len(),
            total_revenue: self.orders.iter().map(|o| o.total).sum(),
            pending_orders: self
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
            low_stock_count: self.products.iter().filter(|p| p.is_low_stock()).count(),
            unread_notifications: self.unread_notification_count(),
            pending_requests: self
                .wholesaler_requests
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use orion_core::{OrderItem, VatRate};

    fn new_product(name: &str, sku: &str, stock: u32, min_stock: u32) -> NewProduct {
        NewProduct {
            name: name.into(),
            sku: sku.into(),
            brand: "Tata".into(),
            category: "Groceries".into(),
            price: Money::from_rupees(100),
            stock,
            min_stock,
            vat_rate: VatRate::STANDARD,
            distributor_id: Some("1".into()),
            ..Default::default()
        }
    }

    fn new_order(status: OrderStatus) -> NewOrder {
        NewOrder {
            order_number: "ORD-T-1".into(),
            customer_id: "2".into(),
            customer_name: "Valley Wholesale Mart".into(),
            items: vec![OrderItem {
                product_id: "x".into(),
                product_name: "Thing".into(),
                quantity: 2,
                price: Money::from_rupees(10),
                total: Money::from_rupees(20),
                vat_amount: Money::from_paisa(260),
                discount_amount: None,
            }],
            total: Money::from_paisa(2_260),
            status,
            date: Utc::now(),
            invoice_number: None,
            vat_amount: Money::from_paisa(260),
            discount_amount: None,
            delivery_address: "Thamel".into(),
            payment_terms: "Net 30 days".into(),
            created_by: "1".into(),
        }
    }

    fn note(title: &str) -> NewNotification {
        NewNotification::new(
            NotificationType::System,
            Priority::Low,
            title,
            "body",
            Utc::now(),
        )
    }

    #[test]
    fn test_add_product_assigns_fresh_ids() {
        let mut store = DomainStore::new();
        let a = store.add_product(new_product("A", "SKU-1", 5, 1));
        let b = store.add_product(new_product("B", "SKU-1", 5, 1));

        assert_ne!(a, b);
        assert_eq!(store.products().len(), 2);
        assert_eq!(store.products()[1].id, b);
    }

    #[test]
    fn test_insert_product_keeps_id_once() {
        let mut store = DomainStore::new();
        let product = new_product("Tokla Tea", "TOK-1", 10, 2).into_product("pos-77".into());

        assert!(store.insert_product(product.clone()));
        assert!(!store.insert_product(product));
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.product("pos-77").unwrap().name, "Tokla Tea");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = DomainStore::new();
        store.add_product(new_product("A", "SKU-1", 5, 1));
        let before = store.products().to_vec();

        assert!(!store.update_product("nope", ProductPatch::stock(0)));
        assert!(!store.delete_product("nope"));
        assert!(!store.mark_notification_as_read("nope"));
        assert!(!store.update_wholesaler_request("nope", RequestPatch::default()));
        assert_eq!(store.products(), before.as_slice());
    }

    #[test]
    fn test_update_product_merges() {
        let mut store = DomainStore::new();
        let id = store.add_product(new_product("A", "SKU-1", 5, 1));

        let before = store.product(&id).unwrap().clone();

        assert!(store.update_product(&id, ProductPatch::stock(42)));
        let expected = Product {
            stock: 42,
            ..before
        };
        assert_eq!(store.product(&id), Some(&expected));
    }

    #[test]
    fn test_add_wholesaler_request_appends() {
        let mut store = DomainStore::seeded();
        let snapshot = store.products_by_distributor("1").into_iter().cloned().collect();
        let id = store.add_wholesaler_request(NewWholesalerRequest {
            distributor_id: "1".into(),
            distributor_name: "Himalayan Distributors Pvt. Ltd.".into(),
            wholesaler_id: "4".into(),
            wholesaler_name: "Pokhara Retail Hub".into(),
            products: snapshot,
            status: RequestStatus::Pending,
            request_date: Utc::now(),
            response_date: None,
            selected_products: None,
            message: None,
        });

        assert_eq!(store.wholesaler_requests().len(), 2);
        assert_eq!(store.wholesaler_requests()[1].id, id);

        let mine = store.requests_for_wholesaler("4");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, id);
        assert_eq!(mine[0].products.len(), 6);
        assert_eq!(store.requests_for_wholesaler("2").len(), 1);
        assert!(store.requests_for_wholesaler("9").is_empty());
    }

    #[test]
    fn test_catalog_lookups() {
        let mut store = DomainStore::seeded();
        store.add_product(NewProduct {
            distributor_id: Some("7".into()),
            ..new_product("Ilam Tea", "ILM-001", 10, 2)
        });

        assert_eq!(store.products_by_distributor("1").len(), 6);
        assert_eq!(store.products_by_distributor("7").len(), 1);
        assert!(store.products_by_distributor("nobody").is_empty());

        assert_eq!(
            store.find_by_barcode("8850100129016").map(|p| p.sku.as_str()),
            Some("WW-CHK-001")
        );
        assert!(store.find_by_barcode("0000000000000").is_none());

        let groceries: Vec<&str> = store
            .products_in_category("Groceries")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(groceries.len(), 3);
        assert!(groceries.contains(&"5"));
        assert!(groceries.contains(&"6"));
        assert!(store.products_in_category("groceries").is_empty());
    }

    #[test]
    fn test_order_lookups() {
        let mut store = DomainStore::seeded();
        let mut order = new_order(OrderStatus::Pending);
        order.created_by = "2".into();
        order.customer_id = "1".into();
        let id = store.add_order(order);

        assert_eq!(store.orders_by_creator("1").len(), 2);
        let placed = store.orders_by_creator("2");
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].id, id);

        let received = store.orders_for_customer("1");
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id, id);
        assert!(store.orders_by_creator("9").is_empty());
    }

    #[test]
    fn test_delete_leaves_orders_alone() {
        let mut store = DomainStore::new();
        let pid = store.add_product(new_product("A", "SKU-1", 5, 1));
        let mut order = new_order(OrderStatus::Pending);
        order.items[0].product_id = pid.clone();
        store.add_order(order);

        assert!(store.delete_product(&pid));
        assert!(store.product(&pid).is_none());
        assert_eq!(store.orders()[0].items[0].product_id, pid);
        assert_eq!(store.orders()[0].items[0].product_name, "Thing");
    }

    #[test]
    fn test_notifications_prepend() {
        let mut store = DomainStore::new();
        store.add_notification(note("first"));
        let second = store.add_notification(note("second"));

        assert_eq!(store.notifications()[0].id, second);
        assert_eq!(store.notifications()[1].title, "first");
        assert_eq!(store.unread_notification_count(), 2);

        assert!(store.mark_notification_as_read(&second));
        assert_eq!(store.unread_notification_count(), 1);
        assert_eq!(store.mark_all_notifications_read(), 1);
        assert_eq!(store.unread_notification_count(), 0);
    }

    #[test]
    fn test_update_order_status_rules() {
        let mut store = DomainStore::new();
        let id = store.add_order(new_order(OrderStatus::Pending));

        assert!(store.update_order_status(&id, OrderStatus::Processing).unwrap());
        assert!(store.update_order_status(&id, OrderStatus::Processing).unwrap());
        assert!(store.update_order_status(&id, OrderStatus::Pending).is_err());
        assert_eq!(store.order(&id).unwrap().status, OrderStatus::Processing);

        assert!(store.update_order_status(&id, OrderStatus::Cancelled).unwrap());
        assert!(store.update_order_status(&id, OrderStatus::Shipped).is_err());

        assert!(!store.update_order_status("nope", OrderStatus::Shipped).unwrap());
    }

    #[test]
    fn test_decrement_stock_floors_at_zero() {
        let mut store = DomainStore::new();
        let id = store.add_product(new_product("A", "SKU-1", 5, 2));

        let change = store.decrement_stock(&id, 3).unwrap();
        assert_eq!((change.previous, change.current), (5, 2));
        assert!(change.is_low());

        let change = store.decrement_stock(&id, 50).unwrap();
        assert_eq!(change.current, 0);
        assert!(store.decrement_stock("nope", 1).is_none());
    }

    #[test]
    fn test_search_products() {
        let mut store = DomainStore::new();
        store.add_product(new_product("Daal - Moong", "DL-MNG-001", 75, 20));
        store.add_product(NewProduct {
            brand: "Fortune".into(),
            ..new_product("Cooking Oil", "FT-OIL-001", 120, 15)
        });

        assert_eq!(store.search_products("moong").len(), 1);
        assert_eq!(store.search_products("ft-oil").len(), 1);
        assert_eq!(store.search_products("FORTUNE").len(), 1);
        assert_eq!(store.search_products("  ").len(), 2);
        assert!(store.search_products("pepsi").is_empty());
    }

    #[test]
    fn test_filters_and_summaries() {
        let mut store = DomainStore::new();
        store.add_product(new_product("Low", "L-1", 5, 5));
        store.add_product(new_product("High", "H-1", 50, 5));
        store.add_order(new_order(OrderStatus::Pending));
        store.add_notification(NewNotification::new(
            NotificationType::LowStock,
            Priority::High,
            "Low Stock Alert",
            "Low is running low",
            Utc::now(),
        ));
        store.add_notification(note("sync"));

        let inv = store.inventory_summary();
        assert_eq!(inv.total_units, 55);
        assert_eq!(inv.total_value, Money::from_rupees(5_500));
        assert_eq!(inv.low_stock_count, 1);

        let dash = store.dashboard_summary();
        assert_eq!(dash.total_orders, 1);
        assert_eq!(dash.pending_orders, 1);
        assert_eq!(dash.total_revenue.paisa(), 2_260);
        assert_eq!(dash.unread_notifications, 2);

        assert_eq!(store.filter_notifications(NotificationFilter::All).len(), 2);
        assert_eq!(
            store
                .filter_notifications(NotificationFilter::HighPriority)
                .len(),
            1
        );
        assert_eq!(
            store
                .filter_notifications(NotificationFilter::OfType(NotificationType::System))
                .len(),
            1
        );

        let counts = store.order_status_counts();
        assert_eq!(counts["pending"], 1);
        assert_eq!(counts["delivered"], 0);
    }
}
