//! # Order Module
//!
//! Line pricing, order totals and the order/request status rules.
//!
//! ## Order Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For each line:                                                         │
//! │    total = unit_price × quantity                                        │
//! │    vat   = total × vat_rate / 100          (per product rate)           │
//! │                                                                         │
//! │  For the order:                                                         │
//! │    vat_amount = Σ line.vat                                              │
//! │    total      = Σ line.total + vat_amount                               │
//! │                                                                         │
//! │  Example (ORD-2025-001):                                                │
//! │    Wai Wai  100 × 25 = 2500   vat 325.00                                │
//! │    Cola      50 × 35 = 1750   vat 227.50                                │
//! │    ───────────────────────────────────────                              │
//! │    subtotal 4250 + vat 552.50 = total 4802.50                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Machine
//! ```text
//!   pending ──► processing ──► shipped ──► delivered
//!      │            │             │
//!      └────────────┴─────────────┴──────► cancelled
//!
//!   Re-setting the current status is allowed (no-op).
//!   delivered and cancelled are terminal.
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, VatRate};
use crate::types::{NewOrder, Order, OrderItem, OrderStatus, Product, RequestStatus};

// =============================================================================
// Order Line
// =============================================================================

/// A priced order line, before it is frozen into an [`OrderItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub vat_rate: VatRate,
}

impl OrderLine {
    /// Prices `quantity` units of `product` at `unit_price`.
    ///
    /// The unit price is explicit because wholesale orders may use the
    /// wholesaler price instead of the list price.
    pub fn priced(product: &Product, quantity: u32, unit_price: Money) -> Self {
        OrderLine {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price,
            vat_rate: product.vat_rate,
        }
    }

    /// `unit_price × quantity`.
    #[inline]
    pub fn total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// VAT on the line total at the product's rate.
    #[inline]
    pub fn vat(&self) -> Money {
        self.total().calculate_vat(self.vat_rate)
    }

    /// Freezes the line into an order item snapshot.
    pub fn into_item(self) -> OrderItem {
        let total = self.total();
        let vat_amount = self.vat();
        OrderItem {
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            price: self.unit_price,
            total,
            vat_amount,
            discount_amount: None,
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Aggregated amounts for a set of order items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Σ item totals (pre-VAT).
    pub subtotal: Money,
    /// Σ item VAT.
    pub vat: Money,
    /// subtotal + vat.
    pub total: Money,
}

impl OrderTotals {
    pub fn from_items(items: &[OrderItem]) -> Self {
        let subtotal: Money = items.iter().map(|i| i.total).sum();
        let vat: Money = items.iter().map(|i| i.vat_amount).sum();
        OrderTotals {
            subtotal,
            vat,
            total: subtotal + vat,
        }
    }
}

fn totals_consistent(items: &[OrderItem], vat_amount: Money, total: Money) -> bool {
    let lines_ok = items.iter().all(|i| i.total == i.price * i.quantity);
    let totals = OrderTotals::from_items(items);
    lines_ok && totals.vat == vat_amount && totals.total == total
}

impl Order {
    /// True when every line total is `price × quantity`, `vat_amount` is
    /// the sum of line VAT and `total` is the subtotal plus VAT.
    pub fn totals_consistent(&self) -> bool {
        totals_consistent(&self.items, self.vat_amount, self.total)
    }
}

impl NewOrder {
    pub fn totals_consistent(&self) -> bool {
        totals_consistent(&self.items, self.vat_amount, self.total)
    }
}

// =============================================================================
// Status Transitions
// =============================================================================

impl OrderStatus {
    /// Delivered and cancelled orders never change again.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether an order in `self` may be set to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        if *self == next {
            return true;
        }
        match (self, next) {
            (Pending, Processing) | (Processing, Shipped) | (Shipped, Delivered) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Like [`can_transition_to`](Self::can_transition_to), as a typed error.
    pub fn check_transition(&self, order_id: &str, next: OrderStatus) -> CoreResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidStatusTransition {
                order_id: order_id.to_string(),
                from: *self,
                to: next,
            })
        }
    }
}

impl RequestStatus {
    /// Only a pending request can be answered.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewProduct;
    use chrono::Utc;

    fn product(id: &str, name: &str, rupees: i64, vat: VatRate) -> Product {
        NewProduct {
            name: name.into(),
            price: Money::from_rupees(rupees),
            vat_rate: vat,
            ..Default::default()
        }
        .into_product(id.into())
    }

    fn mock_order_one_items() -> Vec<OrderItem> {
        let noodles = product("1", "Wai Wai Noodles - Chicken", 25, VatRate::STANDARD);
        let cola = product("2", "Coca Cola - 250ml", 35, VatRate::STANDARD);
        vec![
            OrderLine::priced(&noodles, 100, noodles.price).into_item(),
            OrderLine::priced(&cola, 50, cola.price).into_item(),
        ]
    }

    #[test]
    fn test_line_pricing() {
        let items = mock_order_one_items();
        assert_eq!(items[0].total, Money::from_rupees(2500));
        assert_eq!(items[0].vat_amount, Money::from_rupees(325));
        assert_eq!(items[1].vat_amount.paisa(), 22_750);
        assert_eq!(items[1].product_name, "Coca Cola - 250ml");
    }

    #[test]
    fn test_totals_from_items() {
        let totals = OrderTotals::from_items(&mock_order_one_items());
        assert_eq!(totals.subtotal, Money::from_rupees(4250));
        assert_eq!(totals.vat.paisa(), 55_250);
        assert_eq!(totals.total.paisa(), 480_250);
    }

    #[test]
    fn test_empty_totals_are_zero() {
        assert_eq!(OrderTotals::from_items(&[]), OrderTotals::default());
    }

    #[test]
    fn test_exempt_line_has_no_vat() {
        let dal = product("5", "Daal - Moong", 120, VatRate::zero());
        let line = OrderLine::priced(&dal, 10, Money::from_rupees(110));
        assert_eq!(line.total(), Money::from_rupees(1100));
        assert!(line.vat().is_zero());
    }

    #[test]
    fn test_totals_consistent() {
        let items = mock_order_one_items();
        let totals = OrderTotals::from_items(&items);
        let mut order = NewOrder {
            order_number: "ORD-2025-001".into(),
            customer_id: "2".into(),
            customer_name: "Valley Wholesale Mart".into(),
            items,
            total: totals.total,
            status: OrderStatus::Processing,
            date: Utc::now(),
            invoice_number: None,
            vat_amount: totals.vat,
            discount_amount: None,
            delivery_address: "Thamel, Kathmandu".into(),
            payment_terms: "Net 30 days".into(),
            created_by: "1".into(),
        };
        assert!(order.totals_consistent());

        order.total += Money::from_paisa(1);
        assert!(!order.totals_consistent());

        order.total -= Money::from_paisa(1);
        order.items[0].total = Money::from_rupees(1);
        assert!(!order.totals_consistent());
    }

    #[test]
    fn test_forward_transitions() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));

        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Processing));
    }

    #[test]
    fn test_cancel_only_from_open_states() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states_only_allow_noop() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for next in OrderStatus::ALL {
                assert_eq!(terminal.can_transition_to(next), next == terminal);
            }
        }
    }

    #[test]
    fn test_check_transition_error() {
        let err = OrderStatus::Delivered
            .check_transition("7", OrderStatus::Pending)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidStatusTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
                ..
            }
        ));
        assert!(OrderStatus::Shipped
            .check_transition("2", OrderStatus::Shipped)
            .is_ok());
    }

    #[test]
    fn test_request_transitions() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Pending.can_transition_to(Pending));
    }
}
