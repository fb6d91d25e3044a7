//! # Workflows
//!
//! Multi-step dashboard actions built on the raw [`DomainStore`] mutators.
//! Unlike the mutators, these validate their input and refuse to act on
//! entities in the wrong state.
//!
//! ## Partnership Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Distributor                         Wholesaler                         │
//! │  ───────────                         ──────────                         │
//! │  add_wholesaler_request ──pending──► approve_request(selection)         │
//! │                                      │  or reject_request               │
//! │                                      ▼                                  │
//! │  notification ◄──────────── status + response date (+ selection)        │
//! │                                                                         │
//! │  Wholesaler                          Distributor                        │
//! │  place_purchase_order ──pending────► advance_order(processing, ...)     │
//! │  notification (order placed)         notification when shipped          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use orion_core::validation::{self, validate_new_product};
use orion_core::{
    CoreError, NewCompany, NewNotification, NewOrder, NewProduct, NotificationType, OrderLine,
    OrderStatus, OrderTotals, Priority, RequestPatch, RequestStatus, SelectedProduct, User,
    WholesalerRequest, DEFAULT_PAYMENT_TERMS,
};

use crate::error::StoreResult;
use crate::store::DomainStore;

// =============================================================================
// Catalog & Companies
// =============================================================================

/// Adds a product from the product form after validating it.
pub fn create_product(store: &mut DomainStore, product: NewProduct) -> StoreResult<String> {
    validate_new_product(&product).map_err(CoreError::from)?;
    Ok(store.add_product(product))
}

/// Registers a company after checking its PAN and email.
pub fn register_company(store: &mut DomainStore, company: NewCompany) -> StoreResult<String> {
    validation::validate_pan(&company.pan).map_err(CoreError::from)?;
    validation::validate_email(&company.email).map_err(CoreError::from)?;
    Ok(store.add_company(company))
}

// =============================================================================
// Partnership Requests
// =============================================================================

/// Looks up a request the responder may still answer.
fn answerable_request<'a>(
    store: &'a DomainStore,
    request_id: &str,
    responder: &User,
) -> StoreResult<&'a WholesalerRequest> {
    let request = store
        .wholesaler_request(request_id)
        .ok_or_else(|| CoreError::RequestNotFound(request_id.to_string()))?;
    if request.wholesaler_id != responder.id {
        return Err(CoreError::NotAddressee {
            request_id: request_id.to_string(),
            user_id: responder.id.clone(),
        }
        .into());
    }
    if request.status != RequestStatus::Pending {
        return Err(CoreError::RequestAlreadyResolved {
            request_id: request_id.to_string(),
            status: request.status,
        }
        .into());
    }
    Ok(request)
}

/// Approves a pending request with the products the wholesaler picked.
///
/// Every pick must come from the catalog snapshot the request carries.
pub fn approve_request(
    store: &mut DomainStore,
    request_id: &str,
    responder: &User,
    selected: Vec<SelectedProduct>,
) -> StoreResult<()> {
    let request = answerable_request(store, request_id, responder)?;
    if selected.is_empty() {
        return Err(CoreError::EmptySelection.into());
    }
    validation::validate_selection(&selected).map_err(CoreError::from)?;
    if let Some(stray) = selected
        .iter()
        .find(|s| !request.products.iter().any(|p| p.id == s.product_id))
    {
        return Err(CoreError::ProductNotInRequest {
            request_id: request_id.to_string(),
            product_id: stray.product_id.clone(),
        }
        .into());
    }

    let count = selected.len();
    let now = Utc::now();
    store.update_wholesaler_request(
        request_id,
        RequestPatch {
            status: Some(RequestStatus::Approved),
            response_date: Some(now),
            selected_products: Some(selected),
            ..Default::default()
        },
    );

    let company = &responder.company.name;
    store.add_notification(
        NewNotification::new(
            NotificationType::WholesalerRequest,
            Priority::Medium,
            "Partnership Request Approved",
            format!("{company} has approved your partnership request"),
            now,
        )
        .with_wholesaler(company.as_str())
        .with_request_id(request_id),
    );

    info!(request_id = %request_id, products = count, "Partnership request approved");
    Ok(())
}

/// Rejects a pending request.
pub fn reject_request(store: &mut DomainStore, request_id: &str, responder: &User) -> StoreResult<()> {
    answerable_request(store, request_id, responder)?;

    let now = Utc::now();
    store.update_wholesaler_request(
        request_id,
        RequestPatch {
            status: Some(RequestStatus::Rejected),
            response_date: Some(now),
            ..Default::default()
        },
    );

    let company = &responder.company.name;
    store.add_notification(
        NewNotification::new(
            NotificationType::WholesalerRequest,
            Priority::Medium,
            "Partnership Request Rejected",
            format!("{company} has rejected your partnership request"),
            now,
        )
        .with_wholesaler(company.as_str())
        .with_request_id(request_id),
    );

    info!(request_id = %request_id, "Partnership request rejected");
    Ok(())
}

// =============================================================================
// Orders
// =============================================================================

/// Places a purchase order with a distributor on behalf of `buyer`.
///
/// The order is addressed to the distributor company: its customer fields
/// name the seller, `created_by` names the buyer and the delivery address is
/// the buyer's.
///
/// ## Pricing
/// Each line uses the product's list price and its own VAT rate.
///
/// ## Returns
/// The new order id. The order is `pending`, numbered `PO-<millis>`.
pub fn place_purchase_order(
    store: &mut DomainStore,
    buyer: &User,
    distributor_id: &str,
    selections: &[SelectedProduct],
) -> StoreResult<String> {
    if selections.is_empty() {
        return Err(CoreError::EmptySelection.into());
    }
    validation::validate_selection(selections).map_err(CoreError::from)?;

    let distributor = store
        .company(distributor_id)
        .map(|c| c.name.clone())
        .ok_or_else(|| CoreError::CompanyNotFound(distributor_id.to_string()))?;

    let mut items = Vec::with_capacity(selections.len());
    for s in selections {
        let product = store
            .product(&s.product_id)
            .filter(|p| p.distributor_id.as_deref() == Some(distributor_id))
            .ok_or_else(|| CoreError::ProductNotFound(s.product_id.clone()))?;
        items.push(OrderLine::priced(product, s.quantity, product.price).into_item());
    }

    let totals = OrderTotals::from_items(&items);
    let now = Utc::now();
    let stamp = now.timestamp_millis();
    let order_number = format!("PO-{stamp}");
    let company = &buyer.company;

    let order_id = store.add_order(NewOrder {
        order_number: order_number.clone(),
        customer_id: distributor_id.to_string(),
        customer_name: distributor,
        items,
        total: totals.total,
        status: OrderStatus::Pending,
        date: now,
        invoice_number: Some(format!("PO-INV-{stamp}")),
        vat_amount: totals.vat,
        discount_amount: None,
        delivery_address: company.address.clone(),
        payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
        created_by: buyer.id.clone(),
    });

    store.add_notification(
        NewNotification::new(
            NotificationType::OrderPlaced,
            Priority::Medium,
            "New Purchase Order Received",
            format!("{} has placed a purchase order #{order_number}", company.name),
            now,
        )
        .with_wholesaler(company.name.as_str())
        .with_order_number(order_number.as_str())
        .with_amount(totals.total),
    );

    info!(order_number = %order_number, total = %totals.total, "Purchase order placed");
    Ok(order_id)
}

/// Moves an order along its lifecycle, announcing shipment.
///
/// ## Returns
/// `Ok(false)` for an unknown order id.
pub fn advance_order(store: &mut DomainStore, order_id: &str, status: OrderStatus) -> StoreResult<bool> {
    let previous = store.order(order_id).map(|o| o.status);
    if !store.update_order_status(order_id, status)? {
        return Ok(false);
    }

    if status == OrderStatus::Shipped && previous != Some(OrderStatus::Shipped) {
        if let Some(order) = store.order(order_id) {
            let notice = NewNotification::new(
                NotificationType::OrderShipped,
                Priority::Medium,
                "Order Shipped",
                format!(
                    "Order #{} has been shipped to {}",
                    order.order_number, order.customer_name
                ),
                Utc::now(),
            )
            .with_wholesaler(order.customer_name.as_str())
            .with_order_number(order.order_number.as_str());
            store.add_notification(notice);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::seed::demo_users;
    use orion_core::{Money, NotificationType};

    fn wholesaler() -> User {
        demo_users().remove(1)
    }

    fn pick(id: &str, quantity: u32) -> SelectedProduct {
        SelectedProduct {
            product_id: id.into(),
            quantity,
        }
    }

    #[test]
    fn test_approve_pending_request() {
        let mut store = DomainStore::seeded();
        approve_request(&mut store, "1", &wholesaler(), vec![pick("1", 10), pick("5", 10)]).unwrap();

        let req = store.wholesaler_request("1").unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert!(req.response_date.is_some());
        assert_eq!(req.selected_products.as_ref().map(Vec::len), Some(2));

        let n = &store.notifications()[0];
        assert_eq!(n.kind, NotificationType::WholesalerRequest);
        assert_eq!(n.request_id.as_deref(), Some("1"));
        assert_eq!(n.message, "Valley Wholesale Mart has approved your partnership request");
    }

    #[test]
    fn test_approve_requires_selection() {
        let mut store = DomainStore::seeded();
        let err = approve_request(&mut store, "1", &wholesaler(), vec![]).unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::EmptySelection)));
        assert_eq!(
            store.wholesaler_request("1").unwrap().status,
            RequestStatus::Pending
        );
    }

    #[test]
    fn test_approve_rejects_product_outside_request() {
        let mut store = DomainStore::seeded();
        let err = approve_request(
            &mut store,
            "1",
            &wholesaler(),
            vec![pick("1", 5), pick("not-offered", 5)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::ProductNotInRequest { ref product_id, .. })
                if product_id == "not-offered"
        ));

        let req = store.wholesaler_request("1").unwrap();
        assert_eq!(req.status, RequestStatus::Pending);
        assert!(req.selected_products.is_none());
    }

    #[test]
    fn test_only_addressee_may_answer() {
        let mut store = DomainStore::seeded();
        let distributor = demo_users().remove(0);
        let notes_before = store.notifications().len();

        let err = approve_request(&mut store, "1", &distributor, vec![pick("1", 5)]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::NotAddressee { ref user_id, .. }) if user_id == "1"
        ));
        let err = reject_request(&mut store, "1", &distributor).unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::NotAddressee { .. })));

        assert_eq!(
            store.wholesaler_request("1").unwrap().status,
            RequestStatus::Pending
        );
        assert_eq!(store.notifications().len(), notes_before);
    }

    #[test]
    fn test_cannot_answer_twice() {
        let mut store = DomainStore::seeded();
        reject_request(&mut store, "1", &wholesaler()).unwrap();
        assert_eq!(
            store.wholesaler_request("1").unwrap().status,
            RequestStatus::Rejected
        );

        let err = approve_request(&mut store, "1", &wholesaler(), vec![pick("1", 1)]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::RequestAlreadyResolved {
                status: RequestStatus::Rejected,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_request() {
        let mut store = DomainStore::seeded();
        let err = reject_request(&mut store, "99", &wholesaler()).unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::RequestNotFound(_))));
    }

    #[test]
    fn test_purchase_order_totals() {
        let mut store = DomainStore::seeded();
        let notes_before = store.notifications().len();
        // 100 Wai Wai (13 %) + 10 Daal (exempt)
        let id = place_purchase_order(
            &mut store,
            &wholesaler(),
            "1",
            &[pick("1", 100), pick("5", 10)],
        )
        .unwrap();

        let order = store.order(&id).unwrap();
        assert_eq!(order.customer_id, "1");
        assert_eq!(order.customer_name, "Himalayan Distributors Pvt. Ltd.");
        assert_eq!(order.created_by, "2");
        assert_eq!(order.delivery_address, wholesaler().company.address);
        assert!(order.order_number.starts_with("PO-"));
        assert!(order.invoice_number.as_deref().unwrap().starts_with("PO-INV-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_terms, "Net 30 days");
        assert_eq!(order.vat_amount, Money::from_rupees(325));
        assert_eq!(order.total, Money::from_rupees(2500 + 1200 + 325));
        assert!(order.totals_consistent());

        assert_eq!(store.notifications().len(), notes_before + 1);
        let n = &store.notifications()[0];
        assert_eq!(n.kind, NotificationType::OrderPlaced);
        assert_eq!(n.title, "New Purchase Order Received");

        // The distributor finds it among the orders addressed to them.
        assert!(store.orders().iter().any(|o| o.id == id && o.customer_id == "1"));
    }

    #[test]
    fn test_purchase_order_uses_list_price() {
        let mut store = DomainStore::seeded();
        store.update_product(
            "2",
            orion_core::ProductPatch {
                wholesaler_price: Some(Money::from_rupees(30)),
                ..Default::default()
            },
        );
        let id = place_purchase_order(&mut store, &wholesaler(), "1", &[pick("2", 10)]).unwrap();
        assert_eq!(store.order(&id).unwrap().items[0].price, Money::from_rupees(35));
    }

    #[test]
    fn test_purchase_order_rejects_foreign_product() {
        let mut store = DomainStore::seeded();
        let err = place_purchase_order(&mut store, &wholesaler(), "2", &[pick("1", 1)]).unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::ProductNotFound(_))));
        assert_eq!(store.orders().len(), 2);
    }

    #[test]
    fn test_purchase_order_unknown_distributor() {
        let mut store = DomainStore::seeded();
        let err = place_purchase_order(&mut store, &wholesaler(), "9", &[pick("1", 1)]).unwrap_err();
        assert!(matches!(err, StoreError::Domain(CoreError::CompanyNotFound(_))));
        assert_eq!(store.orders().len(), 2);
    }

    #[test]
    fn test_advance_order_announces_shipment() {
        let mut store = DomainStore::seeded();
        let before = store.notifications().len();

        assert!(advance_order(&mut store, "1", OrderStatus::Shipped).unwrap());
        assert_eq!(store.notifications().len(), before + 1);
        assert_eq!(store.notifications()[0].kind, NotificationType::OrderShipped);

        // Re-setting shipped is a no-op and stays quiet.
        assert!(advance_order(&mut store, "1", OrderStatus::Shipped).unwrap());
        assert_eq!(store.notifications().len(), before + 1);

        assert!(advance_order(&mut store, "1", OrderStatus::Pending).is_err());
        assert!(!advance_order(&mut store, "nope", OrderStatus::Shipped).unwrap());
    }

    #[test]
    fn test_create_product_validates() {
        let mut store = DomainStore::new();
        let bad = NewProduct {
            name: "".into(),
            sku: "X-1".into(),
            ..Default::default()
        };
        assert!(create_product(&mut store, bad).is_err());
        assert!(store.products().is_empty());

        let good = NewProduct {
            name: "Tea".into(),
            sku: "TEA-001".into(),
            ..Default::default()
        };
        let id = create_product(&mut store, good).unwrap();
        assert!(store.product(&id).is_some());
    }

    #[test]
    fn test_register_company_checks_pan() {
        let mut store = DomainStore::new();
        let mut company = crate::seed::companies().remove(0);
        company.pan = "12345".into();
        let new = NewCompany {
            name: company.name,
            pan: company.pan,
            vat_number: company.vat_number,
            address: company.address,
            phone: company.phone,
            email: company.email,
            registration_number: company.registration_number,
            establishment_date: company.establishment_date,
            business_type: company.business_type,
            owner_name: company.owner_name,
            owner_citizenship: company.owner_citizenship,
            bank_account_number: company.bank_account_number,
            bank_name: company.bank_name,
            license_number: company.license_number,
            license_expiry_date: company.license_expiry_date,
        };
        assert!(register_company(&mut store, new.clone()).is_err());

        let fixed = NewCompany {
            pan: "301234567".into(),
            ..new
        };
        assert!(register_company(&mut store, fixed).is_ok());
        assert_eq!(store.companies().len(), 1);
    }
}
