//! # Demo Seed Data
//!
//! The fixed catalog, orders, request, notifications, companies and demo
//! users the dashboard starts with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Companies   1 Himalayan Distributors   2 Valley Wholesale Mart         │
//! │  Products    1-6 (distributor 1)        5 Daal - Moong: stock 75/min 20 │
//! │  Orders      ORD-2025-001 processing    ORD-2025-002 shipped            │
//! │  Requests    1 pending (1 → 2, full catalog snapshot)                   │
//! │  Notices     low stock, request, order placed (read)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use orion_core::{
    BusinessType, Company, Money, NewNotification, NewProduct, Notification, NotificationType,
    Order, OrderItem, OrderStatus, Priority, Product, RequestStatus, Role, User, VatRate,
    WholesalerRequest,
};

use crate::store::DomainStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn paisa(rupees: f64) -> Money {
    Money::from_rupees_f64(rupees)
}

impl DomainStore {
    /// A store pre-loaded with the demo data set.
    pub fn seeded() -> Self {
        let products = products();
        let requests = wholesaler_requests(&products);
        DomainStore {
            orders: orders(),
            wholesaler_requests: requests,
            notifications: notifications(),
            companies: companies().into_iter().take(2).collect(),
            products,
            ..DomainStore::default()
        }
    }
}

// =============================================================================
// Companies
// =============================================================================

/// All four demo companies. The store seeds the first two; the other two
/// only exist as the employers of demo users 3 and 4.
pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: "1".into(),
            name: "Himalayan Distributors Pvt. Ltd.".into(),
            pan: "301234567".into(),
            vat_number: "VAT-301234567".into(),
            address: "Kathmandu, Nepal".into(),
            phone: "+977-1-4567890".into(),
            email: "info@himalayandist.com".into(),
            registration_number: "REG-2020-001".into(),
            establishment_date: date(2020, 1, 15),
            business_type: BusinessType::Distributor,
            owner_name: "Rajesh Sharma".into(),
            owner_citizenship: "12-34-56-78901".into(),
            bank_account_number: "1234567890".into(),
            bank_name: "Nepal Bank Limited".into(),
            license_number: Some("LIC-2020-001".into()),
            license_expiry_date: Some(date(2025, 1, 15)),
        },
        Company {
            id: "2".into(),
            name: "Valley Wholesale Mart".into(),
            pan: "401234567".into(),
            vat_number: "VAT-401234567".into(),
            address: "Thamel, Kathmandu".into(),
            phone: "+977-1-4567891".into(),
            email: "info@valleywholesale.com".into(),
            registration_number: "REG-2021-002".into(),
            establishment_date: date(2021, 2, 20),
            business_type: BusinessType::Wholesaler,
            owner_name: "Sita Patel".into(),
            owner_citizenship: "12-34-56-78902".into(),
            bank_account_number: "2345678901".into(),
            bank_name: "Rastriya Banijya Bank".into(),
            license_number: None,
            license_expiry_date: None,
        },
        Company {
            id: "3".into(),
            name: "Everest Supply Chain Ltd.".into(),
            pan: "501234567".into(),
            vat_number: "VAT-501234567".into(),
            address: "Pokhara, Nepal".into(),
            phone: "+977-61-456789".into(),
            email: "info@everestsupply.com".into(),
            registration_number: "REG-2019-003".into(),
            establishment_date: date(2019, 6, 1),
            business_type: BusinessType::Distributor,
            owner_name: "Amit Thapa".into(),
            owner_citizenship: "12-34-56-78903".into(),
            bank_account_number: "3456789012".into(),
            bank_name: "Nabil Bank".into(),
            license_number: Some("LIC-2019-003".into()),
            license_expiry_date: Some(date(2026, 6, 1)),
        },
        Company {
            id: "4".into(),
            name: "Mountain Trading Co.".into(),
            pan: "601234567".into(),
            vat_number: "VAT-601234567".into(),
            address: "Patan, Lalitpur".into(),
            phone: "+977-1-5567892".into(),
            email: "info@mountaintrading.com".into(),
            registration_number: "REG-2022-004".into(),
            establishment_date: date(2022, 3, 10),
            business_type: BusinessType::Wholesaler,
            owner_name: "Priya Gurung".into(),
            owner_citizenship: "12-34-56-78904".into(),
            bank_account_number: "4567890123".into(),
            bank_name: "Himalayan Bank".into(),
            license_number: None,
            license_expiry_date: None,
        },
    ]
}

// =============================================================================
// Demo Users
// =============================================================================

/// The four demo accounts (two distributors, two wholesalers).
pub fn demo_users() -> Vec<User> {
    let people = [
        ("1", "Rajesh Sharma", "distributor@demo.com", Role::Distributor, "614810"),
        ("2", "Sita Patel", "wholesaler@demo.com", Role::Wholesaler, "1239291"),
        ("3", "Amit Thapa", "distributor2@demo.com", Role::Distributor, "1222271"),
        ("4", "Priya Gurung", "wholesaler2@demo.com", Role::Wholesaler, "1181686"),
    ];

    people
        .into_iter()
        .zip(companies())
        .map(|((id, name, email, role, photo), company)| User {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            citizenship_number: company.owner_citizenship.clone(),
            phone_number: company.phone.clone(),
            company,
            avatar: Some(format!(
                "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1"
            )),
        })
        .collect()
}

// =============================================================================
// Products
// =============================================================================

fn image(photo: &str) -> String {
    format!("https://images.pexels.com/photos/{photo}?auto=compress&cs=tinysrgb&w=300&h=300&dpr=1")
}

/// The six catalog products of distributor 1.
pub fn products() -> Vec<Product> {
    let base = NewProduct {
        distributor_id: Some("1".into()),
        vat_rate: VatRate::STANDARD,
        ..Default::default()
    };

    vec![
        NewProduct {
            name: "Wai Wai Noodles - Chicken".into(),
            sku: "WW-CHK-001".into(),
            barcode: "8850100129016".into(),
            category: "Food & Beverages".into(),
            brand: "Wai Wai".into(),
            price: Money::from_rupees(25),
            stock: 500,
            min_stock: 50,
            description: "Instant noodles with chicken flavor".into(),
            image: image("4518654/pexels-photo-4518654.jpeg"),
            hs_code: "1902.30.00".into(),
            manufacturer_name: "Thai President Foods Public Company Limited".into(),
            manufacturer_address: "Bangkok, Thailand".into(),
            importer_name: Some("Nepal Food Imports Pvt. Ltd.".into()),
            importer_pan: Some("123456789".into()),
            batch_number: Some("WW2025001".into()),
            manufacturing_date: Some(date(2025, 1, 1)),
            expiry_date: Some(date(2025, 12, 31)),
            unit_of_measure: "pieces".into(),
            net_weight: Some(60.0),
            gross_weight: Some(65.0),
            ..base.clone()
        }
        .into_product("1".into()),
        NewProduct {
            name: "Coca Cola - 250ml".into(),
            sku: "CC-250-001".into(),
            barcode: "5000112545029".into(),
            category: "Beverages".into(),
            brand: "Coca Cola".into(),
            price: Money::from_rupees(35),
            stock: 200,
            min_stock: 30,
            description: "Refreshing cola drink".into(),
            image: image("50593/coca-cola-cold-drink-soft-drink-coke-50593.jpeg"),
            hs_code: "2202.10.00".into(),
            manufacturer_name: "Coca Cola Nepal Pvt. Ltd.".into(),
            manufacturer_address: "Kathmandu, Nepal".into(),
            batch_number: Some("CC2025001".into()),
            manufacturing_date: Some(date(2025, 1, 10)),
            expiry_date: Some(date(2025, 7, 10)),
            unit_of_measure: "bottles".into(),
            net_weight: Some(250.0),
            gross_weight: Some(280.0),
            ..base.clone()
        }
        .into_product("2".into()),
        NewProduct {
            name: "Sunsilk Shampoo - 200ml".into(),
            sku: "SS-200-001".into(),
            barcode: "8901030875472".into(),
            category: "Personal Care".into(),
            brand: "Sunsilk".into(),
            price: Money::from_rupees(180),
            stock: 150,
            min_stock: 25,
            description: "Hair care shampoo for silky hair".into(),
            image: image("4465831/pexels-photo-4465831.jpeg"),
            hs_code: "3305.10.00".into(),
            manufacturer_name: "Unilever Nepal Limited".into(),
            manufacturer_address: "Hetauda, Nepal".into(),
            batch_number: Some("SS2025001".into()),
            manufacturing_date: Some(date(2024, 12, 15)),
            expiry_date: Some(date(2026, 12, 15)),
            unit_of_measure: "bottles".into(),
            net_weight: Some(200.0),
            gross_weight: Some(220.0),
            ..base.clone()
        }
        .into_product("3".into()),
        NewProduct {
            name: "Biscuits - Tiger".into(),
            sku: "TG-BIS-001".into(),
            barcode: "8901030001234".into(),
            category: "Snacks".into(),
            brand: "Britannia".into(),
            price: Money::from_rupees(15),
            stock: 800,
            min_stock: 100,
            description: "Crunchy glucose biscuits".into(),
            image: image("230325/pexels-photo-230325.jpeg"),
            hs_code: "1905.31.00".into(),
            manufacturer_name: "Britannia Industries Nepal Pvt. Ltd.".into(),
            manufacturer_address: "Birgunj, Nepal".into(),
            batch_number: Some("TG2025001".into()),
            manufacturing_date: Some(date(2025, 1, 5)),
            expiry_date: Some(date(2025, 7, 5)),
            unit_of_measure: "packets".into(),
            net_weight: Some(100.0),
            gross_weight: Some(105.0),
            ..base.clone()
        }
        .into_product("4".into()),
        NewProduct {
            name: "Daal - Moong".into(),
            sku: "DL-MNG-001".into(),
            barcode: "8901030002345".into(),
            category: "Groceries".into(),
            brand: "Tata".into(),
            price: Money::from_rupees(120),
            stock: 75,
            min_stock: 20,
            description: "Premium quality moong dal".into(),
            image: image("1393095/pexels-photo-1393095.jpeg"),
            hs_code: "0713.31.00".into(),
            vat_rate: VatRate::zero(),
            manufacturer_name: "Local Farmers Cooperative".into(),
            manufacturer_address: "Chitwan, Nepal".into(),
            batch_number: Some("DL2025001".into()),
            manufacturing_date: Some(date(2024, 11, 1)),
            expiry_date: Some(date(2025, 11, 1)),
            unit_of_measure: "kg".into(),
            net_weight: Some(1000.0),
            gross_weight: Some(1020.0),
            ..base.clone()
        }
        .into_product("5".into()),
        NewProduct {
            name: "Cooking Oil - Fortune".into(),
            sku: "FT-OIL-001".into(),
            barcode: "8901030003456".into(),
            category: "Groceries".into(),
            brand: "Fortune".into(),
            price: Money::from_rupees(250),
            stock: 120,
            min_stock: 15,
            description: "Refined sunflower oil".into(),
            image: image("33783/olive-oil-salad-dressing-cooking-olive.jpg"),
            hs_code: "1512.11.00".into(),
            vat_rate: VatRate::from_bps(500),
            manufacturer_name: "Adani Wilmar Limited".into(),
            manufacturer_address: "Gujarat, India".into(),
            importer_name: Some("Nepal Edible Oil Imports".into()),
            importer_pan: Some("987654321".into()),
            batch_number: Some("FT2025001".into()),
            manufacturing_date: Some(date(2024, 12, 1)),
            expiry_date: Some(date(2025, 12, 1)),
            unit_of_measure: "liters".into(),
            net_weight: Some(1000.0),
            gross_weight: Some(1050.0),
            ..base
        }
        .into_product("6".into()),
    ]
}

// =============================================================================
// Orders
// =============================================================================

fn item(product_id: &str, name: &str, quantity: u32, price: i64, vat: f64) -> OrderItem {
    let price = Money::from_rupees(price);
    OrderItem {
        product_id: product_id.into(),
        product_name: name.into(),
        quantity,
        price,
        total: price * quantity,
        vat_amount: paisa(vat),
        discount_amount: None,
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "1".into(),
            order_number: "ORD-2025-001".into(),
            customer_id: "2".into(),
            customer_name: "Valley Wholesale Mart".into(),
            items: vec![
                item("1", "Wai Wai Noodles - Chicken", 100, 25, 325.0),
                item("2", "Coca Cola - 250ml", 50, 35, 227.5),
            ],
            total: paisa(4802.5),
            status: OrderStatus::Processing,
            date: at(2025, 1, 15, 10, 30),
            invoice_number: Some("INV-2025-001".into()),
            vat_amount: paisa(552.5),
            discount_amount: None,
            delivery_address: "Thamel, Kathmandu".into(),
            payment_terms: "Net 30 days".into(),
            created_by: "1".into(),
        },
        Order {
            id: "2".into(),
            order_number: "ORD-2025-002".into(),
            customer_id: "4".into(),
            customer_name: "Mountain Trading Co.".into(),
            items: vec![
                item("3", "Sunsilk Shampoo - 200ml", 25, 180, 585.0),
                item("4", "Biscuits - Tiger", 200, 15, 390.0),
            ],
            total: paisa(8475.0),
            status: OrderStatus::Shipped,
            date: at(2025, 1, 14, 14, 20),
            invoice_number: Some("INV-2025-002".into()),
            vat_amount: paisa(975.0),
            discount_amount: None,
            delivery_address: "Patan, Lalitpur".into(),
            payment_terms: "Net 15 days".into(),
            created_by: "1".into(),
        },
    ]
}

// =============================================================================
// Requests & Notifications
// =============================================================================

fn wholesaler_requests(catalog: &[Product]) -> Vec<WholesalerRequest> {
    vec![WholesalerRequest {
        id: "1".into(),
        distributor_id: "1".into(),
        distributor_name: "Himalayan Distributors Pvt. Ltd.".into(),
        wholesaler_id: "2".into(),
        wholesaler_name: "Valley Wholesale Mart".into(),
        products: catalog.to_vec(),
        status: RequestStatus::Pending,
        request_date: at(2025, 1, 15, 9, 0),
        response_date: None,
        selected_products: None,
        message: Some("Request for product partnership".into()),
    }]
}

/// Newest first, as the feed stores them.
pub fn notifications() -> Vec<Notification> {
    let mut placed = NewNotification::new(
        NotificationType::OrderPlaced,
        Priority::Medium,
        "New Order Received",
        "Mountain Trading Co. has placed order #ORD-2025-002",
        at(2025, 1, 14, 14, 20),
    )
    .with_wholesaler("Mountain Trading Co.")
    .with_order_number("ORD-2025-002");
    placed.read = true;

    vec![
        NewNotification::new(
            NotificationType::LowStock,
            Priority::High,
            "Low Stock Alert",
            "Daal - Moong stock is running low (75 units remaining)",
            at(2025, 1, 15, 10, 30),
        )
        .with_product("Daal - Moong")
        .into_notification("1".into()),
        NewNotification::new(
            NotificationType::WholesalerRequest,
            Priority::Medium,
            "New Wholesaler Request",
            "Valley Wholesale Mart has sent a partnership request",
            at(2025, 1, 15, 9, 0),
        )
        .with_wholesaler("Valley Wholesale Mart")
        .with_request_id("1")
        .into_notification("2".into()),
        placed.into_notification("3".into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_counts() {
        let store = DomainStore::seeded();
        assert_eq!(store.products().len(), 6);
        assert_eq!(store.orders().len(), 2);
        assert_eq!(store.wholesaler_requests().len(), 1);
        assert_eq!(store.notifications().len(), 3);
        assert_eq!(store.companies().len(), 2);
    }

    #[test]
    fn test_daal_is_not_low_at_seed() {
        let store = DomainStore::seeded();
        let daal = store.product("5").unwrap();
        assert_eq!(daal.name, "Daal - Moong");
        assert_eq!((daal.stock, daal.min_stock), (75, 20));
        assert!(!daal.is_low_stock());
        assert!(daal.vat_rate.is_zero());
        assert!(store.low_stock_products().is_empty());
    }

    #[test]
    fn test_seed_orders_are_consistent() {
        for order in orders() {
            assert!(order.totals_consistent(), "{}", order.order_number);
        }
    }

    #[test]
    fn test_request_snapshot_is_full_catalog() {
        let store = DomainStore::seeded();
        let req = store.wholesaler_request("1").unwrap();
        assert_eq!(req.products, store.products());
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[test]
    fn test_demo_users() {
        let users = demo_users();
        assert_eq!(users.len(), 4);
        assert_eq!(users[0].company.name, "Himalayan Distributors Pvt. Ltd.");
        assert_eq!(users[3].company.name, "Mountain Trading Co.");
        assert_eq!(
            users.iter().filter(|u| u.role == Role::Wholesaler).count(),
            2
        );
        for user in &users {
            assert_eq!(user.company.owner_name, user.name);
        }
    }

    #[test]
    fn test_one_unread_seed_notification_is_read() {
        let store = DomainStore::seeded();
        assert_eq!(store.unread_notification_count(), 2);
        assert_eq!(store.notifications()[0].kind, NotificationType::LowStock);
    }
}
