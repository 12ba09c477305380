//! Order history behavior across store restarts.

use rust_decimal::Decimal;

use footwa_core::{DisplayRate, PaymentMethod, Price, ProductId};
use footwa_storefront::catalog::Product;
use footwa_storefront::orders::{CheckoutForm, OrderService};
use footwa_storefront::store::Store;

fn product(title: &str) -> Product {
    Product {
        id: ProductId::new(1),
        title: title.to_owned(),
        brand: Some("Nike".to_owned()),
        price: Price::new(Decimal::new(50, 0)),
        thumbnail: "https://cdn.example/1.png".to_owned(),
        category: "mens-shoes".to_owned(),
    }
}

fn place(service: &OrderService<'_>, title: &str, name: &str, phone: &str) -> footwa_core::OrderId {
    let details = CheckoutForm {
        name: name.to_owned(),
        phone: phone.to_owned(),
        address: "12 Market Road".to_owned(),
    }
    .validate()
    .expect("valid form");

    service
        .place(
            &product(title),
            Price::new(Decimal::new(50, 0)),
            &details,
            PaymentMethod::PhonePe,
        )
        .expect("place")
        .order_id
}

#[test]
fn test_history_survives_reopen_with_deduped_customers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("footwa.redb");
    let rate = DisplayRate::default();

    {
        let store = Store::open(&path).expect("store");
        let service = OrderService::new(&store, rate);

        // Two orders from the same phone, completed in sequence.
        let first = place(&service, "Air Runner", "Asha", "9998887776");
        let second = place(&service, "Oxford Derby", "A. Sharma", "9998887776");
        service.complete(&first).expect("complete first");
        service.complete(&second).expect("complete second");
    }

    // A fresh session sees the same durable history.
    let store = Store::open(&path).expect("reopen");
    let service = OrderService::new(&store, rate);

    assert!(service.active().expect("active").is_empty());

    let archived = service.archived().expect("archived");
    assert_eq!(archived.len(), 2);
    // Newest first: the second completion heads the archive.
    assert_eq!(archived.first().expect("head").product_title, "Oxford Derby");

    // Exactly one customer for that phone, with the first order's name.
    let customers = service.customers().expect("customers");
    assert_eq!(customers.len(), 1);
    assert_eq!(customers.first().expect("customer").name, "Asha");
}

#[test]
fn test_clear_active_only_touches_active_orders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("footwa.redb")).expect("store");
    let service = OrderService::new(&store, DisplayRate::default());

    let done = place(&service, "Air Runner", "Asha", "111");
    service.complete(&done).expect("complete");

    place(&service, "Oxford Derby", "Ravi", "222");
    place(&service, "Gym Trainer", "Meena", "333");

    assert_eq!(service.clear_active().expect("clear"), 2);
    assert!(service.active().expect("active").is_empty());
    assert_eq!(service.archived().expect("archived").len(), 1);
    assert_eq!(service.customers().expect("customers").len(), 1);

    // Deleted-then-cleared orders never reach the marketing database.
    let stats = service.stats().expect("stats");
    assert_eq!(stats.customers, 1);
    assert_eq!(stats.archived_orders, 1);
}
