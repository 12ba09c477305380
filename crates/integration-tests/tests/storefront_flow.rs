//! End-to-end shopper flow: load, filter, override, checkout, review,
//! complete, export.

use rust_decimal::Decimal;
use serde_json::Value;

use footwa_core::{DisplayRate, PaymentMethod, ProductId};
use footwa_storefront::catalog::CatalogClient;
use footwa_storefront::config::CatalogConfig;
use footwa_storefront::export::ExportDocument;
use footwa_storefront::orders::{CheckoutForm, OrderService};
use footwa_storefront::overrides::{OverrideForm, apply_override};
use footwa_storefront::reviews::ReviewService;
use footwa_storefront::session::Session;
use footwa_storefront::store::{OverrideRepository, Store};

use footwa_integration_tests::spawn_stub_catalog;

#[tokio::test]
async fn test_full_shopping_flow() {
    let stub = spawn_stub_catalog(false).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("footwa.redb")).expect("store");

    // Startup: load the catalog and open a session.
    let catalog = CatalogClient::new(&CatalogConfig {
        base_url: stub.base_url.clone(),
    })
    .load()
    .await
    .expect("catalog load");
    let mut session = Session::new(catalog);

    // Browse: search narrows, "All" restores.
    session.search("air");
    assert_eq!(session.visible().len(), 1);
    assert!(session.select_category("All"));
    assert_eq!(session.visible().len(), 3);

    // Admin bumps the price of product 1 to $60.
    let id = ProductId::new(1);
    OverrideRepository::new(&store)
        .save(
            id,
            &OverrideForm {
                price: Some(Decimal::new(60, 0)),
                ..Default::default()
            },
        )
        .expect("override save");

    let product = session.product(id).expect("product 1").clone();
    let stored = OverrideRepository::new(&store).get(id).expect("override get");
    let listing = apply_override(&product, stored.as_ref());
    let rate = DisplayRate::default();
    assert_eq!(listing.price.in_display_currency(rate), 4800);
    // Image was not overridden.
    assert_eq!(listing.image, product.thumbnail);

    // Checkout: draft -> details -> payment -> active order.
    session.begin_checkout(product);
    session
        .submit_details(&CheckoutForm {
            name: "Asha".to_owned(),
            phone: "9998887776".to_owned(),
            address: "12 Market Road".to_owned(),
        })
        .expect("details");
    let (product, details) = session.confirm_payment().expect("payment stage");

    let service = OrderService::new(&store, rate);
    let order = service
        .place(&product, listing.price, &details, PaymentMethod::GooglePay)
        .expect("place");
    assert_eq!(order.price, 4800);
    assert_eq!(order.status, "Payment successful (Google Pay)");
    assert_eq!(service.active().expect("active").len(), 1);

    // A review lands newest-first.
    let reviews = ReviewService::new(&store);
    reviews.add(id, "Asha", "Great fit").expect("review");
    assert_eq!(reviews.count(id).expect("count"), 1);

    // Complete: active -> archive + marketing.
    let completion = service.complete(&order.order_id).expect("complete");
    assert!(completion.customer_recorded);
    assert!(service.active().expect("active").is_empty());

    // Export carries the archive and the customer verbatim.
    let archived = service.archived().expect("archived");
    let customers = service.customers().expect("customers");
    let document = ExportDocument::new(&archived, &customers);
    let json: Value =
        serde_json::from_str(&document.to_json_pretty().expect("json")).expect("parse");

    assert_eq!(json["orders"][0]["orderId"], order.order_id.as_str());
    assert_eq!(json["orders"][0]["productTitle"], "Air Runner");
    assert_eq!(json["orders"][0]["price"], 4800);
    assert_eq!(json["marketing"][0]["name"], "Asha");
    assert_eq!(json["marketing"][0]["phone"], "9998887776");
    assert!(json.get("exportDate").is_some());
}

#[tokio::test]
async fn test_incomplete_checkout_never_reaches_the_store() {
    let stub = spawn_stub_catalog(false).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("footwa.redb")).expect("store");

    let catalog = CatalogClient::new(&CatalogConfig {
        base_url: stub.base_url.clone(),
    })
    .load()
    .await
    .expect("catalog load");
    let mut session = Session::new(catalog);

    let product = session.product(ProductId::new(2)).expect("product").clone();
    session.begin_checkout(product);

    // Address missing: the draft stays a draft.
    let result = session.submit_details(&CheckoutForm {
        name: "Asha".to_owned(),
        phone: "9998887776".to_owned(),
        address: String::new(),
    });
    assert!(result.is_err());

    let service = OrderService::new(&store, DisplayRate::default());
    assert!(service.active().expect("active").is_empty());
    assert!(service.archived().expect("archived").is_empty());
}
