//! Integration test support for Footwa.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p footwa-integration-tests
//! ```
//!
//! The tests run fully locally: a stub catalog server on an ephemeral port
//! stands in for the remote catalog API, and stores live in temp
//! directories. No network access and no running services are required.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// A stub catalog API serving canned pages for the two shoe categories.
pub struct StubCatalog {
    /// Base URL to hand to `CatalogConfig`.
    pub base_url: String,
}

/// Spawn a stub catalog server on an ephemeral local port.
///
/// With `fail_womens` the women's endpoint answers 500, which must make the
/// whole catalog load fail (no partial catalog).
pub async fn spawn_stub_catalog(fail_womens: bool) -> StubCatalog {
    let app = Router::new().route(
        "/products/category/{slug}",
        get(move |Path(slug): Path<String>| async move {
            match slug.as_str() {
                "mens-shoes" => (StatusCode::OK, Json(mens_page())),
                "womens-shoes" if !fail_womens => (StatusCode::OK, Json(womens_page())),
                "womens-shoes" => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "boom"})),
                ),
                _ => (StatusCode::NOT_FOUND, Json(json!({"message": "no such category"}))),
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub catalog listener");
    let addr = listener.local_addr().expect("stub catalog has no address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("stub catalog server failed");
    });

    StubCatalog {
        base_url: format!("http://{addr}"),
    }
}

fn mens_page() -> Value {
    json!({
        "products": [
            {
                "id": 1,
                "title": "Air Runner",
                "brand": "Nike",
                "price": 50.0,
                "thumbnail": "https://cdn.example/1.png",
                "category": "mens-shoes"
            },
            {
                "id": 2,
                "title": "Oxford Derby",
                "brand": "Clarks",
                "price": 80.0,
                "thumbnail": "https://cdn.example/2.png",
                "category": "mens-shoes"
            }
        ],
        "total": 2,
        "skip": 0,
        "limit": 30
    })
}

fn womens_page() -> Value {
    json!({
        "products": [
            {
                "id": 11,
                "title": "Gym Trainer",
                "brand": "Puma",
                "price": 60.0,
                "thumbnail": "https://cdn.example/11.png",
                "category": "womens-shoes"
            }
        ],
        "total": 1,
        "skip": 0,
        "limit": 30
    })
}
