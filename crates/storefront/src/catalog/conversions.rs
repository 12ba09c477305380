//! Conversions from catalog API wire types to domain types.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

use footwa_core::ProductId;

use super::types::Product;

/// One page of products as the catalog API returns it.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductsPage {
    pub products: Vec<ProductData>,
}

/// A single product record on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductData {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub category: String,
}

/// Convert a wire product into the domain type.
pub(crate) fn convert_product(data: ProductData) -> Product {
    // Non-finite prices cannot be represented; they collapse to zero.
    let price = Decimal::from_f64(data.price).unwrap_or_default();

    Product {
        id: ProductId::new(data.id),
        title: data.title,
        brand: data.brand.filter(|b| !b.trim().is_empty()),
        price: price.into(),
        thumbnail: data.thumbnail,
        category: data.category,
    }
}
