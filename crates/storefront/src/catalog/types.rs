//! Domain types for the remote catalog.

use footwa_core::{Price, ProductId};

/// A product from the remote catalog.
///
/// Immutable once fetched; the catalog is held in memory for the lifetime of
/// a session and never persisted. Admin adjustments are layered on top at
/// read time (see [`crate::overrides`]), never written back into a product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Catalog-supplied unique identifier.
    pub id: ProductId,
    pub title: String,
    /// Not every catalog record carries a brand.
    pub brand: Option<String>,
    /// Base price in the source currency.
    pub price: Price,
    /// Thumbnail image URI.
    pub thumbnail: String,
    /// Category label as the catalog reports it (e.g. `mens-shoes`).
    pub category: String,
}
