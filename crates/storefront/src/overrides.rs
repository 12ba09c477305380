//! Admin overrides for product listings.
//!
//! The proprietor can replace a product's price, image, or outbound link.
//! Overrides are a read-time overlay: the catalog itself is never mutated,
//! and a listing falls back field-wise to the product's own data. Saving is
//! a merge - blank fields mean "leave unchanged", so a field can be replaced
//! but never cleared back to the catalog default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use footwa_core::Price;

use crate::catalog::Product;

/// Stored per-product override. Every field is optional; an entry exists in
/// the store only if at least one field was ever set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ProductOverride {
    /// Merge the non-empty fields of a form into this override. Fields the
    /// form leaves blank keep their previous value.
    pub fn merge(&mut self, form: &OverrideForm) {
        if let Some(price) = form.price {
            self.price = Some(Price::new(price));
        }
        if let Some(image) = &form.image {
            self.image = Some(image.clone());
        }
        if let Some(website) = &form.website {
            self.website = Some(website.clone());
        }
    }

    /// True when no field has ever been set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.image.is_none() && self.website.is_none()
    }
}

/// Admin input for an override edit. `None` fields were left blank and mean
/// "no change" - there is no way to clear a field back to the catalog value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideForm {
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub website: Option<String>,
}

/// Errors from parsing admin override input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideFormError {
    #[error("invalid price {0:?}")]
    InvalidPrice(String),
}

impl OverrideForm {
    /// Build a form from raw text input. Blank fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-blank price does not parse as a decimal.
    pub fn from_input(price: &str, image: &str, website: &str) -> Result<Self, OverrideFormError> {
        let price = match price.trim() {
            "" => None,
            raw => Some(
                raw.parse::<Decimal>()
                    .map_err(|_| OverrideFormError::InvalidPrice(raw.to_owned()))?,
            ),
        };

        Ok(Self {
            price,
            image: non_blank(image),
            website: non_blank(website),
        })
    }

    /// True when every field was left blank.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.image.is_none() && self.website.is_none()
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// A product as the shopper sees it: override fields where present, the
/// product's own data otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Effective price in the source currency.
    pub price: Price,
    /// Effective image URI.
    pub image: String,
    /// Effective outbound link.
    pub website: String,
}

/// Resolve the effective listing for a product.
///
/// Pure and total over any product/override pair, including no override at
/// all: price and image fall back to the product, the website falls back to
/// a deterministic search link built from brand and title.
#[must_use]
pub fn apply_override(product: &Product, ov: Option<&ProductOverride>) -> Listing {
    Listing {
        price: ov.and_then(|o| o.price).unwrap_or(product.price),
        image: ov
            .and_then(|o| o.image.clone())
            .unwrap_or_else(|| product.thumbnail.clone()),
        website: ov
            .and_then(|o| o.website.clone())
            .unwrap_or_else(|| default_search_link(product)),
    }
}

/// Deterministic fallback link: a web search for brand and title.
#[must_use]
pub fn default_search_link(product: &Product) -> String {
    let query = match product.brand.as_deref() {
        Some(brand) => format!("{brand} {}", product.title),
        None => product.title.clone(),
    };
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(&query)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use footwa_core::ProductId;

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Air Runner".to_owned(),
            brand: Some("Nike".to_owned()),
            price: Price::new(Decimal::new(50, 0)),
            thumbnail: "https://cdn.example/1.png".to_owned(),
            category: "mens-shoes".to_owned(),
        }
    }

    #[test]
    fn test_apply_without_override_uses_product_values() {
        let product = product();
        let listing = apply_override(&product, None);
        assert_eq!(listing.price, product.price);
        assert_eq!(listing.image, product.thumbnail);
        assert_eq!(
            listing.website,
            "https://www.google.com/search?q=Nike%20Air%20Runner"
        );
    }

    #[test]
    fn test_apply_with_empty_override_entry() {
        let product = product();
        let listing = apply_override(&product, Some(&ProductOverride::default()));
        assert_eq!(listing.price, product.price);
        assert_eq!(listing.image, product.thumbnail);
    }

    #[test]
    fn test_apply_partial_override_falls_back_per_field() {
        let product = product();
        let ov = ProductOverride {
            price: Some(Price::new(Decimal::new(60, 0))),
            ..Default::default()
        };
        let listing = apply_override(&product, Some(&ov));
        assert_eq!(listing.price.amount(), Decimal::new(60, 0));
        // Image unchanged by a price-only override
        assert_eq!(listing.image, product.thumbnail);
    }

    #[test]
    fn test_default_search_link_without_brand() {
        let mut product = product();
        product.brand = None;
        assert_eq!(
            default_search_link(&product),
            "https://www.google.com/search?q=Air%20Runner"
        );
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let mut ov = ProductOverride {
            image: Some("https://img.example/custom.png".to_owned()),
            website: Some("https://brand.example".to_owned()),
            ..Default::default()
        };
        ov.merge(&OverrideForm {
            price: Some(Decimal::new(60, 0)),
            ..Default::default()
        });
        assert_eq!(ov.price, Some(Price::new(Decimal::new(60, 0))));
        assert_eq!(ov.image.as_deref(), Some("https://img.example/custom.png"));
        assert_eq!(ov.website.as_deref(), Some("https://brand.example"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let form = OverrideForm {
            price: Some(Decimal::new(60, 0)),
            image: Some("https://img.example/a.png".to_owned()),
            website: None,
        };
        let mut once = ProductOverride::default();
        once.merge(&form);
        let mut twice = once.clone();
        twice.merge(&form);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_form_from_input_blank_fields_mean_no_change() {
        let form = OverrideForm::from_input("", "  ", "").unwrap();
        assert!(form.is_empty());
    }

    #[test]
    fn test_form_from_input_parses_price() {
        let form = OverrideForm::from_input("60", "", "https://brand.example").unwrap();
        assert_eq!(form.price, Some(Decimal::new(60, 0)));
        assert_eq!(form.website.as_deref(), Some("https://brand.example"));
    }

    #[test]
    fn test_form_from_input_rejects_bad_price() {
        assert_eq!(
            OverrideForm::from_input("cheap", "", ""),
            Err(OverrideFormError::InvalidPrice("cheap".to_owned()))
        );
    }
}
