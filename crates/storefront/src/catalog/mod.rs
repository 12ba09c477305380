//! Remote catalog client.
//!
//! The shop sells two catalog categories (men's and women's shoes). Both are
//! fetched concurrently at startup and concatenated into one in-memory
//! catalog. The load is fail-fast: if either fetch or parse fails, the whole
//! load fails and no partial catalog is exposed. No retry is attempted; a
//! full reload is the only recovery.

mod conversions;
mod types;

pub use types::Product;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;

use conversions::{ProductsPage, convert_product};

/// Catalog category slug for men's shoes.
const MENS_SHOES: &str = "mens-shoes";

/// Catalog category slug for women's shoes.
const WOMENS_SHOES: &str = "womens-shoes";

/// Errors from loading the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (DNS, connect, read).
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a valid product page.
    #[error("failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Load the full catalog: both shoe categories, fetched concurrently.
    ///
    /// The two fetches race independently but are joined fail-fast: if
    /// either rejects, the whole load is an error and nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails, returns a non-success
    /// status, or produces an unparseable body.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let (mens, womens) = tokio::try_join!(
            self.fetch_category(MENS_SHOES),
            self.fetch_category(WOMENS_SHOES)
        )?;

        let mut catalog = mens;
        catalog.extend(womens);
        debug!(count = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Fetch a single category page.
    #[instrument(skip(self), fields(slug = %slug))]
    async fn fetch_category(&self, slug: &str) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products/category/{slug}", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;
        let page: ProductsPage = match serde_json::from_str(&body) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        Ok(page.products.into_iter().map(convert_product).collect())
    }
}
