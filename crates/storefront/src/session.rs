//! The shopper-facing application state machine.
//!
//! One explicit state struct with a named transition per action, instead of
//! a pile of interdependent flags. The session owns the loaded catalog, the
//! active filter, and the checkout stage; the front-end calls transitions
//! and re-renders from the accessors.
//!
//! Checkout stages: browsing -> details (the draft form) -> payment
//! selection. Once a payment method is confirmed the session hands the
//! validated snapshot to the order service and returns to browsing.

use thiserror::Error;

use footwa_core::ProductId;

use crate::catalog::Product;
use crate::filter::{CatalogFilter, find_category};
use crate::orders::{CheckoutDetails, CheckoutError, CheckoutForm};

/// Where the shopper is in the checkout flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Stage {
    /// Browsing the catalog; no order in progress.
    #[default]
    Browsing,
    /// Filling the checkout form for a product (draft - nothing persisted).
    Details { product: Product },
    /// Details validated; waiting for a payment method.
    Payment {
        product: Product,
        details: CheckoutDetails,
    },
}

/// Errors from session transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no checkout in progress")]
    NotInCheckout,

    #[error("no payment selection in progress")]
    NotAwaitingPayment,

    #[error(transparent)]
    InvalidCheckout(#[from] CheckoutError),
}

/// The application state the front-end drives.
pub struct Session {
    catalog: Vec<Product>,
    filter: CatalogFilter,
    stage: Stage,
}

impl Session {
    /// Start a session over a freshly loaded catalog.
    #[must_use]
    pub const fn new(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            filter: CatalogFilter::All,
            stage: Stage::Browsing,
        }
    }

    /// The full, unfiltered catalog.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The currently visible subset, recomputed from the full catalog.
    #[must_use]
    pub fn visible(&self) -> Vec<Product> {
        self.filter.apply(&self.catalog)
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// The current checkout stage.
    #[must_use]
    pub const fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Look up a product in the full catalog by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    // =========================================================================
    // Filter transitions
    // =========================================================================

    /// Switch to free-text search. Any active category is dropped as a side
    /// effect - the two filter modes are mutually exclusive.
    pub fn search(&mut self, text: impl Into<String>) {
        self.filter = CatalogFilter::Search(text.into());
    }

    /// Switch to a category. The sentinel "All" clears filtering entirely;
    /// an unknown name is rejected and leaves the filter untouched. Any
    /// active search text is dropped as a side effect.
    pub fn select_category(&mut self, name: &str) -> bool {
        if name.trim().eq_ignore_ascii_case(crate::filter::ALL) {
            self.filter = CatalogFilter::All;
            return true;
        }
        match find_category(name) {
            Some(category) => {
                self.filter = CatalogFilter::Category(category);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Checkout transitions
    // =========================================================================

    /// Open the checkout form for a product.
    pub fn begin_checkout(&mut self, product: Product) {
        self.stage = Stage::Details { product };
    }

    /// Abandon the checkout at any stage and return to browsing.
    pub fn cancel_checkout(&mut self) {
        self.stage = Stage::Browsing;
    }

    /// Submit the checkout form. On success the session advances to payment
    /// selection; on validation failure it stays in the details stage so the
    /// shopper can retry immediately.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotInCheckout`] outside the details stage;
    /// [`SessionError::InvalidCheckout`] when fields are missing.
    pub fn submit_details(&mut self, form: &CheckoutForm) -> Result<(), SessionError> {
        match std::mem::take(&mut self.stage) {
            Stage::Details { product } => match form.validate() {
                Ok(details) => {
                    self.stage = Stage::Payment { product, details };
                    Ok(())
                }
                Err(e) => {
                    self.stage = Stage::Details { product };
                    Err(e.into())
                }
            },
            other => {
                self.stage = other;
                Err(SessionError::NotInCheckout)
            }
        }
    }

    /// Confirm that a payment method was chosen: hand back the product and
    /// the validated details for placement and return to browsing.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotAwaitingPayment`] outside the payment stage.
    pub fn confirm_payment(&mut self) -> Result<(Product, CheckoutDetails), SessionError> {
        match std::mem::take(&mut self.stage) {
            Stage::Payment { product, details } => Ok((product, details)),
            other => {
                self.stage = other;
                Err(SessionError::NotAwaitingPayment)
            }
        }
    }
}
