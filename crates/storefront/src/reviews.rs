//! Product reviews.
//!
//! Reviews are immutable once created and keyed by product identifier,
//! newest first. A review for a product that is no longer in the catalog is
//! inert but never rejected - there is no foreign-key relationship to
//! enforce.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use footwa_core::ProductId;

use crate::store::{ReviewRepository, StorageError, Store};

/// A single product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub comment: String,
    /// Client-generated creation time; there is no server to ask.
    pub date: DateTime<Utc>,
}

/// Errors from review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Both a name and a comment are required.
    #[error("a name and a comment are both required")]
    MissingFields,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Review operations over the local store.
pub struct ReviewService<'a> {
    store: &'a Store,
}

impl<'a> ReviewService<'a> {
    /// Create a new review service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    const fn repo(&self) -> ReviewRepository<'a> {
        ReviewRepository::new(self.store)
    }

    /// Add a review for a product.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingFields`] (and performs no write) if the
    /// name or comment is blank, or a storage error if persisting fails.
    #[instrument(skip(self, name, comment))]
    pub fn add(
        &self,
        product: ProductId,
        name: &str,
        comment: &str,
    ) -> Result<Review, ReviewError> {
        let name = name.trim();
        let comment = comment.trim();
        if name.is_empty() || comment.is_empty() {
            return Err(ReviewError::MissingFields);
        }

        let review = Review {
            name: name.to_owned(),
            comment: comment.to_owned(),
            date: Utc::now(),
        };
        self.repo().add(product, &review)?;
        info!(product_id = %product, "review added");
        Ok(review)
    }

    /// Reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn for_product(&self, product: ProductId) -> Result<Vec<Review>, ReviewError> {
        Ok(self.repo().for_product(product)?)
    }

    /// Number of reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn count(&self, product: ProductId) -> Result<usize, ReviewError> {
        Ok(self.repo().count(product)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_requires_name_and_comment() {
        let store = Store::in_memory().unwrap();
        let service = ReviewService::new(&store);
        let id = ProductId::new(1);

        assert!(matches!(
            service.add(id, "", "Great fit"),
            Err(ReviewError::MissingFields)
        ));
        assert!(matches!(
            service.add(id, "Asha", "   "),
            Err(ReviewError::MissingFields)
        ));
        // The failed attempts wrote nothing.
        assert_eq!(service.count(id).unwrap(), 0);
    }

    #[test]
    fn test_add_trims_and_prepends() {
        let store = Store::in_memory().unwrap();
        let service = ReviewService::new(&store);
        let id = ProductId::new(1);

        service.add(id, " Asha ", " Great fit ").unwrap();
        service.add(id, "Ravi", "Runs small").unwrap();

        let reviews = service.for_product(id).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews.first().unwrap().name, "Ravi");
        assert_eq!(reviews.last().unwrap().comment, "Great fit");
    }

    #[test]
    fn test_reviews_for_unknown_product_are_inert() {
        let store = Store::in_memory().unwrap();
        let service = ReviewService::new(&store);

        // Nothing stops a review for an id the catalog has never seen.
        service.add(ProductId::new(999), "Asha", "Still fine").unwrap();
        assert_eq!(service.count(ProductId::new(999)).unwrap(), 1);
    }
}
