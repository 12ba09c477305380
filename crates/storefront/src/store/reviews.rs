//! Review persistence.

use redb::ReadableTable;

use footwa_core::ProductId;

use crate::reviews::Review;

use super::{REVIEWS, StorageResult, Store};

/// Repository for per-product review lists.
///
/// Append-only: reviews are prepended and never edited or removed.
pub struct ReviewRepository<'a> {
    store: &'a Store,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Reviews for a product, newest first. Empty for unknown products.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn for_product(&self, product: ProductId) -> StorageResult<Vec<Review>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(REVIEWS)?;

        match table.get(product.as_u64())? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Number of reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn count(&self, product: ProductId) -> StorageResult<usize> {
        Ok(self.for_product(product)?.len())
    }

    /// Prepend a review to a product's list and persist the whole list.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or a stored record is
    /// corrupt.
    pub fn add(&self, product: ProductId, review: &Review) -> StorageResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(REVIEWS)?;

            let existing: Vec<Review> = if let Some(value) = table.get(product.as_u64())? {
                serde_json::from_slice(value.value())?
            } else {
                Vec::new()
            };

            let mut list = Vec::with_capacity(existing.len() + 1);
            list.push(review.clone());
            list.extend(existing);

            table.insert(product.as_u64(), serde_json::to_vec(&list)?.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}
