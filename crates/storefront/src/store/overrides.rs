//! Product override persistence.

use std::collections::BTreeMap;

use redb::ReadableTable;

use footwa_core::ProductId;

use crate::overrides::{OverrideForm, ProductOverride};

use super::{OVERRIDES, StorageResult, Store};

/// Repository for admin product overrides.
pub struct OverrideRepository<'a> {
    store: &'a Store,
}

impl<'a> OverrideRepository<'a> {
    /// Create a new override repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The stored override for a product, if any field was ever set.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn get(&self, product: ProductId) -> StorageResult<Option<ProductOverride>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(OVERRIDES)?;

        match table.get(product.as_u64())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Every stored override, keyed by product.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn all(&self) -> StorageResult<BTreeMap<ProductId, ProductOverride>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(OVERRIDES)?;

        let mut overrides = BTreeMap::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            overrides.insert(
                ProductId::new(key.value()),
                serde_json::from_slice(value.value())?,
            );
        }
        Ok(overrides)
    }

    /// Merge a form into the stored override and persist the result.
    ///
    /// Blank form fields leave the stored value untouched, so saving the
    /// same form twice is a no-op the second time. A form with no fields at
    /// all never creates an entry - an override exists only once at least
    /// one field was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or a stored record is
    /// corrupt.
    pub fn save(
        &self,
        product: ProductId,
        form: &OverrideForm,
    ) -> StorageResult<ProductOverride> {
        let txn = self.store.begin_write()?;
        let merged = {
            let mut table = txn.open_table(OVERRIDES)?;

            let mut current: ProductOverride = if let Some(value) = table.get(product.as_u64())? {
                serde_json::from_slice(value.value())?
            } else {
                ProductOverride::default()
            };
            current.merge(form);

            if !current.is_empty() {
                table.insert(product.as_u64(), serde_json::to_vec(&current)?.as_slice())?;
            }
            current
        };
        txn.commit()?;
        Ok(merged)
    }
}
