//! Order and customer persistence.

use redb::{ReadableTable, ReadableTableMetadata};

use footwa_core::OrderId;

use crate::orders::{Completion, Customer, Order};

use super::{
    ACTIVE_ORDERS, ACTIVE_SEQ, ARCHIVE_SEQ, ARCHIVED_ORDERS, CUSTOMERS, StorageResult, Store,
    next_seq,
};

/// Repository for active orders, the archive, and the customer database.
///
/// Completing an order is the one operation that spans all three tables and
/// it runs inside a single write transaction.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Prepend an order to the active list.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn insert_active(&self, order: &Order) -> StorageResult<()> {
        let value = serde_json::to_vec(order)?;
        let txn = self.store.begin_write()?;
        {
            let seq = next_seq(&txn, ACTIVE_SEQ)?;
            let mut table = txn.open_table(ACTIVE_ORDERS)?;
            table.insert(seq, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// All active orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn active(&self) -> StorageResult<Vec<Order>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(ACTIVE_ORDERS)?;

        let mut orders = Vec::new();
        for entry in table.iter()?.rev() {
            let (_key, value) = entry?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    /// Look up an active order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn find_active(&self, id: &OrderId) -> StorageResult<Option<Order>> {
        Ok(self.active()?.into_iter().find(|o| &o.order_id == id))
    }

    /// Complete an active order: remove it from the active table, prepend it
    /// verbatim to the archive, and insert a customer record iff no existing
    /// record shares its phone number. One atomic transaction; a crash
    /// leaves either all three writes or none.
    ///
    /// Returns `None` (and writes nothing) if no active order has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or a stored record is
    /// corrupt.
    pub fn complete(&self, id: &OrderId) -> StorageResult<Option<Completion>> {
        let txn = self.store.begin_write()?;

        let completion = {
            let mut active = txn.open_table(ACTIVE_ORDERS)?;

            let mut found: Option<(u64, Order)> = None;
            for entry in active.iter()? {
                let (key, value) = entry?;
                let order: Order = serde_json::from_slice(value.value())?;
                if &order.order_id == id {
                    found = Some((key.value(), order));
                    break;
                }
            }
            let Some((seq, order)) = found else {
                // Dropping the transaction aborts it.
                return Ok(None);
            };
            active.remove(seq)?;
            drop(active);

            let archive_seq = next_seq(&txn, ARCHIVE_SEQ)?;
            let mut archive = txn.open_table(ARCHIVED_ORDERS)?;
            archive.insert(archive_seq, serde_json::to_vec(&order)?.as_slice())?;
            drop(archive);

            let mut customers = txn.open_table(CUSTOMERS)?;
            let already_known = customers.get(order.customer_phone.as_str())?.is_some();
            let customer_recorded = if already_known {
                false
            } else {
                let customer = Customer::from(&order);
                customers.insert(
                    order.customer_phone.as_str(),
                    serde_json::to_vec(&customer)?.as_slice(),
                )?;
                true
            };

            Completion {
                order,
                customer_recorded,
            }
        };

        txn.commit()?;
        Ok(Some(completion))
    }

    /// Remove an active order. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or a stored record is
    /// corrupt.
    pub fn delete(&self, id: &OrderId) -> StorageResult<bool> {
        let txn = self.store.begin_write()?;
        let removed = {
            let mut active = txn.open_table(ACTIVE_ORDERS)?;

            let mut found = None;
            for entry in active.iter()? {
                let (key, value) = entry?;
                let order: Order = serde_json::from_slice(value.value())?;
                if &order.order_id == id {
                    found = Some(key.value());
                    break;
                }
            }
            match found {
                Some(seq) => {
                    active.remove(seq)?;
                    true
                }
                None => false,
            }
        };
        txn.commit()?;
        Ok(removed)
    }

    /// Drain the active table. Archive and customers are untouched. Returns
    /// how many orders were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn clear_active(&self) -> StorageResult<u64> {
        let txn = self.store.begin_write()?;
        let removed = {
            let mut active = txn.open_table(ACTIVE_ORDERS)?;
            let keys: Vec<u64> = active
                .iter()?
                .map(|entry| entry.map(|(key, _)| key.value()))
                .collect::<Result<_, _>>()?;
            for key in &keys {
                active.remove(*key)?;
            }
            keys.len() as u64
        };
        txn.commit()?;
        Ok(removed)
    }

    /// All archived orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn archived(&self) -> StorageResult<Vec<Order>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(ARCHIVED_ORDERS)?;

        let mut orders = Vec::new();
        for entry in table.iter()?.rev() {
            let (_key, value) = entry?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    /// All customer records, in phone-number key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    pub fn customers(&self) -> StorageResult<Vec<Customer>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(CUSTOMERS)?;

        let mut customers = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            customers.push(serde_json::from_slice(value.value())?);
        }
        Ok(customers)
    }

    /// (archived orders, customers) counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn counts(&self) -> StorageResult<(u64, u64)> {
        let txn = self.store.begin_read()?;
        let archived = txn.open_table(ARCHIVED_ORDERS)?.len()?;
        let customers = txn.open_table(CUSTOMERS)?.len()?;
        Ok((archived, customers))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(id: &str, phone: &str) -> Order {
        Order {
            order_id: OrderId::from(id),
            customer_name: "Asha".to_owned(),
            customer_phone: phone.to_owned(),
            customer_address: "12 Market Road".to_owned(),
            product_title: "Air Runner".to_owned(),
            price: 4000,
            order_date: Utc::now(),
            status: "Payment successful (PhonePe)".to_owned(),
        }
    }

    #[test]
    fn test_insert_and_find_active() {
        let store = Store::in_memory().unwrap();
        let repo = OrderRepository::new(&store);

        let placed = order("ORD-1", "111");
        repo.insert_active(&placed).unwrap();

        assert_eq!(
            repo.find_active(&OrderId::from("ORD-1")).unwrap(),
            Some(placed)
        );
        assert_eq!(repo.find_active(&OrderId::from("ORD-2")).unwrap(), None);
    }

    #[test]
    fn test_complete_survives_reopen_consistently() {
        // The atomicity claim is about what a later session observes: after
        // completing, a fresh handle to the same file agrees on all three
        // collections.
        let dir = std::env::temp_dir().join(format!("footwa-store-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("orders-test.redb");
        let _ = std::fs::remove_file(&path);

        {
            let store = Store::open(&path).unwrap();
            let repo = OrderRepository::new(&store);
            repo.insert_active(&order("ORD-1", "111")).unwrap();
            repo.complete(&OrderId::from("ORD-1")).unwrap().unwrap();
        }

        let store = Store::open(&path).unwrap();
        let repo = OrderRepository::new(&store);
        assert!(repo.active().unwrap().is_empty());
        assert_eq!(repo.archived().unwrap().len(), 1);
        assert_eq!(repo.customers().unwrap().len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_complete_missing_order_writes_nothing() {
        let store = Store::in_memory().unwrap();
        let repo = OrderRepository::new(&store);
        repo.insert_active(&order("ORD-1", "111")).unwrap();

        assert!(repo.complete(&OrderId::from("ORD-9")).unwrap().is_none());
        assert_eq!(repo.active().unwrap().len(), 1);
        assert!(repo.archived().unwrap().is_empty());
        assert!(repo.customers().unwrap().is_empty());
    }

    #[test]
    fn test_counts() {
        let store = Store::in_memory().unwrap();
        let repo = OrderRepository::new(&store);

        repo.insert_active(&order("ORD-1", "111")).unwrap();
        repo.insert_active(&order("ORD-2", "222")).unwrap();
        repo.complete(&OrderId::from("ORD-1")).unwrap().unwrap();

        assert_eq!(repo.counts().unwrap(), (1, 1));
    }
}
