//! Order lifecycle.
//!
//! An order starts as a checkout form (draft), becomes a validated set of
//! customer details awaiting a payment method, and is persisted as an active
//! order once a method is chosen - payment is simulated and always succeeds.
//! From there the proprietor either completes it (moving it into the archive
//! and recording the customer for marketing) or deletes it.
//!
//! Validation is the only gate between the form and persistence:
//! [`CheckoutDetails`] can only be obtained from [`CheckoutForm::validate`],
//! so a partial order can never reach the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use footwa_core::{DisplayRate, OrderId, PaymentMethod, Price};

use crate::catalog::Product;
use crate::store::{OrderRepository, StorageError, Store};

// =============================================================================
// Checkout
// =============================================================================

/// The in-progress checkout form, as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Checkout validation failure: the fields still missing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required fields: {}", missing.join(", "))]
pub struct CheckoutError {
    pub missing: Vec<&'static str>,
}

/// Validated customer details, snapshot at order time.
///
/// Only obtainable through [`CheckoutForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CheckoutForm {
    /// Validate the form: all three fields must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] listing every missing field; the form
    /// stays as typed so the shopper can retry immediately.
    pub fn validate(&self) -> Result<CheckoutDetails, CheckoutError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let address = self.address.trim();

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if phone.is_empty() {
            missing.push("phone");
        }
        if address.is_empty() {
            missing.push("address");
        }
        if !missing.is_empty() {
            return Err(CheckoutError { missing });
        }

        Ok(CheckoutDetails {
            name: name.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
        })
    }
}

// =============================================================================
// Orders & customers
// =============================================================================

/// A placed order.
///
/// The same record lives in the active table until the proprietor completes
/// it (moved verbatim into the archive) or deletes it (discarded). Which
/// table holds it is the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub product_title: String,
    /// Amount the customer agreed to pay, in the display currency.
    pub price: i64,
    pub order_date: DateTime<Utc>,
    /// Free-text payment-method-tagged success line.
    pub status: String,
}

impl Order {
    /// Build a freshly paid order from the effective listing price and the
    /// validated checkout details.
    #[must_use]
    pub fn place(
        product: &Product,
        effective_price: Price,
        details: &CheckoutDetails,
        method: PaymentMethod,
        rate: DisplayRate,
    ) -> Self {
        Self {
            order_id: OrderId::generate(),
            customer_name: details.name.clone(),
            customer_phone: details.phone.clone(),
            customer_address: details.address.clone(),
            product_title: product.title.clone(),
            price: effective_price.in_display_currency(rate),
            order_date: Utc::now(),
            status: method.status_line(),
        }
    }
}

/// A marketing-database entry derived from a completed order.
///
/// At most one per distinct phone number; the first completed order wins and
/// later orders never update the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl From<&Order> for Customer {
    fn from(order: &Order) -> Self {
        Self {
            name: order.customer_name.clone(),
            phone: order.customer_phone.clone(),
            address: order.customer_address.clone(),
        }
    }
}

/// Result of completing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The order as it now sits at the head of the archive.
    pub order: Order,
    /// Whether a new customer record was created (false when the phone was
    /// already known).
    pub customer_recorded: bool,
}

/// Headline numbers for the admin screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub archived_orders: u64,
    pub customers: u64,
}

/// Errors from order lifecycle operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no active order {0}")]
    NotFound(OrderId),
}

// =============================================================================
// OrderService
// =============================================================================

/// Order lifecycle operations over the local store.
pub struct OrderService<'a> {
    store: &'a Store,
    rate: DisplayRate,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a Store, rate: DisplayRate) -> Self {
        Self { store, rate }
    }

    const fn repo(&self) -> OrderRepository<'a> {
        OrderRepository::new(self.store)
    }

    /// Confirm payment: stamp and persist a new active order.
    ///
    /// This step always succeeds once reached - there is no payment failure
    /// path, only storage errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, product, details), fields(product_id = %product.id))]
    pub fn place(
        &self,
        product: &Product,
        effective_price: Price,
        details: &CheckoutDetails,
        method: PaymentMethod,
    ) -> Result<Order, OrderError> {
        let order = Order::place(product, effective_price, details, method, self.rate);
        self.repo().insert_active(&order)?;
        info!(order_id = %order.order_id, method = %method, "order placed");
        Ok(order)
    }

    /// All active orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn active(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo().active()?)
    }

    /// Active orders whose customer name (case-insensitive) or phone
    /// contains the query. A blank query returns everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn search_active(&self, query: &str) -> Result<Vec<Order>, OrderError> {
        let query = query.trim();
        let orders = self.repo().active()?;
        if query.is_empty() {
            return Ok(orders);
        }

        let lowered = query.to_lowercase();
        Ok(orders
            .into_iter()
            .filter(|o| {
                o.customer_name.to_lowercase().contains(&lowered) || o.customer_phone.contains(query)
            })
            .collect())
    }

    /// Complete an order: remove it from the active list, prepend it to the
    /// archive, and record the customer if the phone is new. The three
    /// writes are one atomic transaction.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if no active order has this id, or a
    /// storage error if the transaction fails.
    #[instrument(skip(self))]
    pub fn complete(&self, id: &OrderId) -> Result<Completion, OrderError> {
        let completion = self
            .repo()
            .complete(id)?
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;
        info!(
            order_id = %completion.order.order_id,
            new_customer = completion.customer_recorded,
            "order completed"
        );
        Ok(completion)
    }

    /// Delete an active order. No archive or customer-record effect.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if no active order has this id.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &OrderId) -> Result<(), OrderError> {
        if self.repo().delete(id)? {
            info!(order_id = %id, "order deleted");
            Ok(())
        } else {
            Err(OrderError::NotFound(id.clone()))
        }
    }

    /// Remove every active order. Archive and customer records are
    /// untouched. Returns how many orders were discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self))]
    pub fn clear_active(&self) -> Result<u64, OrderError> {
        let removed = self.repo().clear_active()?;
        info!(removed, "active orders cleared");
        Ok(removed)
    }

    /// All archived orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn archived(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo().archived()?)
    }

    /// All customer records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn customers(&self) -> Result<Vec<Customer>, OrderError> {
        Ok(self.repo().customers()?)
    }

    /// Archive and customer counts for the admin screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn stats(&self) -> Result<StoreStats, OrderError> {
        let (archived_orders, customers) = self.repo().counts()?;
        Ok(StoreStats {
            archived_orders,
            customers,
        })
    }
}
