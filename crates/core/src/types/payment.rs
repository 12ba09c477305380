//! Payment method selection.
//!
//! Payment is simulated: choosing a method always succeeds, and the chosen
//! method is only recorded in the order's status line.

use serde::{Deserialize, Serialize};

/// A simulated payment method the shopper can pick at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    GooglePay,
    PhonePe,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Every selectable method, in presentation order.
    pub const ALL: [Self; 3] = [Self::GooglePay, Self::PhonePe, Self::CashOnDelivery];

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GooglePay => "Google Pay",
            Self::PhonePe => "PhonePe",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// The free-text status line stamped on a paid order.
    #[must_use]
    pub fn status_line(self) -> String {
        format!("Payment successful ({})", self.label())
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
