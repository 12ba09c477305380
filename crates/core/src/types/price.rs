//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive in the source currency (US dollars on the demo
//! API). Customers see integer amounts in the display currency, produced by
//! a fixed multiplier - there is deliberately no real exchange-rate handling
//! here.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in the catalog's source currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Convert to an integer amount in the display currency.
    ///
    /// Midpoints round away from zero, matching how the customer-facing
    /// price has always been computed.
    #[must_use]
    pub fn in_display_currency(&self, rate: DisplayRate) -> i64 {
        (self.0 * rate.0)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Fixed multiplier from the source currency to the display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRate(Decimal);

impl DisplayRate {
    /// Create a rate from a decimal multiplier.
    #[must_use]
    pub const fn new(rate: Decimal) -> Self {
        Self(rate)
    }

    /// The underlying multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> Decimal {
        self.0
    }
}

impl Default for DisplayRate {
    fn default() -> Self {
        Self(Decimal::new(80, 0))
    }
}
