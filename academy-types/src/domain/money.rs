//! Type-safe monetary value with embedded currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Largest minor-unit amount that survives the round trip through a JSON number.
pub const MAX_MINOR_AMOUNT: i64 = 9_007_199_254_740_991;

/// Currencies orders can be issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
}

impl Currency {
    /// Returns the number of minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        match self {
            Currency::INR => 100,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (paise for INR)
/// so the value sent to the provider is always an exact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value from a minor-unit amount.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::NonPositiveAmount);
        }
        if amount > MAX_MINOR_AMOUNT {
            return Err(DomainError::AmountOutOfRange);
        }
        Ok(Self { amount, currency })
    }

    /// Converts a major-unit amount (rupees) into minor units (paise).
    ///
    /// The client's amount is trusted as the price; only its shape is checked:
    /// it must be finite, positive, and not finer than one minor unit.
    pub fn from_major(major: f64, currency: Currency) -> Result<Self, DomainError> {
        if !major.is_finite() {
            return Err(DomainError::NonFiniteAmount);
        }
        if major <= 0.0 {
            return Err(DomainError::NonPositiveAmount);
        }

        let scaled = major * currency.minor_per_major() as f64;
        let minor = scaled.round();
        if (scaled - minor).abs() > 1e-6 {
            return Err(DomainError::FractionalMinorUnits);
        }
        if minor > MAX_MINOR_AMOUNT as f64 {
            return Err(DomainError::AmountOutOfRange);
        }

        Self::new(minor as i64, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_major = self.currency.minor_per_major();
        let major = self.amount / per_major;
        let minor = (self.amount % per_major).abs();
        write!(f, "{}{}.{:02}", self.currency.symbol(), major, minor)
    }
}
