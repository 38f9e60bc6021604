//! Fixed-point prices.

use std::fmt;

use thiserror::Error;

/// Currency glyph prefixed to every rendered price.
pub const CURRENCY_SYMBOL: char = '£';

/// Errors converting a decimal amount into a [`Price`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("price must be a finite number, got {0}")]
    NonFinite(f64),

    #[error("price must not be negative, got {0}")]
    Negative(f64),

    #[error("price {0} is too large")]
    OutOfRange(f64),
}

/// A non-negative amount held in minor units (pence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    pence: u64,
}

impl Price {
    pub const fn from_pence(pence: u64) -> Self {
        Self { pence }
    }

    /// Convert a decimal amount in pounds, rounding to the nearest penny.
    pub fn from_pounds(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::NonFinite(amount));
        }
        if amount < 0.0 {
            return Err(PriceError::Negative(amount));
        }
        let pence = (amount * 100.0).round();
        if pence >= u64::MAX as f64 {
            return Err(PriceError::OutOfRange(amount));
        }
        Ok(Self {
            pence: pence as u64,
        })
    }

    pub fn pence(&self) -> u64 {
        self.pence
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{:02}",
            CURRENCY_SYMBOL,
            self.pence / 100,
            self.pence % 100
        )
    }
}
