use crate::error::WarikanError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Balances whose magnitude falls below this are treated as settled, and
/// transfers at or below it are never emitted.
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.01);

/// Number of decimal places kept on converted amounts and transfers.
pub const CENT_SCALE: u32 = 2;

/// Rounds to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// A strictly positive expense amount.
///
/// Wraps `rust_decimal::Decimal` so that a zero or negative amount can never
/// enter the ledger.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, WarikanError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(WarikanError::ValidationError(format!(
                "Amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = WarikanError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
