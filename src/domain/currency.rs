use super::money::round_cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An opaque currency identifier such as `"JPY"` or `"USD"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Exchange rates expressed as units of each currency per one unit of the
/// target currency.
///
/// Lookups never fail: a currency without a usable rate converts at `1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: HashMap<CurrencyCode, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: impl Into<CurrencyCode>, rate: Decimal) {
        self.rates.insert(currency.into(), rate);
    }

    /// Returns the divisor for `currency`. Missing, zero and negative rates
    /// all fall back to `1`.
    pub fn rate_for(&self, currency: &CurrencyCode) -> Decimal {
        match self.rates.get(currency) {
            Some(rate) if *rate > Decimal::ZERO => *rate,
            _ => Decimal::ONE,
        }
    }

    pub fn contains(&self, currency: &CurrencyCode) -> bool {
        self.rates.contains_key(currency)
    }

    /// True when `currency` has a positive rate, i.e. `rate_for` does not
    /// fall back to `1`.
    pub fn has_usable_rate(&self, currency: &CurrencyCode) -> bool {
        self.rates
            .get(currency)
            .is_some_and(|rate| *rate > Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<C: Into<CurrencyCode>> FromIterator<(C, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (C, Decimal)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (currency, rate) in iter {
            table.insert(currency, rate);
        }
        table
    }
}

/// Converts `amount` from `from` into `to` using `rates`.
///
/// The divisor is always looked up by the source currency; `to` only decides
/// whether a conversion happens at all. Same-currency amounts are returned
/// untouched, everything else is rounded to cents.
pub fn convert(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    rates: &RateTable,
) -> Decimal {
    if from == to {
        return amount;
    }

    let rate = rates.rate_for(from);
    let converted = amount.checked_div(rate).unwrap_or(if amount.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    });
    round_cents(converted)
}
