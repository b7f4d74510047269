use super::reader_from;
use crate::domain::currency::{CurrencyCode, RateTable};
use crate::error::{Result, WarikanError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RateRecord {
    currency: CurrencyCode,
    rate: Decimal,
}

/// Reads `currency,rate` rows, each rate being units of `currency` per one
/// unit of the settlement currency.
pub struct RateReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RateReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: reader_from(source),
        }
    }

    pub fn rates(self) -> impl Iterator<Item = Result<(CurrencyCode, Decimal)>> {
        self.reader.into_deserialize::<RateRecord>().map(|result| {
            result
                .map(|record| (record.currency, record.rate))
                .map_err(WarikanError::from)
        })
    }

    /// Collects every readable row into a table, passing unreadable ones to
    /// `on_error`.
    pub fn into_table(self, mut on_error: impl FnMut(WarikanError)) -> RateTable {
        let mut table = RateTable::new();
        for result in self.rates() {
            match result {
                Ok((currency, rate)) => table.insert(currency, rate),
                Err(e) => on_error(e),
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_builds_table() {
        let data = "currency, rate\nJPY, 150.25\nEUR, 0.92\nGBP, n/a";
        let mut errors = 0;
        let table = RateReader::new(data.as_bytes()).into_table(|_| errors += 1);

        assert_eq!(errors, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rate_for(&"JPY".into()), dec!(150.25));
        assert_eq!(table.rate_for(&"GBP".into()), dec!(1));
    }

    #[test]
    fn test_later_rows_override_earlier_ones() {
        let data = "currency, rate\nJPY, 150\nJPY, 160";
        let table = RateReader::new(data.as_bytes()).into_table(|_| {});

        assert_eq!(table.rate_for(&"JPY".into()), dec!(160));
    }
}
