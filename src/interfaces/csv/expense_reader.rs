use super::reader_from;
use crate::domain::expense::Expense;
use crate::domain::money::Amount;
use crate::domain::participant::ParticipantId;
use crate::error::{Result, WarikanError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// Separator between beneficiary ids inside the `beneficiaries` column.
pub const BENEFICIARY_SEPARATOR: char = ';';

#[derive(Debug, Deserialize)]
struct ExpenseRecord {
    id: String,
    payer: String,
    #[serde(default)]
    beneficiaries: String,
    description: String,
    currency: String,
    amount: Decimal,
}

impl ExpenseRecord {
    fn into_expense(self) -> Result<Expense> {
        let amount = Amount::new(self.amount)?;
        let beneficiaries = self
            .beneficiaries
            .split(BENEFICIARY_SEPARATOR)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ParticipantId::from);

        Ok(Expense::new(
            self.id,
            self.payer,
            beneficiaries,
            self.description,
            self.currency,
            amount,
        ))
    }
}

/// Reads expenses from a CSV source.
///
/// Columns are `id,payer,beneficiaries,description,currency,amount`, with the
/// beneficiary ids joined by `;`.
pub struct ExpenseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ExpenseReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: reader_from(source),
        }
    }

    /// Lazily reads expenses; a row with a malformed or non-positive amount
    /// yields an error without stopping the stream.
    pub fn expenses(self) -> impl Iterator<Item = Result<Expense>> {
        self.reader
            .into_deserialize::<ExpenseRecord>()
            .map(|result| {
                result
                    .map_err(WarikanError::from)
                    .and_then(ExpenseRecord::into_expense)
            })
    }
}
