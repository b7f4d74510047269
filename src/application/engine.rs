use crate::domain::currency::{CurrencyCode, RateTable};
use crate::domain::expense::Expense;
use crate::domain::participant::Participant;
use crate::domain::ports::LedgerStoreBox;
use crate::domain::settlement::{
    PersonBalance, SettlementResult, calculate_with_balances, total_settlement_amount,
};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// Counts of entries accepted and rejected by an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub participants: usize,
    pub expenses: usize,
    pub rejected: usize,
}

/// The outcome of a settlement run, in the target currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementReport {
    pub currency: CurrencyCode,
    pub balances: Vec<PersonBalance>,
    pub transfers: Vec<SettlementResult>,
    pub total: Decimal,
}

/// Entry point for recording expenses and settling up.
///
/// `SettlementService` owns the ledger store. Every operation starts from the
/// ledger as currently stored; imports save the merged ledger back.
pub struct SettlementService {
    store: LedgerStoreBox,
}

impl SettlementService {
    /// Creates a new `SettlementService` on top of `store`.
    pub fn new(store: LedgerStoreBox) -> Self {
        Self { store }
    }

    /// Merges participants and expenses into the stored ledger.
    ///
    /// Participants go first so that expenses in the same batch can refer to
    /// them. Entries that fail validation are logged and counted, not fatal.
    pub async fn import(
        &self,
        participants: impl IntoIterator<Item = Participant>,
        expenses: impl IntoIterator<Item = Expense>,
    ) -> Result<ImportSummary> {
        let mut ledger = self.store.load().await?;
        let mut summary = ImportSummary::default();

        for participant in participants {
            let id = participant.id.clone();
            match ledger.add_participant(participant) {
                Ok(()) => summary.participants += 1,
                Err(e) => {
                    warn!(participant = %id, error = %e, "Skipping participant");
                    summary.rejected += 1;
                }
            }
        }

        for expense in expenses {
            let id = expense.id.clone();
            match ledger.upsert_expense(expense) {
                Ok(()) => summary.expenses += 1,
                Err(e) => {
                    warn!(expense = %id.0, error = %e, "Skipping expense");
                    summary.rejected += 1;
                }
            }
        }

        self.store.save(&ledger).await?;
        info!(
            participants = summary.participants,
            expenses = summary.expenses,
            rejected = summary.rejected,
            "Ledger import finished"
        );
        Ok(summary)
    }

    /// Settles the stored ledger in `currency`.
    pub async fn settle(
        &self,
        currency: &CurrencyCode,
        rates: &RateTable,
    ) -> Result<SettlementReport> {
        let ledger = self.store.load().await?;

        for code in ledger.currencies() {
            if &code != currency && !rates.has_usable_rate(&code) {
                warn!(currency = %code, target = %currency, "No exchange rate, converting at 1");
            }
        }

        let (balances, transfers) =
            calculate_with_balances(ledger.participants(), ledger.expenses(), currency, rates);
        let total = total_settlement_amount(&transfers);

        Ok(SettlementReport {
            currency: currency.clone(),
            balances,
            transfers,
            total,
        })
    }
}
