use super::currency::CurrencyCode;
use super::money::Amount;
use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for ExpenseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ExpenseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One advance payment: `payer` paid `amount` in `currency` on behalf of
/// `beneficiaries`, who share it evenly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub payer: ParticipantId,
    pub beneficiaries: Vec<ParticipantId>,
    pub description: String,
    pub currency: CurrencyCode,
    pub amount: Amount,
}

impl Expense {
    /// Builds an expense, dropping repeated beneficiaries while keeping the
    /// first-seen order.
    pub fn new(
        id: impl Into<ExpenseId>,
        payer: impl Into<ParticipantId>,
        beneficiaries: impl IntoIterator<Item = ParticipantId>,
        description: impl Into<String>,
        currency: impl Into<CurrencyCode>,
        amount: Amount,
    ) -> Self {
        let mut unique: Vec<ParticipantId> = Vec::new();
        for beneficiary in beneficiaries {
            if !unique.contains(&beneficiary) {
                unique.push(beneficiary);
            }
        }
        Self {
            id: id.into(),
            payer: payer.into(),
            beneficiaries: unique,
            description: description.into(),
            currency: currency.into(),
            amount,
        }
    }

    /// Whether `participant` pays for or benefits from this expense.
    pub fn involves(&self, participant: &ParticipantId) -> bool {
        &self.payer == participant || self.beneficiaries.contains(participant)
    }
}
