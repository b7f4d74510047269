use super::currency::{CurrencyCode, RateTable};
use super::expense::{Expense, ExpenseId};
use super::participant::{Participant, ParticipantId};
use super::settlement::{SettlementResult, calculate_settlement};
use crate::error::{Result, WarikanError};
use serde::{Deserialize, Serialize};

/// The group's participants and the expenses recorded between them.
///
/// All mutation goes through validating methods; the settlement engine only
/// ever reads the two lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Adds a participant, or renames it if the id is already known.
    ///
    /// Names are trimmed and must be unique ignoring case.
    pub fn add_participant(&mut self, participant: Participant) -> Result<()> {
        if participant.id.is_empty() {
            return Err(WarikanError::ValidationError(
                "Participant id must not be empty".to_string(),
            ));
        }
        let name = self.validate_name(&participant.name, Some(&participant.id))?;

        match self.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => existing.name = name,
            None => self.participants.push(Participant::new(participant.id, name)),
        }
        Ok(())
    }

    pub fn rename_participant(&mut self, id: &ParticipantId, name: &str) -> Result<()> {
        if self.participant(id).is_none() {
            return Err(WarikanError::UnknownParticipant(id.to_string()));
        }
        let name = self.validate_name(name, Some(id))?;
        if let Some(existing) = self.participants.iter_mut().find(|p| &p.id == id) {
            existing.name = name;
        }
        Ok(())
    }

    /// Removes a participant that no expense refers to.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant> {
        if self.expenses.iter().any(|e| e.involves(id)) {
            return Err(WarikanError::ParticipantInUse(id.to_string()));
        }
        let position = self
            .participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| WarikanError::UnknownParticipant(id.to_string()))?;
        Ok(self.participants.remove(position))
    }

    /// Records an expense, replacing any earlier one with the same id.
    pub fn upsert_expense(&mut self, mut expense: Expense) -> Result<()> {
        if expense.payer.is_empty() {
            return Err(WarikanError::ValidationError(format!(
                "Expense {} has no payer",
                expense.id.0
            )));
        }
        if expense.beneficiaries.is_empty() {
            return Err(WarikanError::ValidationError(format!(
                "Expense {} needs at least one beneficiary",
                expense.id.0
            )));
        }
        let description = expense.description.trim().to_string();
        if description.is_empty() {
            return Err(WarikanError::ValidationError(format!(
                "Expense {} has no description",
                expense.id.0
            )));
        }
        expense.description = description;

        match self.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => self.expenses.push(expense),
        }
        Ok(())
    }

    pub fn remove_expense(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| &e.id != id);
        self.expenses.len() != before
    }

    /// Distinct expense currencies in the order they first appear.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut seen: Vec<CurrencyCode> = Vec::new();
        for expense in &self.expenses {
            if !seen.contains(&expense.currency) {
                seen.push(expense.currency.clone());
            }
        }
        seen
    }

    pub fn settle(&self, target: &CurrencyCode, rates: &RateTable) -> Vec<SettlementResult> {
        calculate_settlement(&self.participants, &self.expenses, target, rates)
    }

    fn validate_name(&self, name: &str, except: Option<&ParticipantId>) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WarikanError::ValidationError(
                "Participant name must not be empty".to_string(),
            ));
        }
        let lowered = trimmed.to_lowercase();
        let taken = self
            .participants
            .iter()
            .filter(|p| Some(&p.id) != except)
            .any(|p| p.name.to_lowercase() == lowered);
        if taken {
            return Err(WarikanError::DuplicateParticipant(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;
    use rust_decimal_macros::dec;

    fn trip() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_participant(Participant::new("a", "Alice")).unwrap();
        ledger.add_participant(Participant::new("b", "Bob")).unwrap();
        ledger.add_participant(Participant::new("c", "Carol")).unwrap();
        ledger
    }

    fn dinner(id: &str, payer: &str, currency: &str) -> Expense {
        Expense::new(
            id,
            payer,
            ["a", "b", "c"].map(ParticipantId::from),
            " Dinner ",
            currency,
            Amount::new(dec!(300)).unwrap(),
        )
    }

    #[test]
    fn test_add_participant_trims_and_rejects_duplicates() {
        let mut ledger = trip();
        ledger.add_participant(Participant::new("d", "  Dave ")).unwrap();
        assert_eq!(ledger.participant(&"d".into()).unwrap().name, "Dave");

        let result = ledger.add_participant(Participant::new("e", "alice"));
        assert!(matches!(result, Err(WarikanError::DuplicateParticipant(_))));

        let result = ledger.add_participant(Participant::new("e", "   "));
        assert!(matches!(result, Err(WarikanError::ValidationError(_))));

        let result = ledger.add_participant(Participant::new("", "Eve"));
        assert!(matches!(result, Err(WarikanError::ValidationError(_))));
        assert_eq!(ledger.participants().len(), 4);
    }

    #[test]
    fn test_add_participant_with_known_id_renames() {
        let mut ledger = trip();
        ledger.add_participant(Participant::new("a", "ALICE")).unwrap();
        assert_eq!(ledger.participants().len(), 3);
        assert_eq!(ledger.participants()[0].name, "ALICE");
    }

    #[test]
    fn test_rename_participant() {
        let mut ledger = trip();
        ledger.rename_participant(&"b".into(), "Robert").unwrap();
        assert_eq!(ledger.participant(&"b".into()).unwrap().name, "Robert");

        assert!(matches!(
            ledger.rename_participant(&"b".into(), "carol"),
            Err(WarikanError::DuplicateParticipant(_))
        ));
        assert!(matches!(
            ledger.rename_participant(&"z".into(), "Zed"),
            Err(WarikanError::UnknownParticipant(_))
        ));
    }

    #[test]
    fn test_remove_participant_referenced_by_expense() {
        let mut ledger = trip();
        ledger.add_participant(Participant::new("d", "Dave")).unwrap();
        ledger.upsert_expense(dinner("1", "a", "JPY")).unwrap();

        assert!(matches!(
            ledger.remove_participant(&"b".into()),
            Err(WarikanError::ParticipantInUse(_))
        ));

        let removed = ledger.remove_participant(&"d".into()).unwrap();
        assert_eq!(removed.name, "Dave");
        assert!(matches!(
            ledger.remove_participant(&"d".into()),
            Err(WarikanError::UnknownParticipant(_))
        ));
    }

    #[test]
    fn test_upsert_expense_validation() {
        let mut ledger = trip();

        let mut no_beneficiaries = dinner("1", "a", "JPY");
        no_beneficiaries.beneficiaries.clear();
        assert!(matches!(
            ledger.upsert_expense(no_beneficiaries),
            Err(WarikanError::ValidationError(_))
        ));

        let no_payer = dinner("2", "", "JPY");
        assert!(ledger.upsert_expense(no_payer).is_err());

        let mut no_description = dinner("3", "a", "JPY");
        no_description.description = "  ".to_string();
        assert!(ledger.upsert_expense(no_description).is_err());

        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_upsert_expense_replaces_by_id() {
        let mut ledger = trip();
        ledger.upsert_expense(dinner("1", "a", "JPY")).unwrap();
        ledger.upsert_expense(dinner("1", "b", "USD")).unwrap();

        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.expenses()[0].payer, ParticipantId::from("b"));
        assert_eq!(ledger.expenses()[0].description, "Dinner");
    }

    #[test]
    fn test_remove_expense() {
        let mut ledger = trip();
        ledger.upsert_expense(dinner("1", "a", "JPY")).unwrap();
        assert!(ledger.remove_expense(&"1".into()));
        assert!(!ledger.remove_expense(&"1".into()));
        assert!(ledger.remove_participant(&"a".into()).is_ok());
    }

    #[test]
    fn test_currencies_in_first_seen_order() {
        let mut ledger = trip();
        ledger.upsert_expense(dinner("1", "a", "USD")).unwrap();
        ledger.upsert_expense(dinner("2", "b", "JPY")).unwrap();
        ledger.upsert_expense(dinner("3", "c", "USD")).unwrap();

        let codes: Vec<String> = ledger.currencies().into_iter().map(|c| c.0).collect();
        assert_eq!(codes, vec!["USD", "JPY"]);
    }

    #[test]
    fn test_settle_uses_ledger_contents() {
        let mut ledger = trip();
        ledger.upsert_expense(dinner("1", "a", "JPY")).unwrap();

        let settlements = ledger.settle(&"JPY".into(), &RateTable::new());
        assert_eq!(settlements.len(), 2);
        assert!(settlements.iter().all(|s| s.to == ParticipantId::from("a")));
    }
}
