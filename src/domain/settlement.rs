//! Settlement engine.
//!
//! Folds an expense ledger into per-participant balances and reduces those
//! balances to a short list of debtor -> creditor transfers. Everything here
//! is a pure function of its arguments.

use super::currency::{CurrencyCode, RateTable, convert};
use super::expense::Expense;
use super::money::{SETTLEMENT_EPSILON, round_cents};
use super::participant::{Participant, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// A participant's position in target-currency terms.
///
/// A positive `balance` means the participant is owed money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonBalance {
    pub id: ParticipantId,
    pub name: String,
    pub total_paid: Decimal,
    pub total_owed: Decimal,
    pub balance: Decimal,
}

impl PersonBalance {
    fn new(participant: &Participant) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

/// One transfer: `from` pays `amount` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Decimal,
    pub from_name: String,
    pub to_name: String,
}

/// Computes every participant's balance from the expense ledger.
///
/// Output order follows `participants`. Expense references to unknown
/// participants are ignored on the side they appear, and an expense without
/// beneficiaries only credits its payer.
pub fn accumulate(
    participants: &[Participant],
    expenses: &[Expense],
    target: &CurrencyCode,
    rates: &RateTable,
) -> Vec<PersonBalance> {
    let mut balances: Vec<PersonBalance> = participants.iter().map(PersonBalance::new).collect();

    // First occurrence wins when ids repeat
    let mut index: HashMap<&ParticipantId, usize> = HashMap::with_capacity(participants.len());
    for (i, participant) in participants.iter().enumerate() {
        index.entry(&participant.id).or_insert(i);
    }

    for expense in expenses {
        let converted = convert(expense.amount.value(), &expense.currency, target, rates);
        debug!(
            expense = %expense.id.0,
            payer = %expense.payer,
            amount = %expense.amount.value(),
            currency = %expense.currency,
            %converted,
            "Processing expense"
        );

        if let Some(&i) = index.get(&expense.payer) {
            balances[i].total_paid = balances[i].total_paid.saturating_add(converted);
        }

        if expense.beneficiaries.is_empty() {
            continue;
        }

        let share = converted / Decimal::from(expense.beneficiaries.len());
        for beneficiary in &expense.beneficiaries {
            if let Some(&i) = index.get(beneficiary) {
                balances[i].total_owed = balances[i].total_owed.saturating_add(share);
            }
        }
    }

    for balance in &mut balances {
        balance.balance = balance.total_paid - balance.total_owed;
        debug!(
            participant = %balance.name,
            paid = %balance.total_paid,
            owed = %balance.total_owed,
            balance = %balance.balance,
            "Balance computed"
        );
    }

    balances
}

struct Position<'a> {
    person: &'a PersonBalance,
    remaining: Decimal,
}

impl<'a> Position<'a> {
    fn new(person: &'a PersonBalance) -> Self {
        Self {
            person,
            remaining: person.balance,
        }
    }
}

/// Greedily pairs the largest creditor with the largest debtor until one side
/// runs out.
///
/// Every round settles at least one side of the pair, so the result never
/// holds more than `creditors + debtors - 1` transfers. Residue under a cent is
/// dropped.
pub fn reduce(balances: &[PersonBalance]) -> Vec<SettlementResult> {
    let mut creditors: Vec<Position> = balances
        .iter()
        .filter(|b| b.balance > Decimal::ZERO)
        .map(Position::new)
        .collect();
    let mut debtors: Vec<Position> = balances
        .iter()
        .filter(|b| b.balance < Decimal::ZERO)
        .map(Position::new)
        .collect();

    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| a.remaining.cmp(&b.remaining));

    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        "Reducing balances"
    );

    let mut settlements = Vec::new();
    let mut c = 0;
    let mut d = 0;

    while c < creditors.len() && d < debtors.len() {
        let creditor = &mut creditors[c];
        let debtor = &mut debtors[d];

        let transfer = creditor.remaining.min(debtor.remaining.abs());

        if transfer > SETTLEMENT_EPSILON {
            settlements.push(SettlementResult {
                from: debtor.person.id.clone(),
                to: creditor.person.id.clone(),
                amount: round_cents(transfer),
                from_name: debtor.person.name.clone(),
                to_name: creditor.person.name.clone(),
            });
        }

        creditor.remaining -= transfer;
        debtor.remaining += transfer;

        if creditor.remaining.abs() < SETTLEMENT_EPSILON {
            c += 1;
        }
        if debtor.remaining.abs() < SETTLEMENT_EPSILON {
            d += 1;
        }
    }

    settlements
}

/// Runs both stages: balances first, then the transfer reduction.
pub fn calculate_settlement(
    participants: &[Participant],
    expenses: &[Expense],
    target: &CurrencyCode,
    rates: &RateTable,
) -> Vec<SettlementResult> {
    calculate_with_balances(participants, expenses, target, rates).1
}

/// Like [`calculate_settlement`], but also hands back the balances the
/// transfers were derived from.
pub fn calculate_with_balances(
    participants: &[Participant],
    expenses: &[Expense],
    target: &CurrencyCode,
    rates: &RateTable,
) -> (Vec<PersonBalance>, Vec<SettlementResult>) {
    info!(
        participants = participants.len(),
        expenses = expenses.len(),
        target = %target,
        "Calculating settlement"
    );

    let balances = accumulate(participants, expenses, target, rates);
    let settlements = reduce(&balances);

    info!(transfers = settlements.len(), "Settlement calculated");
    (balances, settlements)
}

/// Sum of all transfer amounts, capped at `Decimal::MAX`.
pub fn total_settlement_amount(settlements: &[SettlementResult]) -> Decimal {
    settlements
        .iter()
        .fold(Decimal::ZERO, |total, s| total.saturating_add(s.amount))
}
