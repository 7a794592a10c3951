//! Pure reductions over a filtered transaction set, all in base currency.
//!
//! A transaction that cannot be converted contributes zero and is logged;
//! one bad rate never aborts a whole report.

use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;

use crate::currency::{amount_base_currency, to_amount_base_currency, CurrencyCode, ExchangeRates};
use crate::ledger::{Account, Transaction, TransactionType};

/// Income, expense, and transfer sums plus the derived net balance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub transfers_in: f64,
    pub transfers_out: f64,
}

impl Totals {
    /// Reconciliation identity: `income - expenses + transfers_in - transfers_out`.
    pub fn balance(&self) -> f64 {
        self.income - self.expenses + self.transfers_in - self.transfers_out
    }
}

fn outgoing_or_zero(
    txn: &Transaction,
    base: &CurrencyCode,
    accounts: &[Account],
    rates: &dyn ExchangeRates,
) -> f64 {
    match amount_base_currency(txn, base, accounts, rates) {
        Ok(amount) => amount,
        Err(err) => {
            warn!(txn = %txn.id, %err, "skipping unconvertible amount");
            0.0
        }
    }
}

fn incoming_or_zero(
    txn: &Transaction,
    base: &CurrencyCode,
    accounts: &[Account],
    rates: &dyn ExchangeRates,
) -> f64 {
    match to_amount_base_currency(txn, base, accounts, rates) {
        Ok(amount) => amount,
        Err(err) => {
            warn!(txn = %txn.id, %err, "skipping unconvertible transfer amount");
            0.0
        }
    }
}

/// Sums the base-currency amounts of transactions of one type.
pub fn sum_by_type(
    transactions: &[Transaction],
    trn_type: TransactionType,
    base: &CurrencyCode,
    accounts: &[Account],
    rates: &dyn ExchangeRates,
) -> f64 {
    transactions
        .iter()
        .filter(|txn| txn.trn_type == trn_type)
        .map(|txn| outgoing_or_zero(txn, base, accounts, rates))
        .sum()
}

/// Full totals over a filtered set. Transfer legs count only when the
/// relevant side sits inside the included account scope.
pub fn totals(
    transactions: &[Transaction],
    included_accounts: &HashSet<Uuid>,
    base: &CurrencyCode,
    accounts: &[Account],
    rates: &dyn ExchangeRates,
) -> Totals {
    let mut out = Totals {
        income: sum_by_type(transactions, TransactionType::Income, base, accounts, rates),
        expenses: sum_by_type(transactions, TransactionType::Expense, base, accounts, rates),
        ..Totals::default()
    };
    for txn in transactions {
        if txn.trn_type != TransactionType::Transfer {
            continue;
        }
        if included_accounts.contains(&txn.account_id) {
            out.transfers_out += outgoing_or_zero(txn, base, accounts, rates);
        }
        if txn
            .to_account_id
            .map_or(false, |to| included_accounts.contains(&to))
        {
            out.transfers_in += incoming_or_zero(txn, base, accounts, rates);
        }
    }
    out
}
