use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::currency::ExchangeRates;
use crate::errors::ReportError;
use crate::ledger::{CategoryChoice, Transaction, TransactionType};
use crate::stores::{AccountStore, CategoryStore, LedgerStore, SettingsStore};

use super::aggregate::{sum_by_type, totals};
use super::filter::ReportFilter;
use super::partition::{date_dividers, partition};
use super::period::ClosedRange;
use super::predicates::{filter_transactions, FilterContext};

/// Assembled output of one filter application. Plain immutable data; the
/// caller owns any notification or subscription concerns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportResult {
    pub income: f64,
    pub expenses: f64,
    pub upcoming_income: f64,
    pub upcoming_expenses: f64,
    pub overdue_income: f64,
    pub overdue_expenses: f64,
    pub balance: f64,
    pub history: Vec<Transaction>,
    pub upcoming_transactions: Vec<Transaction>,
    pub overdue_transactions: Vec<Transaction>,
    /// Distinct history dates, newest first.
    pub date_dividers: Vec<NaiveDate>,
    /// Ids of the accounts the filter scoped to.
    pub account_id_filters: Vec<Uuid>,
}

/// Stateless report computation over externally supplied collaborators.
pub struct ReportEngine<'a> {
    ledger: &'a dyn LedgerStore,
    accounts: &'a dyn AccountStore,
    categories: &'a dyn CategoryStore,
    settings: &'a dyn SettingsStore,
    rates: &'a dyn ExchangeRates,
}

impl<'a> ReportEngine<'a> {
    pub fn new(
        ledger: &'a dyn LedgerStore,
        accounts: &'a dyn AccountStore,
        categories: &'a dyn CategoryStore,
        settings: &'a dyn SettingsStore,
        rates: &'a dyn ExchangeRates,
    ) -> Self {
        Self {
            ledger,
            accounts,
            categories,
            settings,
            rates,
        }
    }

    /// Runs the full pipeline for one validated filter: predicate chain,
    /// time partitioning, and base-currency aggregation, assembled once at
    /// the end. Synchronous; async wrapping is a caller concern.
    pub fn apply_filter(
        &self,
        filter: &ReportFilter,
        now: DateTime<Utc>,
    ) -> Result<ReportResult, ReportError> {
        let settings = self.settings.first();
        let range = filter.validate(settings.start_day_of_month, now)?;
        let ledger = self.ledger.find_all();
        let accounts = self.accounts.find_all();
        let base = &settings.base_currency;

        let ctx = FilterContext::new(filter, range, base, &accounts, self.rates);
        let filtered = filter_transactions(&ledger, &ctx);
        let parts = partition(&filtered, now);

        // Each aggregate below reads only the immutable filtered set; they
        // are independent up to the final assembly.
        let full = totals(&filtered, ctx.account_ids(), base, &accounts, self.rates);
        let upcoming_income = sum_by_type(
            &parts.upcoming,
            TransactionType::Income,
            base,
            &accounts,
            self.rates,
        );
        let upcoming_expenses = sum_by_type(
            &parts.upcoming,
            TransactionType::Expense,
            base,
            &accounts,
            self.rates,
        );
        let overdue_income = sum_by_type(
            &parts.overdue,
            TransactionType::Income,
            base,
            &accounts,
            self.rates,
        );
        let overdue_expenses = sum_by_type(
            &parts.overdue,
            TransactionType::Expense,
            base,
            &accounts,
            self.rates,
        );
        let dividers = date_dividers(&parts.history);
        let account_id_filters: Vec<Uuid> =
            filter.accounts.iter().map(|account| account.id).collect();

        debug!(
            filtered = filtered.len(),
            history = parts.history.len(),
            upcoming = parts.upcoming.len(),
            overdue = parts.overdue.len(),
            "report assembled"
        );

        Ok(ReportResult {
            income: full.income,
            expenses: full.expenses,
            upcoming_income,
            upcoming_expenses,
            overdue_income,
            overdue_expenses,
            balance: full.balance(),
            history: parts.history,
            upcoming_transactions: parts.upcoming,
            overdue_transactions: parts.overdue,
            date_dividers: dividers,
            account_id_filters,
        })
    }

    /// Stored categories plus the sentinel "Unspecified" entry, the list a
    /// category picker consumes.
    pub fn category_choices(&self) -> Vec<CategoryChoice> {
        let mut choices: Vec<CategoryChoice> = self
            .categories
            .find_all()
            .iter()
            .map(CategoryChoice::from)
            .collect();
        choices.push(CategoryChoice::unspecified());
        choices
    }

    /// Settled activity touching one account inside `range`: outgoing
    /// transactions plus incoming transfers, newest first.
    pub fn account_activity(&self, account_id: Uuid, range: &ClosedRange) -> Vec<Transaction> {
        let mut activity = self
            .ledger
            .find_all_by_account_and_between(account_id, range);
        for incoming in self
            .ledger
            .find_all_to_account_and_between(account_id, range)
        {
            if activity.iter().all(|txn| txn.id != incoming.id) {
                activity.push(incoming);
            }
        }
        activity.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        activity
    }
}

/// Serializes filter applications under a last-request-wins policy: results
/// computed for a superseded request are dropped rather than hard-cancelled.
#[derive(Debug, Default)]
pub struct ReportSession {
    generation: AtomicU64,
}

/// Token identifying one filter application within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterToken(u64);

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new filter request, superseding any in-flight one.
    pub fn begin(&self) -> FilterToken {
        FilterToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Accepts a computed result only if its request is still the latest.
    pub fn accept(&self, token: FilterToken, result: ReportResult) -> Option<ReportResult> {
        if self.generation.load(Ordering::SeqCst) == token.0 {
            Some(result)
        } else {
            debug!("discarding report for superseded filter request");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> ReportResult {
        ReportResult {
            income: 0.0,
            expenses: 0.0,
            upcoming_income: 0.0,
            upcoming_expenses: 0.0,
            overdue_income: 0.0,
            overdue_expenses: 0.0,
            balance: 0.0,
            history: Vec::new(),
            upcoming_transactions: Vec::new(),
            overdue_transactions: Vec::new(),
            date_dividers: Vec::new(),
            account_id_filters: Vec::new(),
        }
    }

    #[test]
    fn stale_filter_request_is_discarded() {
        let session = ReportSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(session.accept(first, empty_result()).is_none());
        assert!(session.accept(second, empty_result()).is_some());
    }
}
