//! Narrow collaborator contracts the report engine consumes, plus in-memory
//! implementations backed by plain vectors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyCode;
use crate::ledger::{Account, Category, Transaction};
use crate::report::period::ClosedRange;

/// Per-user settings the report engine reads once per application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub base_currency: CurrencyCode,
    /// Day of month a budgeting period starts on (1-based, clamped to the
    /// month's length when resolving).
    pub start_day_of_month: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: CurrencyCode::default(),
            start_day_of_month: 1,
        }
    }
}

/// Read access to the transaction ledger.
pub trait LedgerStore {
    fn find_all(&self) -> Vec<Transaction>;
    /// Settled transactions of one owning account inside `range`.
    fn find_all_by_account_and_between(
        &self,
        account_id: Uuid,
        range: &ClosedRange,
    ) -> Vec<Transaction>;
    /// Settled transfers into one receiving account inside `range`.
    fn find_all_to_account_and_between(
        &self,
        to_account_id: Uuid,
        range: &ClosedRange,
    ) -> Vec<Transaction>;
}

pub trait AccountStore {
    fn find_all(&self) -> Vec<Account>;
}

pub trait CategoryStore {
    fn find_all(&self) -> Vec<Category>;
}

pub trait SettingsStore {
    fn first(&self) -> Settings;
}

/// Vector-backed store implementing every collaborator contract. Serves as
/// the default backing for tests and embedders without a persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    pub transactions: Vec<Transaction>,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub settings: Settings,
}

impl InMemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }
}

impl LedgerStore for InMemoryStore {
    fn find_all(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    fn find_all_by_account_and_between(
        &self,
        account_id: Uuid,
        range: &ClosedRange,
    ) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.account_id == account_id)
            .filter(|txn| txn.date_time.map_or(false, |at| range.includes(at)))
            .cloned()
            .collect()
    }

    fn find_all_to_account_and_between(
        &self,
        to_account_id: Uuid,
        range: &ClosedRange,
    ) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.to_account_id == Some(to_account_id))
            .filter(|txn| txn.date_time.map_or(false, |at| range.includes(at)))
            .cloned()
            .collect()
    }
}

impl AccountStore for InMemoryStore {
    fn find_all(&self) -> Vec<Account> {
        self.accounts.clone()
    }
}

impl CategoryStore for InMemoryStore {
    fn find_all(&self) -> Vec<Category> {
        self.categories.clone()
    }
}

impl SettingsStore for InMemoryStore {
    fn first(&self) -> Settings {
        self.settings.clone()
    }
}
