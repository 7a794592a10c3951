#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use report_core::currency::{CurrencyCode, RateTable};
use report_core::ledger::{Account, Transaction, TransactionType};
use report_core::report::{ReportFilter, TimePeriod};
use report_core::stores::{InMemoryStore, Settings};

pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
}

/// The worked USD ledger: income 100 on day 1, expense 40 on day 2, and a
/// 20 transfer from A to B on day 3.
pub struct Scenario {
    pub store: InMemoryStore,
    pub rates: RateTable,
    pub account_a: Account,
    pub account_b: Account,
}

pub fn usd_scenario() -> Scenario {
    let mut store = InMemoryStore::new(Settings {
        base_currency: CurrencyCode::new("USD"),
        start_day_of_month: 1,
    });
    let account_a = Account::new("A", CurrencyCode::new("USD"));
    let account_b = Account::new("B", CurrencyCode::new("USD"));
    store.add_account(account_a.clone());
    store.add_account(account_b.clone());
    store.add_transaction(Transaction::income(account_a.id, 100.0, day(1)).with_title("Salary"));
    store.add_transaction(
        Transaction::expense(account_a.id, 40.0, day(2)).with_title("Grocery run"),
    );
    store.add_transaction(Transaction::transfer(
        account_a.id,
        account_b.id,
        20.0,
        day(3),
    ));
    Scenario {
        store,
        rates: RateTable::new(),
        account_a,
        account_b,
    }
}

pub fn march_filter(scenario: &Scenario) -> ReportFilter {
    ReportFilter::new(
        TransactionType::all(),
        TimePeriod::Month {
            year: 2025,
            month: 3,
        },
    )
    .with_accounts([scenario.account_a.clone(), scenario.account_b.clone()])
    .with_categories([None])
}
