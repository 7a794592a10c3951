//! CSV export of a transaction list through any `io::Write` sink. Rows
//! mirror the `Transaction` record with account and category names resolved
//! for readability.

use std::io::Write;

use crate::errors::ExportError;
use crate::ledger::{Account, Category, Transaction, TransactionType};

const HEADERS: [&str; 12] = [
    "id",
    "type",
    "amount",
    "currency",
    "account",
    "to_account",
    "to_amount",
    "category",
    "title",
    "description",
    "date_time",
    "due_date",
];

fn account_entry<'a>(accounts: &'a [Account], id: uuid::Uuid) -> Option<&'a Account> {
    accounts.iter().find(|account| account.id == id)
}

fn type_label(trn_type: TransactionType) -> &'static str {
    match trn_type {
        TransactionType::Income => "income",
        TransactionType::Expense => "expense",
        TransactionType::Transfer => "transfer",
    }
}

/// Writes `transactions` as CSV rows. Sink failures surface as
/// [`ExportError`]; the caller's report state is unaffected.
pub fn write_csv<W: Write>(
    transactions: &[Transaction],
    accounts: &[Account],
    categories: &[Category],
    sink: W,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(HEADERS)?;
    for txn in transactions {
        let account = account_entry(accounts, txn.account_id);
        let to_account = txn.to_account_id.and_then(|id| account_entry(accounts, id));
        let category = txn
            .category_id
            .and_then(|id| categories.iter().find(|category| category.id == id));
        writer.write_record([
            txn.id.to_string(),
            type_label(txn.trn_type).to_string(),
            format!("{:.2}", txn.amount),
            account
                .map(|a| a.currency.as_str().to_string())
                .unwrap_or_default(),
            account.map(|a| a.name.clone()).unwrap_or_default(),
            to_account.map(|a| a.name.clone()).unwrap_or_default(),
            txn.to_amount
                .map(|amount| format!("{amount:.2}"))
                .unwrap_or_default(),
            category
                .map(|c| c.name.clone())
                .unwrap_or_else(|| Category::UNSPECIFIED_NAME.to_string()),
            txn.title.clone().unwrap_or_default(),
            txn.description.clone().unwrap_or_default(),
            txn.date_time.map(|at| at.to_rfc3339()).unwrap_or_default(),
            txn.due_date.map(|at| at.to_rfc3339()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
