use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger movement a transaction records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn all() -> [TransactionType; 3] {
        [
            TransactionType::Income,
            TransactionType::Expense,
            TransactionType::Transfer,
        ]
    }
}

/// Immutable record of a single ledger entry.
///
/// `date_time` marks when the transaction actually occurred; `due_date` marks
/// when a planned payment falls due. Both may be present on a partially
/// settled planned payment, in which case the transaction shows up in the
/// history partition and in upcoming/overdue at the same time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub trn_type: TransactionType,
    /// Non-negative amount on the outgoing side, in the owning account's currency.
    pub amount: f64,
    pub account_id: Uuid,
    /// Receiving account, present iff `trn_type` is `Transfer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<Uuid>,
    /// Amount received on the other side of a transfer, when it differs from
    /// `amount` (cross-currency transfers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_amount: Option<f64>,
    /// `None` means the transaction has no category ("unspecified").
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn income(account_id: Uuid, amount: f64, date_time: DateTime<Utc>) -> Self {
        Self::new(TransactionType::Income, account_id, amount, Some(date_time))
    }

    pub fn expense(account_id: Uuid, amount: f64, date_time: DateTime<Utc>) -> Self {
        Self::new(TransactionType::Expense, account_id, amount, Some(date_time))
    }

    pub fn transfer(
        account_id: Uuid,
        to_account_id: Uuid,
        amount: f64,
        date_time: DateTime<Utc>,
    ) -> Self {
        let mut txn = Self::new(TransactionType::Transfer, account_id, amount, Some(date_time));
        txn.to_account_id = Some(to_account_id);
        txn
    }

    fn new(
        trn_type: TransactionType,
        account_id: Uuid,
        amount: f64,
        date_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trn_type,
            amount,
            account_id,
            to_account_id: None,
            to_amount: None,
            category_id: None,
            title: None,
            description: None,
            date_time,
            due_date: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_to_amount(mut self, to_amount: f64) -> Self {
        self.to_amount = Some(to_amount);
        self
    }

    /// Turns the transaction into a planned payment due at `due_date`,
    /// clearing any settled time.
    pub fn planned(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self.date_time = None;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Amount arriving on the receiving side of a transfer.
    pub fn received_amount(&self) -> f64 {
        self.to_amount.unwrap_or(self.amount)
    }

    pub fn is_settled(&self) -> bool {
        self.date_time.is_some()
    }

    pub fn is_planned(&self) -> bool {
        self.due_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn transfer_defaults_received_amount_to_sent_amount() {
        let when = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let txn = Transaction::transfer(Uuid::new_v4(), Uuid::new_v4(), 50.0, when);
        assert!((txn.received_amount() - 50.0).abs() < f64::EPSILON);
        let txn = txn.with_to_amount(45.5);
        assert!((txn.received_amount() - 45.5).abs() < f64::EPSILON);
    }

    #[test]
    fn planned_clears_settled_time() {
        let when = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let txn = Transaction::expense(Uuid::new_v4(), 10.0, when).planned(when);
        assert!(txn.is_planned());
        assert!(!txn.is_settled());
    }
}
