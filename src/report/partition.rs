//! Splits a filtered transaction set into history, upcoming, and overdue.
//!
//! A transaction carrying both a settled time and a due date lands in history
//! and in one of upcoming/overdue at the same time; the settled amount and
//! the pending obligation are tracked independently.

use chrono::{DateTime, NaiveDate, Utc};

use crate::ledger::Transaction;

/// The three time partitions of a filtered set, each in its display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    /// Settled transactions, newest first.
    pub history: Vec<Transaction>,
    /// Due strictly after the reference instant, soonest first.
    pub upcoming: Vec<Transaction>,
    /// Due at or before the reference instant, most recently due first.
    pub overdue: Vec<Transaction>,
}

/// Partitions `filtered` around the reference instant `now`. A due date equal
/// to `now` is overdue, not upcoming.
pub fn partition(filtered: &[Transaction], now: DateTime<Utc>) -> Partitions {
    let mut parts = Partitions::default();
    for txn in filtered {
        if txn.date_time.is_some() {
            parts.history.push(txn.clone());
        }
        if let Some(due) = txn.due_date {
            if due > now {
                parts.upcoming.push(txn.clone());
            } else {
                parts.overdue.push(txn.clone());
            }
        }
    }
    parts.history.sort_by(|a, b| b.date_time.cmp(&a.date_time));
    parts.upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    parts.overdue.sort_by(|a, b| b.due_date.cmp(&a.due_date));
    parts
}

/// Distinct calendar dates of the history partition, newest first. Used by
/// callers to render date dividers between history rows.
pub fn date_dividers(history: &[Transaction]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = history
        .iter()
        .filter_map(|txn| txn.date_time.map(|at| at.date_naive()))
        .collect();
    dates.dedup();
    dates
}
