//! Ledger domain records consumed by the report pipeline.

pub mod account;
pub mod category;
pub mod transaction;

pub use account::Account;
pub use category::{Category, CategoryChoice};
pub use transaction::{Transaction, TransactionType};
