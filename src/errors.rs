use thiserror::Error;
use uuid::Uuid;

/// Error type that captures report computation and export failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] InvalidFilterReason),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Why a report filter failed validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidFilterReason {
    #[error("transaction type set is empty")]
    EmptyTransactionTypes,
    #[error("time period is missing or cannot be resolved")]
    UnresolvedPeriod,
}

/// Currency normalization failure for a single transaction.
///
/// Aggregation treats this as a zero contribution and keeps going; it never
/// aborts a whole report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("account {0} not found")]
    UnknownAccount(Uuid),
    #[error("transaction {0} has no receiving account")]
    MissingToAccount(Uuid),
    #[error("no exchange rate from {from} to {to}")]
    MissingRate { from: String, to: String },
}

/// CSV export sink failure. Report state is unaffected.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
