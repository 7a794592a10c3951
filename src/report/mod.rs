//! The report pipeline: filter validation, the predicate chain, time
//! partitioning, base-currency aggregation, and final assembly.

pub mod aggregate;
pub mod engine;
pub mod export;
pub mod filter;
pub mod partition;
pub mod period;
pub mod predicates;

pub use aggregate::Totals;
pub use engine::{FilterToken, ReportEngine, ReportResult, ReportSession};
pub use filter::ReportFilter;
pub use partition::Partitions;
pub use period::{ClosedRange, TimePeriod};
pub use predicates::{filter_transactions, FilterContext};
