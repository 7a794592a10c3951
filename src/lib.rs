#![doc(test(attr(deny(warnings))))]

//! Report Core filters a transaction ledger, normalizes amounts into a base
//! currency, and assembles income/expense/balance reports split into
//! historical, upcoming, and overdue partitions.

pub mod currency;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod stores;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("report_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Report Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
