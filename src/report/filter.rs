use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::InvalidFilterReason;
use crate::ledger::{Account, TransactionType};

use super::period::{ClosedRange, TimePeriod};

/// User-specified report criteria. Constructed by the caller, validated once
/// per application, and replaced wholesale on each new filter request.
///
/// Empty `accounts` or `categories` lists are valid but match nothing; the
/// report comes back empty rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportFilter {
    pub trn_types: HashSet<TransactionType>,
    pub period: Option<TimePeriod>,
    pub accounts: Vec<Account>,
    /// Selected category ids; `None` selects the sentinel "Unspecified" entry.
    pub categories: Vec<Option<Uuid>>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub include_keywords: Vec<String>,
    pub exclude_keywords: Vec<String>,
}

impl ReportFilter {
    pub fn new(trn_types: impl IntoIterator<Item = TransactionType>, period: TimePeriod) -> Self {
        Self {
            trn_types: trn_types.into_iter().collect(),
            period: Some(period),
            accounts: Vec::new(),
            categories: Vec::new(),
            min_amount: None,
            max_amount: None,
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
        }
    }

    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Account>) -> Self {
        self.accounts = accounts.into_iter().collect();
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Option<Uuid>>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn with_amount_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn with_include_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.include_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_keywords(
        mut self,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.exclude_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the filter and resolves its period into a concrete range.
    pub fn validate(
        &self,
        start_day_of_month: u32,
        now: DateTime<Utc>,
    ) -> Result<ClosedRange, InvalidFilterReason> {
        if self.trn_types.is_empty() {
            return Err(InvalidFilterReason::EmptyTransactionTypes);
        }
        self.period
            .as_ref()
            .and_then(|period| period.resolve(start_day_of_month, now))
            .ok_or(InvalidFilterReason::UnresolvedPeriod)
    }

    pub fn account_ids(&self) -> HashSet<Uuid> {
        self.accounts.iter().map(|account| account.id).collect()
    }

    pub fn category_ids(&self) -> HashSet<Option<Uuid>> {
        self.categories.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march() -> TimePeriod {
        TimePeriod::Month {
            year: 2025,
            month: 3,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_type_set_fails_validation() {
        let filter = ReportFilter::new([], march());
        let err = filter.validate(1, now()).expect_err("must fail");
        assert_eq!(err, InvalidFilterReason::EmptyTransactionTypes);
    }

    #[test]
    fn missing_period_fails_validation() {
        let mut filter = ReportFilter::new(TransactionType::all(), march());
        filter.period = None;
        let err = filter.validate(1, now()).expect_err("must fail");
        assert_eq!(err, InvalidFilterReason::UnresolvedPeriod);
    }

    #[test]
    fn valid_filter_resolves_period() {
        let filter = ReportFilter::new(TransactionType::all(), march());
        let range = filter.validate(1, now()).expect("valid");
        assert!(range.includes(now()));
    }

    #[test]
    fn filter_deserializes_from_json_fixture() {
        let fixture = r#"{
            "trn_types": ["Income", "Expense"],
            "period": { "Month": { "year": 2025, "month": 3 } },
            "accounts": [],
            "categories": [null],
            "min_amount": null,
            "max_amount": 25.0,
            "include_keywords": ["rent"],
            "exclude_keywords": []
        }"#;
        let filter: ReportFilter = serde_json::from_str(fixture).expect("fixture parses");
        assert!(filter.validate(1, now()).is_ok());
        assert_eq!(filter.max_amount, Some(25.0));
        assert_eq!(filter.categories, vec![None]);
    }
}
