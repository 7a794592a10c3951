//! The filter predicate chain: seven independent stages combined as a pure
//! conjunction. Stage order never changes the result, only how much work the
//! later stages see.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::currency::{amount_base_currency, CurrencyCode, ExchangeRates};
use crate::ledger::{Account, Transaction, TransactionType};

use super::filter::ReportFilter;
use super::period::ClosedRange;

/// Immutable inputs shared by every predicate stage.
pub struct FilterContext<'a> {
    pub filter: &'a ReportFilter,
    pub range: ClosedRange,
    pub base_currency: &'a CurrencyCode,
    /// Full account list, used for currency lookups. Filter scope comes from
    /// `account_ids`.
    pub accounts: &'a [Account],
    pub rates: &'a dyn ExchangeRates,
    account_ids: HashSet<Uuid>,
    category_ids: HashSet<Option<Uuid>>,
}

impl<'a> FilterContext<'a> {
    pub fn new(
        filter: &'a ReportFilter,
        range: ClosedRange,
        base_currency: &'a CurrencyCode,
        accounts: &'a [Account],
        rates: &'a dyn ExchangeRates,
    ) -> Self {
        Self {
            account_ids: filter.account_ids(),
            category_ids: filter.category_ids(),
            filter,
            range,
            base_currency,
            accounts,
            rates,
        }
    }

    pub fn account_ids(&self) -> &HashSet<Uuid> {
        &self.account_ids
    }
}

pub type Stage = fn(&FilterContext, &Transaction) -> bool;

/// All stages, in the order they are documented. [`filter_transactions`]
/// applies them as written; any permutation yields the same set.
pub const STAGES: [Stage; 7] = [
    by_type,
    by_time,
    by_account,
    by_category,
    by_amount,
    by_include_keywords,
    by_exclude_keywords,
];

/// Applies the full predicate chain, keeping transactions that pass every
/// stage.
pub fn filter_transactions(ledger: &[Transaction], ctx: &FilterContext) -> Vec<Transaction> {
    let filtered = apply_stages(ledger, ctx, &STAGES);
    debug!(
        total = ledger.len(),
        kept = filtered.len(),
        "filtered transactions"
    );
    filtered
}

/// Applies an explicit stage list. Exposed so the conjunction's
/// order-independence stays observable.
pub fn apply_stages(
    ledger: &[Transaction],
    ctx: &FilterContext,
    stages: &[Stage],
) -> Vec<Transaction> {
    ledger
        .iter()
        .filter(|txn| stages.iter().all(|stage| stage(ctx, txn)))
        .cloned()
        .collect()
}

fn by_type(ctx: &FilterContext, txn: &Transaction) -> bool {
    ctx.filter.trn_types.contains(&txn.trn_type)
}

/// Passes when either the settled time or the due date falls in the range.
fn by_time(ctx: &FilterContext, txn: &Transaction) -> bool {
    let settled = txn.date_time.map_or(false, |at| ctx.range.includes(at));
    let due = txn.due_date.map_or(false, |at| ctx.range.includes(at));
    settled || due
}

/// Outgoing match on `account_id`, or incoming match on a transfer's
/// `to_account_id`. An empty account scope matches nothing.
fn by_account(ctx: &FilterContext, txn: &Transaction) -> bool {
    ctx.account_ids.contains(&txn.account_id)
        || txn
            .to_account_id
            .map_or(false, |to| ctx.account_ids.contains(&to))
}

/// Transfers bypass category filtering unconditionally; everything else must
/// match an entry in the category scope, with `None` standing for the
/// sentinel "Unspecified" category.
fn by_category(ctx: &FilterContext, txn: &Transaction) -> bool {
    if txn.trn_type == TransactionType::Transfer {
        return true;
    }
    ctx.category_ids.contains(&txn.category_id)
}

/// Inclusive bounds on the base-currency amount; an absent bound is
/// unbounded on that side. A transaction whose amount cannot be converted is
/// compared as zero, matching the aggregation policy.
fn by_amount(ctx: &FilterContext, txn: &Transaction) -> bool {
    let (min, max) = (ctx.filter.min_amount, ctx.filter.max_amount);
    if min.is_none() && max.is_none() {
        return true;
    }
    let amount = amount_base_currency(txn, ctx.base_currency, ctx.accounts, ctx.rates)
        .unwrap_or_default();
    min.map_or(true, |bound| amount >= bound) && max.map_or(true, |bound| amount <= bound)
}

fn by_include_keywords(ctx: &FilterContext, txn: &Transaction) -> bool {
    if ctx.filter.include_keywords.is_empty() {
        return true;
    }
    ctx.filter
        .include_keywords
        .iter()
        .any(|keyword| matches_keyword(txn, keyword))
}

fn by_exclude_keywords(ctx: &FilterContext, txn: &Transaction) -> bool {
    if ctx.filter.exclude_keywords.is_empty() {
        return true;
    }
    !ctx.filter
        .exclude_keywords
        .iter()
        .any(|keyword| matches_keyword(txn, keyword))
}

/// Case-insensitive substring match against the title or the description.
/// Each field is tested on its own; a keyword never matches across the
/// boundary between them.
fn matches_keyword(txn: &Transaction, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let field_contains = |field: &Option<String>| {
        field
            .as_ref()
            .map_or(false, |text| text.to_lowercase().contains(&keyword))
    };
    field_contains(&txn.title) || field_contains(&txn.description)
}
