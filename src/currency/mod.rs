//! Currency codes, exchange-rate lookup, and base-currency normalization.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConversionError;
use crate::ledger::{Account, Transaction};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exchange-rate lookup with a narrow contract: a multiplicative rate from
/// one currency to another, or `None` when the pair is unavailable.
pub trait ExchangeRates {
    fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64>;
}

/// In-memory rate table. Falls back to the inverse pair when only the
/// opposite direction is recorded.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: &CurrencyCode, to: &CurrencyCode, rate: f64) {
        self.rates
            .insert((from.0.clone(), to.0.clone()), rate);
    }
}

impl ExchangeRates for RateTable {
    fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        if let Some(rate) = self.rates.get(&(from.0.clone(), to.0.clone())) {
            return Some(*rate);
        }
        self.rates
            .get(&(to.0.clone(), from.0.clone()))
            .map(|inverse| {
                if inverse.abs() < f64::EPSILON {
                    0.0
                } else {
                    1.0 / inverse
                }
            })
    }
}

fn find_account(accounts: &[Account], id: uuid::Uuid) -> Result<&Account, ConversionError> {
    accounts
        .iter()
        .find(|account| account.id == id)
        .ok_or(ConversionError::UnknownAccount(id))
}

fn convert(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    rates: &dyn ExchangeRates,
) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(amount);
    }
    let rate = rates
        .rate(from, to)
        .ok_or_else(|| ConversionError::MissingRate {
            from: from.0.clone(),
            to: to.0.clone(),
        })?;
    debug!(%from, %to, rate, "converted amount to base currency");
    Ok(amount * rate)
}

/// Outgoing-side amount of `txn` expressed in `base`, using the owning
/// account's currency.
pub fn amount_base_currency(
    txn: &Transaction,
    base: &CurrencyCode,
    accounts: &[Account],
    rates: &dyn ExchangeRates,
) -> Result<f64, ConversionError> {
    let account = find_account(accounts, txn.account_id)?;
    convert(txn.amount, &account.currency, base, rates)
}

/// Receiving-side amount of a transfer expressed in `base`, using the
/// destination account's currency.
pub fn to_amount_base_currency(
    txn: &Transaction,
    base: &CurrencyCode,
    accounts: &[Account],
    rates: &dyn ExchangeRates,
) -> Result<f64, ConversionError> {
    let to_id = txn
        .to_account_id
        .ok_or(ConversionError::MissingToAccount(txn.id))?;
    let account = find_account(accounts, to_id)?;
    convert(txn.received_amount(), &account.currency, base, rates)
}
