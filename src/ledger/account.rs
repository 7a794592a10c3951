use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyCode;

/// A financial account that owns transactions. Accounts are read-only for the
/// duration of a report computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>, currency: CurrencyCode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            currency,
            color: None,
            icon: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
