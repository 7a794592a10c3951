use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categorises ledger activity for filtering and reporting.
///
/// Transactions without a category carry `category_id: None`; the synthetic
/// "Unspecified" entry shown to users is the `None` id, not a stored category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    /// Display name for the sentinel "no category" entry.
    pub const UNSPECIFIED_NAME: &'static str = "Unspecified";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: None,
            icon: None,
        }
    }
}

/// A selectable category entry: either a stored category or the sentinel
/// "Unspecified" (`id: None`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryChoice {
    pub id: Option<Uuid>,
    pub name: String,
}

impl CategoryChoice {
    pub fn unspecified() -> Self {
        Self {
            id: None,
            name: Category::UNSPECIFIED_NAME.to_string(),
        }
    }
}

impl From<&Category> for CategoryChoice {
    fn from(category: &Category) -> Self {
        Self {
            id: Some(category.id),
            name: category.name.clone(),
        }
    }
}
