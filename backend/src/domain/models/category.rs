//! Domain model for a category.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default chart color for categories created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";
/// Default icon for categories created without one.
pub const DEFAULT_ICON: &str = "💰";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(CategoryKind::Income),
            "expense" => Some(CategoryKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryKind> for shared::CategoryKind {
    fn from(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Income => shared::CategoryKind::Income,
            CategoryKind::Expense => shared::CategoryKind::Expense,
        }
    }
}

impl From<shared::CategoryKind> for CategoryKind {
    fn from(kind: shared::CategoryKind) -> Self {
        match kind {
            shared::CategoryKind::Income => CategoryKind::Income,
            shared::CategoryKind::Expense => CategoryKind::Expense,
        }
    }
}

impl From<Category> for shared::Category {
    fn from(category: Category) -> Self {
        shared::Category {
            id: category.id,
            user_id: category.user_id,
            name: category.name,
            kind: category.kind.into(),
            color: category.color,
            icon: category.icon,
            created_at: category.created_at,
        }
    }
}
