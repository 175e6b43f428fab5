//! Domain model for a transaction.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Storage and wire spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Parse the lowercase spelling; anything else is None.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Always non-negative; direction is carried by `kind`.
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionKind> for shared::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => shared::TransactionKind::Income,
            TransactionKind::Expense => shared::TransactionKind::Expense,
        }
    }
}

impl From<shared::TransactionKind> for TransactionKind {
    fn from(kind: shared::TransactionKind) -> Self {
        match kind {
            shared::TransactionKind::Income => TransactionKind::Income,
            shared::TransactionKind::Expense => TransactionKind::Expense,
        }
    }
}

impl From<Transaction> for shared::Transaction {
    fn from(tx: Transaction) -> Self {
        shared::Transaction {
            id: tx.id,
            user_id: tx.user_id,
            amount: tx.amount,
            kind: tx.kind.into(),
            category_id: tx.category_id,
            description: tx.description,
            date: tx.date,
            is_recurring: tx.is_recurring,
            recurring_frequency: tx.recurring_frequency,
            created_at: tx.created_at,
        }
    }
}
