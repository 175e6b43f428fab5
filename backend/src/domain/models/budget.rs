//! Domain model for a budget.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: f64,
    /// "weekly" | "monthly" | "yearly".
    pub period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Budget> for shared::Budget {
    fn from(budget: Budget) -> Self {
        shared::Budget {
            id: budget.id,
            user_id: budget.user_id,
            category_id: budget.category_id,
            amount: budget.amount,
            period: budget.period,
            start_date: budget.start_date,
            end_date: budget.end_date,
            created_at: budget.created_at,
        }
    }
}
