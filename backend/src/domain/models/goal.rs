//! Domain model for a savings goal.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Goal> for shared::Goal {
    fn from(goal: Goal) -> Self {
        shared::Goal {
            id: goal.id,
            user_id: goal.user_id,
            title: goal.title,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            target_date: goal.target_date,
            description: goal.description,
            created_at: goal.created_at,
        }
    }
}
