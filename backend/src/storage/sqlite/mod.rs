//! SQLite-backed repositories.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings, so SQL string
//! comparison on the `date` column is chronological comparison.

pub mod budget_repository;
pub mod category_repository;
pub mod goal_repository;
pub mod transaction_repository;
pub mod user_repository;

pub use budget_repository::BudgetRepository;
pub use category_repository::CategoryRepository;
pub use goal_repository::GoalRepository;
pub use transaction_repository::TransactionRepository;
pub use user_repository::UserRepository;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::DbConnection;
use crate::storage::traits::Connection;

/// Encode a timestamp for storage. Millisecond precision with a `Z` suffix
/// keeps every value the same width.
pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a stored timestamp back into UTC.
pub(crate) fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

impl Connection for DbConnection {
    type TransactionRepository = TransactionRepository;
    type CategoryRepository = CategoryRepository;
    type BudgetRepository = BudgetRepository;
    type GoalRepository = GoalRepository;
    type UserRepository = UserRepository;

    fn create_transaction_repository(&self) -> TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    fn create_category_repository(&self) -> CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    fn create_budget_repository(&self) -> BudgetRepository {
        BudgetRepository::new(self.clone())
    }

    fn create_goal_repository(&self) -> GoalRepository {
        GoalRepository::new(self.clone())
    }

    fn create_user_repository(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }
}
