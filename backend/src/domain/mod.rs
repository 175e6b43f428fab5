//! Domain layer: models, the analytics core, and the services the REST
//! layer calls into. Services are generic over [`crate::storage::Connection`]
//! so storage stays swappable and tests stay cheap.

pub mod analytics;
pub mod analytics_service;
pub mod budget_service;
pub mod category_service;
pub mod goal_service;
pub mod models;
pub mod period;
pub mod transaction_service;
pub mod user_service;

pub use analytics_service::AnalyticsService;
pub use budget_service::BudgetService;
pub use category_service::CategoryService;
pub use goal_service::GoalService;
pub use transaction_service::TransactionService;
pub use user_service::UserService;

use thiserror::Error;

/// Errors a domain service can hand back to the REST layer.
///
/// The analytics core deliberately contributes nothing here beyond storage
/// failures: unknown period tags and dangling category references degrade
/// instead of erroring.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
