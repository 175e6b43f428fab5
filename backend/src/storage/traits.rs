//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer. Every
//! domain service is generic over [`Connection`], so the analytics core
//! never touches a concrete database type.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::budget::Budget;
use crate::domain::models::category::Category;
use crate::domain::models::goal::Goal;
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::domain::models::user::User;

/// Filters for listing transactions. All fields are optional; an empty
/// filter lists everything newest-first.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub category_id: Option<String>,
    pub kind: Option<TransactionKind>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Trait defining the interface for transaction storage operations.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Store a new transaction.
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Retrieve a specific transaction by ID, scoped to its owner.
    async fn get_transaction(&self, user_id: &str, transaction_id: &str)
        -> Result<Option<Transaction>>;

    /// List transactions matching the filter, ordered by date descending
    /// (most recent first).
    async fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;

    /// List every transaction with `start <= date <= end`, in chronological
    /// order. This is the read the analytics core aggregates over.
    async fn list_transactions_in_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>>;

    /// The `limit` most recent transactions regardless of any period,
    /// newest first.
    async fn list_recent_transactions(&self, user_id: &str, limit: u32)
        -> Result<Vec<Transaction>>;

    /// Replace an existing transaction.
    async fn update_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Delete a single transaction. Returns true if it existed.
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool>;

    /// Delete every transaction referencing a category. Returns the number
    /// deleted.
    async fn delete_transactions_for_category(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<u64>;
}

/// Trait defining the interface for category storage operations.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn store_category(&self, category: &Category) -> Result<()>;

    async fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>>;

    /// List all of a user's categories, oldest first.
    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Delete a category. Returns true if it existed.
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool>;
}

/// Trait defining the interface for budget storage operations.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    async fn store_budget(&self, budget: &Budget) -> Result<()>;

    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// Delete a budget. Returns true if it existed.
    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<bool>;

    /// Delete every budget referencing a category. Returns the number
    /// deleted.
    async fn delete_budgets_for_category(&self, user_id: &str, category_id: &str) -> Result<u64>;
}

/// Trait defining the interface for goal storage operations.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn store_goal(&self, goal: &Goal) -> Result<()>;

    async fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>>;

    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>>;

    /// Set `current_amount` on a goal. Returns true if the goal existed.
    async fn update_goal_progress(&self, user_id: &str, goal_id: &str, amount: f64)
        -> Result<bool>;

    /// Delete a goal. Returns true if it existed.
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool>;
}

/// Trait defining the interface for user storage operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn store_user(&self, user: &User) -> Result<()>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Trait defining the interface for storage connections.
///
/// Abstracts away the concrete connection type and provides factory methods
/// for creating repositories, so the domain layer can be handed any backend.
pub trait Connection: Send + Sync + Clone + 'static {
    type TransactionRepository: TransactionStore + Clone;
    type CategoryRepository: CategoryStore + Clone;
    type BudgetRepository: BudgetStore + Clone;
    type GoalRepository: GoalStore + Clone;
    type UserRepository: UserStore + Clone;

    fn create_transaction_repository(&self) -> Self::TransactionRepository;
    fn create_category_repository(&self) -> Self::CategoryRepository;
    fn create_budget_repository(&self) -> Self::BudgetRepository;
    fn create_goal_repository(&self) -> Self::GoalRepository;
    fn create_user_repository(&self) -> Self::UserRepository;
}
