//! Category management.

use std::sync::Arc;

use chrono::Utc;
use shared::CreateCategoryRequest;
use tracing::info;
use uuid::Uuid;

use super::models::category::{Category, DEFAULT_COLOR, DEFAULT_ICON};
use super::DomainError;
use crate::storage::{BudgetStore, CategoryStore, Connection, TransactionStore};

#[derive(Clone)]
pub struct CategoryService<C: Connection> {
    category_repository: C::CategoryRepository,
    transaction_repository: C::TransactionRepository,
    budget_repository: C::BudgetRepository,
}

impl<C: Connection> CategoryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            category_repository: connection.create_category_repository(),
            transaction_repository: connection.create_transaction_repository(),
            budget_repository: connection.create_budget_repository(),
        }
    }

    pub async fn list_categories(&self, user_id: &str) -> Result<Vec<shared::Category>, DomainError> {
        let categories = self.category_repository.list_categories(user_id).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn create_category(
        &self,
        user_id: &str,
        request: CreateCategoryRequest,
    ) -> Result<shared::Category, DomainError> {
        if request.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Category name must not be empty".to_string(),
            ));
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: request.name.trim().to_string(),
            kind: request.kind.into(),
            color: request.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: request.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: Utc::now(),
        };
        self.category_repository.store_category(&category).await?;

        Ok(category.into())
    }

    /// Delete a category along with its transactions and budgets.
    pub async fn delete_category(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<(), DomainError> {
        if !self
            .category_repository
            .delete_category(user_id, category_id)
            .await?
        {
            return Err(DomainError::NotFound("Category"));
        }

        let transactions_deleted = self
            .transaction_repository
            .delete_transactions_for_category(user_id, category_id)
            .await?;
        let budgets_deleted = self
            .budget_repository
            .delete_budgets_for_category(user_id, category_id)
            .await?;

        info!(
            "Deleted category {} with {} transactions and {} budgets",
            category_id, transactions_deleted, budgets_deleted
        );
        Ok(())
    }
}
