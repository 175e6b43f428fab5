//! Budget management.

use std::sync::Arc;

use chrono::Utc;
use shared::CreateBudgetRequest;
use uuid::Uuid;

use super::models::budget::Budget;
use super::DomainError;
use crate::storage::{BudgetStore, CategoryStore, Connection};

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
    category_repository: C::CategoryRepository,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            budget_repository: connection.create_budget_repository(),
            category_repository: connection.create_category_repository(),
        }
    }

    pub async fn list_budgets(&self, user_id: &str) -> Result<Vec<shared::Budget>, DomainError> {
        let budgets = self.budget_repository.list_budgets(user_id).await?;
        Ok(budgets.into_iter().map(Into::into).collect())
    }

    pub async fn create_budget(
        &self,
        user_id: &str,
        request: CreateBudgetRequest,
    ) -> Result<shared::Budget, DomainError> {
        if !request.amount.is_finite() || request.amount < 0.0 {
            return Err(DomainError::Validation(
                "Amount must be a non-negative number".to_string(),
            ));
        }
        self.category_repository
            .get_category(user_id, &request.category_id)
            .await?
            .ok_or(DomainError::NotFound("Category"))?;

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category_id: request.category_id,
            amount: request.amount,
            period: request.period,
            start_date: request.start_date,
            end_date: request.end_date,
            created_at: Utc::now(),
        };
        self.budget_repository.store_budget(&budget).await?;

        Ok(budget.into())
    }

    pub async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<(), DomainError> {
        if !self.budget_repository.delete_budget(user_id, budget_id).await? {
            return Err(DomainError::NotFound("Budget"));
        }
        Ok(())
    }
}
