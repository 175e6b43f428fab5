//! Savings goal management.

use std::sync::Arc;

use chrono::Utc;
use shared::{CreateGoalRequest, UpdateGoalProgressRequest};
use uuid::Uuid;

use super::models::goal::Goal;
use super::DomainError;
use crate::storage::{Connection, GoalStore};

#[derive(Clone)]
pub struct GoalService<C: Connection> {
    goal_repository: C::GoalRepository,
}

impl<C: Connection> GoalService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            goal_repository: connection.create_goal_repository(),
        }
    }

    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<shared::Goal>, DomainError> {
        let goals = self.goal_repository.list_goals(user_id).await?;
        Ok(goals.into_iter().map(Into::into).collect())
    }

    pub async fn create_goal(
        &self,
        user_id: &str,
        request: CreateGoalRequest,
    ) -> Result<shared::Goal, DomainError> {
        if request.title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Goal title must not be empty".to_string(),
            ));
        }
        if !request.target_amount.is_finite() || request.target_amount < 0.0 {
            return Err(DomainError::Validation(
                "Target amount must be a non-negative number".to_string(),
            ));
        }

        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: request.title.trim().to_string(),
            target_amount: request.target_amount,
            current_amount: 0.0,
            target_date: request.target_date,
            description: request.description,
            created_at: Utc::now(),
        };
        self.goal_repository.store_goal(&goal).await?;

        Ok(goal.into())
    }

    pub async fn update_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        request: UpdateGoalProgressRequest,
    ) -> Result<shared::Goal, DomainError> {
        if !request.amount.is_finite() || request.amount < 0.0 {
            return Err(DomainError::Validation(
                "Amount must be a non-negative number".to_string(),
            ));
        }

        if !self
            .goal_repository
            .update_goal_progress(user_id, goal_id, request.amount)
            .await?
        {
            return Err(DomainError::NotFound("Goal"));
        }

        let goal = self
            .goal_repository
            .get_goal(user_id, goal_id)
            .await?
            .ok_or(DomainError::NotFound("Goal"))?;
        Ok(goal.into())
    }

    pub async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<(), DomainError> {
        if !self.goal_repository.delete_goal(user_id, goal_id).await? {
            return Err(DomainError::NotFound("Goal"));
        }
        Ok(())
    }
}
