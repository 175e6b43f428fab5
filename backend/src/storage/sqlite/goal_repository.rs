use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_timestamp, encode_timestamp};
use crate::db::DbConnection;
use crate::domain::models::goal::Goal;
use crate::storage::traits::GoalStore;

/// SQLite-based goal repository.
#[derive(Clone)]
pub struct GoalRepository {
    db: DbConnection,
}

impl GoalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Goal> {
        let target_date: String = row.get("target_date");
        let created_at: String = row.get("created_at");

        Ok(Goal {
            id: row.get("id"),
            user_id: row.get("user_id"),
            title: row.get("title"),
            target_amount: row.get("target_amount"),
            current_amount: row.get("current_amount"),
            target_date: decode_timestamp(&target_date)?,
            description: row.get("description"),
            created_at: decode_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl GoalStore for GoalRepository {
    async fn store_goal(&self, goal: &Goal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO goals (id, user_id, title, target_amount, current_amount, target_date, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&goal.id)
        .bind(&goal.user_id)
        .bind(&goal.title)
        .bind(goal.target_amount)
        .bind(goal.current_amount)
        .bind(encode_timestamp(goal.target_date))
        .bind(&goal.description)
        .bind(encode_timestamp(goal.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let row = sqlx::query("SELECT * FROM goals WHERE id = ? AND user_id = ?")
            .bind(goal_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        let rows = sqlx::query("SELECT * FROM goals WHERE user_id = ? ORDER BY created_at ASC")
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: f64,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE goals SET current_amount = ? WHERE id = ? AND user_id = ?")
            .bind(amount)
            .bind(goal_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = ? AND user_id = ?")
            .bind(goal_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
