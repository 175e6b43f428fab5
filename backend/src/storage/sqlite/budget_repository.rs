use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_timestamp, encode_timestamp};
use crate::db::DbConnection;
use crate::domain::models::budget::Budget;
use crate::storage::traits::BudgetStore;

/// SQLite-based budget repository.
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Budget> {
        let start_date: String = row.get("start_date");
        let end_date: String = row.get("end_date");
        let created_at: String = row.get("created_at");

        Ok(Budget {
            id: row.get("id"),
            user_id: row.get("user_id"),
            category_id: row.get("category_id"),
            amount: row.get("amount"),
            period: row.get("period"),
            start_date: decode_timestamp(&start_date)?,
            end_date: decode_timestamp(&end_date)?,
            created_at: decode_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn store_budget(&self, budget: &Budget) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, user_id, category_id, amount, period, start_date, end_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&budget.id)
        .bind(&budget.user_id)
        .bind(&budget.category_id)
        .bind(budget.amount)
        .bind(&budget.period)
        .bind(encode_timestamp(budget.start_date))
        .bind(encode_timestamp(budget.end_date))
        .bind(encode_timestamp(budget.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        let rows = sqlx::query("SELECT * FROM budgets WHERE user_id = ? ORDER BY created_at ASC")
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ? AND user_id = ?")
            .bind(budget_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_budgets_for_category(&self, user_id: &str, category_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM budgets WHERE user_id = ? AND category_id = ?")
            .bind(user_id)
            .bind(category_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
