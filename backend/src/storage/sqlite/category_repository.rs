use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_timestamp, encode_timestamp};
use crate::db::DbConnection;
use crate::domain::models::category::{Category, CategoryKind};
use crate::storage::traits::CategoryStore;

/// SQLite-based category repository.
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Category> {
        let kind_raw: String = row.get("kind");
        let kind = CategoryKind::parse(&kind_raw)
            .ok_or_else(|| anyhow!("unknown category kind in storage: {kind_raw}"))?;
        let created_at: String = row.get("created_at");

        Ok(Category {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            kind,
            color: row.get("color"),
            icon: row.get("icon"),
            created_at: decode_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn store_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, user_id, name, kind, color, icon, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category.id)
        .bind(&category.user_id)
        .bind(&category.name)
        .bind(category.kind.as_str())
        .bind(&category.color)
        .bind(&category.icon)
        .bind(encode_timestamp(category.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT * FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let rows =
            sqlx::query("SELECT * FROM categories WHERE user_id = ? ORDER BY created_at ASC, id ASC")
                .bind(user_id)
                .fetch_all(self.db.pool())
                .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_category_round_trip_and_scoping() {
        let db = DbConnection::init_test().await.expect("test database");
        let repo = CategoryRepository::new(db);

        let category = Category {
            id: "c1".to_string(),
            user_id: "u1".to_string(),
            name: "Groceries".to_string(),
            kind: CategoryKind::Expense,
            color: "#84CC16".to_string(),
            icon: "🛍️".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
        };
        repo.store_category(&category).await.unwrap();

        assert_eq!(
            repo.get_category("u1", "c1").await.unwrap().unwrap(),
            category
        );
        assert!(repo.get_category("u2", "c1").await.unwrap().is_none());

        assert!(repo.delete_category("u1", "c1").await.unwrap());
        assert!(!repo.delete_category("u1", "c1").await.unwrap());
    }
}
