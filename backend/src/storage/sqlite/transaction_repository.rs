use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{decode_timestamp, encode_timestamp};
use crate::db::DbConnection;
use crate::domain::models::transaction::{Transaction, TransactionKind};
use crate::storage::traits::{TransactionFilter, TransactionStore};

// Original API default when no limit is supplied.
const DEFAULT_LIST_LIMIT: u32 = 100;

/// SQLite-based transaction repository.
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Transaction> {
        let kind_raw: String = row.get("kind");
        let kind = TransactionKind::parse(&kind_raw)
            .ok_or_else(|| anyhow!("unknown transaction kind in storage: {kind_raw}"))?;
        let date: String = row.get("date");
        let created_at: String = row.get("created_at");

        Ok(Transaction {
            id: row.get("id"),
            user_id: row.get("user_id"),
            amount: row.get("amount"),
            kind,
            category_id: row.get("category_id"),
            description: row.get("description"),
            date: decode_timestamp(&date)?,
            is_recurring: row.get::<i64, _>("is_recurring") != 0,
            recurring_frequency: row.get("recurring_frequency"),
            created_at: decode_timestamp(&created_at)?,
        })
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions
                (id, user_id, amount, kind, category_id, description, date,
                 is_recurring, recurring_frequency, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .bind(transaction.amount)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category_id)
        .bind(&transaction.description)
        .bind(encode_timestamp(transaction.date))
        .bind(transaction.is_recurring as i64)
        .bind(&transaction.recurring_frequency)
        .bind(encode_timestamp(transaction.created_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let row = sqlx::query("SELECT * FROM transactions WHERE id = ? AND user_id = ?")
            .bind(transaction_id)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let mut sql = String::from("SELECT * FROM transactions WHERE user_id = ?");
        if filter.category_id.is_some() {
            sql.push_str(" AND category_id = ?");
        }
        if filter.kind.is_some() {
            sql.push_str(" AND kind = ?");
        }
        if filter.start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if filter.end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql).bind(user_id);
        if let Some(category_id) = &filter.category_id {
            query = query.bind(category_id);
        }
        if let Some(kind) = filter.kind {
            query = query.bind(kind.as_str());
        }
        if let Some(start) = filter.start_date {
            query = query.bind(encode_timestamp(start));
        }
        if let Some(end) = filter.end_date {
            query = query.bind(encode_timestamp(end));
        }
        query = query
            .bind(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT) as i64)
            .bind(filter.skip.unwrap_or(0) as i64);

        let rows = query.fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::map_row).collect()
    }

    async fn list_transactions_in_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            "SELECT * FROM transactions WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date ASC",
        )
        .bind(user_id)
        .bind(encode_timestamp(start))
        .bind(encode_timestamp(end))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn list_recent_transactions(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            "SELECT * FROM transactions WHERE user_id = ? ORDER BY date DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET amount = ?, kind = ?, category_id = ?, description = ?, date = ?,
                is_recurring = ?, recurring_frequency = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(transaction.amount)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category_id)
        .bind(&transaction.description)
        .bind(encode_timestamp(transaction.date))
        .bind(transaction.is_recurring as i64)
        .bind(&transaction.recurring_frequency)
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ? AND user_id = ?")
            .bind(transaction_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_transactions_for_category(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM transactions WHERE user_id = ? AND category_id = ?")
            .bind(user_id)
            .bind(category_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_transaction(id: &str, user_id: &str, date: DateTime<Utc>, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: user_id.to_string(),
            amount,
            kind: TransactionKind::Expense,
            category_id: "cat-1".to_string(),
            description: format!("tx {id}"),
            date,
            is_recurring: false,
            recurring_frequency: None,
            created_at: date,
        }
    }

    async fn setup() -> TransactionRepository {
        let db = DbConnection::init_test().await.expect("test database");
        TransactionRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_get_round_trip() {
        let repo = setup().await;
        let tx = make_transaction(
            "t1",
            "u1",
            Utc.with_ymd_and_hms(2026, 6, 9, 8, 30, 0).unwrap(),
            12.5,
        );

        repo.store_transaction(&tx).await.unwrap();

        let loaded = repo.get_transaction("u1", "t1").await.unwrap().unwrap();
        assert_eq!(loaded, tx);

        // Scoped to the owner
        assert!(repo.get_transaction("u2", "t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_range_query_is_inclusive_and_chronological() {
        let repo = setup().await;
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 30, 0, 0, 0).unwrap();

        repo.store_transaction(&make_transaction("before", "u1", start - chrono::Duration::seconds(1), 1.0))
            .await
            .unwrap();
        repo.store_transaction(&make_transaction("at-start", "u1", start, 2.0))
            .await
            .unwrap();
        repo.store_transaction(&make_transaction("mid", "u1", start + chrono::Duration::days(10), 3.0))
            .await
            .unwrap();
        repo.store_transaction(&make_transaction("at-end", "u1", end, 4.0))
            .await
            .unwrap();
        repo.store_transaction(&make_transaction("after", "u1", end + chrono::Duration::seconds(1), 5.0))
            .await
            .unwrap();

        let in_range = repo.list_transactions_in_range("u1", start, end).await.unwrap();
        let ids: Vec<&str> = in_range.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["at-start", "mid", "at-end"]);
    }

    #[tokio::test]
    async fn test_recent_transactions_newest_first_with_limit() {
        let repo = setup().await;
        for day in 1..=7 {
            let date = Utc.with_ymd_and_hms(2026, 6, day, 12, 0, 0).unwrap();
            repo.store_transaction(&make_transaction(&format!("t{day}"), "u1", date, 1.0))
                .await
                .unwrap();
        }

        let recent = repo.list_recent_transactions("u1", 5).await.unwrap();
        let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t7", "t6", "t5", "t4", "t3"]);
    }

    #[tokio::test]
    async fn test_filtered_listing() {
        let repo = setup().await;
        let date = Utc.with_ymd_and_hms(2026, 6, 9, 12, 0, 0).unwrap();

        let mut income = make_transaction("in1", "u1", date, 100.0);
        income.kind = TransactionKind::Income;
        income.category_id = "cat-salary".to_string();
        repo.store_transaction(&income).await.unwrap();
        repo.store_transaction(&make_transaction("ex1", "u1", date, 20.0))
            .await
            .unwrap();

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        let incomes = repo.list_transactions("u1", &filter).await.unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].id, "in1");

        let filter = TransactionFilter {
            category_id: Some("cat-1".to_string()),
            ..Default::default()
        };
        let by_category = repo.list_transactions("u1", &filter).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, "ex1");
    }

    #[tokio::test]
    async fn test_delete_for_category() {
        let repo = setup().await;
        let date = Utc.with_ymd_and_hms(2026, 6, 9, 12, 0, 0).unwrap();
        repo.store_transaction(&make_transaction("t1", "u1", date, 1.0))
            .await
            .unwrap();
        repo.store_transaction(&make_transaction("t2", "u1", date, 2.0))
            .await
            .unwrap();

        let deleted = repo
            .delete_transactions_for_category("u1", "cat-1")
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(repo.get_transaction("u1", "t1").await.unwrap().is_none());
    }
}
