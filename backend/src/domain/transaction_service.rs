//! Transaction recording and listing.

use std::sync::Arc;

use chrono::Utc;
use shared::CreateTransactionRequest;
use tracing::info;
use uuid::Uuid;

use super::models::transaction::Transaction;
use super::DomainError;
use crate::storage::{CategoryStore, Connection, TransactionFilter, TransactionStore};

const MAX_DESCRIPTION_LENGTH: usize = 256;

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    category_repository: C::CategoryRepository,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            category_repository: connection.create_category_repository(),
        }
    }

    pub async fn list_transactions(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<shared::Transaction>, DomainError> {
        let transactions = self
            .transaction_repository
            .list_transactions(user_id, &filter)
            .await?;
        Ok(transactions.into_iter().map(Into::into).collect())
    }

    pub async fn create_transaction(
        &self,
        user_id: &str,
        request: CreateTransactionRequest,
    ) -> Result<shared::Transaction, DomainError> {
        validate_request(&request)?;
        self.ensure_category_exists(user_id, &request.category_id)
            .await?;

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount: request.amount,
            kind: request.kind.into(),
            category_id: request.category_id,
            description: request.description,
            date: request.date,
            is_recurring: request.is_recurring,
            recurring_frequency: request.recurring_frequency,
            created_at: Utc::now(),
        };
        self.transaction_repository
            .store_transaction(&transaction)
            .await?;

        info!("Recorded transaction {} for user {}", transaction.id, user_id);
        Ok(transaction.into())
    }

    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        request: CreateTransactionRequest,
    ) -> Result<shared::Transaction, DomainError> {
        let existing = self
            .transaction_repository
            .get_transaction(user_id, transaction_id)
            .await?
            .ok_or(DomainError::NotFound("Transaction"))?;

        validate_request(&request)?;
        self.ensure_category_exists(user_id, &request.category_id)
            .await?;

        let updated = Transaction {
            id: existing.id,
            user_id: existing.user_id,
            amount: request.amount,
            kind: request.kind.into(),
            category_id: request.category_id,
            description: request.description,
            date: request.date,
            is_recurring: request.is_recurring,
            recurring_frequency: request.recurring_frequency,
            created_at: existing.created_at,
        };
        self.transaction_repository
            .update_transaction(&updated)
            .await?;

        Ok(updated.into())
    }

    pub async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<(), DomainError> {
        if !self
            .transaction_repository
            .delete_transaction(user_id, transaction_id)
            .await?
        {
            return Err(DomainError::NotFound("Transaction"));
        }
        Ok(())
    }

    async fn ensure_category_exists(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<(), DomainError> {
        self.category_repository
            .get_category(user_id, category_id)
            .await?
            .ok_or(DomainError::NotFound("Category"))?;
        Ok(())
    }
}

fn validate_request(request: &CreateTransactionRequest) -> Result<(), DomainError> {
    if !request.amount.is_finite() || request.amount < 0.0 {
        return Err(DomainError::Validation(
            "Amount must be a non-negative number".to_string(),
        ));
    }
    if request.description.is_empty() || request.description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::Validation(format!(
            "Description must be between 1 and {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::domain::models::category::{Category, CategoryKind};
    use chrono::TimeZone;
    use shared::TransactionKind;

    async fn setup() -> (TransactionService<DbConnection>, Arc<DbConnection>) {
        let db = Arc::new(DbConnection::init_test().await.expect("test database"));
        let categories = db.create_category_repository();
        categories
            .store_category(&Category {
                id: "food".to_string(),
                user_id: "u1".to_string(),
                name: "Food & Dining".to_string(),
                kind: CategoryKind::Expense,
                color: "#EF4444".to_string(),
                icon: "🍕".to_string(),
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();
        (TransactionService::new(db.clone()), db)
    }

    fn request(amount: f64, category_id: &str) -> CreateTransactionRequest {
        CreateTransactionRequest {
            amount,
            kind: TransactionKind::Expense,
            category_id: category_id.to_string(),
            description: "Lunch".to_string(),
            date: Utc.with_ymd_and_hms(2026, 6, 5, 12, 0, 0).unwrap(),
            is_recurring: false,
            recurring_frequency: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (service, _db) = setup().await;

        let created = service
            .create_transaction("u1", request(12.5, "food"))
            .await
            .unwrap();
        assert_eq!(created.amount, 12.5);

        let listed = service
            .list_transactions("u1", TransactionFilter::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_amount() {
        let (service, _db) = setup().await;

        let err = service
            .create_transaction("u1", request(-5.0, "food"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category() {
        let (service, _db) = setup().await;

        let err = service
            .create_transaction("u1", request(5.0, "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Category")));
    }

    #[tokio::test]
    async fn test_create_rejects_someone_elses_category() {
        let (service, _db) = setup().await;

        // "food" belongs to u1, not u2.
        let err = service
            .create_transaction("u2", request(5.0, "food"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Category")));
    }

    #[tokio::test]
    async fn test_update_preserves_identity_and_creation_time() {
        let (service, _db) = setup().await;

        let created = service
            .create_transaction("u1", request(12.5, "food"))
            .await
            .unwrap();

        let mut change = request(20.0, "food");
        change.description = "Dinner".to_string();
        let updated = service
            .update_transaction("u1", &created.id, change)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        // Storage keeps millisecond precision.
        assert_eq!(
            updated.created_at.timestamp_millis(),
            created.created_at.timestamp_millis()
        );
        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.description, "Dinner");
    }

    #[tokio::test]
    async fn test_update_missing_transaction_is_not_found() {
        let (service, _db) = setup().await;

        let err = service
            .update_transaction("u1", "nope", request(1.0, "food"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Transaction")));
    }

    #[tokio::test]
    async fn test_delete_round_trip() {
        let (service, _db) = setup().await;

        let created = service
            .create_transaction("u1", request(12.5, "food"))
            .await
            .unwrap();
        service.delete_transaction("u1", &created.id).await.unwrap();

        let err = service
            .delete_transaction("u1", &created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Transaction")));
    }
}
