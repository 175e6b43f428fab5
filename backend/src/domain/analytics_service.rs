//! Analytics orchestration: fetch the window, run the pure aggregation,
//! compose the response. The repository fetches are the only await points;
//! everything after them is synchronous CPU work on request-local data.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{DashboardSnapshot, RecentTransaction, TrendPoint};
use tracing::info;

use super::analytics::{category_spending, period_totals, spending_trend};
use super::period::PeriodTag;
use super::DomainError;
use crate::storage::{CategoryStore, Connection, TransactionStore};

/// The dashboard always shows this many recent transactions at most.
const RECENT_TRANSACTION_LIMIT: u32 = 5;

/// Read-only service behind the dashboard and spending-trend endpoints.
#[derive(Clone)]
pub struct AnalyticsService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    category_repository: C::CategoryRepository,
}

impl<C: Connection> AnalyticsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            category_repository: connection.create_category_repository(),
        }
    }

    /// Compose the dashboard snapshot for a period tag. Unrecognized tags
    /// fall back to "month", which here means the current calendar month.
    pub async fn dashboard(
        &self,
        user_id: &str,
        raw_period: &str,
    ) -> Result<DashboardSnapshot, DomainError> {
        self.dashboard_at(user_id, raw_period, Utc::now()).await
    }

    pub(crate) async fn dashboard_at(
        &self,
        user_id: &str,
        raw_period: &str,
        now: DateTime<Utc>,
    ) -> Result<DashboardSnapshot, DomainError> {
        let period =
            PeriodTag::parse_or(raw_period, PeriodTag::Month).resolve_calendar_anchored(now);
        info!(
            "Composing dashboard for user {} over {:?} from {}",
            user_id, period.tag, period.start
        );

        let transactions = self
            .transaction_repository
            .list_transactions_in_range(user_id, period.start, period.end)
            .await?;
        let categories = self.category_repository.list_categories(user_id).await?;

        let (total_income, total_expenses) = period_totals(&transactions);
        let category_totals = category_spending(&transactions, &categories);

        // The recent list deliberately ignores the period filter.
        let recent = self
            .transaction_repository
            .list_recent_transactions(user_id, RECENT_TRANSACTION_LIMIT)
            .await?;

        let by_id: HashMap<&str, (&str, &str)> = categories
            .iter()
            .map(|c| (c.id.as_str(), (c.name.as_str(), c.icon.as_str())))
            .collect();

        let recent_transactions = recent
            .into_iter()
            .map(|tx| {
                // A deleted category leaves the enrichment fields empty;
                // the transaction itself is still listed.
                let display = by_id.get(tx.category_id.as_str());
                RecentTransaction {
                    id: tx.id,
                    amount: tx.amount,
                    kind: tx.kind.into(),
                    category_id: tx.category_id,
                    description: tx.description,
                    date: tx.date,
                    category_name: display.map(|(name, _)| name.to_string()),
                    category_icon: display.map(|(_, icon)| icon.to_string()),
                }
            })
            .collect();

        Ok(DashboardSnapshot {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            category_spending: category_totals,
            recent_transactions,
            period: period.tag.summary_label(period.start),
        })
    }

    /// The spending trend for a period tag. Unrecognized tags fall back to
    /// "6months"; "month" is a rolling 30 days here, unlike the dashboard.
    pub async fn spending_trend(
        &self,
        user_id: &str,
        raw_period: &str,
    ) -> Result<Vec<TrendPoint>, DomainError> {
        self.spending_trend_at(user_id, raw_period, Utc::now()).await
    }

    pub(crate) async fn spending_trend_at(
        &self,
        user_id: &str,
        raw_period: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendPoint>, DomainError> {
        let period = PeriodTag::parse_or(raw_period, PeriodTag::SixMonths).resolve(now);
        info!(
            "Computing spending trend for user {} over {:?}",
            user_id, period.tag
        );

        let transactions = self
            .transaction_repository
            .list_transactions_in_range(user_id, period.start, period.end)
            .await?;

        Ok(spending_trend(
            &transactions,
            period.granularity,
            period.label_style,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::domain::models::category::{Category, CategoryKind};
    use crate::domain::models::transaction::{Transaction, TransactionKind};
    use chrono::TimeZone;

    struct Fixture {
        service: AnalyticsService<DbConnection>,
        transactions: crate::storage::sqlite::TransactionRepository,
        categories: crate::storage::sqlite::CategoryRepository,
    }

    async fn setup() -> Fixture {
        let db = Arc::new(DbConnection::init_test().await.expect("test database"));
        Fixture {
            service: AnalyticsService::new(db.clone()),
            transactions: db.create_transaction_repository(),
            categories: db.create_category_repository(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 9, 15, 0, 0).unwrap()
    }

    async fn seed_category(fixture: &Fixture, id: &str, name: &str, icon: &str) {
        fixture
            .categories
            .store_category(&Category {
                id: id.to_string(),
                user_id: "u1".to_string(),
                name: name.to_string(),
                kind: CategoryKind::Expense,
                color: "#EF4444".to_string(),
                icon: icon.to_string(),
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();
    }

    async fn seed_transaction(
        fixture: &Fixture,
        id: &str,
        kind: TransactionKind,
        amount: f64,
        date: DateTime<Utc>,
        category_id: &str,
    ) {
        fixture
            .transactions
            .store_transaction(&Transaction {
                id: id.to_string(),
                user_id: "u1".to_string(),
                amount,
                kind,
                category_id: category_id.to_string(),
                description: format!("tx {id}"),
                date,
                is_recurring: false,
                recurring_frequency: None,
                created_at: date,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_dashboard_with_no_transactions_is_all_zero() {
        let fixture = setup().await;

        let snapshot = fixture
            .service
            .dashboard_at("u1", "month", now())
            .await
            .unwrap();

        assert_eq!(snapshot.total_income, 0.0);
        assert_eq!(snapshot.total_expenses, 0.0);
        assert_eq!(snapshot.balance, 0.0);
        assert!(snapshot.category_spending.is_empty());
        assert!(snapshot.recent_transactions.is_empty());
        assert_eq!(snapshot.period, "June 2026");
    }

    #[tokio::test]
    async fn test_dashboard_totals_and_category_spending() {
        let fixture = setup().await;
        seed_category(&fixture, "food", "Food & Dining", "🍕").await;

        // Inside the calendar month.
        seed_transaction(
            &fixture,
            "salary",
            TransactionKind::Income,
            1000.0,
            Utc.with_ymd_and_hms(2026, 6, 2, 9, 0, 0).unwrap(),
            "food",
        )
        .await;
        seed_transaction(
            &fixture,
            "lunch",
            TransactionKind::Expense,
            30.0,
            Utc.with_ymd_and_hms(2026, 6, 5, 12, 0, 0).unwrap(),
            "food",
        )
        .await;
        // Before the calendar month: excluded from totals.
        seed_transaction(
            &fixture,
            "old",
            TransactionKind::Expense,
            500.0,
            Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap(),
            "food",
        )
        .await;

        let snapshot = fixture
            .service
            .dashboard_at("u1", "month", now())
            .await
            .unwrap();

        assert_eq!(snapshot.total_income, 1000.0);
        assert_eq!(snapshot.total_expenses, 30.0);
        assert_eq!(snapshot.balance, 970.0);
        assert_eq!(snapshot.category_spending.len(), 1);
        assert_eq!(snapshot.category_spending[0].category, "Food & Dining");
        assert_eq!(snapshot.category_spending[0].amount, 30.0);

        // The recent list ignores the period filter, so "old" appears too.
        let recent_ids: Vec<&str> = snapshot
            .recent_transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert!(recent_ids.contains(&"old"));
        assert_eq!(
            snapshot.recent_transactions[0].category_name.as_deref(),
            Some("Food & Dining")
        );
        assert_eq!(
            snapshot.recent_transactions[0].category_icon.as_deref(),
            Some("🍕")
        );
    }

    #[tokio::test]
    async fn test_recent_list_is_capped_at_five_newest() {
        let fixture = setup().await;
        seed_category(&fixture, "misc", "Misc", "💳").await;

        for day in 1..=8 {
            seed_transaction(
                &fixture,
                &format!("t{day}"),
                TransactionKind::Expense,
                1.0,
                Utc.with_ymd_and_hms(2026, 6, day, 12, 0, 0).unwrap(),
                "misc",
            )
            .await;
        }

        let snapshot = fixture
            .service
            .dashboard_at("u1", "month", now())
            .await
            .unwrap();

        let ids: Vec<&str> = snapshot
            .recent_transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t8", "t7", "t6", "t5", "t4"]);
    }

    #[tokio::test]
    async fn test_deleted_category_understates_spending_but_not_totals() {
        let fixture = setup().await;
        // "ghost" was deleted; its expense still exists in the store.
        seed_transaction(
            &fixture,
            "orphan",
            TransactionKind::Expense,
            42.0,
            Utc.with_ymd_and_hms(2026, 6, 5, 12, 0, 0).unwrap(),
            "ghost",
        )
        .await;

        let snapshot = fixture
            .service
            .dashboard_at("u1", "month", now())
            .await
            .unwrap();

        assert_eq!(snapshot.total_expenses, 42.0);
        assert!(snapshot.category_spending.is_empty());

        // Still listed among recent transactions, just unenriched.
        assert_eq!(snapshot.recent_transactions.len(), 1);
        assert!(snapshot.recent_transactions[0].category_name.is_none());
        assert!(snapshot.recent_transactions[0].category_icon.is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_trend_period_behaves_like_six_months() {
        let fixture = setup().await;
        seed_transaction(
            &fixture,
            "a",
            TransactionKind::Expense,
            10.0,
            Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
            "misc",
        )
        .await;
        seed_transaction(
            &fixture,
            "b",
            TransactionKind::Income,
            25.0,
            Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(),
            "misc",
        )
        .await;

        let bogus = fixture
            .service
            .spending_trend_at("u1", "bogus", now())
            .await
            .unwrap();
        let six_months = fixture
            .service
            .spending_trend_at("u1", "6months", now())
            .await
            .unwrap();

        assert_eq!(bogus, six_months);
        assert_eq!(bogus.len(), 2);
        assert_eq!(bogus[0].period, "Mar 2026");
        assert_eq!(bogus[1].period, "Jun 2026");
    }

    #[tokio::test]
    async fn test_trend_default_and_empty_window() {
        let fixture = setup().await;

        let trend = fixture
            .service
            .spending_trend_at("u1", "24h", now())
            .await
            .unwrap();
        assert!(trend.is_empty());
    }
}
