//! Pure aggregation over already-fetched transactions.
//!
//! Nothing here touches storage or the clock: both functions are plain
//! folds over their inputs, which is what makes the analytics endpoints
//! safe to run concurrently and trivial to test.

use std::collections::{BTreeMap, HashMap};

use shared::{CategorySpendingEntry, TrendPoint};

use super::models::category::Category;
use super::models::transaction::{Transaction, TransactionKind};
use super::period::{Granularity, LabelStyle};

/// Income/expense sums accumulated for one granularity interval.
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    income: f64,
    expenses: f64,
}

/// Group transactions into chronologically ordered, labelled trend points.
///
/// Buckets are keyed by [`Granularity::bucket_key`]; since those keys sort
/// lexicographically in time order, a BTreeMap hands back the buckets
/// already sorted. Only buckets that saw at least one transaction exist.
pub fn spending_trend(
    transactions: &[Transaction],
    granularity: Granularity,
    label_style: LabelStyle,
) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    for tx in transactions {
        let bucket = buckets.entry(granularity.bucket_key(tx.date)).or_default();
        match tx.kind {
            TransactionKind::Income => bucket.income += tx.amount,
            TransactionKind::Expense => bucket.expenses += tx.amount,
        }
    }

    buckets
        .into_iter()
        .map(|(key, bucket)| TrendPoint {
            period: label_style.render(&key),
            income: bucket.income,
            expenses: bucket.expenses,
            net: bucket.income - bucket.expenses,
        })
        .collect()
}

/// Sum income and expenses over a transaction set.
pub fn period_totals(transactions: &[Transaction]) -> (f64, f64) {
    let mut income = 0.0;
    let mut expenses = 0.0;
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => income += tx.amount,
            TransactionKind::Expense => expenses += tx.amount,
        }
    }
    (income, expenses)
}

/// Sum expenses per category and join with display metadata.
///
/// Output order is the order each category first appears in the scan, not
/// amount order — clients depend on that. Expenses whose category no longer
/// exists are silently dropped here while still counting toward the period
/// totals; that mismatch is intentional (analytics degrade, never fail).
pub fn category_spending(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpendingEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        let entry = totals.entry(tx.category_id.as_str()).or_insert_with(|| {
            order.push(tx.category_id.as_str());
            0.0
        });
        *entry += tx.amount;
    }

    let by_id: HashMap<&str, &Category> =
        categories.iter().map(|c| (c.id.as_str(), c)).collect();

    order
        .into_iter()
        .filter_map(|category_id| {
            let category = by_id.get(category_id)?;
            Some(CategorySpendingEntry {
                category: category.name.clone(),
                amount: totals[category_id],
                color: category.color.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::category::CategoryKind;
    use chrono::{DateTime, TimeZone, Utc};

    fn tx(id: &str, kind: TransactionKind, amount: f64, date: DateTime<Utc>) -> Transaction {
        tx_in_category(id, kind, amount, date, "cat-1")
    }

    fn tx_in_category(
        id: &str,
        kind: TransactionKind,
        amount: f64,
        date: DateTime<Utc>,
        category_id: &str,
    ) -> Transaction {
        Transaction {
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
        }
    }

    fn category(id: &str, name: &str, color: &str) -> Category {
        Category {
            id: id.to_string(),
            user_id: "u1".to_string(),
            name: name.to_string(),
            kind: CategoryKind::Expense,
            color: color.to_string(),
            icon: "🛒".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_trend() {
        assert!(spending_trend(&[], Granularity::Day, LabelStyle::MonthDay).is_empty());
    }

    #[test]
    fn test_same_hour_expenses_collapse_into_one_bucket() {
        // Three expenses of 10, 20, 30 inside the same hour: exactly one
        // point with expenses 60, income 0, net -60.
        let transactions = vec![
            tx("a", TransactionKind::Expense, 10.0, at(2026, 6, 9, 14, 5)),
            tx("b", TransactionKind::Expense, 20.0, at(2026, 6, 9, 14, 20)),
            tx("c", TransactionKind::Expense, 30.0, at(2026, 6, 9, 14, 59)),
        ];

        let trend = spending_trend(&transactions, Granularity::Hour, LabelStyle::HourOfDay);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].period, "14:00");
        assert_eq!(trend[0].expenses, 60.0);
        assert_eq!(trend[0].income, 0.0);
        assert_eq!(trend[0].net, -60.0);
    }

    #[test]
    fn test_trend_is_chronological_regardless_of_input_order() {
        let transactions = vec![
            tx("late", TransactionKind::Expense, 5.0, at(2026, 6, 9, 10, 0)),
            tx("early", TransactionKind::Income, 7.0, at(2026, 6, 7, 10, 0)),
            tx("mid", TransactionKind::Expense, 3.0, at(2026, 6, 8, 10, 0)),
        ];

        let trend = spending_trend(&transactions, Granularity::Day, LabelStyle::MonthDay);
        let labels: Vec<&str> = trend.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(labels, vec!["06/07", "06/08", "06/09"]);
    }

    #[test]
    fn test_bucketing_conserves_totals() {
        // Spread across several days and kinds; bucketed sums must equal the
        // flat totals exactly.
        let transactions = vec![
            tx("a", TransactionKind::Income, 100.0, at(2026, 6, 1, 9, 0)),
            tx("b", TransactionKind::Expense, 40.0, at(2026, 6, 1, 12, 0)),
            tx("c", TransactionKind::Income, 60.5, at(2026, 6, 3, 9, 0)),
            tx("d", TransactionKind::Expense, 19.5, at(2026, 6, 5, 9, 0)),
            tx("e", TransactionKind::Expense, 1.0, at(2026, 6, 5, 23, 0)),
        ];

        let (total_income, total_expenses) = period_totals(&transactions);
        let trend = spending_trend(&transactions, Granularity::Day, LabelStyle::MonthDay);

        let bucketed_income: f64 = trend.iter().map(|p| p.income).sum();
        let bucketed_expenses: f64 = trend.iter().map(|p| p.expenses).sum();
        assert_eq!(bucketed_income, total_income);
        assert_eq!(bucketed_expenses, total_expenses);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let transactions = vec![
            tx("a", TransactionKind::Income, 10.0, at(2026, 6, 1, 9, 0)),
            tx("b", TransactionKind::Expense, 4.0, at(2026, 6, 2, 9, 0)),
        ];

        let first = spending_trend(&transactions, Granularity::Day, LabelStyle::MonthDay);
        let second = spending_trend(&transactions, Granularity::Day, LabelStyle::MonthDay);
        assert_eq!(first, second);
    }

    #[test]
    fn test_category_spending_preserves_first_occurrence_order() {
        let categories = vec![
            category("food", "Food & Dining", "#EF4444"),
            category("transport", "Transportation", "#F59E0B"),
        ];
        // transport shows up before food is seen a second time; order must
        // be food, transport (first occurrence), not amount order.
        let transactions = vec![
            tx_in_category("a", TransactionKind::Expense, 5.0, at(2026, 6, 1, 9, 0), "food"),
            tx_in_category("b", TransactionKind::Expense, 50.0, at(2026, 6, 2, 9, 0), "transport"),
            tx_in_category("c", TransactionKind::Expense, 10.0, at(2026, 6, 3, 9, 0), "food"),
        ];

        let spending = category_spending(&transactions, &categories);
        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].category, "Food & Dining");
        assert_eq!(spending[0].amount, 15.0);
        assert_eq!(spending[0].color, "#EF4444");
        assert_eq!(spending[1].category, "Transportation");
        assert_eq!(spending[1].amount, 50.0);
    }

    #[test]
    fn test_category_spending_ignores_income_and_unknown_categories() {
        let categories = vec![category("food", "Food & Dining", "#EF4444")];
        let transactions = vec![
            tx_in_category("a", TransactionKind::Income, 500.0, at(2026, 6, 1, 9, 0), "food"),
            tx_in_category("b", TransactionKind::Expense, 20.0, at(2026, 6, 2, 9, 0), "food"),
            tx_in_category("c", TransactionKind::Expense, 99.0, at(2026, 6, 3, 9, 0), "deleted"),
        ];

        let spending = category_spending(&transactions, &categories);
        assert_eq!(spending.len(), 1);
        assert_eq!(spending[0].category, "Food & Dining");
        assert_eq!(spending[0].amount, 20.0);

        // The dropped expense still counts toward flat totals.
        let (_, total_expenses) = period_totals(&transactions);
        assert_eq!(total_expenses, 119.0);
    }
}
