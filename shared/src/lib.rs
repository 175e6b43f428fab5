//! Wire types shared between the finance tracker backend and its clients.
//!
//! Everything here is a plain serde value: the backend's domain layer maps
//! its own models into these before they cross the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether money moved in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Categories are typed the same way transactions are, so income categories
/// never show up in expense pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
    pub description: String,
    /// When the money actually moved (RFC 3339 on the wire).
    pub date: DateTime<Utc>,
    pub is_recurring: bool,
    /// "daily" | "weekly" | "monthly" | "yearly" when `is_recurring` is set.
    pub recurring_frequency: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user-defined spending or income category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// A spending cap on one category over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: f64,
    /// "weekly" | "monthly" | "yearly".
    pub period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A savings goal the user is working toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// An account holder. Credentials live with the auth collaborator, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Hex color for charts; defaults to the standard palette blue.
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub category_id: String,
    pub amount: f64,
    #[serde(default = "default_budget_period")]
    pub period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

fn default_budget_period() -> String {
    "monthly".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub target_amount: f64,
    pub target_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGoalProgressRequest {
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// Analytics responses
// ---------------------------------------------------------------------------

/// One bucket of the spending trend, already labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Rendered bucket label, e.g. "14:00", "Mon 06/09", "Week 06/02", "Jun 2026".
    pub period: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Summed expenses for one category over the dashboard period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpendingEntry {
    /// Category display name.
    pub category: String,
    pub amount: f64,
    pub color: String,
}

/// A recent transaction enriched with category display metadata.
///
/// The enrichment fields stay empty when the category has since been
/// deleted; the transaction itself is still listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
}

/// The composed summary behind the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub category_spending: Vec<CategorySpendingEntry>,
    pub recent_transactions: Vec<RecentTransaction>,
    /// Rendered period label, e.g. "August 2026" or "Last 7 Days".
    pub period: String,
}

/// Generic acknowledgement for deletes and other fire-and-forget calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
