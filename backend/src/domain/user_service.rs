//! User registration and default category seeding.
//!
//! Credentials and tokens are the auth collaborator's problem; this service
//! only creates the identity record that scopes all other data, plus the
//! starter categories every new account gets.

use std::sync::Arc;

use chrono::Utc;
use shared::CreateUserRequest;
use tracing::info;
use uuid::Uuid;

use super::models::category::{Category, CategoryKind};
use super::models::user::User;
use super::DomainError;
use crate::storage::{CategoryStore, Connection, UserStore};

/// Categories every new account starts with, matching the stock palette
/// used by the clients.
const DEFAULT_CATEGORIES: &[(&str, CategoryKind, &str, &str)] = &[
    ("Salary", CategoryKind::Income, "#10B981", "💰"),
    ("Freelance", CategoryKind::Income, "#059669", "💼"),
    ("Investment Returns", CategoryKind::Income, "#047857", "📈"),
    ("Bank Interest", CategoryKind::Income, "#065F46", "🏦"),
    ("Cash Income", CategoryKind::Income, "#064E3B", "💵"),
    ("Bonus", CategoryKind::Income, "#34D399", "🎁"),
    ("Food & Dining", CategoryKind::Expense, "#EF4444", "🍕"),
    ("Transportation", CategoryKind::Expense, "#F59E0B", "🚗"),
    ("Shopping", CategoryKind::Expense, "#8B5CF6", "🛒"),
    ("Entertainment", CategoryKind::Expense, "#EC4899", "🎬"),
    ("Bills & Utilities", CategoryKind::Expense, "#6B7280", "⚡"),
    ("Healthcare", CategoryKind::Expense, "#14B8A6", "🏥"),
    ("Gas & Fuel", CategoryKind::Expense, "#F97316", "⛽"),
    ("Groceries", CategoryKind::Expense, "#84CC16", "🛍️"),
    ("Rent/Mortgage", CategoryKind::Expense, "#DC2626", "🏠"),
    ("Coffee & Drinks", CategoryKind::Expense, "#A3A3A3", "☕"),
    ("Technology", CategoryKind::Expense, "#3B82F6", "💻"),
    ("Cash Expenses", CategoryKind::Expense, "#6366F1", "💳"),
];

#[derive(Clone)]
pub struct UserService<C: Connection> {
    user_repository: C::UserRepository,
    category_repository: C::CategoryRepository,
}

impl<C: Connection> UserService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            category_repository: connection.create_category_repository(),
        }
    }

    /// Register a new user and seed their default categories.
    pub async fn register(&self, request: CreateUserRequest) -> Result<shared::User, DomainError> {
        let email = request.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        if request.name.trim().is_empty() {
            return Err(DomainError::Validation("Name must not be empty".to_string()));
        }

        if self.user_repository.find_user_by_email(email).await?.is_some() {
            return Err(DomainError::Validation(
                "Email already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: request.name.trim().to_string(),
            created_at: now,
        };
        self.user_repository.store_user(&user).await?;

        for (name, kind, color, icon) in DEFAULT_CATEGORIES {
            self.category_repository
                .store_category(&Category {
                    id: Uuid::new_v4().to_string(),
                    user_id: user.id.clone(),
                    name: (*name).to_string(),
                    kind: *kind,
                    color: (*color).to_string(),
                    icon: (*icon).to_string(),
                    created_at: now,
                })
                .await?;
        }

        info!(
            "Registered user {} with {} default categories",
            user.id,
            DEFAULT_CATEGORIES.len()
        );
        Ok(user.into())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<shared::User, DomainError> {
        let user = self
            .user_repository
            .get_user(user_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;
        Ok(user.into())
    }
}
