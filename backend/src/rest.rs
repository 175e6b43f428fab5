//! REST layer: axum handlers over the domain services.
//!
//! Authentication itself is a collaborator concern; by the time a request
//! lands here the caller has been resolved to a user id, carried in the
//! `X-User-Id` header. Handlers translate between HTTP and the domain and
//! nothing more.

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{
    CreateBudgetRequest, CreateCategoryRequest, CreateGoalRequest, CreateTransactionRequest,
    CreateUserRequest, MessageResponse, UpdateGoalProgressRequest,
};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::models::transaction::TransactionKind;
use crate::domain::{
    AnalyticsService, BudgetService, CategoryService, DomainError, GoalService,
    TransactionService, UserService,
};
use crate::storage::TransactionFilter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService<DbConnection>,
    pub category_service: CategoryService<DbConnection>,
    pub transaction_service: TransactionService<DbConnection>,
    pub budget_service: BudgetService<DbConnection>,
    pub goal_service: GoalService<DbConnection>,
    pub analytics_service: AnalyticsService<DbConnection>,
}

impl AppState {
    /// Wire every service onto one database connection.
    pub fn new(db: DbConnection) -> Self {
        let connection = std::sync::Arc::new(db);
        Self {
            user_service: UserService::new(connection.clone()),
            category_service: CategoryService::new(connection.clone()),
            transaction_service: TransactionService::new(connection.clone()),
            budget_service: BudgetService::new(connection.clone()),
            goal_service: GoalService::new(connection.clone()),
            analytics_service: AnalyticsService::new(connection),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users", post(register_user))
        .route("/users/me", get(get_current_user))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:category_id", delete(delete_category))
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/:transaction_id",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/:budget_id", delete(delete_budget))
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/:goal_id", delete(delete_goal))
        .route("/goals/:goal_id/progress", put(update_goal_progress))
        .route("/analytics/dashboard", get(get_dashboard))
        .route("/analytics/spending-trend", get(get_spending_trend));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// The caller's resolved user id, handed over by the auth collaborator.
pub struct AuthUser(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| AuthUser(value.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Missing X-User-Id header"))
    }
}

fn domain_error_response(err: DomainError) -> Response {
    match &err {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()).into_response(),
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        DomainError::Storage(e) => {
            tracing::error!("Storage error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/users - email: {}", request.email);

    match state.user_service.register(request).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> impl IntoResponse {
    match state.user_service.get_user(&user_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

async fn list_categories(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> impl IntoResponse {
    match state.category_service.list_categories(&user_id).await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn create_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/categories - name: {}", request.name);

    match state.category_service.create_category(&user_id, request).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn delete_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(category_id): Path<String>,
) -> impl IntoResponse {
    match state
        .category_service
        .delete_category(&user_id, &category_id)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Category deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Query parameters for transaction list endpoint.
#[derive(Deserialize, Debug)]
pub struct TransactionListQuery {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub category_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let kind = match query.kind.as_deref() {
        None => None,
        Some(raw) => match TransactionKind::parse(raw) {
            Some(kind) => Some(kind),
            None => {
                return (StatusCode::BAD_REQUEST, "Invalid transaction type").into_response()
            }
        },
    };

    let filter = TransactionFilter {
        limit: query.limit,
        skip: query.skip,
        category_id: query.category_id,
        kind,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    match state.transaction_service.list_transactions(&user_id, filter).await {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - amount: {}", request.amount);

    match state
        .transaction_service
        .create_transaction(&user_id, request)
        .await
    {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(transaction_id): Path<String>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    match state
        .transaction_service
        .update_transaction(&user_id, &transaction_id, request)
        .await
    {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(transaction_id): Path<String>,
) -> impl IntoResponse {
    match state
        .transaction_service
        .delete_transaction(&user_id, &transaction_id)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Transaction deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

async fn list_budgets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> impl IntoResponse {
    match state.budget_service.list_budgets(&user_id).await {
        Ok(budgets) => (StatusCode::OK, Json(budgets)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn create_budget(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    match state.budget_service.create_budget(&user_id, request).await {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn delete_budget(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(budget_id): Path<String>,
) -> impl IntoResponse {
    match state.budget_service.delete_budget(&user_id, &budget_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Budget deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> impl IntoResponse {
    match state.goal_service.list_goals(&user_id).await {
        Ok(goals) => (StatusCode::OK, Json(goals)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateGoalRequest>,
) -> impl IntoResponse {
    match state.goal_service.create_goal(&user_id, request).await {
        Ok(goal) => (StatusCode::CREATED, Json(goal)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn update_goal_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(goal_id): Path<String>,
    Json(request): Json<UpdateGoalProgressRequest>,
) -> impl IntoResponse {
    match state
        .goal_service
        .update_progress(&user_id, &goal_id, request)
        .await
    {
        Ok(goal) => (StatusCode::OK, Json(goal)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(goal_id): Path<String>,
) -> impl IntoResponse {
    match state.goal_service.delete_goal(&user_id, &goal_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Goal deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Query parameters for the analytics endpoints.
#[derive(Deserialize, Debug)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    info!("GET /api/analytics/dashboard - period: {:?}", query.period);

    let period = query.period.as_deref().unwrap_or_default();
    match state.analytics_service.dashboard(&user_id, period).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

async fn get_spending_trend(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/analytics/spending-trend - period: {:?}",
        query.period
    );

    let period = query.period.as_deref().unwrap_or_default();
    match state.analytics_service.spending_trend(&user_id, period).await {
        Ok(trend) => (StatusCode::OK, Json(trend)).into_response(),
        Err(e) => domain_error_response(e),
    }
}
