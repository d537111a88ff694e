use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use dashboard_core::domain::forms::{NewOrder, NewUser, ValidationError};
use dashboard_core::domain::order::OrderRecord;
use dashboard_core::domain::series::{ProductSalesRecord, TimeSeriesPoint};
use dashboard_core::domain::stats::StatsSnapshot;
use dashboard_core::domain::user::UserRecord;
use dashboard_core::domain::{remove_by_id, Keyed};
use dashboard_core::fallback;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const BASE_PATH: &str = "/api/dashboard";

/// In-memory backing data for the demo API.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub stats: StatsSnapshot,
    pub users: Vec<UserRecord>,
    pub orders: Vec<OrderRecord>,
    pub revenue: Vec<TimeSeriesPoint>,
    pub sales: Vec<ProductSalesRecord>,
}

impl Dataset {
    pub fn seeded() -> Self {
        Self {
            stats: fallback::stats(),
            users: fallback::users(),
            orders: fallback::orders(),
            revenue: fallback::revenue_series(),
            sales: fallback::sales(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    data: Arc<RwLock<Dataset>>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(dataset)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(Dataset::seeded())
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/stats", get(get_stats))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", delete(delete_user))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/:id", delete(delete_order))
        .route("/revenue", get(get_revenue))
        .route("/sales", get(get_sales));

    Router::new()
        .route("/healthz", get(healthz))
        .nest(BASE_PATH, api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(err: ValidationError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
}

fn next_id<T: Keyed>(records: &[T]) -> i64 {
    records.iter().map(Keyed::id).max().unwrap_or(0) + 1
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.data.read().await.stats.clone())
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<UserRecord>> {
    Json(state.data.read().await.users.clone())
}

async fn create_user(
    State(state): State<AppState>,
    Json(form): Json<NewUser>,
) -> Result<(StatusCode, Json<UserRecord>), ApiError> {
    let form = form.validate().map_err(bad_request)?;

    let mut data = state.data.write().await;
    let id = next_id(&data.users);
    let user = form.into_record(id, chrono::Utc::now().date_naive());
    data.users.push(user.clone());

    tracing::info!(id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    let mut data = state.data.write().await;
    match remove_by_id(&mut data.users, id) {
        Some(_) => {
            tracing::info!(id, "user deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_orders(State(state): State<AppState>) -> Json<Vec<OrderRecord>> {
    Json(state.data.read().await.orders.clone())
}

async fn create_order(
    State(state): State<AppState>,
    Json(form): Json<NewOrder>,
) -> Result<(StatusCode, Json<OrderRecord>), ApiError> {
    let form = form.validate().map_err(bad_request)?;

    let mut data = state.data.write().await;
    if data.orders.iter().any(|o| o.order_number == form.order_number) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": format!("order number {} already exists", form.order_number) })),
        ));
    }

    let id = next_id(&data.orders);
    let order = form.into_record(id, chrono::Utc::now().date_naive());
    data.orders.push(order.clone());

    tracing::info!(id, order_number = %order.order_number, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

async fn delete_order(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    let mut data = state.data.write().await;
    match remove_by_id(&mut data.orders, id) {
        Some(_) => {
            tracing::info!(id, "order deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn get_revenue(State(state): State<AppState>) -> Json<Vec<TimeSeriesPoint>> {
    Json(state.data.read().await.revenue.clone())
}

async fn get_sales(State(state): State<AppState>) -> Json<Vec<ProductSalesRecord>> {
    Json(state.data.read().await.sales.clone())
}
