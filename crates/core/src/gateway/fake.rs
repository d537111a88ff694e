use crate::domain::forms::{NewOrder, NewUser};
use crate::domain::order::OrderRecord;
use crate::domain::series::{ProductSalesRecord, TimeSeriesPoint};
use crate::domain::stats::StatsSnapshot;
use crate::domain::user::UserRecord;
use crate::domain::{remove_by_id, Keyed};
use crate::fallback;
use crate::gateway::{DashboardGateway, GatewayError, GatewayResult};
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory gateway with a failure switch and per-call counters.
pub(crate) struct FakeGateway {
    failing: AtomicBool,
    calls: AtomicUsize,
    users: Mutex<Vec<UserRecord>>,
    orders: Mutex<Vec<OrderRecord>>,
    revenue: Vec<TimeSeriesPoint>,
    latency: Duration,
}

impl FakeGateway {
    /// Live data that deliberately differs from the fallback datasets.
    pub(crate) fn healthy() -> Self {
        let mut users = fallback::users();
        users.truncate(2);
        let mut orders = fallback::orders();
        orders.truncate(3);
        let revenue = vec![
            TimeSeriesPoint {
                period: "Nov".to_string(),
                revenue: 50_000.0,
                users: 100.0,
                orders: 10.0,
            },
            TimeSeriesPoint {
                period: "Dec".to_string(),
                revenue: 65_000.0,
                users: 150.0,
                orders: 10.0,
            },
        ];

        Self {
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            users: Mutex::new(users),
            orders: Mutex::new(orders),
            revenue,
            latency: Duration::ZERO,
        }
    }

    pub(crate) fn failing() -> Self {
        let gw = Self::healthy();
        gw.set_failing(true);
        gw
    }

    /// Every call sleeps for `latency` before answering.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, endpoint: &str) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(())
    }
}

fn next_id<T: Keyed>(records: &[T]) -> i64 {
    records.iter().map(Keyed::id).max().unwrap_or(0) + 1
}

fn not_found(endpoint: String) -> GatewayError {
    GatewayError::HttpStatus {
        endpoint,
        status: StatusCode::NOT_FOUND,
    }
}

#[async_trait::async_trait]
impl DashboardGateway for FakeGateway {
    async fn stats(&self) -> GatewayResult<StatsSnapshot> {
        self.enter("/stats").await?;
        Ok(StatsSnapshot {
            total_revenue: 1.0,
            active_users: 2,
            total_orders: 3,
            conversion_rate: 4.0,
        })
    }

    async fn users(&self) -> GatewayResult<Vec<UserRecord>> {
        self.enter("/users").await?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, user: &NewUser) -> GatewayResult<UserRecord> {
        self.enter("/users").await?;
        let mut users = self.users.lock().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let record = user.clone().into_record(next_id(users.as_slice()), today);
        users.push(record.clone());
        Ok(record)
    }

    async fn delete_user(&self, id: i64) -> GatewayResult<()> {
        let endpoint = format!("/users/{id}");
        self.enter(&endpoint).await?;
        let mut users = self.users.lock().unwrap();
        remove_by_id(&mut *users, id)
            .map(|_| ())
            .ok_or_else(|| not_found(endpoint))
    }

    async fn orders(&self) -> GatewayResult<Vec<OrderRecord>> {
        self.enter("/orders").await?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn create_order(&self, order: &NewOrder) -> GatewayResult<OrderRecord> {
        self.enter("/orders").await?;
        let mut orders = self.orders.lock().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let record = order.clone().into_record(next_id(orders.as_slice()), today);
        orders.push(record.clone());
        Ok(record)
    }

    async fn delete_order(&self, id: i64) -> GatewayResult<()> {
        let endpoint = format!("/orders/{id}");
        self.enter(&endpoint).await?;
        let mut orders = self.orders.lock().unwrap();
        remove_by_id(&mut *orders, id)
            .map(|_| ())
            .ok_or_else(|| not_found(endpoint))
    }

    async fn revenue(&self) -> GatewayResult<Vec<TimeSeriesPoint>> {
        self.enter("/revenue").await?;
        Ok(self.revenue.clone())
    }

    async fn sales(&self) -> GatewayResult<Vec<ProductSalesRecord>> {
        self.enter("/sales").await?;
        Ok(vec![ProductSalesRecord {
            name: "Live Product".to_string(),
            sales: 10.0,
            profit: 5.0,
        }])
    }
}
