pub mod error;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use crate::domain::forms::{NewOrder, NewUser};
use crate::domain::order::OrderRecord;
use crate::domain::series::{ProductSalesRecord, TimeSeriesPoint};
use crate::domain::stats::StatsSnapshot;
use crate::domain::user::UserRecord;

pub use error::GatewayError;
pub use http::HttpGateway;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Outbound calls to the dashboard API. One fresh round trip per call: no retries, no caching.
#[async_trait::async_trait]
pub trait DashboardGateway: Send + Sync {
    async fn stats(&self) -> GatewayResult<StatsSnapshot>;

    async fn users(&self) -> GatewayResult<Vec<UserRecord>>;
    async fn create_user(&self, user: &NewUser) -> GatewayResult<UserRecord>;
    async fn delete_user(&self, id: i64) -> GatewayResult<()>;

    async fn orders(&self) -> GatewayResult<Vec<OrderRecord>>;
    async fn create_order(&self, order: &NewOrder) -> GatewayResult<OrderRecord>;
    async fn delete_order(&self, id: i64) -> GatewayResult<()>;

    async fn revenue(&self) -> GatewayResult<Vec<TimeSeriesPoint>>;
    async fn sales(&self) -> GatewayResult<Vec<ProductSalesRecord>>;

    /// Reachability check against `/stats`; never errors.
    async fn check_connection(&self) -> bool {
        self.stats().await.is_ok()
    }
}
