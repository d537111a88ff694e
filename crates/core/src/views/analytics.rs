use crate::domain::series::{ProductSalesRecord, TimeSeriesPoint};
use crate::fallback;
use crate::metrics::{AnalyticsPeriod, PerformanceMetrics};
use crate::orchestrator::{combine_status, fetch_with_fallback, Loaded, ViewState, ViewStore};
use crate::views::ViewContext;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsData {
    pub revenue: Vec<TimeSeriesPoint>,
    pub sales: Vec<ProductSalesRecord>,
}

impl AnalyticsData {
    pub fn metrics(&self, period: AnalyticsPeriod) -> PerformanceMetrics {
        PerformanceMetrics::from_series(period.window(&self.revenue))
    }

    pub fn total_sales(&self) -> f64 {
        self.sales.iter().map(|p| p.sales).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.sales.iter().map(|p| p.profit).sum()
    }
}

#[derive(Debug)]
pub struct AnalyticsView {
    ctx: ViewContext,
    store: ViewStore<AnalyticsData>,
}

impl AnalyticsView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            store: ViewStore::new(),
        }
    }

    pub fn state(&self) -> ViewState<AnalyticsData> {
        self.store.snapshot()
    }

    pub async fn load(&self) -> Loaded<AnalyticsData> {
        self.store.set_loading();

        let gw = &self.ctx.gateway;
        let (revenue, sales) = tokio::join!(
            fetch_with_fallback("revenue", gw.revenue(), fallback::revenue_series),
            fetch_with_fallback("sales", gw.sales(), fallback::sales),
        );

        let (source, error) = combine_status([
            (revenue.source, revenue.error.as_deref()),
            (sales.source, sales.error.as_deref()),
        ]);

        let loaded = Loaded {
            data: AnalyticsData {
                revenue: revenue.data,
                sales: sales.data,
            },
            source,
            error,
        };
        self.store.set_ready(loaded.clone());
        loaded
    }

    /// `None` until the first load completes.
    pub fn metrics(&self, period: AnalyticsPeriod) -> Option<PerformanceMetrics> {
        self.store.read_data(|data| data.metrics(period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;
    use crate::gateway::fake::FakeGateway;
    use std::sync::Arc;

    #[tokio::test]
    async fn metrics_follow_the_selected_window() {
        let ctx = ViewContext::new(Arc::new(FakeGateway::failing()), Preferences::default());
        let view = AnalyticsView::new(ctx);
        assert!(view.metrics(AnalyticsPeriod::Last12Months).is_none());

        let loaded = view.load().await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.data.total_sales(), 37_500.0);
        assert_eq!(loaded.data.total_profit(), 15_800.0);

        let year = view.metrics(AnalyticsPeriod::Last12Months).unwrap();
        assert_eq!(year.revenue.total, 758_000.0);

        // Oct + Nov + Dec
        let quarter = view.metrics(AnalyticsPeriod::Last3Months).unwrap();
        assert_eq!(quarter.revenue.total, 213_000.0);
        assert_eq!(quarter.revenue.average, 71_000.0);
        assert_eq!(quarter.revenue.growth, year.revenue.growth);
    }
}
