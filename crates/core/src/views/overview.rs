use crate::domain::series::{ProductSalesRecord, TimeSeriesPoint, TrafficShare};
use crate::domain::stats::StatsSnapshot;
use crate::fallback;
use crate::metrics::PerformanceMetrics;
use crate::orchestrator::{combine_status, fetch_with_fallback, Loaded, ViewState, ViewStore};
use crate::polling::PollingScope;
use crate::views::ViewContext;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewData {
    pub stats: StatsSnapshot,
    pub revenue: Vec<TimeSeriesPoint>,
    pub sales: Vec<ProductSalesRecord>,
    pub traffic: Vec<TrafficShare>,
    pub metrics: PerformanceMetrics,
}

/// Landing view: stats cards, revenue and sales series. The only view that polls.
#[derive(Debug)]
pub struct OverviewView {
    ctx: ViewContext,
    store: ViewStore<OverviewData>,
}

impl OverviewView {
    pub fn new(ctx: ViewContext) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            store: ViewStore::new(),
        })
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    pub fn state(&self) -> ViewState<OverviewData> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<OverviewData>> {
        self.store.subscribe()
    }

    /// One fetch cycle. Each resource falls back on its own, so a single failing
    /// endpoint does not discard the others' live data.
    pub async fn refresh(&self) -> Loaded<OverviewData> {
        self.store.set_loading();

        let gw = &self.ctx.gateway;
        let (revenue, sales, stats) = tokio::join!(
            fetch_with_fallback("revenue", gw.revenue(), fallback::revenue_series),
            fetch_with_fallback("sales", gw.sales(), fallback::sales),
            fetch_with_fallback("stats", gw.stats(), fallback::stats),
        );

        let (source, error) = combine_status([
            (revenue.source, revenue.error.as_deref()),
            (sales.source, sales.error.as_deref()),
            (stats.source, stats.error.as_deref()),
        ]);

        let metrics = PerformanceMetrics::from_series(&revenue.data);
        let loaded = Loaded {
            data: OverviewData {
                stats: stats.data,
                revenue: revenue.data,
                sales: sales.data,
                traffic: fallback::traffic_sources(),
                metrics,
            },
            source,
            error,
        };

        self.store.set_ready(loaded.clone());
        loaded
    }

    /// Fetches immediately. With auto-refresh on, keeps refreshing in the background
    /// until the returned scope is cancelled or dropped.
    pub async fn mount(self: &Arc<Self>) -> Option<PollingScope> {
        let prefs = self.ctx.preferences;
        if !prefs.auto_refresh {
            self.refresh().await;
            return None;
        }

        let view = Arc::clone(self);
        Some(PollingScope::spawn("overview", prefs.refresh_interval, move || {
            let view = Arc::clone(&view);
            async move {
                view.refresh().await;
            }
        }))
    }
}
