use crate::domain::forms::NewOrder;
use crate::domain::order::OrderRecord;
use crate::fallback;
use crate::filter::{filter_orders, OrderQuery};
use crate::metrics::OrderStats;
use crate::mutation::{create_record, delete_record, provisional_id, MutationError, MutationOutcome};
use crate::orchestrator::{Loaded, ViewState, ViewStore};
use crate::views::ViewContext;

#[derive(Debug)]
pub struct OrdersView {
    ctx: ViewContext,
    store: ViewStore<Vec<OrderRecord>>,
}

impl OrdersView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            store: ViewStore::new(),
        }
    }

    pub fn state(&self) -> ViewState<Vec<OrderRecord>> {
        self.store.snapshot()
    }

    pub async fn load(&self) -> Loaded<Vec<OrderRecord>> {
        self.store
            .load("orders", self.ctx.gateway.orders(), fallback::orders)
            .await
    }

    /// Recomputed from the current list on every call.
    pub fn visible(&self, query: &OrderQuery) -> Vec<OrderRecord> {
        self.store
            .read_data(|orders| filter_orders(orders, query).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> Option<OrderStats> {
        self.store.read_data(|orders| OrderStats::from_orders(orders))
    }

    pub async fn add(&self, form: NewOrder) -> Result<MutationOutcome<OrderRecord>, MutationError> {
        let form = form.validate()?;
        let today = chrono::Utc::now().date_naive();
        create_record(
            self.ctx.preferences.mutation_policy,
            &self.store,
            self.ctx.gateway.create_order(&form),
            || form.clone().into_record(provisional_id(), today),
        )
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<MutationOutcome<Option<OrderRecord>>, MutationError> {
        delete_record(
            self.ctx.preferences.mutation_policy,
            &self.store,
            id,
            self.ctx.gateway.delete_order(id),
        )
        .await
    }
}
