use crate::domain::forms::NewUser;
use crate::domain::user::UserRecord;
use crate::fallback;
use crate::metrics::UserStats;
use crate::mutation::{create_record, delete_record, provisional_id, MutationError, MutationOutcome};
use crate::orchestrator::{Loaded, ViewState, ViewStore};
use crate::views::ViewContext;
use chrono::NaiveDate;

#[derive(Debug)]
pub struct UsersView {
    ctx: ViewContext,
    store: ViewStore<Vec<UserRecord>>,
}

impl UsersView {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            store: ViewStore::new(),
        }
    }

    pub fn state(&self) -> ViewState<Vec<UserRecord>> {
        self.store.snapshot()
    }

    pub async fn load(&self) -> Loaded<Vec<UserRecord>> {
        self.store
            .load("users", self.ctx.gateway.users(), fallback::users)
            .await
    }

    pub fn stats(&self, today: NaiveDate) -> Option<UserStats> {
        self.store
            .read_data(|users| UserStats::from_users(users, today))
    }

    /// Invalid input is rejected here and never reaches the gateway.
    pub async fn add(&self, form: NewUser) -> Result<MutationOutcome<UserRecord>, MutationError> {
        let form = form.validate()?;
        let today = chrono::Utc::now().date_naive();
        create_record(
            self.ctx.preferences.mutation_policy,
            &self.store,
            self.ctx.gateway.create_user(&form),
            || form.clone().into_record(provisional_id(), today),
        )
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<MutationOutcome<Option<UserRecord>>, MutationError> {
        delete_record(
            self.ctx.preferences.mutation_policy,
            &self.store,
            id,
            self.ctx.gateway.delete_user(id),
        )
        .await
    }
}
