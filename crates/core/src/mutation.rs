//! Create/delete against the gateway, then mirror the change into a view's list.
//!
//! `Optimistic` keeps the UI reflecting the attempted change even when the backend
//! rejects or never sees it. `Strict` only touches the list after the backend confirms.

use crate::domain::forms::ValidationError;
use crate::domain::{remove_by_id, Keyed};
use crate::gateway::GatewayError;
use crate::orchestrator::ViewStore;
use std::future::Future;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationPolicy {
    #[default]
    Optimistic,
    Strict,
}

impl FromStr for MutationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(MutationPolicy::Optimistic),
            "strict" => Ok(MutationPolicy::Strict),
            other => anyhow::bail!("unknown mutation policy: {other}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug)]
pub enum MutationOutcome<T> {
    /// The backend accepted the change.
    Confirmed(T),
    /// Applied locally only; the backend call failed with `error`.
    Provisional { value: T, error: GatewayError },
}

impl<T> MutationOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            MutationOutcome::Confirmed(value) | MutationOutcome::Provisional { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            MutationOutcome::Confirmed(value) | MutationOutcome::Provisional { value, .. } => value,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, MutationOutcome::Confirmed(_))
    }
}

/// Temporary id for a record the backend never acknowledged: milliseconds since the epoch.
/// Nothing reconciles it with a server-assigned id later.
pub fn provisional_id() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Yields the removed record, if the list held one with `id`.
pub async fn delete_record<T, Fut>(
    policy: MutationPolicy,
    store: &ViewStore<Vec<T>>,
    id: i64,
    call: Fut,
) -> Result<MutationOutcome<Option<T>>, MutationError>
where
    T: Keyed + Clone,
    Fut: Future<Output = Result<(), GatewayError>>,
{
    match call.await {
        Ok(()) => {
            let removed = store.modify_data(|records| remove_by_id(records, id)).flatten();
            Ok(MutationOutcome::Confirmed(removed))
        }
        Err(err) => match policy {
            MutationPolicy::Strict => Err(err.into()),
            MutationPolicy::Optimistic => {
                tracing::warn!(id, error = %err, "delete failed; removing locally anyway");
                let removed = store.modify_data(|records| remove_by_id(records, id)).flatten();
                Ok(MutationOutcome::Provisional {
                    value: removed,
                    error: err,
                })
            }
        },
    }
}

/// Appends the created record. `provisional` builds the stand-in used when the call fails
/// under the optimistic policy.
pub async fn create_record<T, Fut>(
    policy: MutationPolicy,
    store: &ViewStore<Vec<T>>,
    call: Fut,
    provisional: impl FnOnce() -> T,
) -> Result<MutationOutcome<T>, MutationError>
where
    T: Keyed + Clone,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    match call.await {
        Ok(record) => {
            store.modify_data(|records| records.push(record.clone()));
            Ok(MutationOutcome::Confirmed(record))
        }
        Err(err) => match policy {
            MutationPolicy::Strict => Err(err.into()),
            MutationPolicy::Optimistic => {
                let record = provisional();
                tracing::warn!(
                    id = record.id(),
                    error = %err,
                    "create failed; keeping provisional record"
                );
                store.modify_data(|records| records.push(record.clone()));
                Ok(MutationOutcome::Provisional {
                    value: record,
                    error: err,
                })
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRecord;
    use crate::fallback;
    use crate::gateway::fake::FakeGateway;
    use crate::gateway::DashboardGateway;
    use crate::orchestrator::Loaded;

    fn users_store() -> ViewStore<Vec<UserRecord>> {
        let store = ViewStore::new();
        store.set_ready(Loaded::fallback(fallback::users(), "down"));
        store
    }

    fn ids(store: &ViewStore<Vec<UserRecord>>) -> Vec<i64> {
        store
            .read_data(|users| users.iter().map(|u| u.id).collect())
            .unwrap()
    }

    #[tokio::test]
    async fn optimistic_delete_removes_exactly_one_even_on_failure() {
        let store = users_store();
        let gw = FakeGateway::failing();
        let outcome = delete_record(MutationPolicy::Optimistic, &store, 3, gw.delete_user(3))
            .await
            .unwrap();
        assert!(!outcome.is_confirmed());
        assert_eq!(outcome.value().as_ref().map(|u| u.id), Some(3));
        assert_eq!(ids(&store), vec![1, 2, 4, 5, 6]);
    }

    #[tokio::test]
    async fn strict_delete_keeps_list_on_failure() {
        let store = users_store();
        let gw = FakeGateway::failing();
        let err = delete_record(MutationPolicy::Strict, &store, 3, gw.delete_user(3))
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::Gateway(_)));
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_list_untouched() {
        let store = users_store();
        let gw = FakeGateway::failing();
        let outcome = delete_record(MutationPolicy::Optimistic, &store, 99, gw.delete_user(99))
            .await
            .unwrap();
        assert!(outcome.value().is_none());
        assert_eq!(ids(&store).len(), 6);
    }

    #[tokio::test]
    async fn optimistic_create_appends_provisional_record() {
        let store = users_store();
        let gw = FakeGateway::failing();
        let form = crate::domain::forms::NewUser {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            role: Default::default(),
        };
        let today = chrono::NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let outcome = create_record(
            MutationPolicy::Optimistic,
            &store,
            gw.create_user(&form),
            || form.clone().into_record(1_725_000_000_000, today),
        )
        .await
        .unwrap();
        assert!(!outcome.is_confirmed());
        assert_eq!(ids(&store).last().copied(), Some(1_725_000_000_000));
    }

    #[tokio::test]
    async fn strict_create_propagates_failure() {
        let store = users_store();
        let gw = FakeGateway::failing();
        let form = crate::domain::forms::NewUser {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            role: Default::default(),
        };
        let res = create_record(MutationPolicy::Strict, &store, gw.create_user(&form), || {
            form.clone().into_record(0, chrono::NaiveDate::default())
        })
        .await;
        assert!(res.is_err());
        assert_eq!(ids(&store).len(), 6);
    }

    #[test]
    fn provisional_ids_are_epoch_millis() {
        assert!(provisional_id() > 1_600_000_000_000);
        assert_eq!("STRICT".parse::<MutationPolicy>().unwrap(), MutationPolicy::Strict);
    }
}
