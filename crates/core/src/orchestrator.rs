//! Fetch, substitute fallback data on failure, publish the result.
//!
//! A view always ends a cycle in `Ready`: live data with no error, or the bundled
//! fallback dataset verbatim together with the failure message. Cycles are not
//! coordinated with each other; whichever finishes last is what subscribers see.

use crate::gateway::GatewayError;
use serde::Serialize;
use std::future::Future;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loaded<T> {
    pub data: T,
    pub source: DataSource,
    pub error: Option<String>,
}

impl<T> Loaded<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
            error: None,
        }
    }

    pub fn fallback(data: T, error: impl Into<String>) -> Self {
        Self {
            data,
            source: DataSource::Fallback,
            error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }

    /// Non-blocking notice shown above a view that is rendering fallback data.
    pub fn warning_banner(&self) -> Option<String> {
        self.error.as_ref().map(|err| {
            format!("Backend Connection Error: {err} - Displaying mock data for demo purposes.")
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            data: f(self.data),
            source: self.source,
            error: self.error,
        }
    }
}

/// Source and error of a view assembled from several independently loaded parts.
pub fn combine_status<'a>(
    parts: impl IntoIterator<Item = (DataSource, Option<&'a str>)>,
) -> (DataSource, Option<String>) {
    let mut source = DataSource::Live;
    let mut errors = Vec::new();
    for (part_source, part_error) in parts {
        if part_source == DataSource::Fallback {
            source = DataSource::Fallback;
        }
        if let Some(err) = part_error {
            errors.push(err);
        }
    }

    let error = (!errors.is_empty()).then(|| errors.join("; "));
    (source, error)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState<T> {
    Loading,
    Ready(Loaded<T>),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&Loaded<T>> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(loaded) => Some(loaded),
        }
    }
}

/// Runs one gateway call; any failure yields the fallback dataset and the error text.
pub async fn fetch_with_fallback<T, Fut>(
    resource: &'static str,
    call: Fut,
    fallback: impl FnOnce() -> T,
) -> Loaded<T>
where
    Fut: Future<Output = Result<T, GatewayError>>,
{
    match call.await {
        Ok(data) => Loaded::live(data),
        Err(err) => {
            tracing::warn!(resource, error = %err, "API call failed, using fallback data");
            Loaded::fallback(fallback(), err.to_string())
        }
    }
}

/// Per-view state cell. Subscribers observe every transition.
#[derive(Debug)]
pub struct ViewStore<T> {
    tx: watch::Sender<ViewState<T>>,
}

impl<T: Clone> Default for ViewStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ViewStore<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewState::Loading);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    pub fn set_loading(&self) {
        self.tx.send_replace(ViewState::Loading);
    }

    pub fn set_ready(&self, loaded: Loaded<T>) {
        self.tx.send_replace(ViewState::Ready(loaded));
    }

    /// Loading, then Ready with live or fallback data.
    pub async fn load<Fut>(
        &self,
        resource: &'static str,
        call: Fut,
        fallback: impl FnOnce() -> T,
    ) -> Loaded<T>
    where
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        self.set_loading();
        let loaded = fetch_with_fallback(resource, call, fallback).await;
        self.set_ready(loaded.clone());
        loaded
    }

    /// Applies `f` to the ready data. Returns `None` while loading, leaving the state untouched.
    pub fn modify_data<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut out = None;
        self.tx.send_if_modified(|state| match state {
            ViewState::Loading => false,
            ViewState::Ready(loaded) => {
                out = Some(f(&mut loaded.data));
                true
            }
        });
        out
    }

    pub fn read_data<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.tx.borrow().ready().map(|loaded| f(&loaded.data))
    }
}
