use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Background refresh loop bound to a view's lifetime.
///
/// Refreshes once immediately, then once per `every`. Ticks never overlap each other.
/// Neither `cancel` nor drop interrupts a refresh already in flight, so the view it
/// feeds always settles in `Ready`. `cancel` additionally waits for the loop to exit.
#[derive(Debug)]
pub struct PollingScope {
    name: &'static str,
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PollingScope {
    pub fn spawn<F, Fut>(name: &'static str, every: Duration, mut refresh: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let every = every.max(MIN_INTERVAL);
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(scope = name, ?every, "polling started");

            loop {
                tokio::select! {
                    biased;
                    _ = stopped.changed() => break,
                    _ = ticker.tick() => {}
                }
                tracing::debug!(scope = name, "polling refresh");
                refresh().await;
            }

            tracing::info!(scope = name, "polling stopped");
        });

        Self {
            name,
            stop,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the loop and waits until it has exited.
    pub async fn cancel(mut self) {
        self.stop.send_replace(true);
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    tracing::error!(scope = self.name, error = %err, "polling task panicked");
                }
            }
        }
    }
}

impl Drop for PollingScope {
    fn drop(&mut self) {
        // The loop observes this before its next tick; the detached task then exits.
        self.stop.send_replace(true);
    }
}
