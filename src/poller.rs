//! Recurring fetch timer with an explicit start/stop lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::feed::FeedClient;

/// Owns the polling task. Dropping the handle stops the timer.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

/// Start polling: one fetch right away, then one every `interval`.
///
/// Each tick runs its fetch as its own task, so a fetch slower than the
/// interval overlaps with the next one. Must be called inside a Tokio runtime.
pub fn start(client: Arc<FeedClient>, interval: Duration) -> PollerHandle {
    let cancel = CancellationToken::new();

    let task = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            info!("feed poller started (interval={interval:?})");
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!("feed poller stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        debug!("poll tick");
                        let client = Arc::clone(&client);
                        let cancel = cancel.clone();
                        tokio::spawn(async move {
                            tokio::select! {
                                biased;
                                _ = cancel.cancelled() => {}
                                _ = client.refresh() => {}
                            }
                        });
                    }
                }
            }
        })
    };

    PollerHandle {
        cancel,
        task: Some(task),
    }
}

impl PollerHandle {
    /// Stop the timer and abandon in-flight fetches. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop and wait for the timer task to finish.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
