//! Backend thread: a Tokio runtime hosting the poller and the submitter.
//!
//! The UI talks to it only through channels:
//! - `FeedAction`s come in (submit, refresh, shutdown)
//! - `FeedEvent`s go out (messages to render, submit results, errors)

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

use crate::config::FeedConfig;
use crate::feed::FeedClient;
use crate::poller;
use crate::protocol::{FeedAction, FeedEvent};
use crate::transport::HttpTransport;

/// How often the loop checks for UI actions.
const ACTION_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the backend event loop on a tokio runtime
pub fn run_backend(config: FeedConfig, action_rx: Receiver<FeedAction>, event_tx: Sender<FeedEvent>) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to create Tokio runtime: {e}");
            let _ = event_tx.send(FeedEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(async move {
        let transport = match HttpTransport::new(config.endpoint.clone(), config.cookie.as_deref()) {
            Ok(t) => t,
            Err(e) => {
                error!("failed to build HTTP client: {e}");
                let _ = event_tx.send(FeedEvent::Error(e.to_string()));
                return;
            }
        };

        info!(endpoint = %config.endpoint, variant = ?config.variant, "backend started");
        let client = Arc::new(FeedClient::new(
            Arc::new(transport),
            Arc::new(event_tx),
            config.ordering,
        ));
        drive(client, config.poll_interval, action_rx).await;
        info!("backend stopped");
    });
}

/// Poll `client` every `interval` and serve UI actions until shutdown or
/// until the UI drops its sender.
pub async fn drive(client: Arc<FeedClient>, interval: Duration, action_rx: Receiver<FeedAction>) {
    let poller = poller::start(Arc::clone(&client), interval);

    'serve: loop {
        // Check for actions from the UI (non-blocking)
        loop {
            match action_rx.try_recv() {
                Ok(FeedAction::Submit(text)) => {
                    let client = Arc::clone(&client);
                    tokio::spawn(async move {
                        let _ = client.submit(&text).await;
                    });
                }
                Ok(FeedAction::Refresh) => {
                    let client = Arc::clone(&client);
                    tokio::spawn(async move {
                        let _ = client.refresh().await;
                    });
                }
                Ok(FeedAction::Shutdown) => {
                    debug!("shutdown requested");
                    break 'serve;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!("UI went away");
                    break 'serve;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        tokio::time::sleep(ACTION_POLL_INTERVAL).await;
    }

    poller.shutdown().await;
}
