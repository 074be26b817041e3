//! The fetch-and-render path shared by the poller and the submitter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error};

use crate::config::FetchOrdering;
use crate::error::{FeedError, Result};
use crate::protocol::{FeedEvent, FeedSink};
use crate::transport::FeedTransport;

/// Result of one fetch cycle that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list (of this many messages) was handed to the renderer.
    Rendered(usize),
    /// A newer response was already rendered; this one was dropped.
    Stale,
}

/// One feed endpoint plus the sink its results are rendered into.
pub struct FeedClient {
    pub(crate) transport: Arc<dyn FeedTransport>,
    pub(crate) sink: Arc<dyn FeedSink>,
    ordering: FetchOrdering,
    /// Sequence number of the last request issued.
    issued: AtomicU64,
    /// Highest sequence number rendered so far (LatestOnly only).
    rendered: AtomicU64,
}

impl FeedClient {
    pub fn new(
        transport: Arc<dyn FeedTransport>,
        sink: Arc<dyn FeedSink>,
        ordering: FetchOrdering,
    ) -> Self {
        Self {
            transport,
            sink,
            ordering,
            issued: AtomicU64::new(0),
            rendered: AtomicU64::new(0),
        }
    }

    /// Fetch the message list once and deliver it to the sink.
    ///
    /// Failures are logged and reported as [`FeedEvent::FetchFailed`]; the
    /// container is left as it was.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let messages = match self.transport.fetch_messages().await {
            Ok(messages) => messages,
            Err(e) => {
                match &e {
                    FeedError::Status(status) => debug!(seq, %status, "fetch abandoned"),
                    other => error!(seq, "failed to fetch messages: {other}"),
                }
                self.sink.deliver(FeedEvent::FetchFailed(e.to_string()));
                return Err(e);
            }
        };

        if self.ordering == FetchOrdering::LatestOnly {
            let newest = self.rendered.fetch_max(seq, Ordering::SeqCst);
            if newest > seq {
                debug!(seq, newest, "dropping stale response");
                return Ok(RefreshOutcome::Stale);
            }
        }

        let count = messages.len();
        debug!(seq, count, "rendering messages");
        self.sink.deliver(FeedEvent::Messages(messages));
        Ok(RefreshOutcome::Rendered(count))
    }

    /// Number of fetches issued so far, including failed ones.
    pub fn fetches_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn test_refresh_delivers_in_server_order() {
        let transport = FakeTransport::new();
        let sink = RecordingSink::new();
        let msgs = vec![message("Ana", "1"), message("Bia", "2"), message("Ana", "3")];
        transport.push_get(Reply::Messages(msgs.clone()));

        let client = client(&transport, &sink, FetchOrdering::Unordered);
        assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Rendered(3));
        assert_eq!(sink.renders(), vec![msgs]);
    }

    #[tokio::test]
    async fn test_non_success_status_leaves_container_alone() {
        let transport = FakeTransport::new();
        let sink = RecordingSink::new();
        transport.push_get(Reply::Status(StatusCode::FORBIDDEN));

        let client = client(&transport, &sink, FetchOrdering::Unordered);
        assert!(matches!(client.refresh().await, Err(FeedError::Status(StatusCode::FORBIDDEN))));
        assert!(sink.renders().is_empty());
        assert!(matches!(sink.events().as_slice(), [FeedEvent::FetchFailed(_)]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let transport = FakeTransport::new();
        let sink = RecordingSink::new();
        transport.push_get(Reply::Malformed);

        let client = client(&transport, &sink, FetchOrdering::Unordered);
        assert!(matches!(client.refresh().await, Err(FeedError::Decode(_))));
        assert!(sink.renders().is_empty());
        assert_eq!(client.fetches_issued(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_fetches_apply_out_of_order() {
        let transport = FakeTransport::new();
        let sink = RecordingSink::new();
        let old = vec![message("Ana", "old")];
        let new = vec![message("Ana", "old"), message("Bia", "new")];
        transport.push_get(Reply::Delayed(Duration::from_millis(150), old.clone()));
        transport.push_get(Reply::Messages(new.clone()));

        let client = client(&transport, &sink, FetchOrdering::Unordered);
        let slow = tokio::spawn({
            let client = client.clone();
            async move { client.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
        client.refresh().await.unwrap();
        slow.await.unwrap().unwrap();

        // The slow, older response lands last and wins.
        assert_eq!(sink.renders(), vec![new, old]);
    }

    #[tokio::test]
    async fn test_latest_only_drops_stale_response() {
        let transport = FakeTransport::new();
        let sink = RecordingSink::new();
        let old = vec![message("Ana", "old")];
        let new = vec![message("Ana", "old"), message("Bia", "new")];
        transport.push_get(Reply::Delayed(Duration::from_millis(150), old));
        transport.push_get(Reply::Messages(new.clone()));

        let client = client(&transport, &sink, FetchOrdering::LatestOnly);
        let slow = tokio::spawn({
            let client = client.clone();
            async move { client.refresh().await }
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
        client.refresh().await.unwrap();

        assert_eq!(slow.await.unwrap().unwrap(), RefreshOutcome::Stale);
        assert_eq!(sink.renders(), vec![new]);
    }
}
