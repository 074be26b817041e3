//! Posting new messages.

use reqwest::StatusCode;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::feed::FeedClient;
use crate::protocol::FeedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to send after trimming; no request was made.
    Skipped,
    /// The server answered 201 and the feed was refreshed.
    Sent,
    /// The server answered with another status; the input must stay as typed.
    Rejected(StatusCode),
}

impl FeedClient {
    /// Send `input` (trimmed) as a new message.
    ///
    /// Only an exact `201 Created` counts as success. On success the sink
    /// gets [`FeedEvent::Submitted`] followed by one immediate refresh.
    pub async fn submit(&self, input: &str) -> Result<SubmitOutcome> {
        let text = input.trim();
        if text.is_empty() {
            debug!("empty input, nothing to submit");
            return Ok(SubmitOutcome::Skipped);
        }

        let status = match self.transport.post_message(text).await {
            Ok(status) => status,
            Err(e) => {
                error!("failed to send message: {e}");
                self.sink.deliver(FeedEvent::SubmitFailed(e.to_string()));
                return Err(e);
            }
        };

        if status != StatusCode::CREATED {
            warn!(%status, "message rejected by server");
            self.sink.deliver(FeedEvent::SubmitRejected(status));
            return Ok(SubmitOutcome::Rejected(status));
        }

        self.sink.deliver(FeedEvent::Submitted);
        // Refresh failures are already logged and reported by refresh().
        let _ = self.refresh().await;
        Ok(SubmitOutcome::Sent)
    }
}
