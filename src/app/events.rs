//! Event processing from backend

use tracing::debug;

use super::ChatFeedApp;
use crate::protocol::FeedEvent;
use crate::render::render_into;

impl ChatFeedApp {
    /// Drain all pending events from the backend.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.process_single_event(event);
        }
    }

    pub(crate) fn process_single_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Messages(messages) => {
                render_into(
                    &mut self.container,
                    self.config.variant,
                    self.config.viewer_id.as_deref(),
                    &messages,
                );
            }
            FeedEvent::Submitted => self.input.on_submitted(),
            FeedEvent::SubmitRejected(_) | FeedEvent::SubmitFailed(_) => {
                // Already logged by the backend; the text stays for a retry.
                self.input.on_submit_failed();
            }
            FeedEvent::FetchFailed(reason) => {
                // No visible change: the next tick is the only recovery.
                debug!("fetch failed: {reason}");
            }
            FeedEvent::Error(e) => self.backend_error = Some(e),
        }
    }
}
