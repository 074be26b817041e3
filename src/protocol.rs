use crossbeam_channel::Sender;
use reqwest::StatusCode;

use crate::model::Message;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    /// Post a new message (untrimmed, as typed)
    Submit(String),
    /// Fetch and render now, outside the timer
    Refresh,
    /// Stop polling and leave the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A fetch succeeded; the container must be re-rendered from this list
    Messages(Vec<Message>),
    /// A fetch cycle was abandoned (status, network or decode failure)
    FetchFailed(String),
    /// The server accepted a message with 201
    Submitted,
    /// The server answered a submit with something other than 201
    SubmitRejected(StatusCode),
    /// The submit request itself failed
    SubmitFailed(String),
    /// Backend could not start or stopped unexpectedly
    Error(String),
}

/// Receiver side of the render path.
pub trait FeedSink: Send + Sync + 'static {
    fn deliver(&self, event: FeedEvent);
}

impl FeedSink for Sender<FeedEvent> {
    fn deliver(&self, event: FeedEvent) {
        // If send fails, the UI has gone away - nothing left to render into
        let _ = self.send(event);
    }
}
