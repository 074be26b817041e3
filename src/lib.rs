//! chatfeed library.
//!
//! A polling message-feed client: the poller fetches the message list on a
//! timer, the renderer turns it into view items, and the submitter posts new
//! messages and triggers an immediate refresh. The egui shell in `app` and
//! `ui` is one consumer of that core.

pub mod app;
pub mod backend;
pub mod buffer;
pub mod config;
pub mod cookies;
pub mod error;
pub mod feed;
pub mod input_state;
pub mod logging;
pub mod model;
pub mod poller;
pub mod protocol;
pub mod render;
pub mod submitter;
pub mod transport;
pub mod ui;

#[cfg(test)]
mod integration_tests;

pub use error::{FeedError, Result};
pub use feed::{FeedClient, RefreshOutcome};
pub use model::{Message, MessageKind, TimestampField};
pub use submitter::SubmitOutcome;
