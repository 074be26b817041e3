//! egui rendering for the feed window.
//!
//! - `messages`: the feed container
//! - `theme`: colors and base style

pub mod messages;
pub mod theme;

pub use messages::render_messages;
pub use theme::{apply_app_style, FeedTheme};
