//! Application module structure for ChatFeedApp
//!
//! - `core`: ChatFeedApp struct and initialization
//! - `events`: Event processing from backend
//! - `update`: Main update loop
//! - `ui::panels`: Header and central feed panel
//! - `ui::input`: Message composer with the send control

pub mod core;
pub mod events;
pub mod ui;
pub mod update;

// Re-export ChatFeedApp for public API
pub use self::core::ChatFeedApp;
