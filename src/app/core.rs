//! Core ChatFeedApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tracing::{error, warn};

use crate::backend::run_backend;
use crate::buffer::FeedContainer;
use crate::config::{save_settings, FeedConfig, Settings};
use crate::input_state::InputState;
use crate::protocol::{FeedAction, FeedEvent};
use crate::ui;

pub struct ChatFeedApp {
    pub config: FeedConfig,

    // Render target, rebuilt on every successful fetch
    pub container: FeedContainer,

    // Composer (room variant only)
    pub input: InputState,

    // Channels for backend communication
    pub action_tx: Sender<FeedAction>,
    pub event_rx: Receiver<FeedEvent>,

    /// Backend failure shown under the header (startup problems only)
    pub backend_error: Option<String>,

    pub theme: ui::FeedTheme,

    // Settings persisted on exit
    settings: Settings,
    settings_path: Option<PathBuf>,
}

impl ChatFeedApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: FeedConfig,
        settings: Settings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<FeedAction>();
        let (event_tx, event_rx) = unbounded::<FeedEvent>();

        // Spawn the backend thread
        let backend_config = config.clone();
        let spawned = thread::Builder::new()
            .name("chatfeed-backend".into())
            .spawn(move || run_backend(backend_config, action_rx, event_tx));

        ui::apply_app_style(&cc.egui_ctx);

        let mut app = Self::with_channels(config, action_tx, event_rx);
        app.settings = settings;
        app.settings_path = settings_path;
        if let Err(e) = spawned {
            error!("failed to spawn backend thread: {e}");
            app.backend_error = Some(format!("Failed to start backend: {e}"));
        }
        app
    }

    /// Build the app around existing channels, without a window or backend.
    pub fn with_channels(
        config: FeedConfig,
        action_tx: Sender<FeedAction>,
        event_rx: Receiver<FeedEvent>,
    ) -> Self {
        Self {
            config,
            container: FeedContainer::new(),
            input: InputState::new(),
            action_tx,
            event_rx,
            backend_error: None,
            theme: ui::FeedTheme::dark(),
            settings: Settings::default(),
            settings_path: None,
        }
    }

    /// Ask the backend to post `text`. The input is cleared only once the
    /// server confirms.
    pub(crate) fn submit(&mut self, text: String) {
        if self.action_tx.send(FeedAction::Submit(text)).is_err() {
            warn!("backend is gone, message not sent");
            self.input.on_submit_failed();
        }
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        let settings = Settings {
            endpoint: Some(self.config.endpoint.to_string()),
            viewer_id: self.config.viewer_id.clone(),
            variant: self.config.variant,
            ..self.settings.clone()
        };
        if let Err(e) = save_settings(path, &settings) {
            error!("failed to save settings: {e}");
        }
    }
}

impl Drop for ChatFeedApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(FeedAction::Shutdown);
        // Persist settings on exit
        self.save_settings();
    }
}
