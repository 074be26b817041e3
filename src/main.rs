//! chatfeed - desktop client for a polling JSON chat feed
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Backend thread: runs a Tokio runtime polling the feed endpoint
//! - Communication via crossbeam channels

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing::{debug, error};

use chatfeed::app::ChatFeedApp;
use chatfeed::config::{self, FeedVariant};
use chatfeed::logging;

#[derive(Parser, Debug)]
#[command(name = "chatfeed", version, about = "Polling chat feed client")]
struct Cli {
    /// Feed endpoint (GET lists messages, POST adds one).
    #[arg(long, env = "CHATFEED_ENDPOINT")]
    endpoint: Option<String>,

    /// Your user id, used to tell your own messages apart.
    #[arg(long, env = "CHATFEED_VIEWER_ID")]
    viewer_id: Option<String>,

    /// Page layout to use.
    #[arg(long, value_enum)]
    variant: Option<FeedVariant>,

    /// Session cookies, e.g. "sessionid=...; csrftoken=...".
    #[arg(long, env = "CHATFEED_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Poll interval in milliseconds.
    #[arg(long = "interval-ms")]
    interval_ms: Option<u64>,

    /// Drop responses that arrive after a newer one was rendered.
    #[arg(long)]
    latest_only: bool,

    /// Settings file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().or_else(config::settings_path);
    let mut settings = match settings_path.as_deref().map(config::load_settings) {
        Some(Ok(s)) => s,
        Some(Err(e)) => {
            logging::init(config::DEFAULT_LOG_LEVEL);
            error!("failed to load settings: {e}");
            return Ok(());
        }
        None => config::Settings::default(),
    };

    // Saved back on exit; session cookies from the command line stay out of it
    let file_settings = settings.clone();

    // Command line and environment win over the settings file
    if cli.endpoint.is_some() {
        settings.endpoint = cli.endpoint;
    }
    if cli.viewer_id.is_some() {
        settings.viewer_id = cli.viewer_id;
    }
    if let Some(variant) = cli.variant {
        settings.variant = variant;
    }
    if cli.cookie.is_some() {
        settings.cookie = cli.cookie;
    }
    if cli.interval_ms.is_some() {
        settings.poll_interval_ms = cli.interval_ms;
    }
    settings.latest_only |= cli.latest_only;

    logging::init(settings.log_level());

    let feed = match settings.resolve() {
        Ok(Some(feed)) => feed,
        Ok(None) => {
            debug!("no endpoint configured, nothing to do");
            return Ok(());
        }
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([320.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        feed.variant.title(),
        options,
        Box::new(move |cc| Ok(Box::new(ChatFeedApp::new(cc, feed, file_settings, settings_path)))),
    )
}
