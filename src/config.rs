use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{FeedError, Result};

// Default configuration
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Which chat page the feed imitates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedVariant {
    /// Class-room chat: avatars, "name • date" header, writable.
    #[default]
    Room,
    /// Mission chat: colored bubbles, badges, attachments, read-only.
    Mission,
}

impl FeedVariant {
    /// Whether an empty feed shows the "no messages yet" block.
    pub fn shows_placeholder(self) -> bool {
        matches!(self, FeedVariant::Mission)
    }

    /// Whether the page has an input field and a send control.
    pub fn accepts_input(self) -> bool {
        matches!(self, FeedVariant::Room)
    }

    pub fn title(self) -> &'static str {
        match self {
            FeedVariant::Room => "Chat da sala",
            FeedVariant::Mission => "Chat da missão",
        }
    }
}

/// How responses of overlapping fetches are applied.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchOrdering {
    /// Apply every response as it completes, even an older one.
    #[default]
    Unordered,
    /// Drop a response when a newer request has already been applied.
    LatestOnly,
}

/// Persisted settings, as found in `settings.json`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub viewer_id: Option<String>,
    pub variant: FeedVariant,
    /// `Cookie:`-style string used to seed the session, e.g. `sessionid=..; csrftoken=..`
    pub cookie: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub latest_only: bool,
    pub log_level: Option<String>,
}

/// Fully resolved configuration for one feed.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub endpoint: Url,
    pub viewer_id: Option<String>,
    pub variant: FeedVariant,
    pub poll_interval: Duration,
    pub ordering: FetchOrdering,
    pub cookie: Option<String>,
}

impl FeedConfig {
    pub fn new(endpoint: Url, variant: FeedVariant) -> Self {
        Self {
            endpoint,
            viewer_id: None,
            variant,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ordering: FetchOrdering::default(),
            cookie: None,
        }
    }
}

impl Settings {
    /// Turn settings into a feed configuration.
    ///
    /// Returns `Ok(None)` when no endpoint is configured: the feed is simply
    /// not started in that case.
    pub fn resolve(&self) -> Result<Option<FeedConfig>> {
        let Some(raw) = self.endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
            return Ok(None);
        };

        let endpoint = parse_endpoint(raw)?;

        let interval_ms = self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if interval_ms == 0 {
            return Err(FeedError::Config("poll interval must be greater than zero".into()));
        }

        Ok(Some(FeedConfig {
            endpoint,
            viewer_id: self
                .viewer_id
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
            variant: self.variant,
            poll_interval: Duration::from_millis(interval_ms),
            ordering: if self.latest_only {
                FetchOrdering::LatestOnly
            } else {
                FetchOrdering::Unordered
            },
            cookie: self.cookie.clone().filter(|c| !c.trim().is_empty()),
        }))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Only absolute http(s) URLs can be polled.
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| FeedError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FeedError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "chatfeed", "chatfeed")?;
    Some(proj.config_dir().join("settings.json"))
}

/// Load settings from `path`; a missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
