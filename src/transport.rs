//! HTTP access to the feed endpoint.
//!
//! The poller and submitter only see the [`FeedTransport`] trait, which keeps
//! them testable without a server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::cookies::{cookie_value, split_pairs, CSRF_COOKIE};
use crate::error::{FeedError, Result};
use crate::model::{Message, NewMessage};

/// Header the backend checks on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait FeedTransport: Send + Sync + 'static {
    /// `GET <endpoint>`. Any non-2xx status is reported as [`FeedError::Status`].
    async fn fetch_messages(&self) -> Result<Vec<Message>>;

    /// `POST <endpoint>` with `{"texto": text}`; returns the raw status.
    async fn post_message(&self, text: &str) -> Result<StatusCode>;
}

/// reqwest-backed transport with a cookie store standing in for the
/// browser's same-origin credentials.
pub struct HttpTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
    endpoint: Url,
}

impl HttpTransport {
    /// Build a transport for `endpoint`, seeding the cookie store from a
    /// `Cookie:`-style string (`sessionid=..; csrftoken=..`).
    pub fn new(endpoint: Url, cookie: Option<&str>) -> Result<Self> {
        Self::with_builder(reqwest::Client::builder(), endpoint, cookie)
    }

    fn with_builder(builder: reqwest::ClientBuilder, endpoint: Url, cookie: Option<&str>) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        if let Some(cookie) = cookie {
            for pair in split_pairs(cookie) {
                jar.add_cookie_str(pair, &endpoint);
            }
        }

        let client = builder
            .cookie_provider(Arc::clone(&jar))
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("chatfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            jar,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Current value of the `csrftoken` cookie for the endpoint, if any.
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.endpoint)?;
        let header = header.to_str().ok()?;
        cookie_value(header, CSRF_COOKIE).map(str::to_owned)
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch_messages(&self) -> Result<Vec<Message>> {
        let res = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_message(&self, text: &str) -> Result<StatusCode> {
        let mut req = self
            .client
            .post(self.endpoint.clone())
            .json(&NewMessage { text });

        match self.csrf_token() {
            Some(token) => req = req.header(CSRF_HEADER, token),
            None => debug!("no {CSRF_COOKIE} cookie, posting without {CSRF_HEADER}"),
        }

        let res = req.send().await?;
        Ok(res.status())
    }
}
