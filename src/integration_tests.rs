//! Integration tests for chatfeed
//!
//! These exercise full workflows across the backend loop, the feed client,
//! the renderer and the UI-side state, with a scripted transport in place of
//! the HTTP server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use reqwest::StatusCode;
use url::Url;

use crate::app::ChatFeedApp;
use crate::backend::drive;
use crate::config::{FeedConfig, FeedVariant, FetchOrdering};
use crate::feed::testing::{message, FakeTransport, Reply, Request};
use crate::feed::FeedClient;
use crate::input_state::ComposerInput;
use crate::model::{Message, MessageKind};
use crate::protocol::{FeedAction, FeedEvent};
use crate::render::{Alignment, Body, BubbleStyle, FeedItem, EMPTY_FEED_TEXT};

/// Long enough that only the immediate fetch happens during a test.
const NO_TICKS: Duration = Duration::from_secs(3600);

struct Harness {
    app: ChatFeedApp,
    transport: Arc<FakeTransport>,
    backend: tokio::task::JoinHandle<()>,
}

impl Harness {
    fn start(variant: FeedVariant, viewer_id: Option<&str>, transport: Arc<FakeTransport>) -> Self {
        let (action_tx, action_rx) = unbounded::<FeedAction>();
        let (event_tx, event_rx) = unbounded::<FeedEvent>();

        let client = Arc::new(FeedClient::new(
            transport.clone(),
            Arc::new(event_tx),
            FetchOrdering::Unordered,
        ));
        let backend = tokio::spawn(drive(client, NO_TICKS, action_rx));

        let mut config = FeedConfig::new(
            Url::parse("http://localhost:8000/chat/mensagens/").unwrap(),
            variant,
        );
        config.viewer_id = viewer_id.map(str::to_owned);

        Self {
            app: ChatFeedApp::with_channels(config, action_tx, event_rx),
            transport,
            backend,
        }
    }

    /// Pump backend events into the app until `done` holds.
    async fn wait_for(&mut self, done: impl Fn(&ChatFeedApp, &FakeTransport) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            self.app.process_events();
            if done(&self.app, &*self.transport) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for backend");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    fn type_and_press_enter(&mut self, text: &str) {
        self.app.input.message_input = text.to_string();
        if let Some(text) = self.app.input.handle(ComposerInput::Enter { shift: false }) {
            self.app.submit(text);
        }
    }

    async fn stop(self) {
        let Harness { app, backend, .. } = self;
        // Dropping the app sends Shutdown.
        drop(app);
        backend.await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_initial_fetch_renders_room_scenario() {
    let transport = FakeTransport::new();
    let messages: Vec<Message> = serde_json::from_str(
        r#"[{"usuario_nome":"Ana","criado_em":"2024-01-01T10:00:00Z","texto":"oi"}]"#,
    )
    .unwrap();
    transport.push_get(Reply::Messages(messages));

    let mut h = Harness::start(FeedVariant::Room, Some("1"), transport);
    h.wait_for(|app, _| app.container.render_count() == 1).await;

    let items = h.app.container.items();
    assert_eq!(items.len(), 1);
    let view = items[0].as_message().unwrap();
    assert!(view.header.starts_with("Ana • "));
    assert_ne!(view.header, "Ana • Invalid Date");
    assert_eq!(view.body, Some(Body::Text("oi".into())));
    h.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blank_enter_sends_nothing() {
    let transport = FakeTransport::new();
    let mut h = Harness::start(FeedVariant::Room, None, transport);
    h.wait_for(|_, t| t.get_count() == 1).await;

    h.type_and_press_enter("  ");
    tokio::time::sleep(Duration::from_millis(120)).await;
    h.app.process_events();

    assert_eq!(h.transport.requests(), vec![Request::Get]);
    assert_eq!(h.app.input.message_input, "  ");
    h.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_created_clears_input_and_refreshes_once() {
    let transport = FakeTransport::new();
    transport.push_get(Reply::Messages(Vec::new()));
    transport.push_post(Ok(StatusCode::CREATED));
    transport.push_get(Reply::Messages(vec![message("Eu", "olá")]));

    let mut h = Harness::start(FeedVariant::Room, None, transport);
    h.wait_for(|app, _| app.container.render_count() == 1).await;

    h.type_and_press_enter("olá");
    h.wait_for(|app, _| app.container.render_count() == 2).await;

    assert_eq!(h.app.input.message_input, "");
    assert!(!h.app.input.sending);
    assert_eq!(
        h.transport.requests(),
        vec![Request::Get, Request::Post("olá".into()), Request::Get]
    );
    assert_eq!(h.app.container.len(), 1);
    h.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_submit_keeps_input() {
    let transport = FakeTransport::new();
    transport.push_post(Ok(StatusCode::FORBIDDEN));
    transport.push_post(Err("connection refused".into()));

    let mut h = Harness::start(FeedVariant::Room, None, transport);
    h.wait_for(|_, t| t.get_count() == 1).await;

    h.type_and_press_enter("tentativa");
    h.wait_for(|app, _| !app.input.sending).await;
    assert_eq!(h.app.input.message_input, "tentativa");

    h.type_and_press_enter("tentativa");
    h.wait_for(|app, _| !app.input.sending).await;
    assert_eq!(h.app.input.message_input, "tentativa");

    // Only the initial fetch: failures never refresh.
    assert_eq!(h.transport.get_count(), 1);
    h.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mission_feed_placeholder_then_styled_messages() {
    let transport = FakeTransport::new();
    transport.push_get(Reply::Messages(Vec::new()));
    transport.push_get(Reply::Messages(vec![
        Message {
            author_id: Some("7".into()),
            ..message("Eu", "primeira")
        },
        Message {
            author_id: Some("7".into()),
            kind: MessageKind::Correction,
            ..message("Eu", "corrigido")
        },
    ]));

    let mut h = Harness::start(FeedVariant::Mission, Some("7"), transport);
    h.wait_for(|app, _| app.container.render_count() == 1).await;
    assert_eq!(h.app.container.items(), &[FeedItem::Placeholder(EMPTY_FEED_TEXT)]);

    h.app.action_tx.send(FeedAction::Refresh).unwrap();
    h.wait_for(|app, _| app.container.render_count() == 2).await;

    let views: Vec<_> = h.app.container.items().iter().filter_map(FeedItem::as_message).collect();
    assert_eq!(views.len(), 2);
    assert_eq!((views[0].alignment, views[0].style), (Alignment::End, BubbleStyle::Own));
    assert_eq!(views[1].style, BubbleStyle::Correction);
    h.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failed_fetch_keeps_previous_render() {
    let transport = FakeTransport::new();
    transport.push_get(Reply::Messages(vec![message("Ana", "oi")]));
    transport.push_get(Reply::Status(StatusCode::BAD_GATEWAY));

    let mut h = Harness::start(FeedVariant::Room, None, transport);
    h.wait_for(|app, _| app.container.render_count() == 1).await;

    h.app.action_tx.send(FeedAction::Refresh).unwrap();
    h.wait_for(|_, t| t.get_count() == 2).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.app.process_events();

    assert_eq!(h.app.container.render_count(), 1);
    assert_eq!(h.app.container.len(), 1);
    h.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_backend_exits_when_ui_goes_away() {
    let transport = FakeTransport::new();
    let h = Harness::start(FeedVariant::Room, None, transport);
    tokio::time::timeout(Duration::from_secs(2), h.stop())
        .await
        .expect("backend did not stop");
}
