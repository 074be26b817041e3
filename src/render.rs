//! Pure mapping from a message list to the views shown in the feed.
//!
//! Nothing here touches the network or the UI: the same input always gives
//! the same items, in the same order as the server sent them.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::buffer::FeedContainer;
use crate::config::FeedVariant;
use crate::model::{Message, MessageKind, TimestampField};

/// Shown instead of messages when a mission feed is empty.
pub const EMPTY_FEED_TEXT: &str = "Nenhuma mensagem ainda";
/// What a browser prints for a date it cannot parse.
pub const INVALID_DATE: &str = "Invalid Date";
/// Label of the attachment link.
pub const ATTACHMENT_LABEL: &str = "Arquivo";

const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedItem {
    Placeholder(&'static str),
    Message(MessageView),
}

/// Room avatar. `Photo` keeps the URL; the egui shell paints the author's
/// initial in its place rather than loading the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Photo { url: String, alt: String },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Shown verbatim, newlines included.
    Text(String),
    /// One entry per line, drawn with line breaks in between.
    Lines(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleStyle {
    Own,
    Other,
    Delivery,
    Correction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub avatar: Option<Avatar>,
    /// Room: `"<author> • <date time>"`, mission: the author name.
    pub header: String,
    /// Separate time label (mission only).
    pub time: Option<String>,
    pub badge: Option<&'static str>,
    pub body: Option<Body>,
    pub attachment: Option<String>,
    pub alignment: Alignment,
    pub style: BubbleStyle,
}

impl FeedItem {
    pub fn as_message(&self) -> Option<&MessageView> {
        match self {
            FeedItem::Message(view) => Some(view),
            FeedItem::Placeholder(_) => None,
        }
    }
}

/// Render `messages` for `viewer_id` in the local time zone.
pub fn render_feed(variant: FeedVariant, viewer_id: Option<&str>, messages: &[Message]) -> Vec<FeedItem> {
    render_feed_in(variant, viewer_id, messages, &Local)
}

/// Like [`render_feed`], with an explicit time zone for timestamps.
pub fn render_feed_in<Tz>(
    variant: FeedVariant,
    viewer_id: Option<&str>,
    messages: &[Message],
    tz: &Tz,
) -> Vec<FeedItem>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if messages.is_empty() && variant.shows_placeholder() {
        return vec![FeedItem::Placeholder(EMPTY_FEED_TEXT)];
    }

    messages
        .iter()
        .map(|m| FeedItem::Message(render_message(variant, viewer_id, m, tz)))
        .collect()
}

/// Replace the container content and scroll it to the newest message.
pub fn render_into(
    container: &mut FeedContainer,
    variant: FeedVariant,
    viewer_id: Option<&str>,
    messages: &[Message],
) {
    container.replace(render_feed(variant, viewer_id, messages));
}

fn render_message<Tz>(variant: FeedVariant, viewer_id: Option<&str>, m: &Message, tz: &Tz) -> MessageView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let own = m.is_authored_by(viewer_id);
    let style = bubble_style(m.kind, own);

    match variant {
        FeedVariant::Room => MessageView {
            avatar: Some(match m.author_photo.as_deref().filter(|p| !p.is_empty()) {
                Some(url) => Avatar::Photo {
                    url: url.to_string(),
                    alt: m.author_name.clone(),
                },
                None => Avatar::Placeholder,
            }),
            header: format!(
                "{} • {}",
                m.author_name,
                format_timestamp(
                    m.timestamp(TimestampField::CreatedAt).unwrap_or_default(),
                    DATE_TIME_FORMAT,
                    tz
                )
            ),
            time: None,
            badge: None,
            body: Some(Body::Text(m.body.clone().unwrap_or_default())),
            attachment: None,
            alignment: Alignment::Start,
            style,
        },
        FeedVariant::Mission => MessageView {
            avatar: None,
            header: m.author_name.clone(),
            time: Some(format_timestamp(
                m.timestamp(TimestampField::SentAt).unwrap_or_default(),
                TIME_FORMAT,
                tz,
            )),
            badge: m.kind.badge(),
            body: m
                .body_text()
                .map(|text| Body::Lines(text.split('\n').map(str::to_owned).collect())),
            attachment: m.attachment.clone().filter(|a| !a.is_empty()),
            alignment: if own { Alignment::End } else { Alignment::Start },
            style,
        },
    }
}

/// Kind colors win over authorship.
pub fn bubble_style(kind: MessageKind, own: bool) -> BubbleStyle {
    match kind {
        MessageKind::Delivery => BubbleStyle::Delivery,
        MessageKind::Correction => BubbleStyle::Correction,
        MessageKind::Plain if own => BubbleStyle::Own,
        MessageKind::Plain => BubbleStyle::Other,
    }
}

/// Parse an ISO 8601 timestamp into `tz`.
///
/// Strings without an offset are taken as wall-clock time in `tz`.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

pub fn format_timestamp<Tz>(raw: &str, format: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw, tz) {
        Some(dt) => dt.format(format).to_string(),
        None => INVALID_DATE.to_string(),
    }
}
