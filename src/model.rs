//! Wire model for the messages served by the feed endpoint.
//!
//! The backend speaks Portuguese field names (`usuario_nome`, `texto`, ...);
//! the Rust side uses English names and maps them with serde attributes.

use serde::{Deserialize, Deserializer, Serialize};

/// A chat message as returned by `GET <endpoint>`.
///
/// Any field may be missing, `null`, or a number where text is expected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "loose_text")]
    pub id: Option<String>,

    #[serde(rename = "usuario_nome", default, deserialize_with = "text_or_empty")]
    pub author_name: String,

    #[serde(rename = "usuario_foto", default, deserialize_with = "loose_text")]
    pub author_photo: Option<String>,

    /// ISO 8601, sent by room chats.
    #[serde(rename = "criado_em", default, deserialize_with = "loose_text")]
    pub created_at: Option<String>,

    /// ISO 8601, sent by mission chats.
    #[serde(rename = "data_envio", default, deserialize_with = "loose_text")]
    pub sent_at: Option<String>,

    #[serde(rename = "texto", default, deserialize_with = "loose_text")]
    pub body: Option<String>,

    #[serde(rename = "tipo", default, deserialize_with = "message_kind")]
    pub kind: MessageKind,

    #[serde(rename = "arquivo", default, deserialize_with = "loose_text")]
    pub attachment: Option<String>,

    #[serde(rename = "usuario_id", default, deserialize_with = "loose_text")]
    pub author_id: Option<String>,
}

impl Message {
    /// Whether this message was written by `viewer_id`.
    ///
    /// Ids arrive either as JSON numbers or strings, so they are compared by
    /// their textual form (`7 == "7"`).
    pub fn is_authored_by(&self, viewer_id: Option<&str>) -> bool {
        match (self.author_id.as_deref(), viewer_id) {
            (Some(author), Some(viewer)) => author.trim() == viewer.trim(),
            _ => false,
        }
    }

    /// The message timestamp, reading `first` before the other field.
    pub fn timestamp(&self, first: TimestampField) -> Option<&str> {
        let (a, b) = match first {
            TimestampField::CreatedAt => (&self.created_at, &self.sent_at),
            TimestampField::SentAt => (&self.sent_at, &self.created_at),
        };
        a.as_deref().or(b.as_deref())
    }

    /// Non-empty body text, if any.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

/// Which of the two timestamp fields a page reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    /// `criado_em`
    CreatedAt,
    /// `data_envio`
    SentAt,
}

/// Message category used by mission chats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Plain,
    /// `tipo = "entrega"`
    Delivery,
    /// `tipo = "correcao"`
    Correction,
}

impl MessageKind {
    pub fn from_wire(tag: &str) -> Self {
        match tag {
            "entrega" => MessageKind::Delivery,
            "correcao" => MessageKind::Correction,
            _ => MessageKind::Plain,
        }
    }

    /// Badge label shown next to the author name.
    pub fn badge(self) -> Option<&'static str> {
        match self {
            MessageKind::Plain => None,
            MessageKind::Delivery => Some("ENTREGA"),
            MessageKind::Correction => Some("CORREÇÃO"),
        }
    }
}

/// Body of `POST <endpoint>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMessage<'a> {
    #[serde(rename = "texto")]
    pub text: &'a str,
}

/// Any non-string tag (number, object, `null`) is a plain message.
fn message_kind<'de, D>(deserializer: D) -> Result<MessageKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(tag) => MessageKind::from_wire(&tag),
        _ => MessageKind::Plain,
    })
}

/// Accept `"x"`, `42`, `true` or `null`; anything but `null` keeps its
/// textual form.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_text(deserializer)?.unwrap_or_default())
}
