use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::{
    domain::{DocumentId, MessageId},
    peer::PeerRef,
};

/// Formatting span over the message text, in UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntity {
    pub kind: EntityKind,
    pub offset: u32,
    pub length: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre { language: Option<String> },
    TextUrl { url: String },
    Mention,
    MentionName { user_id: i64 },
    Hashtag,
    Cashtag,
    Url,
    Email,
    Phone,
    BotCommand,
    Blockquote,
    CustomEmoji { document_id: DocumentId },
}

impl MessageEntity {
    pub fn new(kind: EntityKind, offset: u32, length: u32) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    pub fn bold(offset: u32, length: u32) -> Self {
        Self::new(EntityKind::Bold, offset, length)
    }

    pub fn italic(offset: u32, length: u32) -> Self {
        Self::new(EntityKind::Italic, offset, length)
    }

    pub fn code(offset: u32, length: u32) -> Self {
        Self::new(EntityKind::Code, offset, length)
    }

    pub fn text_url(offset: u32, length: u32, url: impl Into<String>) -> Self {
        Self::new(EntityKind::TextUrl { url: url.into() }, offset, length)
    }
}

/// What kind of upload a media handle should be sent as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MediaKind {
    Photo,
    #[default]
    Document,
    Video,
    Audio,
    Voice,
    Animation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSource {
    /// Server-side file id from a previous upload or received message.
    FileId(String),
    /// Remote URL the server fetches itself.
    Url(String),
    /// Local file to upload.
    Path(PathBuf),
}

/// Opaque media handle accepted by the media-send primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputMedia {
    pub source: MediaSource,
    pub kind: MediaKind,
}

impl InputMedia {
    pub fn new(source: MediaSource, kind: MediaKind) -> Self {
        Self { source, kind }
    }

    pub fn file_id(id: impl Into<String>, kind: MediaKind) -> Self {
        Self::new(MediaSource::FileId(id.into()), kind)
    }

    pub fn url(url: impl Into<String>, kind: MediaKind) -> Self {
        Self::new(MediaSource::Url(url.into()), kind)
    }

    pub fn path(path: impl Into<PathBuf>, kind: MediaKind) -> Self {
        Self::new(MediaSource::Path(path.into()), kind)
    }
}

/// Document attributes forwarded with media uploads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaAttribute {
    Filename(String),
    Video {
        duration_seconds: u32,
        width: u32,
        height: u32,
        round: bool,
    },
    Audio {
        duration_seconds: u32,
        title: Option<String>,
        performer: Option<String>,
        voice: bool,
    },
    Animated,
}

/// A previously received message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub peer: PeerRef,
    /// Text body (caption for media messages).
    pub message: String,
    pub entities: Vec<MessageEntity>,
    pub media: Option<InputMedia>,
    pub reply_to: Option<MessageId>,
    pub date: Option<DateTime<Utc>>,
}

impl Message {
    pub fn text(&self) -> &str {
        &self.message
    }
}

/// Body argument of the unified send operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Message(Message),
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Text(s.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Text(s)
    }
}

impl From<Message> for MessageContent {
    fn from(m: Message) -> Self {
        MessageContent::Message(m)
    }
}

impl From<&Message> for MessageContent {
    fn from(m: &Message) -> Self {
        MessageContent::Message(m.clone())
    }
}

/// Result of a successful send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMessage {
    pub peer: PeerRef,
    pub id: MessageId,
    pub date: Option<DateTime<Utc>>,
}

/// Markup the server should parse when no explicit entities are given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    Html,
}

impl std::str::FromStr for ParseMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md" | "markdown" => Ok(ParseMode::Markdown),
            "html" => Ok(ParseMode::Html),
            other => Err(crate::Error::InvalidArgument(format!(
                "unknown parse mode: {other}"
            ))),
        }
    }
}

/// Inline keyboard attached to an outgoing message.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub action: ButtonAction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

impl InlineButton {
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.is_empty())
    }
}
