//! Optional parameters of the send operations.
//!
//! [`SendOptions`] is the superset accepted by the unified send. It projects
//! onto [`TextOptions`] or [`MediaOptions`] through [`SendOptions::PROJECTION`]:
//! shared delivery flags go to both, primitive-specific flags are dropped
//! when forwarding to the other primitive.

use chrono::{DateTime, Utc};

use crate::{
    domain::MessageId,
    messaging::types::{InlineKeyboard, InputMedia, MediaAttribute, MessageEntity, ParseMode},
    peer::PeerRef,
};

/// The two send primitives of the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Text,
    Media,
}

/// Which primitive(s) receive a given option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Both,
    TextOnly,
    MediaOnly,
}

impl Route {
    pub fn reaches(self, primitive: Primitive) -> bool {
        match self {
            Route::Both => true,
            Route::TextOnly => primitive == Primitive::Text,
            Route::MediaOnly => primitive == Primitive::Media,
        }
    }
}

/// Delivery flags understood by both primitives.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DeliveryOptions {
    pub reply_to: Option<MessageId>,
    /// Send without a notification sound.
    pub silent: bool,
    pub background: bool,
    pub clear_draft: bool,
    pub schedule: Option<DateTime<Utc>>,
    pub buttons: Option<InlineKeyboard>,
    pub parse_mode: Option<ParseMode>,
    /// Post as a comment under this channel post.
    pub comment_to: Option<MessageId>,
    pub send_as: Option<PeerRef>,
    pub message_effect_id: Option<i64>,
    /// Forbid forwarding and saving.
    pub noforwards: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextOptions {
    pub delivery: DeliveryOptions,
    pub link_preview: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            delivery: DeliveryOptions::default(),
            link_preview: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MediaOptions {
    pub delivery: DeliveryOptions,
    pub force_document: bool,
    pub thumbnail: Option<InputMedia>,
    pub supports_streaming: bool,
    pub nosound_video: Option<bool>,
    pub attributes: Vec<MediaAttribute>,
}

/// Every optional parameter of the unified send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendOptions {
    /// Explicit formatting; overrides the entities of a `Message` body.
    pub formatting_entities: Option<Vec<MessageEntity>>,
    pub delivery: DeliveryOptions,

    // text-only
    pub link_preview: bool,

    // media-only
    pub force_document: bool,
    pub thumbnail: Option<InputMedia>,
    pub supports_streaming: bool,
    pub nosound_video: Option<bool>,
    pub attributes: Vec<MediaAttribute>,
}

impl Default for SendOptions {
    fn default() -> Self {
        let text = TextOptions::default();
        let media = MediaOptions::default();
        Self {
            formatting_entities: None,
            delivery: DeliveryOptions::default(),
            link_preview: text.link_preview,
            force_document: media.force_document,
            thumbnail: media.thumbnail,
            supports_streaming: media.supports_streaming,
            nosound_video: media.nosound_video,
            attributes: media.attributes,
        }
    }
}

impl SendOptions {
    /// Forwarding table for every option other than `formatting_entities`,
    /// which is consumed by reconciliation instead of being forwarded.
    pub const PROJECTION: &'static [(&'static str, Route)] = &[
        ("reply_to", Route::Both),
        ("silent", Route::Both),
        ("background", Route::Both),
        ("clear_draft", Route::Both),
        ("schedule", Route::Both),
        ("buttons", Route::Both),
        ("parse_mode", Route::Both),
        ("comment_to", Route::Both),
        ("send_as", Route::Both),
        ("message_effect_id", Route::Both),
        ("noforwards", Route::Both),
        ("link_preview", Route::TextOnly),
        ("force_document", Route::MediaOnly),
        ("thumbnail", Route::MediaOnly),
        ("supports_streaming", Route::MediaOnly),
        ("nosound_video", Route::MediaOnly),
        ("attributes", Route::MediaOnly),
    ];

    /// Options that do not reach `primitive`.
    pub fn unrouted(primitive: Primitive) -> impl Iterator<Item = &'static str> {
        Self::PROJECTION
            .iter()
            .filter(move |(_, route)| !route.reaches(primitive))
            .map(|(name, _)| *name)
    }

    /// Options explicitly set to a non-default value that forwarding to
    /// `primitive` will drop.
    pub fn dropped_for(&self, primitive: Primitive) -> Vec<&'static str> {
        let defaults = Self::default();
        Self::unrouted(primitive)
            .filter(|name| match *name {
                "link_preview" => self.link_preview != defaults.link_preview,
                "force_document" => self.force_document != defaults.force_document,
                "thumbnail" => self.thumbnail.is_some(),
                "supports_streaming" => self.supports_streaming != defaults.supports_streaming,
                "nosound_video" => self.nosound_video.is_some(),
                "attributes" => !self.attributes.is_empty(),
                _ => false,
            })
            .collect()
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            delivery: self.delivery.clone(),
            link_preview: self.link_preview,
        }
    }

    pub fn media_options(&self) -> MediaOptions {
        MediaOptions {
            delivery: self.delivery.clone(),
            force_document: self.force_document,
            thumbnail: self.thumbnail.clone(),
            supports_streaming: self.supports_streaming,
            nosound_video: self.nosound_video,
            attributes: self.attributes.clone(),
        }
    }
}
