//! Unified "send text, optionally with media" operation.
//!
//! Sending happens in two steps. [`reconcile`] is pure: it turns the caller's
//! arguments into a [`SendIntent`] (text, entities, media, options) following a
//! fixed precedence. [`MessageDispatcher`] then forwards the intent to exactly
//! one transport primitive. No retries here; the transport owns that policy.

use std::sync::Arc;

use crate::{
    errors::Error,
    messaging::{
        options::{Primitive, SendOptions},
        port::Transport,
        types::{InputMedia, MessageContent, MessageEntity, SentMessage},
    },
    peer::{IntoPeerRef, PeerRef},
    Result,
};

/// Reconciled arguments of a single send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendIntent {
    pub peer: PeerRef,
    /// Message text, or the caption when `media` is set.
    pub text: String,
    pub entities: Vec<MessageEntity>,
    pub media: Option<InputMedia>,
    /// Remaining options; `formatting_entities` has been folded into `entities`.
    pub options: SendOptions,
}

impl SendIntent {
    pub fn primitive(&self) -> Primitive {
        if self.media.is_some() {
            Primitive::Media
        } else {
            Primitive::Text
        }
    }
}

/// Resolve the arguments of a send into a [`SendIntent`].
///
/// Precedence:
/// 1. text is the body of a `Message` content, otherwise the string itself;
/// 2. entities are `options.formatting_entities` when given (even empty),
///    otherwise the `Message`'s own entities, otherwise none;
/// 3. media is the explicit `media` when given, otherwise the `Message`'s media.
///
/// Empty text without media is rejected.
pub fn reconcile(
    peer: PeerRef,
    content: MessageContent,
    media: Option<InputMedia>,
    mut options: SendOptions,
) -> Result<SendIntent> {
    let (text, content_entities, content_media) = match content {
        MessageContent::Text(text) => (text, Vec::new(), None),
        MessageContent::Message(m) => (m.message, m.entities, m.media),
    };

    let entities = options.formatting_entities.take().unwrap_or(content_entities);
    let media = media.or(content_media);

    if text.is_empty() && media.is_none() {
        return Err(Error::InvalidArgument(
            "the message cannot be empty unless media is provided".to_string(),
        ));
    }

    Ok(SendIntent {
        peer,
        text,
        entities,
        media,
        options,
    })
}

/// Stateless front-end over a [`Transport`].
///
/// Cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct MessageDispatcher {
    transport: Arc<dyn Transport>,
    defaults: SendOptions,
}

impl MessageDispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_defaults(transport, SendOptions::default())
    }

    /// Use `defaults` for every send called without explicit options.
    pub fn with_defaults(transport: Arc<dyn Transport>, defaults: SendOptions) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    /// A fresh copy of the configured defaults, to tweak for one call.
    pub fn options(&self) -> SendOptions {
        self.defaults.clone()
    }

    /// Send `content` to `target`, as a media message when `media` is set (or
    /// when `content` is a received message carrying media).
    ///
    /// `None` options means the dispatcher defaults.
    pub async fn send_message(
        &self,
        target: impl IntoPeerRef,
        content: impl Into<MessageContent>,
        media: Option<InputMedia>,
        options: Option<SendOptions>,
    ) -> Result<SentMessage> {
        let peer = target.into_peer_ref()?;
        let options = options.unwrap_or_else(|| self.options());
        let intent = reconcile(peer, content.into(), media, options)?;
        self.forward(intent).await
    }

    /// Forward an already reconciled intent to its primitive.
    pub async fn forward(&self, intent: SendIntent) -> Result<SentMessage> {
        #[cfg(feature = "tracing")]
        {
            let primitive = intent.primitive();
            tracing::debug!(
                peer = %intent.peer,
                ?primitive,
                dropped = ?intent.options.dropped_for(primitive),
                "dispatching message"
            );
        }

        match &intent.media {
            None => {
                self.transport
                    .send_text(
                        intent.peer,
                        &intent.text,
                        &intent.entities,
                        &intent.options.text_options(),
                    )
                    .await
            }
            Some(media) => {
                self.transport
                    .send_media(
                        intent.peer,
                        media,
                        &intent.text,
                        &intent.entities,
                        &intent.options.media_options(),
                    )
                    .await
            }
        }
    }

    /// Text-send primitive without reconciliation.
    pub async fn send_text(
        &self,
        target: impl IntoPeerRef,
        text: &str,
        entities: &[MessageEntity],
        options: Option<&SendOptions>,
    ) -> Result<SentMessage> {
        let peer = target.into_peer_ref()?;
        let options = options.unwrap_or(&self.defaults);
        self.transport
            .send_text(peer, text, entities, &options.text_options())
            .await
    }

    /// Media-send primitive without reconciliation.
    pub async fn send_media(
        &self,
        target: impl IntoPeerRef,
        media: &InputMedia,
        caption: &str,
        entities: &[MessageEntity],
        options: Option<&SendOptions>,
    ) -> Result<SentMessage> {
        let peer = target.into_peer_ref()?;
        let options = options.unwrap_or(&self.defaults);
        self.transport
            .send_media(peer, media, caption, entities, &options.media_options())
            .await
    }
}
