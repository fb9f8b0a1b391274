use async_trait::async_trait;

use crate::{
    messaging::{
        options::{MediaOptions, TextOptions},
        types::{InputMedia, MessageEntity, SentMessage},
    },
    peer::PeerRef,
    Result,
};

/// Send primitives of the transport/session layer.
///
/// Implementations own serialization, connection lifecycle, retries and flood
/// control. Failures should be mapped into [`crate::Error::Transport`]; the
/// dispatch layer passes them through untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(
        &self,
        peer: PeerRef,
        text: &str,
        entities: &[MessageEntity],
        options: &TextOptions,
    ) -> Result<SentMessage>;

    async fn send_media(
        &self,
        peer: PeerRef,
        media: &InputMedia,
        caption: &str,
        entities: &[MessageEntity],
        options: &MediaOptions,
    ) -> Result<SentMessage>;
}
