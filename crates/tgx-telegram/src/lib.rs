//! Telegram adapter (teloxide).
//!
//! This crate implements the `tgx-core` Transport port over the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::InputFile};

use tokio::time::sleep;

pub mod convert;

use tgx_core::{
    config::Config,
    domain::MessageId,
    errors::Error,
    messaging::{
        options::{MediaOptions, TextOptions},
        port::Transport,
        types::{InputMedia, MediaKind, MessageEntity, SentMessage},
    },
    peer::PeerRef,
    Result,
};

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

/// Shared setters of every caption-carrying media request.
macro_rules! with_caption {
    ($req:expr, $caption:expr, $entities:expr, $delivery:expr, $markup:expr) => {{
        let d = $delivery;
        let mut req = $req
            .caption($caption.to_string())
            .disable_notification(d.silent)
            .protect_content(d.noforwards);
        if $entities.is_empty() {
            if let Some(mode) = d.parse_mode {
                req = req.parse_mode(convert::parse_mode(mode));
            }
        } else {
            req = req.caption_entities($entities.clone());
        }
        if let Some(reply_to) = d.reply_to {
            req = req.reply_to_message_id(Self::tg_msg_id(reply_to));
        }
        if let Some(markup) = $markup {
            req = req.reply_markup(markup.clone());
        }
        req
    }};
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut bot = Bot::new(cfg.bot_token.clone());
        if let Some(url) = &cfg.api_url {
            let url = reqwest::Url::parse(url)
                .map_err(|e| Error::Config(format!("TGX_API_URL: {e}")))?;
            bot = bot.set_api_url(url);
        }
        Ok(Self::new(bot))
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Transport(format!("telegram error: {e}"))
    }

    fn sent(peer: PeerRef, msg: &Message) -> SentMessage {
        SentMessage {
            peer,
            id: MessageId(msg.id.0),
            date: Some(msg.date),
        }
    }

    fn report_unsupported(names: &[&'static str]) {
        #[cfg(feature = "tracing")]
        {
            if !names.is_empty() {
                tracing::debug!(options = ?names, "ignoring options the Bot API cannot express");
            }
        }
        let _ = names;
    }

    /// Flood-wait handling lives here, in the transport: one retry after the
    /// server-provided delay.
    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(
        &self,
        peer: PeerRef,
        text: &str,
        entities: &[MessageEntity],
        options: &TextOptions,
    ) -> Result<SentMessage> {
        let chat = convert::chat_id(peer)?;
        let d = &options.delivery;
        let (entities, skipped) = convert::entities(entities);
        let markup = convert::markup(d.buttons.as_ref())?;

        let mut unsupported = convert::unsupported_delivery(d);
        unsupported.extend(skipped);
        Self::report_unsupported(&unsupported);

        let msg = self
            .with_retry(|| {
                let mut req = self
                    .bot
                    .send_message(chat, text.to_string())
                    .disable_notification(d.silent)
                    .protect_content(d.noforwards)
                    .disable_web_page_preview(!options.link_preview);
                if entities.is_empty() {
                    if let Some(mode) = d.parse_mode {
                        req = req.parse_mode(convert::parse_mode(mode));
                    }
                } else {
                    req = req.entities(entities.clone());
                }
                if let Some(reply_to) = d.reply_to {
                    req = req.reply_to_message_id(Self::tg_msg_id(reply_to));
                }
                if let Some(markup) = &markup {
                    req = req.reply_markup(markup.clone());
                }
                req
            })
            .await?;

        Ok(Self::sent(peer, &msg))
    }

    async fn send_media(
        &self,
        peer: PeerRef,
        media: &InputMedia,
        caption: &str,
        entities: &[MessageEntity],
        options: &MediaOptions,
    ) -> Result<SentMessage> {
        let chat = convert::chat_id(peer)?;
        let d = &options.delivery;
        let (entities, skipped) = convert::entities(entities);
        let markup = convert::markup(d.buttons.as_ref())?;
        let file = convert::input_file(&media.source)?;
        let thumb: Option<InputFile> = options
            .thumbnail
            .as_ref()
            .map(|t| convert::input_file(&t.source))
            .transpose()?;

        let mut unsupported = convert::unsupported_media(options);
        unsupported.extend(skipped);
        Self::report_unsupported(&unsupported);

        let markup = markup.as_ref();
        let msg = match convert::upload_kind(media.kind, options.force_document) {
            MediaKind::Photo => {
                self.with_retry(|| {
                    with_caption!(
                        self.bot.send_photo(chat, file.clone()),
                        caption,
                        entities,
                        d,
                        markup
                    )
                })
                .await?
            }
            MediaKind::Document => {
                self.with_retry(|| {
                    let mut req = with_caption!(
                        self.bot.send_document(chat, file.clone()),
                        caption,
                        entities,
                        d,
                        markup
                    );
                    if let Some(t) = &thumb {
                        req = req.thumb(t.clone());
                    }
                    req
                })
                .await?
            }
            MediaKind::Video => {
                self.with_retry(|| {
                    let mut req = with_caption!(
                        self.bot.send_video(chat, file.clone()),
                        caption,
                        entities,
                        d,
                        markup
                    )
                    .supports_streaming(options.supports_streaming);
                    if let Some(t) = &thumb {
                        req = req.thumb(t.clone());
                    }
                    req
                })
                .await?
            }
            MediaKind::Audio => {
                self.with_retry(|| {
                    with_caption!(
                        self.bot.send_audio(chat, file.clone()),
                        caption,
                        entities,
                        d,
                        markup
                    )
                })
                .await?
            }
            MediaKind::Voice => {
                self.with_retry(|| {
                    with_caption!(
                        self.bot.send_voice(chat, file.clone()),
                        caption,
                        entities,
                        d,
                        markup
                    )
                })
                .await?
            }
            MediaKind::Animation => {
                self.with_retry(|| {
                    with_caption!(
                        self.bot.send_animation(chat, file.clone()),
                        caption,
                        entities,
                        d,
                        markup
                    )
                })
                .await?
            }
        };

        Ok(Self::sent(peer, &msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: Option<&str>) -> Config {
        let api_url = api_url.map(str::to_string);
        Config::from_lookup(move |key: &str| match key {
            "TGX_BOT_TOKEN" => Some("123:abc".to_string()),
            "TGX_API_URL" => api_url.clone(),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn from_config_uses_custom_api_url() {
        let transport = TelegramTransport::from_config(&config(Some("http://localhost:8081/"))).unwrap();
        assert_eq!(transport.bot().api_url().as_str(), "http://localhost:8081/");
        assert_eq!(transport.bot().token(), "123:abc");
    }

    #[test]
    fn from_config_rejects_bad_api_url() {
        let err = TelegramTransport::from_config(&config(Some("not a url"))).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn message_ids_map_both_ways() {
        assert_eq!(TelegramTransport::tg_msg_id(MessageId(7)).0, 7);
    }
}
