//! Mapping between tgx-core values and Bot API (teloxide) types.

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageEntity as TgEntity,
    MessageEntityKind, ParseMode as TgParseMode,
};

use tgx_core::{
    errors::Error,
    messaging::{
        options::{DeliveryOptions, MediaOptions},
        types::{
            ButtonAction, EntityKind, InlineKeyboard, MediaKind, MediaSource, MessageEntity,
            ParseMode,
        },
    },
    peer::PeerRef,
    Result,
};

/// Bot API chat ids put channels and supergroups behind this offset.
const CHANNEL_ID_OFFSET: i64 = 1_000_000_000_000;

/// Bot API chat id for a peer reference.
///
/// Users keep their id, legacy groups are negated, channels (and
/// supergroups) become `-100<id>`. Access hashes are not part of the Bot API.
/// Ids with no Bot API form fail with [`Error::InvalidArgument`].
pub fn chat_id(peer: PeerRef) -> Result<teloxide::types::ChatId> {
    let id = match peer {
        PeerRef::User { id, .. } => Some(id),
        PeerRef::Group { id } => id.checked_neg(),
        PeerRef::Channel { id, .. } => CHANNEL_ID_OFFSET
            .checked_add(id)
            .and_then(i64::checked_neg),
    };
    id.map(teloxide::types::ChatId)
        .ok_or_else(|| Error::InvalidArgument(format!("{peer} has no Bot API chat id")))
}

/// Entities the Bot API can carry; the rest are reported back by name.
pub fn entities(input: &[MessageEntity]) -> (Vec<TgEntity>, Vec<&'static str>) {
    let mut out = Vec::with_capacity(input.len());
    let mut skipped = Vec::new();
    for e in input {
        let kind = match &e.kind {
            EntityKind::Bold => MessageEntityKind::Bold,
            EntityKind::Italic => MessageEntityKind::Italic,
            EntityKind::Underline => MessageEntityKind::Underline,
            EntityKind::Strikethrough => MessageEntityKind::Strikethrough,
            EntityKind::Spoiler => MessageEntityKind::Spoiler,
            EntityKind::Code => MessageEntityKind::Code,
            EntityKind::Pre { language } => MessageEntityKind::Pre {
                language: language.clone(),
            },
            EntityKind::TextUrl { url } => match reqwest::Url::parse(url) {
                Ok(url) => MessageEntityKind::TextLink { url },
                Err(_) => {
                    skipped.push("text_url");
                    continue;
                }
            },
            EntityKind::Mention => MessageEntityKind::Mention,
            EntityKind::Hashtag => MessageEntityKind::Hashtag,
            EntityKind::Cashtag => MessageEntityKind::Cashtag,
            EntityKind::Url => MessageEntityKind::Url,
            EntityKind::Email => MessageEntityKind::Email,
            EntityKind::Phone => MessageEntityKind::PhoneNumber,
            EntityKind::BotCommand => MessageEntityKind::BotCommand,
            // Text mentions need the full user object on the Bot API.
            EntityKind::MentionName { .. } => {
                skipped.push("mention_name");
                continue;
            }
            EntityKind::Blockquote => {
                skipped.push("blockquote");
                continue;
            }
            EntityKind::CustomEmoji { .. } => {
                skipped.push("custom_emoji");
                continue;
            }
        };
        out.push(TgEntity::new(kind, e.offset as usize, e.length as usize));
    }
    (out, skipped)
}

pub fn parse_mode(mode: ParseMode) -> TgParseMode {
    match mode {
        ParseMode::Markdown => TgParseMode::MarkdownV2,
        ParseMode::Html => TgParseMode::Html,
    }
}

pub fn keyboard(kb: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(kb.rows.len());
    for row in &kb.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for b in row {
            let button = match &b.action {
                ButtonAction::Callback(data) => {
                    InlineKeyboardButton::callback(b.label.clone(), data.clone())
                }
                ButtonAction::Url(url) => {
                    InlineKeyboardButton::url(b.label.clone(), parse_url(url)?)
                }
            };
            buttons.push(button);
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

/// Reply markup for a send; empty keyboards send none.
pub fn markup(buttons: Option<&InlineKeyboard>) -> Result<Option<InlineKeyboardMarkup>> {
    buttons.filter(|kb| !kb.is_empty()).map(keyboard).transpose()
}

pub fn input_file(source: &MediaSource) -> Result<InputFile> {
    Ok(match source {
        MediaSource::FileId(id) => InputFile::file_id(id.clone()),
        MediaSource::Url(url) => InputFile::url(parse_url(url)?),
        MediaSource::Path(path) => InputFile::file(path.clone()),
    })
}

/// Upload method for a media handle; `force_document` wins over the kind hint.
pub fn upload_kind(kind: MediaKind, force_document: bool) -> MediaKind {
    if force_document {
        MediaKind::Document
    } else {
        kind
    }
}

/// Delivery options set by the caller that the Bot API cannot express.
pub fn unsupported_delivery(d: &DeliveryOptions) -> Vec<&'static str> {
    let mut out = Vec::new();
    if d.background {
        out.push("background");
    }
    if d.clear_draft {
        out.push("clear_draft");
    }
    if d.schedule.is_some() {
        out.push("schedule");
    }
    if d.comment_to.is_some() {
        out.push("comment_to");
    }
    if d.send_as.is_some() {
        out.push("send_as");
    }
    if d.message_effect_id.is_some() {
        out.push("message_effect_id");
    }
    out
}

pub fn unsupported_media(o: &MediaOptions) -> Vec<&'static str> {
    let mut out = unsupported_delivery(&o.delivery);
    if o.nosound_video.is_some() {
        out.push("nosound_video");
    }
    if !o.attributes.is_empty() {
        out.push("attributes");
    }
    out
}

fn parse_url(url: &str) -> Result<reqwest::Url> {
    reqwest::Url::parse(url).map_err(|e| Error::InvalidArgument(format!("bad url {url:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tgx_core::messaging::types::InlineButton;

    #[test]
    fn chat_ids_follow_bot_api_convention() {
        assert_eq!(
            chat_id(PeerRef::User {
                id: 42,
                access_hash: Some(1)
            })
            .unwrap()
            .0,
            42
        );
        assert_eq!(chat_id(PeerRef::Group { id: 42 }).unwrap().0, -42);
        assert_eq!(
            chat_id(PeerRef::Channel {
                id: 1234567890,
                access_hash: None
            })
            .unwrap()
            .0,
            -1001234567890
        );
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        let huge_channel = PeerRef::Channel {
            id: i64::MAX - 1,
            access_hash: None,
        };
        assert!(matches!(
            chat_id(huge_channel),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            chat_id(PeerRef::Group { id: i64::MIN }),
            Err(Error::InvalidArgument(_))
        ));
        // Largest channel id that still fits.
        let edge = PeerRef::Channel {
            id: i64::MAX - CHANNEL_ID_OFFSET,
            access_hash: None,
        };
        assert_eq!(chat_id(edge).unwrap().0, -i64::MAX);
    }

    #[test]
    fn converts_entities_and_reports_skipped() {
        let (out, skipped) = entities(&[
            MessageEntity::bold(0, 4),
            MessageEntity::text_url(5, 3, "https://example.org"),
            MessageEntity::text_url(9, 1, "not a url"),
            MessageEntity::new(EntityKind::MentionName { user_id: 1 }, 0, 1),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, MessageEntityKind::Bold);
        assert_eq!(out[0].offset, 0);
        assert_eq!(out[0].length, 4);
        assert_eq!(skipped, vec!["text_url", "mention_name"]);
    }

    #[test]
    fn keyboard_rejects_bad_urls() {
        let ok = InlineKeyboard::new(vec![vec![
            InlineButton::callback("Yes", "y"),
            InlineButton::url("Docs", "https://docs.rs"),
        ]]);
        let markup = keyboard(&ok).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0].len(), 2);

        let bad = InlineKeyboard::new(vec![vec![InlineButton::url("x", "::")]]);
        assert!(matches!(keyboard(&bad), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn empty_keyboards_send_no_markup() {
        assert!(markup(None).unwrap().is_none());
        assert!(markup(Some(&InlineKeyboard::default())).unwrap().is_none());
        assert!(markup(Some(&InlineKeyboard::new(vec![vec![]])))
            .unwrap()
            .is_none());

        let kb = InlineKeyboard::new(vec![vec![InlineButton::callback("Yes", "y")]]);
        assert!(markup(Some(&kb)).unwrap().is_some());
    }

    #[test]
    fn force_document_overrides_kind() {
        assert_eq!(upload_kind(MediaKind::Photo, true), MediaKind::Document);
        assert_eq!(upload_kind(MediaKind::Video, false), MediaKind::Video);
    }

    #[test]
    fn lists_unsupported_options() {
        let mut o = MediaOptions::default();
        assert!(unsupported_media(&o).is_empty());

        o.delivery.schedule = Some(Utc::now());
        o.delivery.silent = true;
        o.nosound_video = Some(true);
        assert_eq!(unsupported_media(&o), vec!["schedule", "nosound_video"]);
    }

    #[test]
    fn parse_modes() {
        assert_eq!(parse_mode(ParseMode::Html), TgParseMode::Html);
        assert_eq!(parse_mode(ParseMode::Markdown), TgParseMode::MarkdownV2);
    }
}
