//! Raw chat/channel/user records as handed over by the wire decoder.
//!
//! The decoder emits JSON objects whose `"_"` key names the constructor
//! (`"channel"`, `"chatForbidden"`, ...). Constructors this crate does not model
//! still deserialize, into [`RawPeer::Unsupported`], so the peer model can
//! report them instead of the decoder failing early.

use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize};

/// Read-only field access shared by every raw record.
///
/// Each record type overrides exactly the fields it carries; everything else
/// falls back to "absent".
pub trait RawFields {
    fn id(&self) -> i64;

    fn title(&self) -> Option<&str> {
        None
    }

    fn username(&self) -> Option<&str> {
        None
    }

    fn access_hash(&self) -> Option<i64> {
        None
    }

    fn is_broadcast(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmptyChat {
    pub id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChat {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub participants_count: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawForbiddenChat {
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChannel {
    pub id: i64,
    /// Absent on "min" channels seen through another peer's update.
    #[serde(default)]
    pub access_hash: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub broadcast: bool,
    #[serde(default)]
    pub megagroup: bool,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawForbiddenChannel {
    pub id: i64,
    pub access_hash: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub broadcast: bool,
    #[serde(default)]
    pub megagroup: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: i64,
    #[serde(default)]
    pub access_hash: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEmptyUser {
    pub id: i64,
}

impl RawFields for RawEmptyChat {
    fn id(&self) -> i64 {
        self.id
    }
}

impl RawFields for RawChat {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}

impl RawFields for RawForbiddenChat {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}

impl RawFields for RawChannel {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn access_hash(&self) -> Option<i64> {
        self.access_hash
    }

    fn is_broadcast(&self) -> bool {
        self.broadcast
    }
}

impl RawFields for RawForbiddenChannel {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn access_hash(&self) -> Option<i64> {
        Some(self.access_hash)
    }

    fn is_broadcast(&self) -> bool {
        self.broadcast
    }
}

impl RawFields for RawUser {
    fn id(&self) -> i64 {
        self.id
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    fn access_hash(&self) -> Option<i64> {
        self.access_hash
    }
}

impl RawFields for RawEmptyUser {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Tagged union of every raw peer record.
///
/// Records sit behind `Arc`, so cloning a `RawPeer` (or a peer built from
/// one) shares the record instead of copying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawPeer {
    EmptyChat(Arc<RawEmptyChat>),
    Chat(Arc<RawChat>),
    ForbiddenChat(Arc<RawForbiddenChat>),
    Channel(Arc<RawChannel>),
    ForbiddenChannel(Arc<RawForbiddenChannel>),
    User(Arc<RawUser>),
    EmptyUser(Arc<RawEmptyUser>),
    /// Any constructor not listed above.
    Unsupported { constructor: String },
}

macro_rules! raw_peer_from {
    ($($record:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$record> for RawPeer {
                fn from(r: $record) -> Self {
                    RawPeer::$variant(Arc::new(r))
                }
            }
        )*
    };
}

raw_peer_from! {
    RawEmptyChat => EmptyChat,
    RawChat => Chat,
    RawForbiddenChat => ForbiddenChat,
    RawChannel => Channel,
    RawForbiddenChannel => ForbiddenChannel,
    RawUser => User,
    RawEmptyUser => EmptyUser,
}

impl RawPeer {
    /// Wire constructor name (`"_"` tag).
    pub fn constructor(&self) -> &str {
        match self {
            RawPeer::EmptyChat(_) => "chatEmpty",
            RawPeer::Chat(_) => "chat",
            RawPeer::ForbiddenChat(_) => "chatForbidden",
            RawPeer::Channel(_) => "channel",
            RawPeer::ForbiddenChannel(_) => "channelForbidden",
            RawPeer::User(_) => "user",
            RawPeer::EmptyUser(_) => "userEmpty",
            RawPeer::Unsupported { constructor } => constructor,
        }
    }

    /// Variant name, for error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            RawPeer::EmptyChat(_) => "EmptyChat",
            RawPeer::Chat(_) => "Chat",
            RawPeer::ForbiddenChat(_) => "ForbiddenChat",
            RawPeer::Channel(_) => "Channel",
            RawPeer::ForbiddenChannel(_) => "ForbiddenChannel",
            RawPeer::User(_) => "User",
            RawPeer::EmptyUser(_) => "EmptyUser",
            RawPeer::Unsupported { .. } => "Unsupported",
        }
    }

    /// Field accessors for the wrapped record; `None` only for `Unsupported`.
    pub fn fields(&self) -> Option<&dyn RawFields> {
        let fields: &dyn RawFields = match self {
            RawPeer::EmptyChat(c) => &**c,
            RawPeer::Chat(c) => &**c,
            RawPeer::ForbiddenChat(c) => &**c,
            RawPeer::Channel(c) => &**c,
            RawPeer::ForbiddenChannel(c) => &**c,
            RawPeer::User(u) => &**u,
            RawPeer::EmptyUser(u) => &**u,
            RawPeer::Unsupported { .. } => return None,
        };
        Some(fields)
    }

    /// Legacy small-group records (no access hash).
    pub fn is_chat_shaped(&self) -> bool {
        matches!(
            self,
            RawPeer::EmptyChat(_) | RawPeer::Chat(_) | RawPeer::ForbiddenChat(_)
        )
    }

    pub fn is_channel_shaped(&self) -> bool {
        matches!(self, RawPeer::Channel(_) | RawPeer::ForbiddenChannel(_))
    }

    pub fn is_user_shaped(&self) -> bool {
        matches!(self, RawPeer::User(_) | RawPeer::EmptyUser(_))
    }

    /// Decode from the decoder's JSON value.
    pub fn from_json(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

const KNOWN_CONSTRUCTORS: &[&str] = &[
    "chatEmpty",
    "chat",
    "chatForbidden",
    "channel",
    "channelForbidden",
    "user",
    "userEmpty",
];

/// Owned mirror of the modelled variants, used for the known-constructor path.
#[derive(Deserialize)]
#[serde(tag = "_")]
enum KnownRawPeer {
    #[serde(rename = "chatEmpty")]
    EmptyChat(RawEmptyChat),
    #[serde(rename = "chat")]
    Chat(RawChat),
    #[serde(rename = "chatForbidden")]
    ForbiddenChat(RawForbiddenChat),
    #[serde(rename = "channel")]
    Channel(RawChannel),
    #[serde(rename = "channelForbidden")]
    ForbiddenChannel(RawForbiddenChannel),
    #[serde(rename = "user")]
    User(RawUser),
    #[serde(rename = "userEmpty")]
    EmptyUser(RawEmptyUser),
}

impl From<KnownRawPeer> for RawPeer {
    fn from(k: KnownRawPeer) -> Self {
        match k {
            KnownRawPeer::EmptyChat(c) => c.into(),
            KnownRawPeer::Chat(c) => c.into(),
            KnownRawPeer::ForbiddenChat(c) => c.into(),
            KnownRawPeer::Channel(c) => c.into(),
            KnownRawPeer::ForbiddenChannel(c) => c.into(),
            KnownRawPeer::User(u) => u.into(),
            KnownRawPeer::EmptyUser(u) => u.into(),
        }
    }
}

impl<'de> Deserialize<'de> for RawPeer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let constructor = value
            .get("_")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| de::Error::missing_field("_"))?
            .to_string();

        if !KNOWN_CONSTRUCTORS.contains(&constructor.as_str()) {
            return Ok(RawPeer::Unsupported { constructor });
        }

        KnownRawPeer::deserialize(value)
            .map(RawPeer::from)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_known_constructors() {
        let raw = RawPeer::from_json(json!({
            "_": "channel",
            "id": 10,
            "access_hash": 99,
            "title": "News",
            "username": "news",
            "broadcast": true
        }))
        .unwrap();

        let RawPeer::Channel(ch) = &raw else {
            panic!("expected channel, got {raw:?}");
        };
        assert_eq!(ch.id, 10);
        assert_eq!(ch.access_hash, Some(99));
        assert!(ch.broadcast);
        assert!(!ch.megagroup);
        assert_eq!(raw.constructor(), "channel");
    }

    #[test]
    fn unknown_constructor_is_kept_not_rejected() {
        let raw = RawPeer::from_json(json!({"_": "chatInvite", "title": "x"})).unwrap();
        assert_eq!(
            raw,
            RawPeer::Unsupported {
                constructor: "chatInvite".to_string()
            }
        );
        assert!(raw.fields().is_none());
        assert_eq!(raw.variant_name(), "Unsupported");
    }

    #[test]
    fn missing_tag_is_a_decode_error() {
        let err = RawPeer::from_json(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn field_table_is_per_variant() {
        let chat = RawPeer::from(RawChat {
            id: 1,
            title: "Team".to_string(),
            participants_count: 3,
        });
        let f = chat.fields().unwrap();
        assert_eq!(f.id(), 1);
        assert_eq!(f.title(), Some("Team"));
        assert_eq!(f.username(), None);
        assert_eq!(f.access_hash(), None);
        assert!(!f.is_broadcast());

        let empty = RawPeer::from(RawEmptyChat { id: 2 });
        assert_eq!(empty.fields().unwrap().title(), None);

        let forbidden = RawPeer::from(RawForbiddenChannel {
            id: 3,
            access_hash: 7,
            title: String::new(),
            broadcast: true,
            megagroup: false,
        });
        let f = forbidden.fields().unwrap();
        assert_eq!(f.access_hash(), Some(7));
        assert!(f.is_broadcast());
    }

    #[test]
    fn shape_predicates() {
        let user = RawPeer::from(RawEmptyUser { id: 5 });
        assert!(user.is_user_shaped());
        assert!(!user.is_chat_shaped());
        assert!(!user.is_channel_shaped());
    }
}
