use std::sync::Arc;

use crate::{
    errors::Error,
    peer::{
        raw::{
            RawChannel, RawChat, RawEmptyChat, RawFields, RawForbiddenChannel, RawForbiddenChat,
            RawPeer,
        },
        reference::PeerRef,
        PeerInfo,
    },
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum GroupSource {
    EmptyChat(Arc<RawEmptyChat>),
    Chat(Arc<RawChat>),
    ForbiddenChat(Arc<RawForbiddenChat>),
    Channel(Arc<RawChannel>),
    ForbiddenChannel(Arc<RawForbiddenChannel>),
}

/// A small group or a supergroup ("megagroup").
///
/// Supergroups live on the channel-shaped records with `broadcast` unset;
/// broadcast channels are [`Channel`](crate::peer::Channel) instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    raw: GroupSource,
}

impl Group {
    /// Wrap a group-shaped raw record.
    ///
    /// Fails for broadcast channels and for non-chat records; the group type is
    /// never coerced out of a record that describes something else.
    pub fn from_raw(raw: RawPeer) -> Result<Self> {
        let source = match raw {
            RawPeer::EmptyChat(c) => GroupSource::EmptyChat(c),
            RawPeer::Chat(c) => GroupSource::Chat(c),
            RawPeer::ForbiddenChat(c) => GroupSource::ForbiddenChat(c),
            RawPeer::Channel(c) if !c.broadcast => GroupSource::Channel(c),
            RawPeer::ForbiddenChannel(c) if !c.broadcast => GroupSource::ForbiddenChannel(c),
            broadcast @ (RawPeer::Channel(_) | RawPeer::ForbiddenChannel(_)) => {
                return Err(Error::InvalidConstruction {
                    expected: "Group",
                    found: broadcast.variant_name(),
                    reason: "cannot create group from broadcast channel",
                })
            }
            other => {
                return Err(Error::InvalidConstruction {
                    expected: "Group",
                    found: other.variant_name(),
                    reason: "only chat or channel records can back a group",
                })
            }
        };
        Ok(Self { raw: source })
    }

    fn fields(&self) -> &dyn RawFields {
        match &self.raw {
            GroupSource::EmptyChat(c) => &**c,
            GroupSource::Chat(c) => &**c,
            GroupSource::ForbiddenChat(c) => &**c,
            GroupSource::Channel(c) => &**c,
            GroupSource::ForbiddenChannel(c) => &**c,
        }
    }

    /// Whether this is a supergroup (channel-shaped record).
    pub fn is_megagroup(&self) -> bool {
        matches!(
            self.raw,
            GroupSource::Channel(_) | GroupSource::ForbiddenChannel(_)
        )
    }

    /// Whether the current account lost access to the group.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self.raw,
            GroupSource::ForbiddenChat(_) | GroupSource::ForbiddenChannel(_)
        )
    }

    /// Member count, when the record carries one (legacy groups only).
    pub fn participants_count(&self) -> Option<i32> {
        match &self.raw {
            GroupSource::Chat(c) => Some(c.participants_count),
            _ => None,
        }
    }

    /// The underlying record (shared, not copied).
    pub fn raw(&self) -> RawPeer {
        match &self.raw {
            GroupSource::EmptyChat(c) => RawPeer::EmptyChat(Arc::clone(c)),
            GroupSource::Chat(c) => RawPeer::Chat(Arc::clone(c)),
            GroupSource::ForbiddenChat(c) => RawPeer::ForbiddenChat(Arc::clone(c)),
            GroupSource::Channel(c) => RawPeer::Channel(Arc::clone(c)),
            GroupSource::ForbiddenChannel(c) => RawPeer::ForbiddenChannel(Arc::clone(c)),
        }
    }
}

impl PeerInfo for Group {
    fn id(&self) -> i64 {
        self.fields().id()
    }

    fn name(&self) -> String {
        self.fields().title().unwrap_or_default().to_string()
    }

    fn username(&self) -> Option<&str> {
        self.fields().username()
    }

    /// Legacy groups are addressed by id alone; supergroups need the channel
    /// access hash.
    fn reference(&self) -> PeerRef {
        let id = self.id();
        if self.is_megagroup() {
            PeerRef::Channel {
                id,
                access_hash: self.fields().access_hash(),
            }
        } else {
            PeerRef::Group { id }
        }
    }
}
