//! Typed peers built from raw chat/channel/user records.
//!
//! [`resolve`] is the entry point: it routes a [`RawPeer`] to exactly one of
//! [`User`], [`Group`] or [`Channel`]. The per-type `from_raw` factories are the
//! only other way to obtain a peer and reject records they cannot wrap.

pub mod channel;
pub mod group;
pub mod raw;
pub mod reference;
pub mod user;

pub use channel::Channel;
pub use group::Group;
pub use raw::RawPeer;
pub use reference::{IntoPeerRef, PeerRef, RefKind};
pub use user::User;

use crate::{errors::Error, Result};

/// Capabilities shared by every peer type.
pub trait PeerInfo {
    fn id(&self) -> i64;

    /// Display name. Never absent; empty when the record has none.
    fn name(&self) -> String;

    fn username(&self) -> Option<&str>;

    /// Addressing value for protocol calls.
    fn reference(&self) -> PeerRef;
}

/// A resolved peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Peer {
    User(User),
    Group(Group),
    Channel(Channel),
}

impl Peer {
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Peer::User(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Peer::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Peer::Channel(c) => Some(c),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn PeerInfo {
        match self {
            Peer::User(u) => u,
            Peer::Group(g) => g,
            Peer::Channel(c) => c,
        }
    }
}

impl PeerInfo for Peer {
    fn id(&self) -> i64 {
        self.inner().id()
    }

    fn name(&self) -> String {
        self.inner().name()
    }

    fn username(&self) -> Option<&str> {
        self.inner().username()
    }

    fn reference(&self) -> PeerRef {
        self.inner().reference()
    }
}

/// Map a raw record onto its peer type.
///
/// Chat-shaped records and non-broadcast channels become groups, broadcast
/// channels become channels, user records become users. Anything else is a
/// decoder/model mismatch and fails with [`Error::UnexpectedVariant`].
pub fn resolve(raw: RawPeer) -> Result<Peer> {
    match raw {
        RawPeer::EmptyChat(_) | RawPeer::Chat(_) | RawPeer::ForbiddenChat(_) => {
            Group::from_raw(raw).map(Peer::Group)
        }
        RawPeer::Channel(ref c) if c.broadcast => Channel::from_raw(raw).map(Peer::Channel),
        RawPeer::ForbiddenChannel(ref c) if c.broadcast => {
            Channel::from_raw(raw).map(Peer::Channel)
        }
        RawPeer::Channel(_) | RawPeer::ForbiddenChannel(_) => Group::from_raw(raw).map(Peer::Group),
        RawPeer::User(_) | RawPeer::EmptyUser(_) => User::from_raw(raw).map(Peer::User),
        RawPeer::Unsupported { constructor } => Err(Error::UnexpectedVariant { constructor }),
    }
}

/// Addressing value for `peer`; same as [`PeerInfo::reference`].
pub fn reference<P: PeerInfo + ?Sized>(peer: &P) -> PeerRef {
    peer.reference()
}

macro_rules! peer_into_ref {
    ($($ty:ty),*) => {
        $(
            impl IntoPeerRef for &$ty {
                fn into_peer_ref(self) -> Result<PeerRef> {
                    Ok(self.reference())
                }
            }
        )*
    };
}

peer_into_ref!(Peer, User, Group, Channel);

#[cfg(test)]
mod tests {
    use super::*;
    use raw::{
        RawChannel, RawChat, RawEmptyChat, RawEmptyUser, RawForbiddenChannel, RawForbiddenChat,
        RawUser,
    };
    use serde_json::json;

    fn channel(broadcast: bool) -> RawPeer {
        RawChannel {
            id: 300,
            access_hash: Some(3_000),
            title: "Chan".to_string(),
            username: None,
            broadcast,
            megagroup: !broadcast,
            verified: false,
        }
        .into()
    }

    fn forbidden_channel(broadcast: bool) -> RawPeer {
        RawForbiddenChannel {
            id: 301,
            access_hash: 3_001,
            title: "Gone".to_string(),
            broadcast,
            megagroup: !broadcast,
        }
        .into()
    }

    fn user() -> RawPeer {
        RawUser {
            id: 1,
            access_hash: Some(10),
            first_name: Some("Ada".to_string()),
            last_name: None,
            username: Some("ada".to_string()),
            phone: None,
            bot: false,
            deleted: false,
            verified: false,
        }
        .into()
    }

    #[test]
    fn routes_every_variant() {
        let chat: RawPeer = RawChat {
            id: 1,
            title: "c".to_string(),
            participants_count: 2,
        }
        .into();
        let forbidden_chat: RawPeer = RawForbiddenChat {
            id: 2,
            title: "f".to_string(),
        }
        .into();

        for raw in [
            RawEmptyChat { id: 3 }.into(),
            chat,
            forbidden_chat,
            channel(false),
            forbidden_channel(false),
        ] {
            assert!(matches!(resolve(raw), Ok(Peer::Group(_))));
        }

        for raw in [channel(true), forbidden_channel(true)] {
            assert!(matches!(resolve(raw), Ok(Peer::Channel(_))));
        }

        for raw in [user(), RawEmptyUser { id: 4 }.into()] {
            assert!(matches!(resolve(raw), Ok(Peer::User(_))));
        }
    }

    #[test]
    fn unsupported_variant_surfaces() {
        let raw = RawPeer::from_json(json!({"_": "chatInvitePeek", "expires": 1})).unwrap();
        let err = resolve(raw).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedVariant { ref constructor } if constructor == "chatInvitePeek"
        ));
    }

    #[test]
    fn group_constructor_rejects_what_resolve_routes_to_channel() {
        assert!(matches!(resolve(channel(true)), Ok(Peer::Channel(_))));
        assert!(matches!(
            Group::from_raw(channel(true)),
            Err(Error::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn megagroup_flag_follows_record_shape() {
        let mega = resolve(channel(false)).unwrap();
        assert!(mega.as_group().unwrap().is_megagroup());

        let legacy = resolve(RawEmptyChat { id: 3 }.into()).unwrap();
        assert!(!legacy.as_group().unwrap().is_megagroup());
    }

    #[test]
    fn reference_shapes() {
        let legacy = resolve(RawEmptyChat { id: 3 }.into()).unwrap();
        assert_eq!(reference(&legacy).kind(), RefKind::Bare);

        for raw in [channel(false), channel(true)] {
            let peer = resolve(raw).unwrap();
            let r = reference(&peer);
            assert_eq!(r.kind(), RefKind::Qualified);
            assert_eq!(r.access_hash(), Some(3_000));
        }

        let peer = resolve(forbidden_channel(true)).unwrap();
        assert_eq!(reference(&peer).access_hash(), Some(3_001));
    }

    #[test]
    fn reference_is_idempotent() {
        let peer = resolve(user()).unwrap();
        assert_eq!(reference(&peer), reference(&peer));
        assert_eq!(peer.reference(), (&peer).into_peer_ref().unwrap());
    }

    #[test]
    fn name_is_never_absent() {
        let peer = resolve(RawEmptyChat { id: 3 }.into()).unwrap();
        assert_eq!(peer.name(), "");

        let peer = resolve(user()).unwrap();
        assert_eq!(peer.name(), "Ada");
        assert_eq!(peer.username(), Some("ada"));
        assert_eq!(peer.id(), 1);
    }

    #[test]
    fn decodes_and_resolves_json() {
        let raw = RawPeer::from_json(json!({
            "_": "channel",
            "id": 9,
            "access_hash": 90,
            "title": "Supergroup",
            "megagroup": true
        }))
        .unwrap();
        let peer = resolve(raw).unwrap();
        assert_eq!(
            peer.reference(),
            PeerRef::Channel {
                id: 9,
                access_hash: Some(90)
            }
        );
        assert_eq!(peer.name(), "Supergroup");
    }
}
