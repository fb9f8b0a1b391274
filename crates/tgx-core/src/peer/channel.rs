use std::sync::Arc;

use crate::{
    errors::Error,
    peer::{
        raw::{RawChannel, RawFields, RawForbiddenChannel, RawPeer},
        reference::PeerRef,
        PeerInfo,
    },
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum ChannelSource {
    Channel(Arc<RawChannel>),
    Forbidden(Arc<RawForbiddenChannel>),
}

/// A broadcast channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    raw: ChannelSource,
}

impl Channel {
    /// Wrap a channel-shaped raw record with the broadcast flag set.
    pub fn from_raw(raw: RawPeer) -> Result<Self> {
        let source = match raw {
            RawPeer::Channel(c) if c.broadcast => ChannelSource::Channel(c),
            RawPeer::ForbiddenChannel(c) if c.broadcast => ChannelSource::Forbidden(c),
            group @ (RawPeer::Channel(_) | RawPeer::ForbiddenChannel(_)) => {
                return Err(Error::InvalidConstruction {
                    expected: "Channel",
                    found: group.variant_name(),
                    reason: "cannot create channel from megagroup",
                })
            }
            other => {
                return Err(Error::InvalidConstruction {
                    expected: "Channel",
                    found: other.variant_name(),
                    reason: "only broadcast channel records can back a channel",
                })
            }
        };
        Ok(Self { raw: source })
    }

    fn fields(&self) -> &dyn RawFields {
        match &self.raw {
            ChannelSource::Channel(c) => &**c,
            ChannelSource::Forbidden(c) => &**c,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self.raw, ChannelSource::Forbidden(_))
    }

    pub fn is_verified(&self) -> bool {
        match &self.raw {
            ChannelSource::Channel(c) => c.verified,
            ChannelSource::Forbidden(_) => false,
        }
    }

    /// The underlying record (shared, not copied).
    pub fn raw(&self) -> RawPeer {
        match &self.raw {
            ChannelSource::Channel(c) => RawPeer::Channel(Arc::clone(c)),
            ChannelSource::Forbidden(c) => RawPeer::ForbiddenChannel(Arc::clone(c)),
        }
    }
}

impl PeerInfo for Channel {
    fn id(&self) -> i64 {
        self.fields().id()
    }

    fn name(&self) -> String {
        self.fields().title().unwrap_or_default().to_string()
    }

    fn username(&self) -> Option<&str> {
        self.fields().username()
    }

    fn reference(&self) -> PeerRef {
        PeerRef::Channel {
            id: self.id(),
            access_hash: self.fields().access_hash(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::raw::RawEmptyChat;

    #[test]
    fn min_channel_reference_has_no_hash() {
        let c = Channel::from_raw(
            RawChannel {
                id: 77,
                access_hash: None,
                title: "Announcements".to_string(),
                username: None,
                broadcast: true,
                megagroup: false,
                verified: true,
            }
            .into(),
        )
        .unwrap();

        assert_eq!(c.name(), "Announcements");
        assert!(c.is_verified());
        assert_eq!(
            c.reference(),
            PeerRef::Channel {
                id: 77,
                access_hash: None
            }
        );
    }

    #[test]
    fn megagroup_is_not_a_channel() {
        let err = Channel::from_raw(
            RawChannel {
                id: 1,
                access_hash: Some(1),
                title: String::new(),
                username: None,
                broadcast: false,
                megagroup: true,
                verified: false,
            }
            .into(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConstruction {
                expected: "Channel",
                found: "Channel",
                ..
            }
        ));
    }

    #[test]
    fn chat_is_not_a_channel() {
        assert!(matches!(
            Channel::from_raw(RawEmptyChat { id: 1 }.into()),
            Err(Error::InvalidConstruction {
                found: "EmptyChat",
                ..
            })
        ));
    }
}
