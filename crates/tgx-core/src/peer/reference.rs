//! Minimal addressing values for peers.
//!
//! A [`PeerRef`] is the only thing handed to the transport to address a peer.
//! It is `Copy + Eq + Hash`, so transports can use it directly as a cache key.

use std::{fmt, str::FromStr};

use crate::{errors::Error, Result};

/// Whether a reference carries an access qualifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefKind {
    Bare,
    Qualified,
}

/// Identity (+ credential) needed to target a peer in a protocol call.
///
/// Users and channels have separate id spaces, so the variant is part of the
/// identity. Legacy groups have no access hash and are always bare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeerRef {
    User { id: i64, access_hash: Option<i64> },
    Group { id: i64 },
    Channel { id: i64, access_hash: Option<i64> },
}

impl PeerRef {
    pub fn kind(&self) -> RefKind {
        match self {
            PeerRef::Group { .. } => RefKind::Bare,
            PeerRef::User { .. } | PeerRef::Channel { .. } => RefKind::Qualified,
        }
    }

    pub fn id(&self) -> i64 {
        match *self {
            PeerRef::User { id, .. } | PeerRef::Group { id } | PeerRef::Channel { id, .. } => id,
        }
    }

    pub fn access_hash(&self) -> Option<i64> {
        match *self {
            PeerRef::User { access_hash, .. } | PeerRef::Channel { access_hash, .. } => {
                access_hash
            }
            PeerRef::Group { .. } => None,
        }
    }
}

/// String form: `u<id>[.<hash>]`, `g<id>`, `c<id>[.<hash>]`.
impl fmt::Display for PeerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, id, hash) = match *self {
            PeerRef::User { id, access_hash } => ('u', id, access_hash),
            PeerRef::Group { id } => ('g', id, None),
            PeerRef::Channel { id, access_hash } => ('c', id, access_hash),
        };
        write!(f, "{prefix}{id}")?;
        if let Some(h) = hash {
            write!(f, ".{h}")?;
        }
        Ok(())
    }
}

impl FromStr for PeerRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument(format!("not a peer reference: {s:?}"));

        let mut chars = s.chars();
        let prefix = chars.next().ok_or_else(invalid)?;
        let rest = chars.as_str();

        let (id_part, hash_part) = match rest.split_once('.') {
            Some((id, hash)) => (id, Some(hash)),
            None => (rest, None),
        };
        let id = id_part.parse::<i64>().map_err(|_| invalid())?;
        let access_hash = hash_part
            .map(|h| h.parse::<i64>().map_err(|_| invalid()))
            .transpose()?;

        match prefix {
            'u' => Ok(PeerRef::User { id, access_hash }),
            'c' => Ok(PeerRef::Channel { id, access_hash }),
            'g' if access_hash.is_none() => Ok(PeerRef::Group { id }),
            _ => Err(invalid()),
        }
    }
}

/// Anything that can name a dispatch target.
pub trait IntoPeerRef {
    fn into_peer_ref(self) -> Result<PeerRef>;
}

impl IntoPeerRef for PeerRef {
    fn into_peer_ref(self) -> Result<PeerRef> {
        Ok(self)
    }
}

impl IntoPeerRef for &PeerRef {
    fn into_peer_ref(self) -> Result<PeerRef> {
        Ok(*self)
    }
}

impl IntoPeerRef for &str {
    fn into_peer_ref(self) -> Result<PeerRef> {
        self.parse()
    }
}

impl IntoPeerRef for &String {
    fn into_peer_ref(self) -> Result<PeerRef> {
        self.parse()
    }
}
