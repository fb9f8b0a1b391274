use std::sync::Arc;

use crate::{
    errors::Error,
    peer::{
        raw::{RawEmptyUser, RawFields, RawPeer, RawUser},
        reference::PeerRef,
        PeerInfo,
    },
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum UserSource {
    User(Arc<RawUser>),
    Empty(Arc<RawEmptyUser>),
}

/// A user account (person or bot).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    raw: UserSource,
}

impl User {
    /// Wrap a user-shaped raw record.
    pub fn from_raw(raw: RawPeer) -> Result<Self> {
        let source = match raw {
            RawPeer::User(u) => UserSource::User(u),
            RawPeer::EmptyUser(u) => UserSource::Empty(u),
            other => {
                return Err(Error::InvalidConstruction {
                    expected: "User",
                    found: other.variant_name(),
                    reason: "only user records can back a user",
                })
            }
        };
        Ok(Self { raw: source })
    }

    fn fields(&self) -> &dyn RawFields {
        match &self.raw {
            UserSource::User(u) => &**u,
            UserSource::Empty(u) => &**u,
        }
    }

    fn full(&self) -> Option<&RawUser> {
        match &self.raw {
            UserSource::User(u) => Some(&**u),
            UserSource::Empty(_) => None,
        }
    }

    pub fn first_name(&self) -> Option<&str> {
        self.full()?.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.full()?.last_name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.full()?.phone.as_deref()
    }

    pub fn is_bot(&self) -> bool {
        self.full().is_some_and(|u| u.bot)
    }

    pub fn is_deleted(&self) -> bool {
        self.full().is_some_and(|u| u.deleted)
    }

    pub fn is_verified(&self) -> bool {
        self.full().is_some_and(|u| u.verified)
    }

    /// The underlying record (shared, not copied).
    pub fn raw(&self) -> RawPeer {
        match &self.raw {
            UserSource::User(u) => RawPeer::User(Arc::clone(u)),
            UserSource::Empty(u) => RawPeer::EmptyUser(Arc::clone(u)),
        }
    }
}

impl PeerInfo for User {
    fn id(&self) -> i64 {
        self.fields().id()
    }

    /// First and last name joined by a space; empty if neither is known.
    fn name(&self) -> String {
        let parts = [self.first_name(), self.last_name()];
        parts
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn username(&self) -> Option<&str> {
        self.fields().username()
    }

    fn reference(&self) -> PeerRef {
        PeerRef::User {
            id: self.id(),
            access_hash: self.fields().access_hash(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::raw::RawChat;

    fn raw_user(first: Option<&str>, last: Option<&str>) -> RawUser {
        RawUser {
            id: 7,
            access_hash: Some(77),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            username: Some("alice".to_string()),
            phone: None,
            bot: false,
            deleted: false,
            verified: false,
        }
    }

    #[test]
    fn name_joins_first_and_last() {
        let u = User::from_raw(raw_user(Some("Alice"), Some("Liddell")).into()).unwrap();
        assert_eq!(u.name(), "Alice Liddell");

        let u = User::from_raw(raw_user(None, Some("Liddell")).into()).unwrap();
        assert_eq!(u.name(), "Liddell");

        let u = User::from_raw(raw_user(None, None).into()).unwrap();
        assert_eq!(u.name(), "");
    }

    #[test]
    fn empty_user_has_id_only() {
        let u = User::from_raw(RawEmptyUser { id: 3 }.into()).unwrap();
        assert_eq!(u.id(), 3);
        assert_eq!(u.name(), "");
        assert_eq!(u.username(), None);
        assert!(!u.is_bot());
        assert_eq!(
            u.reference(),
            PeerRef::User {
                id: 3,
                access_hash: None
            }
        );
    }

    #[test]
    fn reference_carries_access_hash() {
        let u = User::from_raw(raw_user(Some("A"), None).into()).unwrap();
        assert_eq!(
            u.reference(),
            PeerRef::User {
                id: 7,
                access_hash: Some(77)
            }
        );
    }

    #[test]
    fn rejects_non_user_records() {
        let raw = RawPeer::from(RawChat {
            id: 1,
            title: "t".to_string(),
            participants_count: 0,
        });
        let err = User::from_raw(raw).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConstruction {
                expected: "User",
                found: "Chat",
                ..
            }
        ));
    }
}
