//! Core domain layer of the tgx Telegram client SDK.
//!
//! Raw chat/channel/user records are resolved into typed peers ([`peer`]) and
//! outgoing messages go through one reconciling send operation
//! ([`messaging::dispatch`]). The transport that actually talks to Telegram
//! lives behind [`messaging::port::Transport`], implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod peer;

pub use errors::{Error, Result};
pub use messaging::dispatch::{reconcile, MessageDispatcher, SendIntent};
pub use peer::{reference, resolve, Peer, PeerInfo, PeerRef};
