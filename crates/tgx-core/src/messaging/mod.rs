//! Outgoing messages: types, the transport port and the unified send.

pub mod dispatch;
pub mod options;
pub mod port;
pub mod types;
