//! Relay board wire protocol.
//!
//! One ASCII message per line. Inbound lines are decoded into typed
//! [`InboundEvent`]s; outbound [`OutboundCommand`]s are encoded back to
//! wire text. Decoding is total — a line matching no message shape becomes
//! [`InboundEvent::Unrecognized`], never an error.
//!
//! The vocabulary is asymmetric on purpose: inbound status events use the
//! state adjectives `ARMED`/`DISARMED`, outbound commands use the
//! imperative verbs `ARM`/`DISARM`. That is the wire contract the boards
//! speak; do not normalize it.

pub mod message;

pub use message::{decode, encode, BoardId, ChannelId, InboundEvent, OutboundCommand};
pub use message::{SYNC_ALL, SYNC_BOARDS};
