//! Duplex byte channel abstraction for relaydeck.
//!
//! A relay network is reached over some byte-stream transport (a TCP bridge
//! to a serial adapter, a BLE gateway daemon, a test harness). This crate
//! defines the seam the rest of relaydeck talks through: an async write
//! half ([`ByteChannel`]) and a push source of inbound [`ChannelEvent`]s.
//!
//! Delivery boundaries carry no meaning — chunks arrive sized and split
//! however the transport saw fit. Reassembly is the framing layer's job.

pub mod channel;
pub mod error;
pub mod tcp;

pub use channel::{ByteChannel, ChannelEvent};
pub use error::{Result, TransportError};
pub use tcp::TcpChannel;
