use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, TransportError};

/// One delivery from the inbound half of a duplex byte channel.
#[derive(Debug)]
pub enum ChannelEvent {
    /// A chunk of raw bytes. Chunk boundaries are arbitrary and may split
    /// messages, or even multi-byte characters, anywhere.
    Data(Bytes),
    /// The channel is gone. `Some` carries the fault; `None` is a clean
    /// close by the peer.
    Closed(Option<TransportError>),
}

/// Outbound half of a duplex byte channel.
///
/// `write` may suspend while the transport accepts the bytes. Writes are
/// fire-and-forget: responses, if any, arrive later as independent inbound
/// data.
#[async_trait]
pub trait ByteChannel: Send {
    /// Write the given bytes to the peer.
    async fn write(&mut self, bytes: &[u8]) -> Result<()>;
}
