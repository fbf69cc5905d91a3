use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::debug;

use crate::channel::{ByteChannel, ChannelEvent};
use crate::error::{Result, TransportError};

const READ_CHUNK_SIZE: usize = 4 * 1024;
const INBOUND_QUEUE_DEPTH: usize = 64;

/// A [`ByteChannel`] over a TCP connection.
///
/// Suits serial or BLE bridge daemons that expose the relay network's raw
/// byte stream on a socket. The connection is split on connect: the write
/// half lives in the returned channel, the read half is owned by a spawned
/// task that pushes [`ChannelEvent`]s into the returned receiver until EOF
/// or error.
pub struct TcpChannel {
    writer: OwnedWriteHalf,
    peer: String,
}

impl TcpChannel {
    /// Connect to `addr` and start the inbound reader task.
    pub async fn connect(addr: &str) -> Result<(Self, mpsc::Receiver<ChannelEvent>)> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| TransportError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        stream.set_nodelay(true)?;

        let (mut read_half, writer) = stream.into_split();
        let (tx, rx) = mpsc::channel(INBOUND_QUEUE_DEPTH);

        let peer = addr.to_string();
        let peer_for_task = peer.clone();
        tokio::spawn(async move {
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            loop {
                match read_half.read(&mut chunk).await {
                    Ok(0) => {
                        debug!(peer = %peer_for_task, "channel closed by peer");
                        let _ = tx.send(ChannelEvent::Closed(None)).await;
                        break;
                    }
                    Ok(n) => {
                        let data = Bytes::copy_from_slice(&chunk[..n]);
                        if tx.send(ChannelEvent::Data(data)).await.is_err() {
                            // Receiver dropped; the session is gone.
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(peer = %peer_for_task, error = %err, "channel read failed");
                        let _ = tx.send(ChannelEvent::Closed(Some(err.into()))).await;
                        break;
                    }
                }
            }
        });

        Ok((Self { writer, peer }, rx))
    }

    /// Address this channel was connected to.
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

#[async_trait]
impl ByteChannel for TcpChannel {
    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

impl std::fmt::Debug for TcpChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpChannel").field("peer", &self.peer).finish()
    }
}
