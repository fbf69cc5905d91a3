use relaydeck_frame::LineFramer;
use relaydeck_proto::{decode, encode, BoardId, OutboundCommand};
use relaydeck_transport::{ByteChannel, ChannelEvent};
use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::error::{Result, SessionError};
use crate::model::Model;
use crate::reconcile::{self, ModelChange, ReconcileOutcome};

/// Lifecycle of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connected,
    Ended,
}

/// Owns one connection to the relay network: the write half of the byte
/// channel, the line framer, and the authoritative model.
///
/// All inbound work (framing, decoding, reconciling) runs to completion per
/// chunk on the caller's task; there is no concurrent model mutation.
/// Writes are the only suspension point and are fire-and-forget — the model
/// changes only when the corresponding status event echoes back.
#[derive(Debug)]
pub struct Session<C: ByteChannel> {
    channel: C,
    framer: LineFramer,
    model: Model,
    state: SessionState,
}

impl<C: ByteChannel> Session<C> {
    /// Take ownership of a freshly established channel and issue the
    /// initial board sync.
    pub async fn start(channel: C) -> Result<Self> {
        let mut session = Self {
            channel,
            framer: LineFramer::new(),
            model: Model::new(),
            state: SessionState::Idle,
        };
        session.state = SessionState::Connected;
        session.write_command(&OutboundCommand::SyncBoards).await?;
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read-only snapshot of the current model. After the session ends this
    /// is the frozen last-known state, kept for stale display.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Process one inbound chunk and return the change notifications it
    /// produced, one per applied event, in arrival order. Unrecognized
    /// lines and events for unknown ids produce none.
    ///
    /// Chunks arriving after the session ended are dropped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ModelChange> {
        if self.state != SessionState::Connected {
            return Vec::new();
        }
        let mut changes = Vec::new();
        for line in self.framer.feed(chunk) {
            let event = decode(&line);
            if let ReconcileOutcome::Applied(change) = reconcile::apply(&mut self.model, event) {
                changes.push(change);
            }
        }
        changes
    }

    /// Encode and write one command. May suspend while the transport
    /// accepts the write; no response is awaited. A write failure is fatal
    /// to the session.
    pub async fn submit(&mut self, cmd: &OutboundCommand) -> Result<()> {
        if self.state != SessionState::Connected {
            return Err(SessionError::NotConnected);
        }
        self.write_command(cmd).await
    }

    /// Change the selected board; unknown ids are a no-op.
    pub fn select_board(&mut self, id: BoardId) -> bool {
        reconcile::select_board(&mut self.model, id)
    }

    /// Mark the session over. The model is frozen, not cleared, and no
    /// further inbound lines are processed.
    pub fn end(&mut self) {
        if self.state == SessionState::Connected {
            self.state = SessionState::Ended;
        }
    }

    /// Pump inbound channel events through the session until the channel
    /// closes, invoking `on_change` with a model snapshot per notification.
    ///
    /// Returns `Ok` on a clean close, the transport fault otherwise; either
    /// way the session is `Ended` and the model frozen.
    pub async fn drive<F>(
        &mut self,
        inbound: &mut mpsc::Receiver<ChannelEvent>,
        mut on_change: F,
    ) -> Result<()>
    where
        F: FnMut(&Model, ModelChange),
    {
        while let Some(event) = inbound.recv().await {
            match event {
                ChannelEvent::Data(chunk) => {
                    for change in self.feed(&chunk) {
                        on_change(&self.model, change);
                    }
                }
                ChannelEvent::Closed(err) => {
                    self.end();
                    match err {
                        Some(err) => {
                            warn!(error = %err, "channel failed; model frozen at last-known state");
                            return Err(err.into());
                        }
                        None => {
                            trace!("channel closed cleanly");
                            return Ok(());
                        }
                    }
                }
            }
        }
        // Sender dropped without a Closed event; treat as a clean close.
        self.end();
        Ok(())
    }

    async fn write_command(&mut self, cmd: &OutboundCommand) -> Result<()> {
        let mut wire = encode(cmd);
        wire.push('\n');
        match self.channel.write(wire.as_bytes()).await {
            Ok(()) => {
                trace!(command = wire.trim_end(), "command written");
                Ok(())
            }
            Err(err) => {
                self.end();
                Err(err.into())
            }
        }
    }
}
