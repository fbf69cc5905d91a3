//! Board/channel state and session control for relaydeck.
//!
//! This is the "just works" layer. Hand it a connected byte channel and it
//! keeps an authoritative local model of every board and channel, driven by
//! push-style status events: raw bytes are framed into lines, lines decoded
//! into events, events reconciled into the model, and each applied event
//! surfaces as one change notification for the presentation layer.
//!
//! The model is exclusively owned by the session; nothing mutates it except
//! the reconciler, one event at a time.

pub mod error;
pub mod model;
pub mod reconcile;
pub mod session;

pub use error::{Result, SessionError};
pub use model::{Board, ChannelState, Model, CHANNELS_PER_BOARD, MASTER_BOARD_ID};
pub use reconcile::{apply, select_board, ModelChange, ReconcileOutcome};
pub use session::{Session, SessionState};
