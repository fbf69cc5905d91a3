use std::collections::BTreeMap;

use relaydeck_proto::{BoardId, ChannelId};
use serde::Serialize;

/// Every board carries exactly this many channels, ids 1..=6.
pub const CHANNELS_PER_BOARD: ChannelId = 6;

/// Board id reserved for the master unit.
pub const MASTER_BOARD_ID: BoardId = 0;

/// Arm state of one relay channel. There is no third value; an event
/// naming any other status is a decode failure, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelState {
    Armed,
    Disarmed,
}

/// One relay board and its channel states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    /// One-way until the next full resync: no reconnect event exists in
    /// the protocol.
    pub connected: bool,
    pub channels: BTreeMap<ChannelId, ChannelState>,
}

impl Board {
    /// A freshly discovered board: all channels present and disarmed,
    /// connected, named from the label table.
    pub(crate) fn new(id: BoardId) -> Self {
        let channels = (1..=CHANNELS_PER_BOARD)
            .map(|ch| (ch, ChannelState::Disarmed))
            .collect();
        Self {
            id,
            name: board_name(id),
            connected: true,
            channels,
        }
    }

    /// State of the given channel, if the id is one this board carries.
    pub fn channel(&self, id: ChannelId) -> Option<ChannelState> {
        self.channels.get(&id).copied()
    }
}

fn board_name(id: BoardId) -> String {
    match id {
        MASTER_BOARD_ID => "Master Unit".to_string(),
        _ => format!("Aux Board {id}"),
    }
}

/// The authoritative local view of the relay network.
///
/// Empty until the first board-count sync; fully replaced (never merged) by
/// each subsequent one. Mutated only by the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    boards: BTreeMap<BoardId, Board>,
    selected: BoardId,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// True before any board-count sync has arrived.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// All known boards in discovery order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.get(&id)
    }

    pub fn selected_board_id(&self) -> BoardId {
        self.selected
    }

    pub fn selected_board(&self) -> Option<&Board> {
        self.boards.get(&self.selected)
    }

    /// Full resync: discard everything and rebuild the master plus
    /// `aux_count` auxiliary boards. Selection resets to the master.
    pub(crate) fn replace_all(&mut self, aux_count: u16) {
        self.boards = (MASTER_BOARD_ID..=aux_count)
            .map(|id| (id, Board::new(id)))
            .collect();
        self.selected = MASTER_BOARD_ID;
    }

    pub(crate) fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.get_mut(&id)
    }

    pub(crate) fn set_selected(&mut self, id: BoardId) {
        self.selected = id;
    }
}
