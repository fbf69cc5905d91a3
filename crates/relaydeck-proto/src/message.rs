use tracing::trace;

/// Identifies one relay board. Board 0 is the master unit.
pub type BoardId = u16;

/// Identifies one relay channel on a board (1..=6).
pub type ChannelId = u8;

/// Outbound: request the auxiliary board count.
pub const SYNC_BOARDS: &str = "SYNC_BOARDS";
/// Outbound: request a full re-announce of every channel state.
pub const SYNC_ALL: &str = "SYNC_ALL";

const BOARD_COUNT_PREFIX: &str = "BOARDS:";
const DISCONNECTED_SUFFIX: &str = "_DISCONNECTED";
const ARMED_MARKER: &str = "_ARMED";
const DISARMED_MARKER: &str = "_DISARMED";

/// A decoded inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// `BOARDS:<n>` — total auxiliary boards beyond the master.
    BoardCount(u16),
    /// `B<b>_CH<c>_ARMED` / `B<b>_CH<c>_DISARMED`.
    ChannelStatus {
        board: BoardId,
        channel: ChannelId,
        armed: bool,
    },
    /// `B<b>_DISCONNECTED`.
    BoardDisconnected { board: BoardId },
    /// Anything else. Carries the raw line; must never mutate state and
    /// must never stop processing of subsequent lines.
    Unrecognized(String),
}

/// A command to send to the relay network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCommand {
    SyncBoards,
    SyncAll,
    SetChannel {
        board: BoardId,
        channel: ChannelId,
        armed: bool,
    },
}

/// Decode one trimmed line. Match arms are ordered; first match wins, and
/// tokens are case-sensitive.
pub fn decode(line: &str) -> InboundEvent {
    if let Some(rest) = line.strip_prefix(BOARD_COUNT_PREFIX) {
        return match rest.parse::<u16>() {
            Ok(n) => InboundEvent::BoardCount(n),
            Err(_) => unrecognized(line),
        };
    }

    if let Some(rest) = line.strip_suffix(DISCONNECTED_SUFFIX) {
        let token = rest.split('_').next().unwrap_or(rest);
        return match parse_board_id(token) {
            Some(board) => InboundEvent::BoardDisconnected { board },
            None => unrecognized(line),
        };
    }

    if line.contains(ARMED_MARKER) || line.contains(DISARMED_MARKER) {
        let tokens: Vec<&str> = line.split('_').collect();
        if let [board, channel, status] = tokens.as_slice() {
            if let (Some(board), Some(channel), Some(armed)) = (
                parse_board_id(board),
                parse_channel_id(channel),
                parse_status(status),
            ) {
                return InboundEvent::ChannelStatus {
                    board,
                    channel,
                    armed,
                };
            }
        }
        return unrecognized(line);
    }

    unrecognized(line)
}

/// Encode a command to wire text, without the trailing terminator (the
/// transport write appends it).
pub fn encode(cmd: &OutboundCommand) -> String {
    match cmd {
        OutboundCommand::SyncBoards => SYNC_BOARDS.to_string(),
        OutboundCommand::SyncAll => SYNC_ALL.to_string(),
        OutboundCommand::SetChannel {
            board,
            channel,
            armed,
        } => {
            let verb = if *armed { "ARM" } else { "DISARM" };
            format!("B{board}_CH{channel}_{verb}")
        }
    }
}

fn parse_board_id(token: &str) -> Option<BoardId> {
    token.strip_prefix('B')?.parse().ok()
}

fn parse_channel_id(token: &str) -> Option<ChannelId> {
    token.strip_prefix("CH")?.parse().ok()
}

fn parse_status(token: &str) -> Option<bool> {
    match token {
        "ARMED" => Some(true),
        "DISARMED" => Some(false),
        _ => None,
    }
}

fn unrecognized(line: &str) -> InboundEvent {
    trace!(line, "unrecognized inbound line");
    InboundEvent::Unrecognized(line.to_string())
}
