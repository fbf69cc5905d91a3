use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use relaydeck_proto::{BoardId, ChannelId};
use relaydeck_session::{Board, ChannelState, Model, ModelChange, CHANNELS_PER_BOARD};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ChangeOutput<'a> {
    change: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<BoardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<ChannelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
}

/// Print the full board/channel snapshot.
pub fn print_model(model: &Model, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(model).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            let mut header = vec!["BOARD".to_string(), "NAME".to_string(), "LINK".to_string()];
            header.extend((1..=CHANNELS_PER_BOARD).map(|ch| format!("CH{ch}")));
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(header);
            for board in model.boards() {
                table.add_row(board_row(board, board.id == model.selected_board_id()));
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for board in model.boards() {
                let marker = if board.id == model.selected_board_id() {
                    "*"
                } else {
                    " "
                };
                let channels: Vec<String> = board
                    .channels
                    .iter()
                    .map(|(ch, state)| format!("ch{ch}={}", state_name(*state)))
                    .collect();
                println!(
                    "{marker}B{} {} [{}] {}",
                    board.id,
                    board.name,
                    link_name(board.connected),
                    channels.join(" ")
                );
            }
        }
    }
}

/// Print one change notification. A full resync prints the whole snapshot;
/// a single-board change prints one line.
pub fn print_change(model: &Model, change: ModelChange, format: OutputFormat) {
    match change {
        ModelChange::Replaced => match format {
            OutputFormat::Json => {
                let out = ChangeOutput {
                    change: "replaced",
                    board: None,
                    channel: None,
                    state: None,
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            _ => print_model(model, format),
        },
        ModelChange::Changed { board, channel } => {
            let state = match channel {
                Some(ch) => model
                    .board(board)
                    .and_then(|b| b.channel(ch))
                    .map_or("unknown", state_name),
                None => "disconnected",
            };
            match format {
                OutputFormat::Json => {
                    let out = ChangeOutput {
                        change: "changed",
                        board: Some(board),
                        channel,
                        state: Some(state),
                    };
                    println!(
                        "{}",
                        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                    );
                }
                _ => match channel {
                    Some(ch) => println!("B{board} CH{ch} {state}"),
                    None => println!("B{board} {state}"),
                },
            }
        }
    }
}

fn board_row(board: &Board, selected: bool) -> Vec<String> {
    let name = if selected {
        format!("{} *", board.name)
    } else {
        board.name.clone()
    };
    let mut row = vec![
        format!("B{}", board.id),
        name,
        link_name(board.connected).to_string(),
    ];
    for ch in 1..=CHANNELS_PER_BOARD {
        row.push(
            board
                .channel(ch)
                .map_or("-", state_name)
                .to_string(),
        );
    }
    row
}

fn state_name(state: ChannelState) -> &'static str {
    match state {
        ChannelState::Armed => "armed",
        ChannelState::Disarmed => "disarmed",
    }
}

fn link_name(connected: bool) -> &'static str {
    if connected {
        "up"
    } else {
        "down"
    }
}
