use relaydeck_proto::{BoardId, ChannelId, InboundEvent};
use tracing::debug;

use crate::model::{ChannelState, Model};

/// A model mutation worth telling the presentation layer about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    /// The whole model was rebuilt from a board-count sync.
    Replaced,
    /// One board changed: a channel state if `channel` is set, its
    /// connectivity otherwise.
    Changed {
        board: BoardId,
        channel: Option<ChannelId>,
    },
}

/// Result of applying one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied(ModelChange),
    /// The event was unrecognized or referred to a board or channel that
    /// sync never announced. The model is untouched and processing of
    /// subsequent events continues.
    Ignored,
}

/// Apply one decoded event to the model.
///
/// The only mutation path into a [`Model`]. Events naming unknown ids are
/// dropped rather than fabricating boards the sync never established.
pub fn apply(model: &mut Model, event: InboundEvent) -> ReconcileOutcome {
    match event {
        InboundEvent::BoardCount(n) => {
            model.replace_all(n);
            debug!(aux_boards = n, "model rebuilt from board-count sync");
            ReconcileOutcome::Applied(ModelChange::Replaced)
        }
        InboundEvent::ChannelStatus {
            board,
            channel,
            armed,
        } => {
            let Some(entry) = model
                .board_mut(board)
                .and_then(|b| b.channels.get_mut(&channel))
            else {
                debug!(board, channel, "status for unknown board/channel ignored");
                return ReconcileOutcome::Ignored;
            };
            *entry = if armed {
                ChannelState::Armed
            } else {
                ChannelState::Disarmed
            };
            ReconcileOutcome::Applied(ModelChange::Changed {
                board,
                channel: Some(channel),
            })
        }
        InboundEvent::BoardDisconnected { board } => match model.board_mut(board) {
            Some(b) => {
                b.connected = false;
                debug!(board, "board marked disconnected until next resync");
                ReconcileOutcome::Applied(ModelChange::Changed {
                    board,
                    channel: None,
                })
            }
            None => {
                debug!(board, "disconnect for unknown board ignored");
                ReconcileOutcome::Ignored
            }
        },
        InboundEvent::Unrecognized(_) => ReconcileOutcome::Ignored,
    }
}

/// Change the selected board. Selecting an id sync never announced is a
/// no-op; the previous selection stays valid.
pub fn select_board(model: &mut Model, id: BoardId) -> bool {
    if model.board(id).is_none() {
        return false;
    }
    model.set_selected(id);
    true
}

#[cfg(test)]
mod tests {
    use relaydeck_proto::decode;

    use super::*;
    use crate::model::{CHANNELS_PER_BOARD, MASTER_BOARD_ID};

    fn synced_model(aux_count: u16) -> Model {
        let mut model = Model::new();
        apply(&mut model, InboundEvent::BoardCount(aux_count));
        model
    }

    #[test]
    fn board_count_builds_master_plus_n_boards() {
        for n in [0u16, 1, 2, 5] {
            let mut model = Model::new();
            let outcome = apply(&mut model, InboundEvent::BoardCount(n));
            assert_eq!(outcome, ReconcileOutcome::Applied(ModelChange::Replaced));

            assert_eq!(model.boards().count(), usize::from(n) + 1);
            assert_eq!(model.selected_board_id(), MASTER_BOARD_ID);
            for board in model.boards() {
                assert!(board.connected);
                assert_eq!(board.channels.len(), usize::from(CHANNELS_PER_BOARD));
                assert!(board
                    .channels
                    .values()
                    .all(|&s| s == ChannelState::Disarmed));
            }
        }
    }

    #[test]
    fn board_count_discards_previous_state_and_selection() {
        let mut model = synced_model(3);
        apply(
            &mut model,
            InboundEvent::ChannelStatus {
                board: 2,
                channel: 1,
                armed: true,
            },
        );
        select_board(&mut model, 2);

        apply(&mut model, InboundEvent::BoardCount(1));
        assert_eq!(model.boards().count(), 2);
        assert_eq!(model.selected_board_id(), MASTER_BOARD_ID);
        // Board 2 is gone entirely, not carried over.
        assert!(model.board(2).is_none());
        // Survivors are freshly disarmed.
        assert_eq!(
            model.board(1).unwrap().channel(1),
            Some(ChannelState::Disarmed)
        );
    }

    #[test]
    fn channel_status_updates_known_board() {
        let mut model = synced_model(2);
        let outcome = apply(
            &mut model,
            InboundEvent::ChannelStatus {
                board: 1,
                channel: 3,
                armed: true,
            },
        );
        assert_eq!(
            outcome,
            ReconcileOutcome::Applied(ModelChange::Changed {
                board: 1,
                channel: Some(3),
            })
        );
        assert_eq!(model.board(1).unwrap().channel(3), Some(ChannelState::Armed));
    }

    #[test]
    fn channel_status_for_unknown_board_leaves_model_unchanged() {
        let mut model = synced_model(1);
        let before = model.clone();

        let outcome = apply(
            &mut model,
            InboundEvent::ChannelStatus {
                board: 9,
                channel: 1,
                armed: true,
            },
        );
        assert_eq!(outcome, ReconcileOutcome::Ignored);
        assert_eq!(model, before);
    }

    #[test]
    fn channel_status_for_out_of_range_channel_is_ignored() {
        let mut model = synced_model(1);
        let before = model.clone();

        let outcome = apply(
            &mut model,
            InboundEvent::ChannelStatus {
                board: 1,
                channel: 7,
                armed: true,
            },
        );
        assert_eq!(outcome, ReconcileOutcome::Ignored);
        assert_eq!(model, before);
    }

    #[test]
    fn disconnect_is_one_way_until_resync() {
        let mut model = synced_model(2);
        let outcome = apply(&mut model, InboundEvent::BoardDisconnected { board: 1 });
        assert_eq!(
            outcome,
            ReconcileOutcome::Applied(ModelChange::Changed {
                board: 1,
                channel: None,
            })
        );
        assert!(!model.board(1).unwrap().connected);

        // No reconnect event exists; only a fresh sync restores the flag.
        apply(&mut model, InboundEvent::BoardCount(2));
        assert!(model.board(1).unwrap().connected);
    }

    #[test]
    fn disconnect_for_unknown_board_is_ignored() {
        let mut model = synced_model(0);
        let before = model.clone();
        assert_eq!(
            apply(&mut model, InboundEvent::BoardDisconnected { board: 4 }),
            ReconcileOutcome::Ignored
        );
        assert_eq!(model, before);
    }

    #[test]
    fn sync_then_status_then_disconnect_sequence() {
        let mut model = Model::new();
        apply(&mut model, InboundEvent::BoardCount(2));
        apply(
            &mut model,
            InboundEvent::ChannelStatus {
                board: 1,
                channel: 3,
                armed: true,
            },
        );
        apply(&mut model, InboundEvent::BoardDisconnected { board: 1 });

        let board1 = model.board(1).unwrap();
        assert_eq!(board1.channel(3), Some(ChannelState::Armed));
        assert!(!board1.connected);

        for id in [0, 2] {
            let untouched = model.board(id).unwrap();
            assert!(untouched.connected);
            assert!(untouched
                .channels
                .values()
                .all(|&s| s == ChannelState::Disarmed));
        }
    }

    #[test]
    fn unrecognized_event_is_ignored() {
        let mut model = synced_model(1);
        let before = model.clone();
        let event = decode("GARBAGE LINE");
        assert_eq!(apply(&mut model, event), ReconcileOutcome::Ignored);
        assert_eq!(model, before);
    }

    #[test]
    fn no_event_creates_a_board_sync_did_not_establish() {
        // Before any sync, every targeted event is ignored.
        let mut model = Model::new();
        assert_eq!(
            apply(
                &mut model,
                InboundEvent::ChannelStatus {
                    board: 0,
                    channel: 1,
                    armed: true,
                },
            ),
            ReconcileOutcome::Ignored
        );
        assert_eq!(
            apply(&mut model, InboundEvent::BoardDisconnected { board: 0 }),
            ReconcileOutcome::Ignored
        );
        assert!(model.is_empty());
    }

    #[test]
    fn select_known_board() {
        let mut model = synced_model(2);
        assert!(select_board(&mut model, 2));
        assert_eq!(model.selected_board_id(), 2);
        assert_eq!(model.selected_board().unwrap().id, 2);
    }

    #[test]
    fn select_unknown_board_is_a_no_op() {
        let mut model = synced_model(2);
        select_board(&mut model, 1);
        assert!(!select_board(&mut model, 9));
        assert_eq!(model.selected_board_id(), 1);
    }
}
