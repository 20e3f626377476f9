//! The interactive selection state machine.

use crate::board::{Board, PieceId, SquareId};
use crate::constants::Position;
use crate::piece;
use crate::turn::TurnController;

/// What a call to [`SelectionController::select_at`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Nothing happened: empty square, opposing piece, a piece with no
    /// reach, or no board at all.
    Ignored,
    /// A piece was picked up and its reach marked.
    Selected { square: SquareId },
    /// The selection was dropped without a move (non-targeted square, or a
    /// friendly-occupied destination).
    Deselected,
    /// The selected piece moved into an empty square.
    Moved { piece: PieceId, to: SquareId },
    /// The selected piece captured an opposing piece.
    Captured { piece: PieceId, to: SquareId },
}

/// Hears about successful selections. Registered once at construction and
/// invoked synchronously from within `select_at`.
pub trait SelectionObserver {
    fn square_selected(&mut self, square: SquareId);
}

enum State {
    Idle,
    PieceSelected { piece: PieceId, square: SquareId },
}

/// Drives selection, move commits and turn advancement from board-space
/// click points. One instance lives per game session.
pub struct SelectionController {
    state: State,
    observer: Option<Box<dyn SelectionObserver>>,
}

impl SelectionController {
    pub fn new() -> Self {
        SelectionController { state: State::Idle, observer: None }
    }

    /// A controller that notifies `observer` on every successful selection.
    pub fn with_observer(observer: Box<dyn SelectionObserver>) -> Self {
        SelectionController { state: State::Idle, observer: Some(observer) }
    }

    /// The currently selected square, if a piece is under control.
    pub fn selected_square(&self) -> Option<SquareId> {
        match self.state {
            State::Idle => None,
            State::PieceSelected { square, .. } => Some(square),
        }
    }

    /// The piece under interactive control, if any.
    pub fn selected_piece(&self) -> Option<PieceId> {
        match self.state {
            State::Idle => None,
            State::PieceSelected { piece, .. } => Some(piece),
        }
    }

    /// Back to `Idle` without touching the board. Used on rebuild.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Process one click at a board-space point, fully, before returning.
    ///
    /// The point is expected to already be in board space; projecting a
    /// screen click onto the board plane is the input layer's job.
    pub fn select_at(
        &mut self,
        board: &mut Board,
        turns: &mut TurnController,
        point: Position,
    ) -> SelectionOutcome {
        let closest = match board.closest_square(point) {
            Some(id) => id,
            None => {
                tracing::warn!("select_at called before a board was built");
                return SelectionOutcome::Ignored;
            }
        };

        match self.state {
            State::PieceSelected { piece, .. } => {
                self.commit_or_deselect(board, turns, piece, closest)
            }
            State::Idle => self.try_select(board, turns, closest),
        }
    }

    /// Second click: a commit into a targeted square, or a plain deselect.
    /// Either way every `selected`/`targeted` flag is cleared and the
    /// machine returns to `Idle`; only a completed commit advances the turn.
    fn commit_or_deselect(
        &mut self,
        board: &mut Board,
        turns: &mut TurnController,
        piece: PieceId,
        clicked: SquareId,
    ) -> SelectionOutcome {
        let outcome = if board.squares[clicked].targeted {
            commit(board, piece, clicked)
        } else {
            SelectionOutcome::Deselected
        };

        board.clear_selection_flags();
        self.state = State::Idle;

        if matches!(outcome, SelectionOutcome::Moved { .. } | SelectionOutcome::Captured { .. }) {
            turns.advance_turn(board);
        }
        outcome
    }

    /// First click: pick up an active-team piece and mark its reach.
    fn try_select(
        &mut self,
        board: &mut Board,
        turns: &TurnController,
        clicked: SquareId,
    ) -> SelectionOutcome {
        let occupant = match board.squares[clicked].occupant {
            Some(id) => id,
            None => return SelectionOutcome::Ignored,
        };
        let selected = match board.piece(occupant) {
            Some(p) => *p,
            None => {
                tracing::error!(square = clicked, occupant, "occupant points at an empty piece slot");
                return SelectionOutcome::Ignored;
            }
        };
        if selected.team != turns.active_team() {
            return SelectionOutcome::Ignored;
        }

        let targets = piece::compute_targets(board, selected.square, selected.direction);
        if targets[0].is_none() && targets[1].is_none() {
            // A piece with no reach is not worth holding.
            return SelectionOutcome::Ignored;
        }

        if let Some(slot) = board.pieces[occupant].as_mut() {
            slot.targets = targets;
        }
        board.squares[clicked].selected = true;
        for target in targets.into_iter().flatten() {
            board.squares[target].selected = true;
            board.squares[target].targeted = true;
        }
        self.state = State::PieceSelected { piece: occupant, square: clicked };

        if let Some(observer) = self.observer.as_mut() {
            observer.square_selected(clicked);
        }
        SelectionOutcome::Selected { square: clicked }
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        SelectionController::new()
    }
}

/// Resolve a commit into a targeted square. Destination legality is decided
/// here and only here: a friendly occupant rejects the move, an enemy is
/// captured, an empty square is entered directly.
fn commit(board: &mut Board, piece: PieceId, destination: SquareId) -> SelectionOutcome {
    let mover_team = match board.piece(piece) {
        Some(p) => p.team,
        None => {
            tracing::error!(piece, "selected piece vanished before commit");
            return SelectionOutcome::Deselected;
        }
    };
    let defender_team = board.squares[destination]
        .occupant
        .and_then(|id| board.piece(id))
        .map(|defender| defender.team);
    if defender_team == Some(mover_team) {
        return SelectionOutcome::Deselected;
    }

    match board.move_piece(piece, destination) {
        Some(_) => SelectionOutcome::Captured { piece, to: destination },
        None => SelectionOutcome::Moved { piece, to: destination },
    }
}
