//! Turn alternation and the per-turn target refresh.

use crate::board::Board;
use crate::constants::Team;
use crate::piece;

/// Tracks whose turn it is and repaints the passive target highlight for
/// the side coming on move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnController {
    /// Completed-move counter. Its parity decides the active team.
    pub turn_number: u32,
}

impl TurnController {
    /// Turn 0: Black to move; odd turns are White's.
    pub fn new() -> Self {
        TurnController { turn_number: 0 }
    }

    /// The team on move for the current turn.
    pub fn active_team(self) -> Team {
        Team::for_turn(self.turn_number)
    }

    /// Count the completed move and refresh the incoming team's cached
    /// reach, marking each reachable square with the `debug_targeted`
    /// highlight. The marks are an observational aid and never feed back
    /// into move legality.
    pub fn advance_turn(&mut self, board: &mut Board) {
        self.turn_number += 1;
        let active = self.active_team();

        board.clear_debug_targets();
        for id in 0..board.pieces.len() {
            let (square, direction, team) = match board.pieces[id] {
                Some(p) => (p.square, p.direction, p.team),
                None => continue,
            };
            if team != active {
                continue;
            }

            let targets = piece::compute_targets(board, square, direction);
            if let Some(slot) = board.pieces[id].as_mut() {
                slot.targets = targets;
            }
            for target in targets.into_iter().flatten() {
                board.squares[target].debug_targeted = true;
            }
        }
        tracing::debug!(turn = self.turn_number, team = ?active, "turn advanced");
    }
}

impl Default for TurnController {
    fn default() -> Self {
        TurnController::new()
    }
}
