//! Pieces and the straight-ahead movement rule.

use crate::board::{Board, SquareId};
use crate::constants::{Direction, Team};

/// A piece: bound to exactly one square, moving along one fixed heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub team: Team,
    pub direction: Direction,
    /// The occupied square. Reassigned only inside [`Board::move_piece`],
    /// which keeps the square's back-reference in step.
    pub square: SquareId,
    /// Cached reach, refreshed by the controllers. Slot 1 is only ever
    /// present when slot 0 is.
    pub targets: [Option<SquareId>; 2],
}

impl Piece {
    pub fn new(team: Team, direction: Direction, square: SquareId) -> Self {
        Piece { team, direction, square, targets: [None, None] }
    }
}

/// The squares a piece standing on `square` may move or capture into: one
/// or two steps straight along `direction`, chained neighbor lookups.
///
/// Occupancy is not consulted here. The second step stays reachable when
/// the first square is occupied (a jump, by rule); whether the destination
/// itself can be entered is decided at commit time.
pub fn compute_targets(
    board: &Board,
    square: SquareId,
    direction: Direction,
) -> [Option<SquareId>; 2] {
    let first = board.neighbor(square, direction).map(|s| s.id);
    let second = first
        .and_then(|id| board.neighbor(id, direction))
        .map(|s| s.id);
    [first, second]
}

#[cfg(test)]
mod tests {
    use super::compute_targets;
    use crate::board::Board;
    use crate::config::BoardConfig;
    use crate::constants::Direction;
    use crate::placement::FixedPlacement;

    fn empty_board() -> Board {
        Board::prepare(&BoardConfig::new(4), &FixedPlacement::new(Vec::new()))
    }

    #[test]
    fn reach_is_two_squares_straight_ahead() {
        let board = empty_board();
        assert_eq!(compute_targets(&board, 5, Direction::Right), [Some(6), Some(7)]);
        assert_eq!(compute_targets(&board, 5, Direction::Down), [Some(9), Some(13)]);
        assert_eq!(compute_targets(&board, 5, Direction::UpperLeft), [Some(0), None]);
    }

    #[test]
    fn reach_truncates_at_the_edge() {
        let board = empty_board();
        // One square from the edge: only the first slot resolves.
        assert_eq!(compute_targets(&board, 6, Direction::Right), [Some(7), None]);
        // On the edge: no reach at all.
        assert_eq!(compute_targets(&board, 7, Direction::Right), [None, None]);
        assert_eq!(compute_targets(&board, 0, Direction::UpperLeft), [None, None]);
    }
}
