//! The board: square collection, neighbor resolution and the single
//! atomic move operation.

use crate::config::BoardConfig;
use crate::constants::{Direction, Position, Team};
use crate::piece::Piece;
use crate::placement::{PieceFactory, PieceSpawn};

/// Index of a square in the board's row-major square list.
pub type SquareId = usize;

/// Index of a piece slot. Stable for the lifetime of one board; a captured
/// piece leaves a `None` slot behind.
pub type PieceId = usize;

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub id: SquareId,
    pub position: Position,
    /// Back-reference to the occupying piece. Written only by board
    /// construction and [`Board::move_piece`].
    pub occupant: Option<PieceId>,
    pub selected: bool,
    pub targeted: bool,
    /// Passive highlight painted by the turn controller. Observational
    /// only; never consulted for legality.
    pub debug_targeted: bool,
}

impl Square {
    fn new(id: SquareId, position: Position) -> Self {
        Square {
            id,
            position,
            occupant: None,
            selected: false,
            targeted: false,
            debug_targeted: false,
        }
    }
}

/// The playing field: `size * size` squares in row-major order (the square
/// at row `i`, column `j` has id `j + i*size`) plus the piece slots that
/// occupy them.
///
/// Presentation layers read the squares and pieces directly; all occupancy
/// mutation goes through [`Board::move_piece`].
#[derive(Debug, Clone)]
pub struct Board {
    pub size: usize,
    pub squares: Vec<Square>,
    pub pieces: Vec<Option<Piece>>,
}

impl Board {
    /// A board with no squares. Feeding it clicks is a caller error; build
    /// one with [`Board::prepare`] first.
    pub fn empty() -> Self {
        Board { size: 0, squares: Vec::new(), pieces: Vec::new() }
    }

    /// Build the full square grid for `config` with its default layout and
    /// populate it through the piece factory.
    pub fn prepare(config: &BoardConfig, factory: &dyn PieceFactory) -> Self {
        Self::prepare_with_layout(config, |row, col| config.square_position(row, col), factory)
    }

    /// As [`Board::prepare`], with a caller-supplied square layout.
    pub fn prepare_with_layout(
        config: &BoardConfig,
        layout: impl Fn(usize, usize) -> Position,
        factory: &dyn PieceFactory,
    ) -> Self {
        let size = config.size;
        let mut squares = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                squares.push(Square::new(j + i * size, layout(i, j)));
            }
        }

        let mut board = Board { size, squares, pieces: Vec::new() };
        for spawn in factory.spawn(&board) {
            board.spawn_piece(spawn);
        }
        tracing::debug!(size, pieces = board.piece_count(), "board prepared");
        board
    }

    fn spawn_piece(&mut self, spawn: PieceSpawn) {
        if spawn.square >= self.squares.len() || self.squares[spawn.square].occupant.is_some() {
            tracing::warn!(square = spawn.square, "factory spawn onto an unusable square, skipped");
            return;
        }
        let id = self.pieces.len();
        self.pieces.push(Some(Piece::new(spawn.team, spawn.direction, spawn.square)));
        self.squares[spawn.square].occupant = Some(id);
    }

    // --- Queries ---

    /// Resolve the square one step from `id` along `direction`.
    ///
    /// A board edge is the normal miss case and returns `None` silently.
    /// The call is total for every id on the board and never indexes
    /// outside the grid.
    pub fn neighbor(&self, id: SquareId, direction: Direction) -> Option<&Square> {
        if id >= self.squares.len() {
            tracing::error!(id, squares = self.squares.len(), "neighbor query outside the board");
            return None;
        }

        let (dr, dc) = direction.deltas();
        let row = (id / self.size) as isize + dr;
        let col = (id % self.size) as isize + dc;
        if row < 0 || row >= self.size as isize || col < 0 || col >= self.size as isize {
            return None;
        }

        let neighbor_id = (row * self.size as isize + col) as usize;
        match self.squares.get(neighbor_id) {
            Some(square) => Some(square),
            None => {
                // Passing the edge guards must land the id back on the
                // grid; reaching this arm means the resolution logic is
                // broken, not that the query hit an edge.
                tracing::error!(id, ?direction, neighbor_id, "neighbor id escaped the board");
                None
            }
        }
    }

    /// The square whose centre is nearest to `point`, by squared Euclidean
    /// distance. Linear scan; `None` only when no board has been built.
    pub fn closest_square(&self, point: Position) -> Option<SquareId> {
        let mut best: Option<(SquareId, f32)> = None;
        for square in &self.squares {
            let distance = point.distance_sq(square.position);
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((square.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// The piece in slot `id`, if it is still on the board.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id).and_then(|slot| slot.as_ref())
    }

    /// Number of pieces still on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces.iter().filter(|slot| slot.is_some()).count()
    }

    /// Slot ids of the surviving pieces on `team`.
    pub fn team_pieces(&self, team: Team) -> Vec<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|piece| (id, piece)))
            .filter(|(_, piece)| piece.team == team)
            .map(|(id, _)| id)
            .collect()
    }

    // --- Mutation ---

    /// Relocate `piece` to `destination`, capturing whatever occupied it.
    ///
    /// This is the only place `Square::occupant` and `Piece::square` change
    /// after construction; both sides of the link move together. Returns
    /// the captured piece, if any.
    pub fn move_piece(&mut self, piece: PieceId, destination: SquareId) -> Option<Piece> {
        if destination >= self.squares.len() {
            tracing::error!(piece, destination, "move_piece to a square outside the board");
            return None;
        }
        let from = match self.piece(piece) {
            Some(p) => p.square,
            None => {
                tracing::error!(piece, "move_piece on an empty piece slot");
                return None;
            }
        };

        let victim = self.squares[destination].occupant.take();
        let captured = victim.and_then(|id| self.pieces[id].take());

        self.squares[from].occupant = None;
        self.squares[destination].occupant = Some(piece);
        if let Some(moving) = self.pieces[piece].as_mut() {
            moving.square = destination;
        }

        tracing::debug!(piece, from, to = destination, captured = captured.is_some(), "piece moved");
        captured
    }

    /// Drop the interactive `selected`/`targeted` flags from every square.
    pub fn clear_selection_flags(&mut self) {
        for square in &mut self.squares {
            square.selected = false;
            square.targeted = false;
        }
    }

    /// Drop the passive turn highlight from every square.
    pub fn clear_debug_targets(&mut self) {
        for square in &mut self.squares {
            square.debug_targeted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::config::BoardConfig;
    use crate::constants::{Direction, Position, Team};
    use crate::placement::{FixedPlacement, PieceSpawn};

    fn board_4(spawns: Vec<PieceSpawn>) -> Board {
        Board::prepare(&BoardConfig::new(4), &FixedPlacement::new(spawns))
    }

    fn spawn(square: usize, team: Team, direction: Direction) -> PieceSpawn {
        PieceSpawn { square, team, direction }
    }

    /// Every occupant back-reference and every piece's square claim must
    /// agree, in both directions.
    fn assert_links_consistent(board: &Board) {
        for square in &board.squares {
            if let Some(id) = square.occupant {
                assert_eq!(board.piece(id).map(|piece| piece.square), Some(square.id));
            }
        }
        for (id, slot) in board.pieces.iter().enumerate() {
            if let Some(piece) = slot {
                assert_eq!(board.squares[piece.square].occupant, Some(id));
            }
        }
    }

    #[test]
    fn neighbor_stays_on_the_board_for_every_id_and_direction() {
        let board = board_4(Vec::new());
        for id in 0..16 {
            for dir in Direction::ALL {
                if let Some(square) = board.neighbor(id, dir) {
                    assert!(square.id < 16);
                }
            }
        }
    }

    #[test]
    fn neighbor_round_trips_through_the_opposite_direction() {
        let board = board_4(Vec::new());
        for id in 0..16 {
            for dir in Direction::ALL {
                if let Some(square) = board.neighbor(id, dir) {
                    let back = board.neighbor(square.id, dir.opposite());
                    assert_eq!(back.map(|s| s.id), Some(id));
                }
            }
        }
    }

    #[test]
    fn corners_have_no_outward_neighbors() {
        let board = board_4(Vec::new());
        for dir in [Direction::Up, Direction::UpperLeft, Direction::Left] {
            assert!(board.neighbor(0, dir).is_none());
        }
        for dir in [Direction::Down, Direction::DownRight, Direction::Right] {
            assert!(board.neighbor(15, dir).is_none());
        }
        // The same corners still resolve inward.
        assert_eq!(board.neighbor(0, Direction::DownRight).map(|s| s.id), Some(5));
        assert_eq!(board.neighbor(15, Direction::UpperLeft).map(|s| s.id), Some(10));
    }

    #[test]
    fn bottom_row_never_steps_off_the_grid() {
        // Includes the first square of the bottom row, the id a
        // greater-than guard would let through.
        let board = board_4(Vec::new());
        for id in 12..16 {
            assert!(board.neighbor(id, Direction::Down).is_none());
            assert!(board.neighbor(id, Direction::DownLeft).is_none());
            assert!(board.neighbor(id, Direction::DownRight).is_none());
        }
    }

    #[test]
    fn closest_square_resolves_by_distance() {
        let board = board_4(Vec::new());
        for id in [0, 5, 10, 15] {
            let centre = board.squares[id].position;
            assert_eq!(board.closest_square(centre), Some(id));
            // A point nudged off-centre still resolves to the same square.
            let nudged = Position::new(centre.x + 0.01, centre.y - 0.01);
            assert_eq!(board.closest_square(nudged), Some(id));
        }
        assert_eq!(Board::empty().closest_square(Position::new(0.0, 0.0)), None);
    }

    #[test]
    fn move_to_an_empty_square_keeps_the_piece_count() {
        let mut board = board_4(vec![spawn(5, Team::White, Direction::Right)]);
        assert_links_consistent(&board);

        let captured = board.move_piece(0, 7);
        assert!(captured.is_none());
        assert_eq!(board.piece_count(), 1);
        assert_eq!(board.piece(0).map(|p| p.square), Some(7));
        assert_eq!(board.squares[5].occupant, None);
        assert_eq!(board.squares[7].occupant, Some(0));
        assert_links_consistent(&board);
    }

    #[test]
    fn capture_removes_the_defender_and_relocates_the_mover() {
        let mut board = board_4(vec![
            spawn(5, Team::White, Direction::Right),
            spawn(6, Team::Black, Direction::Left),
        ]);
        assert_eq!(board.piece_count(), 2);
        assert_links_consistent(&board);

        let captured = board.move_piece(0, 6);
        assert_eq!(captured.map(|p| p.team), Some(Team::Black));
        assert_eq!(board.piece_count(), 1);
        assert!(board.piece(1).is_none());
        assert_eq!(board.squares[6].occupant, Some(0));
        assert_links_consistent(&board);
    }

    #[test]
    fn team_pieces_skips_captured_slots() {
        let mut board = board_4(vec![
            spawn(5, Team::White, Direction::Right),
            spawn(6, Team::Black, Direction::Left),
            spawn(10, Team::Black, Direction::Up),
        ]);
        assert_eq!(board.team_pieces(Team::Black), vec![1, 2]);

        board.move_piece(0, 6);
        assert_eq!(board.team_pieces(Team::Black), vec![2]);
        assert_eq!(board.team_pieces(Team::White), vec![0]);
    }

    #[test]
    fn overlapping_spawns_are_skipped() {
        let board = board_4(vec![
            spawn(5, Team::White, Direction::Right),
            spawn(5, Team::Black, Direction::Left),
        ]);
        assert_eq!(board.piece_count(), 1);
        assert_eq!(board.piece(0).map(|p| p.team), Some(Team::White));
    }
}
