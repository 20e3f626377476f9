//! Piece factories: initial placement strategies.

use crate::board::{Board, SquareId};
use crate::constants::{Direction, Team};
use rand::seq::SliceRandom;
use rand::Rng;

/// One piece to put on the board at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpawn {
    pub square: SquareId,
    pub team: Team,
    pub direction: Direction,
}

/// Supplies the initial piece set for a freshly built board.
///
/// Spawns onto distinct, in-range squares are the factory's contract; the
/// board skips (and logs) anything else.
pub trait PieceFactory {
    fn spawn(&self, board: &Board) -> Vec<PieceSpawn>;
}

/// Two facing back rows: Black along the top row moving Down, White along
/// the bottom row moving Up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricPlacement;

impl PieceFactory for SymmetricPlacement {
    fn spawn(&self, board: &Board) -> Vec<PieceSpawn> {
        let size = board.size;
        let mut spawns = Vec::with_capacity(size * 2);
        for col in 0..size {
            spawns.push(PieceSpawn {
                square: col,
                team: Team::Black,
                direction: Direction::Down,
            });
            spawns.push(PieceSpawn {
                square: col + (size - 1) * size,
                team: Team::White,
                direction: Direction::Up,
            });
        }
        spawns
    }
}

/// A given number of pieces per team scattered over distinct squares, each
/// with a random heading.
#[derive(Debug, Clone, Copy)]
pub struct RandomPlacement {
    pub pieces_per_team: usize,
}

impl PieceFactory for RandomPlacement {
    fn spawn(&self, board: &Board) -> Vec<PieceSpawn> {
        let mut rng = rand::thread_rng();
        let mut free: Vec<SquareId> = (0..board.squares.len()).collect();
        free.shuffle(&mut rng);

        let mut spawns = Vec::with_capacity(self.pieces_per_team * 2);
        for team in [Team::White, Team::Black] {
            for _ in 0..self.pieces_per_team {
                let square = match free.pop() {
                    Some(sq) => sq,
                    None => break,
                };
                let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                spawns.push(PieceSpawn { square, team, direction });
            }
        }
        spawns
    }
}

/// A predetermined spawn list, for scripted setups.
#[derive(Debug, Clone, Default)]
pub struct FixedPlacement {
    spawns: Vec<PieceSpawn>,
}

impl FixedPlacement {
    pub fn new(spawns: Vec<PieceSpawn>) -> Self {
        FixedPlacement { spawns }
    }
}

impl PieceFactory for FixedPlacement {
    fn spawn(&self, _board: &Board) -> Vec<PieceSpawn> {
        self.spawns.clone()
    }
}
