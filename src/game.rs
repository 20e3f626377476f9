//! The game aggregate: board, selection and turn state for one session.

use crate::board::Board;
use crate::config::BoardConfig;
use crate::constants::Position;
use crate::placement::PieceFactory;
use crate::selection::{SelectionController, SelectionObserver, SelectionOutcome};
use crate::turn::TurnController;

/// One game session. Lives for the process lifetime of a session; its
/// board is built by [`Game::prepare`] and fully replaced on every rebuild.
pub struct Game {
    pub board: Board,
    pub selection: SelectionController,
    pub turns: TurnController,
}

impl Game {
    /// A session with no board yet; call [`Game::prepare`] before feeding
    /// it clicks.
    pub fn new() -> Self {
        Game {
            board: Board::empty(),
            selection: SelectionController::new(),
            turns: TurnController::new(),
        }
    }

    /// As [`Game::new`], with a selection observer registered up front.
    pub fn with_observer(observer: Box<dyn SelectionObserver>) -> Self {
        Game {
            board: Board::empty(),
            selection: SelectionController::with_observer(observer),
            turns: TurnController::new(),
        }
    }

    /// Build (or fully rebuild) the board and reset selection and turn
    /// state. Prior squares and pieces are discarded wholesale.
    pub fn prepare(&mut self, config: &BoardConfig, factory: &dyn PieceFactory) {
        self.board = Board::prepare(config, factory);
        self.selection.reset();
        self.turns = TurnController::new();
    }

    /// As [`Game::prepare`], with a caller-supplied square layout.
    pub fn prepare_with_layout(
        &mut self,
        config: &BoardConfig,
        layout: impl Fn(usize, usize) -> Position,
        factory: &dyn PieceFactory,
    ) {
        self.board = Board::prepare_with_layout(config, layout, factory);
        self.selection.reset();
        self.turns = TurnController::new();
    }

    /// Discard the board and every piece on it. The session is back to the
    /// state of a fresh [`Game::new`].
    pub fn clear(&mut self) {
        tracing::debug!("board cleared");
        self.board = Board::empty();
        self.selection.reset();
        self.turns = TurnController::new();
    }

    /// The single interactive entry point: one board-space click, fully
    /// processed before returning.
    pub fn select_at(&mut self, point: Position) -> SelectionOutcome {
        self.selection
            .select_at(&mut self.board, &mut self.turns, point)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
