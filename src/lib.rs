pub mod board;
pub mod config;
pub mod constants;
pub mod game;
pub mod piece;
pub mod placement;
pub mod selection;
pub mod turn;
