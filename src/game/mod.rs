//! Core Connect Four game logic: board, players, the precomputed
//! combination index and the per-game state machine.

mod board;
mod index;
mod player;
mod position;
mod state;

pub use board::{Board, Cell, STANDARD_COLS, STANDARD_ROWS};
pub use index::{CombinationIndex, Line, CONNECT};
pub use player::Player;
pub use position::Position;
pub use state::{check_terminal, GameState, Outcome};
