//! Core Connect Four game logic: the stacking board with reversible moves,
//! player identities, and the game state machine used by the arena.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, WinState, DEFAULT_COLS, DEFAULT_ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError, ScoringRule};
