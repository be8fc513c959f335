//! # Connect Four Arena
//!
//! Two Connect Four agents play a match against each other, each move computed
//! on its own thread under a wall-clock budget. Searches report candidate
//! moves through a shared arbiter and stop cooperatively once time is up; a
//! search that ignores the deadline forfeits the game.
//!
//! ## Modules
//!
//! - [`game`]: Board with reversible moves, players, game state and scoring
//! - [`ai`]: Agent trait, random/greedy/minimax/alpha-beta agents, registry
//! - [`arena`]: Arbiter, search worker, time-budget supervisor, match runner
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
