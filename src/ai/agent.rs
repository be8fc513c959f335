use crate::arena::Arbiter;
use crate::error::SearchError;
use crate::game::{Board, Player};

/// Universal interface for everything that can take a seat at the board.
///
/// An agent never returns its move directly. It reports candidates through
/// [`Arbiter::propose`], as often as it likes, and the supervisor takes
/// whatever was proposed last when time runs out. `compute_move` only ever
/// sees a private copy of the game board, so it may mutate it freely.
pub trait Agent: Send {
    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Called once per game before any `compute_move`.
    fn init(&mut self, player: Player, msec_per_move: u64, rows: usize, cols: usize);

    /// Search for a move. `opponent_move` is the opponent's last column, or
    /// `None` on the first move of a game (the board may still be seeded).
    ///
    /// Returns [`SearchError::Cancelled`] when the arbiter stops the search.
    fn compute_move(
        &mut self,
        board: &mut Board,
        opponent_move: Option<usize>,
        arbiter: &Arbiter,
    ) -> Result<(), SearchError>;
}
