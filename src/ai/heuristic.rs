use crate::game::{Board, Player};

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Default heuristic: fours owned by `player` minus fours owned by the
/// opponent, counting overlapping runs separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FourCountHeuristic;

impl Heuristic for FourCountHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        board.score(player) as i32 - board.score(player.other()) as i32
    }
}
