use super::agent::Agent;
use super::heuristic::{FourCountHeuristic, Heuristic};
use crate::arena::Arbiter;
use crate::error::SearchError;
use crate::game::{Board, Player};

/// A candidate column and its one-ply evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub column: usize,
    pub value: i32,
}

/// One-ply agent: plays whichever column scores best right now, ignoring the
/// opponent's reply. Ties go to the leftmost column.
pub struct GreedyAgent {
    player: Player,
    heuristic: Box<dyn Heuristic>,
}

impl GreedyAgent {
    pub fn new() -> Self {
        Self::with_heuristic(Box::new(FourCountHeuristic))
    }

    pub fn with_heuristic(heuristic: Box<dyn Heuristic>) -> Self {
        GreedyAgent {
            player: Player::One,
            heuristic,
        }
    }

    /// Evaluate every legal column by playing it and taking it back.
    pub fn rank_moves(&self, board: &mut Board) -> Result<Vec<Move>, SearchError> {
        let mut moves = Vec::with_capacity(board.num_cols());
        for column in 0..board.num_cols() {
            if !board.is_valid_move(column) {
                continue;
            }
            board.drop_piece(column, self.player)?;
            let value = self.heuristic.evaluate(board, self.player);
            board.lift_piece(column, self.player)?;
            moves.push(Move { column, value });
        }
        Ok(moves)
    }

    pub fn best_move(&self, board: &mut Board) -> Result<Move, SearchError> {
        let moves = self.rank_moves(board)?;
        // First-seen wins on ties; `max_by_key` would keep the last one.
        moves
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.value > best.value {
                    candidate
                } else {
                    best
                }
            })
            .ok_or(SearchError::BoardFull)
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn init(&mut self, player: Player, _msec_per_move: u64, _rows: usize, _cols: usize) {
        self.player = player;
    }

    fn compute_move(
        &mut self,
        board: &mut Board,
        _opponent_move: Option<usize>,
        arbiter: &Arbiter,
    ) -> Result<(), SearchError> {
        let best = self.best_move(board)?;
        arbiter.propose(best.column)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greedy(player: Player) -> GreedyAgent {
        let mut agent = GreedyAgent::new();
        agent.init(player, 100, 6, 7);
        agent
    }

    #[test]
    fn test_empty_board_picks_leftmost() {
        let agent = greedy(Player::One);
        let mut board = Board::default();
        let best = agent.best_move(&mut board).unwrap();
        assert_eq!(best, Move { column: 0, value: 0 });
        // Ranking leaves the board untouched
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_takes_completing_move() {
        let agent = greedy(Player::Two);
        let mut board = Board::default();
        for col in 2..5 {
            board.drop_piece(col, Player::Two).unwrap();
        }
        let best = agent.best_move(&mut board).unwrap();
        // Both ends complete a four; leftmost wins the tie
        assert_eq!(best, Move { column: 1, value: 1 });
    }

    #[test]
    fn test_skips_full_columns() {
        let agent = greedy(Player::One);
        let mut board = Board::default();
        for _ in 0..6 {
            board.drop_piece(0, Player::Two).unwrap();
        }
        let moves = agent.rank_moves(&mut board).unwrap();
        assert_eq!(
            moves.iter().map(|m| m.column).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_compute_move_proposes() {
        let mut agent = greedy(Player::One);
        let mut board = Board::default();
        for _ in 0..3 {
            board.drop_piece(5, Player::One).unwrap();
        }
        let arbiter = Arbiter::new();
        agent.compute_move(&mut board, Some(2), &arbiter).unwrap();
        assert_eq!(arbiter.proposed_move(), Some(5));
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut agent = greedy(Player::One);
        let mut board = Board::new(4, 4);
        for col in 0..4 {
            for _ in 0..4 {
                board.drop_piece(col, Player::Two).unwrap();
            }
        }
        let arbiter = Arbiter::new();
        assert_eq!(
            agent.compute_move(&mut board, None, &arbiter),
            Err(SearchError::BoardFull)
        );
    }

    #[test]
    fn test_prefers_own_four_over_leftmost() {
        let agent = greedy(Player::One);
        let mut board = Board::default();
        for col in 3..6 {
            board.drop_piece(col, Player::One).unwrap();
        }
        for _ in 0..3 {
            board.drop_piece(0, Player::Two).unwrap();
        }
        // Columns 2 and 6 both complete the bottom row; the leftmost is kept
        let best = agent.best_move(&mut board).unwrap();
        assert_eq!(best, Move { column: 2, value: 1 });
    }
}
