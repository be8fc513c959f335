use super::agent::Agent;
use super::heuristic::{FourCountHeuristic, Heuristic};
use super::tree::{closer_to_center, deepen, SearchNode, SearchReport};
use crate::arena::Arbiter;
use crate::error::SearchError;
use crate::game::{Board, Player};

/// Iterative-deepening minimax over a persistent game tree.
pub struct MinimaxAgent {
    player: Player,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new() -> Self {
        Self::with_heuristic(Box::new(FourCountHeuristic))
    }

    pub fn with_heuristic(heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            player: Player::One,
            heuristic,
        }
    }

    /// Deepen until cancelled or the game tree is exhausted, proposing the
    /// best move after each completed depth.
    pub fn search(&self, board: &Board, arbiter: &Arbiter) -> Result<SearchReport, SearchError> {
        let mut root = SearchNode::root(board.clone());
        deepen(&mut root, self.player, arbiter, |root, depth| {
            self.minimax(root, depth, true, arbiter)
        })
    }

    pub(super) fn minimax(
        &self,
        node: &mut SearchNode,
        depth: usize,
        maximizing: bool,
        arbiter: &Arbiter,
    ) -> Result<i32, SearchError> {
        if depth == 0 || node.is_terminal() {
            arbiter.check_cancelled()?;
            node.value = self.heuristic.evaluate(&node.board, self.player);
            return Ok(node.value);
        }

        if node.is_leaf() {
            let mover = if maximizing {
                self.player
            } else {
                self.player.other()
            };
            node.expand(mover)?;
        }

        let cols = node.board.num_cols();
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        node.chosen_move = None;

        for child in node.children.iter_mut() {
            let value = self.minimax(child, depth - 1, !maximizing, arbiter)?;
            let Some(col) = child.column else {
                continue;
            };
            let improves = if maximizing { value > best } else { value < best };
            if improves {
                best = value;
                node.chosen_move = Some(col);
            } else if value == best && closer_to_center(cols, node.chosen_move, col) {
                node.chosen_move = Some(col);
            }
        }

        node.value = best;
        Ok(best)
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "Minimax"
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
        let report = self.search(board, arbiter)?;
        log::debug!(
            "{} ({}) settled on {:?} at depth {}",
            self.name(),
            self.player.name(),
            report.best_move,
            report.depth
        );
        Ok(())
    }
}
