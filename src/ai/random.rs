use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::arena::Arbiter;
use crate::error::SearchError;
use crate::game::{Board, Player};

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn init(&mut self, _player: Player, _msec_per_move: u64, _rows: usize, _cols: usize) {}

    fn compute_move(
        &mut self,
        board: &mut Board,
        _opponent_move: Option<usize>,
        arbiter: &Arbiter,
    ) -> Result<(), SearchError> {
        if board.is_full() {
            return Err(SearchError::BoardFull);
        }
        let col = loop {
            let col = self.rng.random_range(0..board.num_cols());
            if board.is_valid_move(col) {
                break col;
            }
        };
        arbiter.propose(col)?;
        Ok(())
    }
}
