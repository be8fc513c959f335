use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::Arbiter;
use crate::ai::Agent;
use crate::error::SearchError;
use crate::game::Board;

/// One move computation running on its own OS thread.
///
/// The worker owns the agent for the duration of the search and hands it back
/// through [`SearchWorker::join`]. A worker that is never joined keeps running
/// detached until its search returns.
pub struct SearchWorker {
    handle: JoinHandle<Box<dyn Agent>>,
}

impl SearchWorker {
    /// Start `agent` searching on a private copy of `board`.
    pub fn spawn(
        mut agent: Box<dyn Agent>,
        board: &Board,
        opponent_move: Option<usize>,
        arbiter: Arc<Arbiter>,
    ) -> io::Result<Self> {
        let mut board = board.clone();
        let handle = thread::Builder::new()
            .name(format!("search-{}", agent.name().to_ascii_lowercase()))
            .spawn(move || {
                match agent.compute_move(&mut board, opponent_move, &arbiter) {
                    Ok(()) => {}
                    Err(SearchError::Cancelled(_)) => {
                        log::debug!("{} stopped: time is up", agent.name());
                    }
                    Err(e) => log::warn!("{} gave up: {}", agent.name(), e),
                }
                agent
            })?;
        Ok(SearchWorker { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the search to end. `Err` carries the panic payload if the
    /// agent panicked.
    pub fn join(self) -> thread::Result<Box<dyn Agent>> {
        self.handle.join()
    }
}
