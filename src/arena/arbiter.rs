use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Cancelled;

#[derive(Debug, Default)]
struct ArbiterState {
    proposed: Option<usize>,
    cancelled: bool,
}

/// The only channel between a running search and the thread supervising it.
///
/// Holds the most recently proposed column and a one-way cancellation latch.
/// Once [`Arbiter::cancel`] has been called every later [`Arbiter::propose`]
/// fails, so the supervisor reads a proposal that can no longer change.
#[derive(Debug, Default)]
pub struct Arbiter {
    state: Mutex<ArbiterState>,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    // A search thread that panics while holding the lock leaves plain data
    // behind, so a poisoned lock is still safe to read.
    fn lock(&self) -> MutexGuard<'_, ArbiterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `col` as the current answer. May be called any number of times
    /// before cancellation; later calls overwrite earlier ones.
    pub fn propose(&self, col: usize) -> Result<(), Cancelled> {
        let mut state = self.lock();
        if state.cancelled {
            return Err(Cancelled);
        }
        state.proposed = Some(col);
        Ok(())
    }

    /// Yield point for search code: fails once time is up.
    pub fn check_cancelled(&self) -> Result<(), Cancelled> {
        if self.lock().cancelled {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Latch cancellation. Idempotent and irreversible.
    pub fn cancel(&self) {
        self.lock().cancelled = true;
    }

    pub fn proposed_move(&self) -> Option<usize> {
        self.lock().proposed
    }
}
