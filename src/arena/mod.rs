//! Running agents against each other under a wall-clock budget: the shared
//! arbiter, the search thread, the per-move supervisor and the match runner.

mod arbiter;
pub mod metrics;
pub mod runner;
mod supervisor;
mod worker;

pub use arbiter::Arbiter;
pub use metrics::{MatchTally, PlayerTally};
pub use runner::{Forfeit, GameRecord, MatchResult, MatchRunner};
pub use supervisor::{MoveVerdict, SupervisedMove, Supervisor, SupervisorConfig};
pub use worker::SearchWorker;
