use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::{Arbiter, SearchWorker};
use crate::ai::Agent;
use crate::game::Board;

/// Timing knobs for [`Supervisor`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Wall-clock allowance as a percentage of the nominal move time.
    pub overshoot_percent: u64,
    /// Rounds to wait for a cancelled search before disqualifying it.
    pub grace_retries: u32,
    pub grace_interval_ms: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        SupervisorConfig {
            overshoot_percent: 120,
            grace_retries: 5,
            grace_interval_ms: 100,
        }
    }
}

/// What came out of one supervised move computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVerdict {
    /// The search ended in time with this column as its last proposal.
    /// The column has not been checked against the board.
    Proposed(usize),
    /// The search ended in time without proposing anything.
    NoProposal,
    /// The search thread panicked or could not be started.
    Crashed,
    /// The search ignored cancellation past the grace period.
    Disqualified,
}

impl MoveVerdict {
    pub fn column(self) -> Option<usize> {
        match self {
            MoveVerdict::Proposed(col) => Some(col),
            _ => None,
        }
    }
}

pub struct SupervisedMove {
    pub verdict: MoveVerdict,
    /// The agent, handed back unless its thread crashed or was abandoned.
    pub agent: Option<Box<dyn Agent>>,
    pub elapsed: Duration,
}

/// Runs each move computation under a wall-clock budget.
#[derive(Debug, Clone, Default)]
pub struct Supervisor {
    config: SupervisorConfig,
}

impl Supervisor {
    pub fn new(config: SupervisorConfig) -> Self {
        Supervisor { config }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Time a search may run before it is cancelled.
    pub fn allowed_time(&self, msec_per_move: u64) -> Duration {
        Duration::from_millis(msec_per_move.saturating_mul(self.config.overshoot_percent) / 100)
    }

    /// Let `agent` search `board` for at most the allowed time and return its
    /// last proposal.
    ///
    /// A search that has not returned once the grace period after
    /// cancellation is over is disqualified and its thread left running
    /// detached.
    pub fn calc_move(
        &self,
        board: &Board,
        agent: Box<dyn Agent>,
        opponent_move: Option<usize>,
        msec_per_move: u64,
    ) -> SupervisedMove {
        let start = Instant::now();
        let name = agent.name().to_string();
        let arbiter = Arc::new(Arbiter::new());

        let worker = match SearchWorker::spawn(agent, board, opponent_move, Arc::clone(&arbiter)) {
            Ok(worker) => worker,
            Err(e) => {
                log::error!("could not start search thread for {}: {}", name, e);
                return SupervisedMove {
                    verdict: MoveVerdict::Crashed,
                    agent: None,
                    elapsed: start.elapsed(),
                };
            }
        };

        let allowed = self.allowed_time(msec_per_move);
        let spin = Duration::from_millis((allowed.as_millis() as u64 / 100).max(1));
        while !worker.is_finished() && start.elapsed() < allowed {
            thread::sleep(spin);
        }

        arbiter.cancel();

        let grace = Duration::from_millis(self.config.grace_interval_ms);
        for _ in 0..self.config.grace_retries {
            if worker.is_finished() {
                break;
            }
            thread::yield_now();
            thread::sleep(grace);
        }

        if !worker.is_finished() {
            log::warn!(
                "{} still searching {:?} after cancellation; disqualified",
                name,
                start.elapsed().saturating_sub(allowed)
            );
            return SupervisedMove {
                verdict: MoveVerdict::Disqualified,
                agent: None,
                elapsed: start.elapsed(),
            };
        }

        match worker.join() {
            Ok(agent) => {
                let verdict = match arbiter.proposed_move() {
                    Some(col) => MoveVerdict::Proposed(col),
                    None => MoveVerdict::NoProposal,
                };
                SupervisedMove {
                    verdict,
                    agent: Some(agent),
                    elapsed: start.elapsed(),
                }
            }
            Err(_) => {
                log::warn!("{} crashed while searching", name);
                SupervisedMove {
                    verdict: MoveVerdict::Crashed,
                    agent: None,
                    elapsed: start.elapsed(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{GreedyAgent, MinimaxAgent};
    use crate::error::SearchError;
    use crate::game::Player;

    /// Ignores the arbiter and sleeps well past any budget used here.
    struct StubbornAgent;

    impl Agent for StubbornAgent {
        fn name(&self) -> &str {
            "Stubborn"
        }

        fn init(&mut self, _player: Player, _msec_per_move: u64, _rows: usize, _cols: usize) {}

        fn compute_move(
            &mut self,
            _board: &mut Board,
            _opponent_move: Option<usize>,
            arbiter: &Arbiter,
        ) -> Result<(), SearchError> {
            arbiter.propose(0)?;
            thread::sleep(Duration::from_millis(1_500));
            Ok(())
        }
    }

    struct SilentAgent;

    impl Agent for SilentAgent {
        fn name(&self) -> &str {
            "Silent"
        }

        fn init(&mut self, _player: Player, _msec_per_move: u64, _rows: usize, _cols: usize) {}

        fn compute_move(
            &mut self,
            _board: &mut Board,
            _opponent_move: Option<usize>,
            _arbiter: &Arbiter,
        ) -> Result<(), SearchError> {
            Ok(())
        }
    }

    struct CrashingAgent;

    impl Agent for CrashingAgent {
        fn name(&self) -> &str {
            "Crashing"
        }

        fn init(&mut self, _player: Player, _msec_per_move: u64, _rows: usize, _cols: usize) {}

        fn compute_move(
            &mut self,
            _board: &mut Board,
            _opponent_move: Option<usize>,
            arbiter: &Arbiter,
        ) -> Result<(), SearchError> {
            arbiter.propose(2)?;
            panic!("index out of bounds");
        }
    }

    fn quick_supervisor() -> Supervisor {
        Supervisor::new(SupervisorConfig {
            overshoot_percent: 120,
            grace_retries: 2,
            grace_interval_ms: 10,
        })
    }

    #[test]
    fn test_allowed_time() {
        let supervisor = Supervisor::default();
        assert_eq!(supervisor.allowed_time(1_000), Duration::from_millis(1_200));
        assert_eq!(supervisor.allowed_time(5), Duration::from_millis(6));
        assert_eq!(supervisor.allowed_time(0), Duration::ZERO);
    }

    #[test]
    fn test_fast_agent_proposes() {
        let mut agent = GreedyAgent::new();
        agent.init(Player::One, 50, 6, 7);
        let result = quick_supervisor().calc_move(&Board::default(), Box::new(agent), None, 50);
        assert_eq!(result.verdict, MoveVerdict::Proposed(0));
        assert_eq!(result.agent.map(|a| a.name().to_string()), Some("Greedy".into()));
    }

    #[test]
    fn test_cooperative_search_stops_on_time() {
        let mut agent = MinimaxAgent::new();
        agent.init(Player::Two, 40, 6, 7);
        let result = quick_supervisor().calc_move(&Board::default(), Box::new(agent), None, 40);

        let col = result.verdict.column().expect("depth 1 completes within the budget");
        assert!(col < 7);
        assert!(result.agent.is_some());
        assert!(result.elapsed >= Duration::from_millis(48));
        assert!(result.elapsed < Duration::from_millis(1_000));
    }

    #[test]
    fn test_stubborn_agent_is_disqualified() {
        let supervisor = quick_supervisor();
        let result = supervisor.calc_move(&Board::default(), Box::new(StubbornAgent), None, 20);

        assert_eq!(result.verdict, MoveVerdict::Disqualified);
        assert!(result.agent.is_none());
        // 24ms allowed plus two 10ms grace rounds, with slack for the scheduler
        assert!(result.elapsed >= Duration::from_millis(44));
        assert!(result.elapsed < Duration::from_millis(1_000));
    }

    #[test]
    fn test_silent_agent_has_no_proposal() {
        let result = quick_supervisor().calc_move(&Board::default(), Box::new(SilentAgent), Some(4), 20);
        assert_eq!(result.verdict, MoveVerdict::NoProposal);
        assert!(result.agent.is_some());
        assert!(result.elapsed < Duration::from_millis(500));
    }

    #[test]
    fn test_crash_discards_proposal() {
        let result = quick_supervisor().calc_move(&Board::default(), Box::new(CrashingAgent), None, 20);
        assert_eq!(result.verdict, MoveVerdict::Crashed);
        assert!(result.agent.is_none());
        assert_eq!(result.verdict.column(), None);
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config: SupervisorConfig = toml::from_str("grace_retries = 1").unwrap();
        assert_eq!(config.grace_retries, 1);
        assert_eq!(config.overshoot_percent, 120);
        assert_eq!(config.grace_interval_ms, 100);
    }
}
