//! Agents that play Connect Four, and the registry that builds them by name.

mod agent;
mod alphabeta;
mod greedy;
mod heuristic;
mod minimax;
mod random;
pub mod registry;
mod tree;

pub use agent::Agent;
pub use alphabeta::AlphaBetaAgent;
pub use greedy::{GreedyAgent, Move};
pub use heuristic::{FourCountHeuristic, Heuristic};
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use registry::AgentRegistry;
pub use tree::{SearchNode, SearchReport};
