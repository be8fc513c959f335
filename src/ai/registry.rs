use std::collections::BTreeMap;

use super::{AlphaBetaAgent, Agent, GreedyAgent, MinimaxAgent, RandomAgent};
use crate::error::RegistryError;

type AgentFactory = Box<dyn Fn() -> Box<dyn Agent> + Send + Sync>;

/// Maps agent names to constructors so matches can be configured by name.
pub struct AgentRegistry {
    factories: BTreeMap<String, AgentFactory>,
}

impl AgentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        AgentRegistry {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every agent shipped with the crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("random", || Box::new(RandomAgent::new()));
        registry.register("greedy", || Box::new(GreedyAgent::new()));
        registry.register("minimax", || Box::new(MinimaxAgent::new()));
        registry.register("alphabeta", || Box::new(AlphaBetaAgent::new()));
        registry
    }

    /// Register `factory` under `name` (case-insensitive), replacing any
    /// previous entry.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Agent> + Send + Sync + 'static,
    {
        self.factories
            .insert(name.to_ascii_lowercase(), Box::new(factory));
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Agent>, RegistryError> {
        self.factories
            .get(&name.to_ascii_lowercase())
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::UnknownAgent {
                name: name.to_string(),
                known: self.names(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_ascii_lowercase())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
