//! Deterministic FIFO agent scheduler.

use vh_core::AgentRef;

/// Steps every registered agent exactly once per tick, in registration
/// order.  No randomization and no reordering.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    agents: Vec<AgentRef>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, agent: impl Into<AgentRef>) {
        self.agents.push(agent.into());
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Registered agents in step order.
    pub fn agents(&self) -> &[AgentRef] {
        &self.agents
    }

    /// Call `step` once for every agent in order, stopping at the first
    /// error.
    pub fn advance<E>(&self, mut step: impl FnMut(AgentRef) -> Result<(), E>) -> Result<(), E> {
        for &agent in &self.agents {
            step(agent)?;
        }
        Ok(())
    }
}
