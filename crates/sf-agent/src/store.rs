//! Agent storage: `AgentStore` (bodies) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The parallel phase needs `&mut` access to each agent's RNG while every
//! worker also reads the shared start-of-tick snapshot of all bodies.  Keeping
//! the RNGs out of `AgentStore` lets `sf-sim` zip `bodies.par_iter_mut()`,
//! `rngs.inner.par_iter_mut()` and the behaviors without fighting the borrow
//! checker.

use sf_core::{AgentId, AgentRng, SfError, SfResult, Vec2};

use crate::Body;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32).map(|i| AgentRng::new(global_seed, AgentId(i))).collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Every agent's body, indexed by `AgentId`.
///
/// Invariant: `bodies[i].id == AgentId(i)` and `count == bodies.len()`.
pub struct AgentStore {
    pub count:  usize,
    pub bodies: Vec<Body>,
}

impl AgentStore {
    pub(crate) fn new(bodies: Vec<Body>) -> Self {
        Self { count: bodies.len(), bodies }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&Body> {
        self.bodies.get(agent.index())
    }

    /// Like [`get`](Self::get) but reports a missing agent as an error.
    pub fn body(&self, agent: AgentId) -> SfResult<&Body> {
        self.get(agent).ok_or(SfError::AgentNotFound(agent))
    }

    pub fn body_mut(&mut self, agent: AgentId) -> SfResult<&mut Body> {
        self.bodies.get_mut(agent.index()).ok_or(SfError::AgentNotFound(agent))
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Vec2> {
        self.get(agent).map(|b| b.position)
    }
}
