//! Fluent builder for constructing a [`Sim`].

use sf_agent::{AgentRngs, AgentStore};
use sf_behavior::Behavior;
use sf_core::SimConfig;
use sf_mobility::ForceModel;
use sf_nav::{Router, Triangulation};
use sf_spatial::{BinIndex, Obstacle};
use tracing::info;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick duration, …
/// - [`AgentStore`] + [`AgentRngs`]: from [`sf_agent::AgentStoreBuilder`]
/// - [`BinIndex`]: an empty grid over the world bounds
/// - `R: Router`: the path search (e.g. [`sf_nav::AStarRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                          |
/// |-------------------|----------------------------------|
/// | `.behaviors(v)`   | Every agent `Behavior::Idle`     |
/// | `.obstacles(v)`   | None                             |
/// | `.mesh(m)`        | Empty triangulation              |
/// | `.forces(f)`      | `ForceModel::default()`          |
pub struct SimBuilder<R: Router> {
    config:    SimConfig,
    agents:    AgentStore,
    rngs:      AgentRngs,
    bins:      BinIndex,
    router:    R,
    behaviors: Option<Vec<Behavior>>,
    obstacles: Vec<Obstacle>,
    mesh:      Option<Triangulation>,
    forces:    ForceModel,
}

impl<R: Router> SimBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(
        config: SimConfig,
        agents: AgentStore,
        rngs:   AgentRngs,
        bins:   BinIndex,
        router: R,
    ) -> Self {
        Self {
            config,
            agents,
            rngs,
            bins,
            router,
            behaviors: None,
            obstacles: Vec::new(),
            mesh:      None,
            forces:    ForceModel::default(),
        }
    }

    /// Supply per-agent behaviors (must be length `agent_count`).
    pub fn behaviors(mut self, behaviors: Vec<Behavior>) -> Self {
        self.behaviors = Some(behaviors);
        self
    }

    pub fn obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Supply the waypoint mesh pathfinding behaviors route over.
    pub fn mesh(mut self, mesh: Triangulation) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn forces(mut self, forces: ForceModel) -> Self {
        self.forces = forces;
        self
    }

    /// Validate inputs, file every agent in the bin index, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;
        self.forces.params.validate()?;
        let agent_count = self.agents.count;

        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }

        let behaviors = match self.behaviors {
            Some(b) => {
                if b.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      b.len(),
                        what:     "behaviors",
                    });
                }
                b
            }
            None => vec![Behavior::Idle; agent_count],
        };
        for (agent, behavior) in self.agents.agent_ids().zip(&behaviors) {
            behavior.validate(agent, agent_count)?;
        }

        if !self.bins.is_empty() {
            return Err(SimError::Config(format!(
                "bin index must start empty, holds {} agents",
                self.bins.len()
            )));
        }
        let mut bins = self.bins;
        for body in &self.agents.bodies {
            bins.add(body.id, body.position)?;
        }

        let mesh = self.mesh.unwrap_or_else(|| Triangulation::bowyer_watson(&[]));
        info!(
            agents = agent_count,
            obstacles = self.obstacles.len(),
            mesh_vertices = mesh.vertex_count(),
            ticks = self.config.total_ticks,
            dt = self.config.dt_secs,
            "simulation built"
        );

        Ok(Sim {
            clock:     self.config.make_clock(),
            config:    self.config,
            agents:    self.agents,
            rngs:      self.rngs,
            behaviors,
            obstacles: self.obstacles,
            mesh,
            bins,
            forces:    self.forces,
            router:    self.router,
        })
    }
}
