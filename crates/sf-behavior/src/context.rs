//! Read-only simulation state passed to every behavior.

use sf_agent::Body;
use sf_nav::{Router, Triangulation};
use sf_spatial::Obstacle;

/// A read-only snapshot of the world for one tick.
///
/// Built once per tick by `sf-sim` and shared immutably by every agent during
/// the steer phase.
///
/// # Lifetimes
///
/// All borrows live for one tick's parallel phase.  `bodies` is the
/// start-of-tick copy, never the bodies being written this tick.
pub struct BehaviorContext<'a> {
    /// Simulated seconds since the start of the run.
    pub time_secs: f64,

    /// Seconds advanced by this tick.
    pub dt_secs: f64,

    /// Every agent's body as of the start of the tick, indexed by `AgentId`.
    pub bodies: &'a [Body],

    pub obstacles: &'a [Obstacle],

    /// Waypoint mesh shared by every pathfinding agent.
    pub mesh: &'a Triangulation,

    pub router: &'a dyn Router,
}

impl<'a> BehaviorContext<'a> {
    #[inline]
    pub fn new(
        time_secs: f64,
        dt_secs:   f64,
        bodies:    &'a [Body],
        obstacles: &'a [Obstacle],
        mesh:      &'a Triangulation,
        router:    &'a dyn Router,
    ) -> Self {
        Self { time_secs, dt_secs, bodies, obstacles, mesh, router }
    }
}
