//! Long-horizon navigation over the waypoint mesh.
//!
//! # State machine
//!
//! ```text
//!            ┌──────────── replan ◄──────────────┐
//!            ▼                                   │
//!   pick random mesh vertex ──► A* ──ok──► walk route ── finished ──┘
//!                               │                │
//!                             no path       waited ≥ 60 s ──► replan
//!                               ▼
//!                    hold until waited ≥ 60 s ──► replan
//! ```
//!
//! The 60 s wait only counts ticks spent short of the final goal; loitering
//! there runs out the goal's own loiter time instead.
//!
//! Every replan clears the agent's stall timer.  Route failures are expected
//! (a destination behind a wall) and are absorbed here: the agent holds.

use std::ops::Range;

use tracing::debug;

use sf_agent::Body;
use sf_core::{AgentRng, Vec2};

use crate::{BehaviorContext, PathBehavior, Steering};

/// Seconds without arriving before a fresh destination is drawn.
pub const REPLAN_AFTER_SECS: f64 = 60.0;

/// Loiter time drawn for the final goal of every route.
pub const FINAL_LOITER_SECS: Range<f64> = 10.0..60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PathfinderBehavior {
    destination:      Option<Vec2>,
    waited:           f64,
    route:            Option<PathBehavior>,
    pub replan_after: f64,
}

impl Default for PathfinderBehavior {
    fn default() -> Self {
        Self { destination: None, waited: 0.0, route: None, replan_after: REPLAN_AFTER_SECS }
    }
}

impl PathfinderBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    pub fn route(&self) -> Option<&PathBehavior> {
        self.route.as_ref()
    }

    /// Seconds spent since the last replan without reaching the final goal.
    pub fn waited(&self) -> f64 {
        self.waited
    }

    /// Final goal of the route reached: the agent is loitering, not waiting.
    fn arrived(&self) -> bool {
        self.route
            .as_ref()
            .is_some_and(|r| r.remaining().is_empty() && r.current().is_close_enough())
    }

    fn needs_replan(&self) -> bool {
        self.destination.is_none()
            || self.waited >= self.replan_after
            || self.route.as_ref().is_some_and(PathBehavior::is_finished)
    }

    pub fn steer(&mut self, me: &Body, ctx: &BehaviorContext<'_>, rng: &mut AgentRng) -> Steering {
        let mut replanned = false;
        if self.needs_replan() {
            self.replan(me, ctx, rng);
            replanned = true;
        } else if !self.arrived() {
            self.waited += ctx.dt_secs;
        }

        let steering = match &mut self.route {
            Some(route) => Steering::toward(route.steer(me, ctx.dt_secs)),
            None => Steering::hold(me),
        };
        if replanned { steering.with_reset() } else { steering }
    }

    fn replan(&mut self, me: &Body, ctx: &BehaviorContext<'_>, rng: &mut AgentRng) {
        self.waited = 0.0;
        self.route = None;
        self.destination = rng.choose(ctx.mesh.points()).copied();
        let Some(dest) = self.destination else {
            return;
        };

        match ctx.router.route(ctx.mesh, ctx.obstacles, me.position, dest) {
            Ok(mut path) => {
                path.set_final_loiter(rng.gen_range(FINAL_LOITER_SECS));
                debug!(agent = %me.id, goals = path.len(), %dest, "replanned");
                self.route = Some(PathBehavior::new(path));
            }
            Err(err) => {
                debug!(agent = %me.id, %err, "route failed; holding until next replan");
            }
        }
    }
}
