//! The per-agent update.

use sf_agent::Body;
use sf_core::{SfResult, Vec2};
use sf_spatial::Obstacle;

use crate::correction::{
    constrain_closing_speed, correct_overlaps, inhibit_motion, push_out_of_obstacles,
};
use crate::forces::{contact_force, intermediate_force, near_force, wall_force, will_force};
use crate::ForceParams;

/// What the agent's behavior asked for this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Drive {
    /// Point to walk toward; the agent's own position means "hold".
    pub target:      Vec2,
    /// Clear the stall timer before computing the will force.
    pub reset_stall: bool,
}

/// Applies the force model to one agent per call.
///
/// Holds no per-agent state, so a single instance is shared (immutably) by
/// every Rayon worker.
#[derive(Clone, Debug, Default)]
pub struct ForceModel {
    pub params: ForceParams,
}

impl ForceModel {
    pub fn new(params: ForceParams) -> SfResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Sum of every force acting on `me`, without changing anything.
    pub fn net_force(
        &self,
        me:        &Body,
        target:    Vec2,
        neighbors: &[&Body],
        obstacles: &[Obstacle],
    ) -> Vec2 {
        let p = &self.params;
        will_force(me, target)
            + intermediate_force(me, neighbors, p)
            + near_force(me, neighbors, p)
            + contact_force(me, neighbors, p)
            + wall_force(me, obstacles, p)
    }

    /// Advance `me` by `dt` seconds.
    ///
    /// `neighbors` must not contain `me`; they are read as of the start of the
    /// tick and never written.
    pub fn step(
        &self,
        me:        &mut Body,
        drive:     Drive,
        neighbors: &[&Body],
        obstacles: &[Obstacle],
        dt:        f64,
    ) {
        let hold = drive.target == me.position;
        if hold || drive.reset_stall {
            me.time_since_goal = 0.0;
        }

        let force = self.net_force(me, drive.target, neighbors, obstacles);
        me.last_force = force;

        correct_overlaps(me, neighbors, &self.params);
        push_out_of_obstacles(me, obstacles);

        me.velocity += force / me.mass * dt;
        inhibit_motion(me, obstacles, &self.params);
        if let Some(safety) = self.params.kinematic_safety {
            constrain_closing_speed(me, neighbors, safety, dt);
        }
        me.position += me.velocity * dt;

        if !hold {
            me.time_since_goal += dt;
        }
    }
}
