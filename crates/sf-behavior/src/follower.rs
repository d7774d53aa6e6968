//! Trail another agent.

use sf_agent::Body;
use sf_core::{AgentId, Vec2};
use sf_nav::Goal;
use sf_spatial::segment_crosses_solid;

use crate::{BehaviorContext, GoalBehavior};

/// Keeps within `1.5 × (own radius + target radius)` of the target agent
/// while it is in sight; heads for the last sighting otherwise.
///
/// Only solid obstacles block sight.
#[derive(Clone, Debug, PartialEq)]
pub struct FollowerBehavior {
    target:    AgentId,
    last_seen: Option<Vec2>,
    inner:     GoalBehavior,
}

/// Keep-away distance as a multiple of the two radii.
const FOLLOW_SPACING: f64 = 1.5;

impl FollowerBehavior {
    pub fn new(target: AgentId) -> Self {
        Self { target, last_seen: None, inner: GoalBehavior::default() }
    }

    pub fn target(&self) -> AgentId {
        self.target
    }

    pub fn last_seen(&self) -> Option<Vec2> {
        self.last_seen
    }

    pub fn steer(&mut self, me: &Body, ctx: &BehaviorContext<'_>) -> Vec2 {
        if let Some(leader) = ctx.bodies.get(self.target.index()) {
            if !segment_crosses_solid(ctx.obstacles, me.position, leader.position) {
                self.last_seen = Some(leader.position);
                let range = FOLLOW_SPACING * (me.radius + leader.radius);
                self.inner.move_goal(Goal::new(leader.position, range, 0.0));
            }
        }
        self.inner.steer(me, ctx.dt_secs)
    }
}
