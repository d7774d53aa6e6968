//! Hop between candidate goals.

use sf_agent::Body;
use sf_core::{AgentRng, Vec2};
use sf_nav::Goal;
use sf_spatial::segment_blocked;

use crate::{BehaviorContext, BehaviorError, BehaviorResult, GoalBehavior};

/// Whenever the current goal is missing or loitered past, picks uniformly
/// among the candidates reachable in a straight unobstructed line.  Holds
/// position when none is reachable, and tries again next tick.
#[derive(Clone, Debug, PartialEq)]
pub struct WanderBehavior {
    candidates: Vec<Goal>,
    inner:      GoalBehavior,
}

impl WanderBehavior {
    pub fn new(candidates: Vec<Goal>) -> BehaviorResult<Self> {
        if candidates.is_empty() {
            return Err(BehaviorError::Config("wander needs at least one candidate goal".into()));
        }
        Ok(Self { candidates, inner: GoalBehavior::default() })
    }

    pub fn candidates(&self) -> &[Goal] {
        &self.candidates
    }

    pub fn current(&self) -> Option<&Goal> {
        self.inner.goal()
    }

    pub fn steer(&mut self, me: &Body, ctx: &BehaviorContext<'_>, rng: &mut AgentRng) -> Vec2 {
        if self.inner.is_done() {
            let reachable: Vec<&Goal> = self
                .candidates
                .iter()
                .filter(|g| !segment_blocked(ctx.obstacles, me.position, g.target))
                .collect();
            match rng.choose(&reachable) {
                Some(&&goal) => self.inner.set_goal(goal),
                None => {
                    self.inner.clear();
                    return me.position;
                }
            }
        }
        self.inner.steer(me, ctx.dt_secs)
    }
}
