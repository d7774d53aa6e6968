//! The per-agent behavior the simulator stores and steps.

use sf_agent::Body;
use sf_core::{AgentId, AgentRng};

use crate::{
    BehaviorContext, BehaviorError, BehaviorResult, FollowerBehavior, GoalBehavior, PathBehavior,
    PathfinderBehavior, Steering, WanderBehavior,
};

/// Tagged union over the concrete behaviors.
///
/// A closed enum rather than a trait object: the set is fixed, every variant
/// is `Send`, and `sf-sim` keeps one per agent in a plain `Vec` it can hand
/// to Rayon.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Behavior {
    /// No drive; the agent only reacts to forces.
    #[default]
    Idle,
    Goal(GoalBehavior),
    Follow(FollowerBehavior),
    Wander(WanderBehavior),
    Path(PathBehavior),
    Pathfinder(PathfinderBehavior),
}

impl Behavior {
    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::Goal(_) => "goal",
            Behavior::Follow(_) => "follow",
            Behavior::Wander(_) => "wander",
            Behavior::Path(_) => "path",
            Behavior::Pathfinder(_) => "pathfinder",
        }
    }

    /// Check references to other agents before the run starts.
    pub fn validate(&self, me: AgentId, agent_count: usize) -> BehaviorResult<()> {
        if let Behavior::Follow(f) = self {
            let target = f.target();
            if target == me {
                return Err(BehaviorError::Config(format!("{me} cannot follow itself")));
            }
            if target.index() >= agent_count {
                return Err(BehaviorError::UnknownTarget { agent: me, target });
            }
        }
        Ok(())
    }

    /// Compute this tick's steering for `me`.
    pub fn steer(
        &mut self,
        me:  &Body,
        ctx: &BehaviorContext<'_>,
        rng: &mut AgentRng,
    ) -> Steering {
        match self {
            Behavior::Idle => Steering::hold(me),
            Behavior::Goal(g) => Steering::toward(g.steer(me, ctx.dt_secs)),
            Behavior::Follow(f) => Steering::toward(f.steer(me, ctx)),
            Behavior::Wander(w) => Steering::toward(w.steer(me, ctx, rng)),
            Behavior::Path(p) => Steering::toward(p.steer(me, ctx.dt_secs)),
            Behavior::Pathfinder(p) => p.steer(me, ctx, rng),
        }
    }
}
