//! Seek a single goal.
//!
//! # Arrival latch
//!
//! ```text
//!            dist > range × factor                 dist ≤ range
//!   ┌──────────┐  ◄───────────────────  ┌──────────────┐
//!   │ Seeking  │                        │ Close enough │  (holds, loiters)
//!   └──────────┘  ───────────────────►  └──────────────┘
//! ```
//!
//! Between `range` and `range × factor` the latch keeps its previous value,
//! so an agent that has arrived is not sent back for drifting slightly, but
//! one pushed clearly away walks back to the goal.

use sf_agent::Body;
use sf_core::Vec2;
use sf_nav::Goal;

/// Default outer threshold as a multiple of the goal's range.
pub const MAX_RANGE_FACTOR: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct GoalBehavior {
    goal:                 Option<Goal>,
    close_enough:         bool,
    loitered:             f64,
    pub max_range_factor: f64,
}

impl Default for GoalBehavior {
    fn default() -> Self {
        Self { goal: None, close_enough: false, loitered: 0.0, max_range_factor: MAX_RANGE_FACTOR }
    }
}

impl GoalBehavior {
    pub fn new(goal: Goal) -> Self {
        Self { goal: Some(goal), ..Self::default() }
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    /// Replace the goal, clearing the arrival latch and loiter time.
    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
        self.close_enough = false;
        self.loitered = 0.0;
    }

    /// Move the current goal without resetting the latch (the goal is the
    /// same destination, tracked as it moves).
    pub fn move_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
    }

    pub fn clear(&mut self) {
        self.goal = None;
        self.close_enough = false;
        self.loitered = 0.0;
    }

    pub fn is_close_enough(&self) -> bool {
        self.close_enough
    }

    /// Seconds spent held at the current goal.
    pub fn loitered(&self) -> f64 {
        self.loitered
    }

    /// `true` once the agent has been held at the goal for longer than its
    /// loiter time.  `false` without a goal.
    pub fn has_loitered(&self) -> bool {
        self.goal.is_some_and(|g| self.loitered > g.loiter)
    }

    /// Goal absent or finished: time for the owner to pick another.
    pub fn is_done(&self) -> bool {
        self.goal.is_none() || self.has_loitered()
    }

    /// Point to steer toward this tick.  Returns `me.position` when there is
    /// no goal or the agent is within the latched arrival radius.
    pub fn steer(&mut self, me: &Body, dt: f64) -> Vec2 {
        let Some(goal) = self.goal else {
            return me.position;
        };
        let dist = me.position.distance(goal.target);
        if dist <= goal.range {
            self.close_enough = true;
        } else if dist > goal.range * self.max_range_factor {
            self.close_enough = false;
        }

        if self.close_enough {
            self.loitered += dt;
            me.position
        } else {
            goal.target
        }
    }
}
