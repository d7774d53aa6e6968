//! Goals and paths.

use std::collections::VecDeque;

use sf_core::Vec2;

/// A point to walk to, how close counts as arrived, and how long to stay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Goal {
    pub target: Vec2,
    /// Arrival radius.  Never negative.
    pub range:  f64,
    /// Seconds to loiter after arriving before the goal counts as complete.
    pub loiter: f64,
}

impl Goal {
    /// Negative ranges and loiter times are clamped to zero.
    pub fn new(target: Vec2, range: f64, loiter: f64) -> Self {
        Self { target, range: range.max(0.0), loiter: loiter.max(0.0) }
    }
}

/// Ordered queue of goals, consumed front to back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    goals: VecDeque<Goal>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, goal: Goal) {
        self.goals.push_back(goal);
    }

    pub fn push_front(&mut self, goal: Goal) {
        self.goals.push_front(goal);
    }

    /// Remove and return the head goal.
    pub fn next_goal(&mut self) -> Option<Goal> {
        self.goals.pop_front()
    }

    pub fn peek(&self) -> Option<&Goal> {
        self.goals.front()
    }

    pub fn last(&self) -> Option<&Goal> {
        self.goals.back()
    }

    /// Overwrite the loiter time of the final goal, if any.
    pub fn set_final_loiter(&mut self, secs: f64) {
        if let Some(g) = self.goals.back_mut() {
            g.loiter = secs.max(0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    /// The target points in order.
    pub fn waypoints(&self) -> Vec<Vec2> {
        self.goals.iter().map(|g| g.target).collect()
    }
}

impl FromIterator<Goal> for Path {
    fn from_iter<I: IntoIterator<Item = Goal>>(iter: I) -> Self {
        Self { goals: iter.into_iter().collect() }
    }
}
