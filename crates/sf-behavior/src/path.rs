//! Consume a path goal by goal.

use sf_agent::Body;
use sf_core::Vec2;
use sf_nav::Path;

use crate::GoalBehavior;

/// Walks a [`Path`] front to back.
///
/// Once the path is used up the final goal stays in place: the agent holds
/// there, and walks back to it if pushed beyond the outer arrival threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct PathBehavior {
    path:  Path,
    inner: GoalBehavior,
}

impl PathBehavior {
    pub fn new(mut path: Path) -> Self {
        let inner = path.next_goal().map(GoalBehavior::new).unwrap_or_default();
        Self { path, inner }
    }

    /// Goals not yet started.
    pub fn remaining(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> &GoalBehavior {
        &self.inner
    }

    /// Path exhausted and the last goal loitered past (or there never was one).
    pub fn is_finished(&self) -> bool {
        self.path.is_empty() && self.inner.is_done()
    }

    pub fn steer(&mut self, me: &Body, dt: f64) -> Vec2 {
        if self.inner.is_done() {
            if let Some(next) = self.path.next_goal() {
                self.inner.set_goal(next);
            }
        }
        self.inner.steer(me, dt)
    }
}
