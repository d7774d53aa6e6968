use sf_agent::Body;
use sf_core::Vec2;

/// The result of one behavior step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Steering {
    /// Point to walk toward.  The agent's own position means "hold".
    pub target:      Vec2,
    /// The behavior picked a fresh long-term goal this tick; the force model
    /// clears the agent's stall timer.
    pub reset_stall: bool,
}

impl Steering {
    #[inline]
    pub fn toward(target: Vec2) -> Self {
        Self { target, reset_stall: false }
    }

    #[inline]
    pub fn hold(me: &Body) -> Self {
        Self::toward(me.position)
    }

    #[inline]
    pub fn with_reset(mut self) -> Self {
        self.reset_stall = true;
        self
    }

    /// `true` if this asks `me` to stay where it is.
    #[inline]
    pub fn is_hold(&self, me: &Body) -> bool {
        self.target == me.position
    }
}
