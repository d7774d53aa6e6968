//! Per-agent physical state.

use sf_core::{AgentId, Circle, SfError, SfResult, Vec2};

/// Physical parameters an agent is created with.
///
/// Defaults describe an adult pedestrian in screen units: radius 10, mass 60,
/// walking at 13.3 units per second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyParams {
    pub radius:         f64,
    pub mass:           f64,
    pub desired_speed:  f64,
    /// Stiffness of the goal-seeking drive.
    pub alpha:          f64,
    /// Obstacles farther away than this exert no wall force.
    pub wall_threshold: f64,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            radius:         10.0,
            mass:           60.0,
            desired_speed:  13.3,
            alpha:          2.0,
            wall_threshold: 30.0,
        }
    }
}

impl BodyParams {
    /// Reject parameters the force model cannot integrate.
    pub fn validate(&self) -> SfResult<()> {
        let positive = [("radius", self.radius), ("mass", self.mass)];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SfError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("desired_speed", self.desired_speed),
            ("alpha", self.alpha),
            ("wall_threshold", self.wall_threshold),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SfError::Config(format!("{name} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }
}

/// One agent's kinematic state.
///
/// Mutated only by the agent's own update each tick; other agents read it
/// through the start-of-tick snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id:              AgentId,
    pub position:        Vec2,
    pub velocity:        Vec2,
    pub radius:          f64,
    pub mass:            f64,
    pub desired_speed:   f64,
    pub alpha:           f64,
    pub wall_threshold:  f64,
    /// Seconds since the agent last made progress toward a goal.  Drives the
    /// anti-deadlock speed-up in the will force.
    pub time_since_goal: f64,
    /// Net force from the most recent update, kept for drawing.
    pub last_force:      Vec2,
}

impl Body {
    /// A body at rest at `position`.  `params` is assumed validated.
    pub fn new(id: AgentId, position: Vec2, params: &BodyParams) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            radius: params.radius,
            mass: params.mass,
            desired_speed: params.desired_speed,
            alpha: params.alpha,
            wall_threshold: params.wall_threshold,
            time_since_goal: 0.0,
            last_force: Vec2::ZERO,
        }
    }

    pub fn params(&self) -> BodyParams {
        BodyParams {
            radius:         self.radius,
            mass:           self.mass,
            desired_speed:  self.desired_speed,
            alpha:          self.alpha,
            wall_threshold: self.wall_threshold,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// `true` if the two disks overlap.
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }
}
