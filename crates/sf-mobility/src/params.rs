//! Force-model constants.

use sf_core::{SfError, SfResult};

/// Tunable force constants.
///
/// The `*_gain` values multiply `mass × alpha` to give each law's peak
/// magnitude.  They shape the crowd's look rather than any invariant, so
/// scenarios are free to change them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ForceParams {
    /// Heading-aligned avoidance of agents ahead.
    pub intermediate_gain: f64,
    /// Isotropic personal-space repulsion.
    pub near_gain:         f64,
    /// Body contact.
    pub contact_gain:      f64,
    /// Contact multiplier while the disks overlap.
    pub overlap_boost:     f64,
    /// Contact acts while `distance / (r_a + r_b)` is at most this.
    pub contact_reach:     f64,
    /// Tangential friction as a fraction of the contact force.
    pub friction:          f64,
    pub wall_gain:         f64,
    /// Overlap left in place by position correction, as a fraction of the
    /// combined radius.
    pub overlap_ratio:     f64,
    /// Minimum speed into a nearby obstacle before the velocity is projected
    /// onto the obstacle's tangent.
    pub inhibit_threshold: f64,
    /// Share of the gap to a neighbor an agent may close in one step.
    /// `None` disables the kinematic constraint.
    pub kinematic_safety:  Option<f64>,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            intermediate_gain: 16.0,
            near_gain:         64.0,
            contact_gain:      128.0,
            overlap_boost:     2.0,
            contact_reach:     1.5,
            friction:          0.2,
            wall_gain:         256.0,
            overlap_ratio:     0.9,
            inhibit_threshold: 1e-3,
            kinematic_safety:  Some(0.5),
        }
    }
}

impl ForceParams {
    pub fn validate(&self) -> SfResult<()> {
        let non_negative = [
            ("intermediate_gain", self.intermediate_gain),
            ("near_gain", self.near_gain),
            ("contact_gain", self.contact_gain),
            ("overlap_boost", self.overlap_boost),
            ("contact_reach", self.contact_reach),
            ("friction", self.friction),
            ("wall_gain", self.wall_gain),
            ("inhibit_threshold", self.inhibit_threshold),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SfError::Config(format!("{name} must be non-negative, got {value}")));
            }
        }
        if !(self.overlap_ratio > 0.0 && self.overlap_ratio <= 1.0) {
            return Err(SfError::Config(format!(
                "overlap_ratio must be in (0, 1], got {}",
                self.overlap_ratio
            )));
        }
        if let Some(s) = self.kinematic_safety {
            if !(s > 0.0 && s <= 1.0) {
                return Err(SfError::Config(format!("kinematic_safety must be in (0, 1], got {s}")));
            }
        }
        Ok(())
    }
}
