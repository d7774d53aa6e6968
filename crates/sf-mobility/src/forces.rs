//! Social-force laws.
//!
//! Every repulsive law has the same bounded inverse-square falloff
//! `fmax / (1 + ρ²)`, where `ρ` is a distance measured in radii and `fmax` is
//! `mass × alpha × gain`.  All directions go through `VecExt::unit`, so
//! coincident agents or an agent sitting exactly on a wall contribute zero
//! rather than NaN.

use sf_agent::Body;
use sf_core::{Vec2, VecExt};
use sf_spatial::{Obstacle, closest_obstacle};

use crate::ForceParams;

/// `1 / (1 + ρ²)`.
#[inline]
pub fn falloff(rho: f64) -> f64 {
    1.0 / (1.0 + rho * rho)
}

/// Sign that maps zero to zero.
#[inline]
fn sign0(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ── Will ──────────────────────────────────────────────────────────────────────

/// Goal-seeking drive toward `target`.
///
/// The desired speed and the drive stiffness both grow with the stall timer,
/// so an agent stuck in a jam pushes harder the longer it waits.  A target at
/// the agent's own position asks for zero velocity.
pub fn will_force(me: &Body, target: Vec2) -> Vec2 {
    let stall = me.time_since_goal;
    let desired = (target - me.position).unit() * me.desired_speed * (1.0 + stall / 60.0);
    (desired - me.velocity) * me.mass * me.alpha * (1.0 + stall / 20.0)
}

// ── Intermediate range ────────────────────────────────────────────────────────

/// Avoidance of one neighbor, resolved along the agent's heading and its
/// normal.
///
/// Zero when the agent is not moving or when the pair is not closing
/// (time to closest approach ≤ 0).  A neighbor dead ahead is passed on the
/// right.
pub fn intermediate_pair(me: &Body, other: &Body, p: &ForceParams) -> Vec2 {
    let t = me.velocity.unit();
    if t == Vec2::ZERO {
        return Vec2::ZERO;
    }
    let d = other.position - me.position;
    let closing = me.velocity - other.velocity;
    let closing2 = closing.length_squared();
    if closing2 == 0.0 || d.dot(closing) / closing2 <= 0.0 {
        return Vec2::ZERO;
    }

    let n = t.normal();
    let (along, across) = (d.dot(t), d.dot(n));
    let fmax = me.mass * me.alpha * p.intermediate_gain;
    let ft = -sign0(along) * fmax * falloff(along.abs() / me.radius);
    let side = if across == 0.0 { 1.0 } else { across.signum() };
    let across_f = -side * fmax * falloff(across.abs() / me.radius);
    t * ft + n * across_f
}

pub fn intermediate_force(me: &Body, others: &[&Body], p: &ForceParams) -> Vec2 {
    others.iter().map(|o| intermediate_pair(me, o, p)).sum()
}

// ── Near range ────────────────────────────────────────────────────────────────

/// Peak-scaled near-range magnitude at `rho = distance / own radius`.
#[inline]
pub fn near_magnitude(me: &Body, rho: f64, p: &ForceParams) -> f64 {
    me.mass * me.alpha * p.near_gain * falloff(rho)
}

/// Isotropic push away from one neighbor.
pub fn near_pair(me: &Body, other: &Body, p: &ForceParams) -> Vec2 {
    let away = me.position - other.position;
    let rho = away.length() / me.radius;
    away.unit() * near_magnitude(me, rho, p)
}

pub fn near_force(me: &Body, others: &[&Body], p: &ForceParams) -> Vec2 {
    others.iter().map(|o| near_pair(me, o, p)).sum()
}

// ── Contact ───────────────────────────────────────────────────────────────────

/// Normal contact magnitude at `rho = distance / (r_a + r_b)`; zero beyond
/// `contact_reach`, boosted while the disks overlap.
pub fn contact_magnitude(me: &Body, other: &Body, rho: f64, p: &ForceParams) -> f64 {
    if rho > p.contact_reach {
        return 0.0;
    }
    let fmax = me.mass * me.alpha.max(other.alpha) * p.contact_gain;
    let boost = if rho <= 1.0 { p.overlap_boost } else { 1.0 };
    fmax * boost * falloff(rho)
}

/// Contact push plus tangential friction opposing the relative sliding
/// velocity.
pub fn contact_pair(me: &Body, other: &Body, p: &ForceParams) -> Vec2 {
    let away = me.position - other.position;
    let rho = away.length() / (me.radius + other.radius);
    let magnitude = contact_magnitude(me, other, rho, p);
    if magnitude == 0.0 {
        return Vec2::ZERO;
    }
    let normal = away.unit() * magnitude;
    let tangent = away.unit().normal();
    let slide = tangent.dot(me.velocity - other.velocity);
    normal - tangent * (sign0(slide) * p.friction * normal.length())
}

pub fn contact_force(me: &Body, others: &[&Body], p: &ForceParams) -> Vec2 {
    others.iter().map(|o| contact_pair(me, o, p)).sum()
}

// ── Walls ─────────────────────────────────────────────────────────────────────

/// Repulsion from the single closest obstacle, zero beyond the agent's wall
/// threshold.
pub fn wall_force(me: &Body, obstacles: &[Obstacle], p: &ForceParams) -> Vec2 {
    let Some((_, d)) = closest_obstacle(obstacles, me.position) else {
        return Vec2::ZERO;
    };
    let dist = d.length();
    if dist > me.wall_threshold {
        return Vec2::ZERO;
    }
    -d.unit() * me.mass * me.alpha * p.wall_gain * falloff(dist / me.radius)
}
