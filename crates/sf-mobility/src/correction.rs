//! Direct position and velocity fix-ups applied around integration.

use sf_agent::Body;
use sf_core::{Vec2, VecExt};
use sf_spatial::{Obstacle, closest_obstacle, closest_solid_obstacle};

use crate::ForceParams;

/// Push `me` straight away from every neighbor closer than
/// `overlap_ratio × (r_a + r_b)`, by the full shortfall.
///
/// Both members of a pair run this against the other's start-of-tick
/// position, so each moves the whole deficit and the pair ends at least
/// `overlap_ratio × (r_a + r_b)` apart.  Exactly coincident agents separate
/// along the x axis, the lower id going left.
///
/// Returns the displacement applied.
pub fn correct_overlaps(me: &mut Body, others: &[&Body], p: &ForceParams) -> Vec2 {
    let mut shift = Vec2::ZERO;
    for other in others {
        let min_gap = (me.radius + other.radius) * p.overlap_ratio;
        let away = me.position - other.position;
        let dist = away.length();
        if dist >= min_gap {
            continue;
        }
        let dir = if dist > 0.0 {
            away / dist
        } else if me.id < other.id {
            Vec2::NEG_X
        } else {
            Vec2::X
        };
        shift += dir * (min_gap - dist);
    }
    me.position += shift;
    shift
}

/// Translate `me` out of the nearest solid obstacle it penetrates.
pub fn push_out_of_obstacles(me: &mut Body, obstacles: &[Obstacle]) -> Vec2 {
    let Some((nearest, _)) = closest_solid_obstacle(obstacles, me.position) else {
        return Vec2::ZERO;
    };
    let push = nearest.rect.circle_push(&me.circle());
    me.position += push;
    push
}

/// Within one radius of the closest obstacle and heading into it: drop the
/// velocity component into the obstacle, leaving the tangential part.
pub fn inhibit_motion(me: &mut Body, obstacles: &[Obstacle], p: &ForceParams) {
    let Some((_, d)) = closest_obstacle(obstacles, me.position) else {
        return;
    };
    if d.length() > me.radius {
        return;
    }
    let into = d.unit();
    let speed_in = me.velocity.dot(into);
    if speed_in > p.inhibit_threshold {
        me.velocity -= into * speed_in;
    }
}

/// Limit the closing speed toward each neighbor so that at most `safety` of
/// the current gap is closed in one step of `dt`.  With `safety ≤ 0.5` two
/// agents clamping against each other cannot newly overlap.
pub fn constrain_closing_speed(me: &mut Body, others: &[&Body], safety: f64, dt: f64) {
    if dt <= 0.0 {
        return;
    }
    for other in others {
        let to = other.position - me.position;
        let dist = to.length();
        if dist == 0.0 {
            continue;
        }
        let u = to / dist;
        let gap = (dist - me.radius - other.radius).max(0.0);
        let closing = (me.velocity - other.velocity).dot(u);
        let allowed = gap * safety / dt;
        if closing > allowed {
            me.velocity -= u * (closing - allowed);
        }
    }
}
