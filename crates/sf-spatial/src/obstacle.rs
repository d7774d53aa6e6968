//! Static rectangular obstacles.
//!
//! An obstacle is either **solid** (`inner == false`): a region agents must
//! stay out of, or **inner** (`inner == true`): a containment region agents
//! must stay inside, such as the screen bounds.

use sf_core::{Rect, Segment, Vec2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect:  Rect,
    pub inner: bool,
}

impl Obstacle {
    pub fn new(rect: Rect, inner: bool) -> Self {
        Self { rect, inner }
    }

    /// A region agents must stay out of.
    pub fn solid(rect: Rect) -> Self {
        Self::new(rect, false)
    }

    /// A region agents must stay inside.
    pub fn containment(rect: Rect) -> Self {
        Self::new(rect, true)
    }

    /// Signed distance vector from `pos` to the obstacle boundary.
    ///
    /// The vector's length is the distance to the nearest edge.  It points
    /// toward the boundary while the agent is on the permitted side, and is
    /// flipped once the agent is on the forbidden side (inside a solid
    /// obstacle, or outside a containment region), so that pushing against
    /// it always moves the agent back where it belongs.
    pub fn distance_vector(&self, pos: Vec2) -> Vec2 {
        let v = self.rect.boundary_vector(pos);
        if self.blocks_point(pos) { -v } else { v }
    }

    /// Raw geometric test: does the segment `a`–`b` touch the rectangle?
    pub fn intersects_line(&self, a: Vec2, b: Vec2) -> bool {
        self.rect.intersects_segment(&Segment::new(a, b))
    }

    /// A point is blocked inside a solid obstacle or outside a containment one.
    #[inline]
    pub fn blocks_point(&self, p: Vec2) -> bool {
        self.rect.contains(p) != self.inner
    }

    /// Does walking straight from `a` to `b` violate this obstacle?
    ///
    /// Solid: the segment touches the rectangle.  Containment: either end lies
    /// outside (the rectangle is convex, so a segment with both ends inside
    /// never leaves it).
    pub fn blocks_segment(&self, a: Vec2, b: Vec2) -> bool {
        if self.inner {
            !self.rect.contains(a) || !self.rect.contains(b)
        } else {
            self.intersects_line(a, b)
        }
    }
}

// ── Obstacle-set queries ──────────────────────────────────────────────────────

/// `p` is blocked by at least one obstacle.
pub fn point_blocked(obstacles: &[Obstacle], p: Vec2) -> bool {
    obstacles.iter().any(|o| o.blocks_point(p))
}

/// The straight walk `a`→`b` is blocked by at least one obstacle, solid or
/// containment.
pub fn segment_blocked(obstacles: &[Obstacle], a: Vec2, b: Vec2) -> bool {
    obstacles.iter().any(|o| o.blocks_segment(a, b))
}

/// The segment `a`–`b` touches at least one solid obstacle.  Used for line of
/// sight and for pruning navigation edges.
pub fn segment_crosses_solid(obstacles: &[Obstacle], a: Vec2, b: Vec2) -> bool {
    obstacles.iter().filter(|o| !o.inner).any(|o| o.intersects_line(a, b))
}

/// Obstacle whose boundary is nearest to `pos`, with its signed distance
/// vector.  `None` for an empty set.
pub fn closest_obstacle(obstacles: &[Obstacle], pos: Vec2) -> Option<(&Obstacle, Vec2)> {
    nearest(obstacles.iter(), pos)
}

/// Like [`closest_obstacle`], restricted to solid obstacles.
pub fn closest_solid_obstacle(obstacles: &[Obstacle], pos: Vec2) -> Option<(&Obstacle, Vec2)> {
    nearest(obstacles.iter().filter(|o| !o.inner), pos)
}

fn nearest<'a>(
    obstacles: impl Iterator<Item = &'a Obstacle>,
    pos: Vec2,
) -> Option<(&'a Obstacle, Vec2)> {
    obstacles
        .map(|o| (o, o.distance_vector(pos)))
        .fold(None, |best: Option<(&Obstacle, Vec2)>, (o, d)| match best {
            Some((_, bd)) if bd.length_squared() <= d.length_squared() => best,
            _ => Some((o, d)),
        })
}
