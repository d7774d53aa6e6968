//! Planar geometry primitives.
//!
//! `Vec2` is glam's double-precision `DVec2`.  The simulation works in screen
//! units (the corridor scenario is 1800 × 800), where `f32` starts losing
//! sub-millimetre precision in the force sums, so everything here is `f64`.
//!
//! Every normalization in the simulator goes through [`VecExt::unit`], which
//! returns the zero vector for zero-length (or non-finite) input instead of
//! NaN.  Force sums therefore never pick up NaN from coincident agents.

use crate::{SfError, SfResult};

/// Double-precision 2-D vector.
pub type Vec2 = glam::DVec2;

/// Guarded vector helpers used by the force model and obstacle queries.
pub trait VecExt: Sized {
    /// Unit vector in the same direction, or zero for a zero-length vector.
    fn unit(self) -> Self;

    /// Unit normal (the vector rotated by +90°), or zero.
    fn normal(self) -> Self;

    /// Projection of `self` onto `onto`; zero when `onto` has no length.
    fn projected_onto(self, onto: Self) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn unit(self) -> Vec2 {
        self.normalize_or_zero()
    }

    #[inline]
    fn normal(self) -> Vec2 {
        self.perp().normalize_or_zero()
    }

    #[inline]
    fn projected_onto(self, onto: Vec2) -> Vec2 {
        let len2 = onto.length_squared();
        if len2 <= f64::EPSILON || !len2.is_finite() {
            return Vec2::ZERO;
        }
        onto * (self.dot(onto) / len2)
    }
}

/// 2-D cross product (z component of the 3-D cross product).
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A closed line segment from `a` to `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// The point on the segment closest to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len2 = ab.length_squared();
        if len2 <= f64::EPSILON {
            return self.a;
        }
        let t = ((p - self.a).dot(ab) / len2).clamp(0.0, 1.0);
        self.a + ab * t
    }

    /// `true` if the two closed segments share at least one point.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, p2, p3, p4) = (self.a, self.b, other.a, other.b);
        let d1 = cross(p4 - p3, p1 - p3);
        let d2 = cross(p4 - p3, p2 - p3);
        let d3 = cross(p2 - p1, p3 - p1);
        let d4 = cross(p2 - p1, p4 - p1);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        // Collinear / touching cases.
        (d1 == 0.0 && on_segment(p3, p4, p1))
            || (d2 == 0.0 && on_segment(p3, p4, p2))
            || (d3 == 0.0 && on_segment(p1, p2, p3))
            || (d4 == 0.0 && on_segment(p1, p2, p4))
    }
}

/// `p` is known to be collinear with `a`–`b`; is it within their bounding box?
#[inline]
fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.  Invariant: `min.x <= max.x` and `min.y <= max.y`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build a rectangle, rejecting inverted or non-finite corners.
    pub fn new(min: Vec2, max: Vec2) -> SfResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SfError::Config(format!("rectangle corners must be finite: {min} {max}")));
        }
        if min.x > max.x || min.y > max.y {
            return Err(SfError::Config(format!("rectangle min {min} exceeds max {max}")));
        }
        Ok(Self { min, max })
    }

    /// Build a rectangle from any two opposite corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The four boundary edges, counter-clockwise from the bottom-left corner.
    pub fn edges(&self) -> [Segment; 4] {
        let bl = self.min;
        let br = Vec2::new(self.max.x, self.min.y);
        let tr = self.max;
        let tl = Vec2::new(self.min.x, self.max.y);
        [
            Segment::new(bl, br),
            Segment::new(br, tr),
            Segment::new(tr, tl),
            Segment::new(tl, bl),
        ]
    }

    /// `true` if the segment touches the rectangle anywhere (boundary or
    /// interior).
    pub fn intersects_segment(&self, seg: &Segment) -> bool {
        if self.contains(seg.a) || self.contains(seg.b) {
            return true;
        }
        self.edges().iter().any(|e| e.intersects(seg))
    }

    /// Shortest vector from `p` to the rectangle's boundary.
    ///
    /// Measured to the edges, so for a point inside the rectangle this points
    /// toward the nearest side.
    pub fn boundary_vector(&self, p: Vec2) -> Vec2 {
        let mut best = Vec2::splat(f64::INFINITY);
        let mut best_len2 = f64::INFINITY;
        for edge in self.edges() {
            let v = edge.closest_point(p) - p;
            let len2 = v.length_squared();
            if len2 < best_len2 {
                best = v;
                best_len2 = len2;
            }
        }
        best
    }

    /// Displacement that moves `circle` out of the rectangle, or zero if they
    /// do not overlap.
    pub fn circle_push(&self, circle: &Circle) -> Vec2 {
        let c = circle.center;
        let r = circle.radius;
        if !self.contains(c) {
            let nearest = c.clamp(self.min, self.max);
            let away = c - nearest;
            let dist = away.length();
            if dist >= r {
                return Vec2::ZERO;
            }
            return away.unit() * (r - dist);
        }

        // Centre inside: leave through the nearest side.
        let exits = [
            (c.x - self.min.x, Vec2::NEG_X),
            (self.max.x - c.x, Vec2::X),
            (c.y - self.min.y, Vec2::NEG_Y),
            (self.max.y - c.y, Vec2::Y),
        ];
        let (depth, dir) = exits
            .into_iter()
            .fold((f64::INFINITY, Vec2::ZERO), |best, e| if e.0 < best.0 { e } else { best });
        dir * (depth + r)
    }
}

// ── Circle ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Strict containment: points on the circle are outside.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance(p) < self.radius
    }
}
