//! Routing trait and default A* implementation.
//!
//! # Pluggability
//!
//! Behaviors call routing through the [`Router`] trait so a scenario can swap
//! in another search (visibility graphs, flow fields) without touching the
//! behavior code.  The default [`AStarRouter`] searches the triangulation's
//! vertex adjacency.
//!
//! # Search
//!
//! * Start node: the mesh vertex nearest to `from`.
//! * Success: the node being expanded lies within `goal_tolerance` of `to`.
//! * Edge cost: Euclidean length.  Heuristic: straight-line distance to `to`.
//! * An edge whose segment touches a solid obstacle is never relaxed.
//!   Containment regions do not block edges.
//!
//! The search itself has no randomness.  Ties in the open set are broken by
//! vertex index, so a fixed mesh, obstacle set, start and goal always produce
//! the same path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use sf_core::Vec2;
use sf_spatial::{Obstacle, segment_crosses_solid};

use crate::{Goal, NavError, NavResult, Path, Triangulation};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: one router is shared by every agent
/// during the parallel steer phase.
pub trait Router: Send + Sync {
    /// Find a walkable path from `from` to `to`.
    ///
    /// Returns [`NavError::EmptyMesh`] for a mesh without vertices and
    /// [`NavError::NoPath`] when the search exhausts without reaching `to`.
    fn route(
        &self,
        mesh: &Triangulation,
        obstacles: &[Obstacle],
        from: Vec2,
        to: Vec2,
    ) -> NavResult<Path>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the triangulation adjacency graph.
///
/// Every reconstructed node becomes a [`Goal`] with `arrival_range` and no
/// loiter, except the last which gets `final_range`.  Callers that want the
/// agent to dwell at the destination set its loiter with
/// [`Path::set_final_loiter`].
#[derive(Clone, Debug)]
pub struct AStarRouter {
    pub arrival_range:  f64,
    pub final_range:    f64,
    pub goal_tolerance: f64,
}

impl Default for AStarRouter {
    fn default() -> Self {
        Self { arrival_range: 25.0, final_range: 100.0, goal_tolerance: 10.0 }
    }
}

impl Router for AStarRouter {
    fn route(
        &self,
        mesh: &Triangulation,
        obstacles: &[Obstacle],
        from: Vec2,
        to: Vec2,
    ) -> NavResult<Path> {
        let start = mesh.nearest_vertex(from).ok_or(NavError::EmptyMesh)?;
        let points = mesh.points();

        let n = points.len();
        let mut g = vec![f64::INFINITY; n];
        let mut prev = vec![usize::MAX; n];
        let mut closed = vec![false; n];

        g[start] = 0.0;
        let mut open = BinaryHeap::new();
        open.push(Open { f: points[start].distance(to), g: 0.0, node: start });

        while let Some(Open { g: cost, node, .. }) = open.pop() {
            if closed[node] || cost > g[node] {
                continue;
            }
            closed[node] = true;

            if points[node].distance(to) <= self.goal_tolerance {
                return Ok(self.reconstruct(points, &prev, node));
            }

            for &next in mesh.neighbors(node) {
                if closed[next] {
                    continue;
                }
                if segment_crosses_solid(obstacles, points[node], points[next]) {
                    continue;
                }
                let tentative = cost + points[node].distance(points[next]);
                if tentative < g[next] {
                    g[next] = tentative;
                    prev[next] = node;
                    open.push(Open {
                        f:    tentative + points[next].distance(to),
                        g:    tentative,
                        node: next,
                    });
                }
            }
        }

        Err(NavError::NoPath { from, to })
    }
}

impl AStarRouter {
    fn reconstruct(&self, points: &[Vec2], prev: &[usize], last: usize) -> Path {
        let mut path = Path::new();
        path.push(Goal::new(points[last], self.final_range, 0.0));
        let mut cur = prev[last];
        while cur != usize::MAX {
            path.push_front(Goal::new(points[cur], self.arrival_range, 0.0));
            cur = prev[cur];
        }
        path
    }
}

// ── Open-set entry ────────────────────────────────────────────────────────────

/// Min-heap entry on `f`, ties broken by the smaller vertex index.
#[derive(Copy, Clone, Debug)]
struct Open {
    f:    f64,
    g:    f64,
    node: usize,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.f.total_cmp(&self.f).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
