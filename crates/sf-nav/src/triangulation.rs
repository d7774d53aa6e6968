//! Delaunay triangulation of candidate waypoints (Bowyer–Watson).
//!
//! # Construction
//!
//! Points are inserted one at a time into a mesh seeded with a single
//! super-triangle that encloses every input point.  For each new point:
//!
//! 1. every triangle whose circumcircle strictly contains it is "bad";
//! 2. the edges of bad triangles that no other bad triangle shares form the
//!    boundary of the cavity;
//! 3. the bad triangles are removed and each boundary edge is joined to the
//!    new point.
//!
//! Triangles touching a super-triangle vertex are discarded at the end, along
//! with any zero-area leftovers.  There is no robustness scheme: circumcircle
//! ties are resolved by whatever the floating-point comparison says, which is
//! fine for picking walking waypoints.
//!
//! # Layout
//!
//! Triangles are stored as index triples into the compacted vertex array
//! (`points`).  Adjacency is a per-vertex sorted neighbor list derived from
//! the deduplicated undirected edge set.  An R-tree over the vertices answers
//! "nearest waypoint to this position" queries for the router.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use sf_core::{Circle, Segment, Vec2, geometry::cross};

/// Super-triangle extent as a multiple of the input bounding box.
const SUPER_SCALE: f64 = 20.0;

// ── Triangle ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec2; 3],
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { points: [a, b, c] }
    }

    pub fn edges(&self) -> [Segment; 3] {
        let [a, b, c] = self.points;
        [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)]
    }

    /// Twice the signed area (positive when counter-clockwise).
    pub fn doubled_area(&self) -> f64 {
        let [a, b, c] = self.points;
        cross(b - a, c - a)
    }

    /// Circle through all three vertices.
    ///
    /// Collinear vertices have no circumcircle; they get an infinite radius
    /// centred on the centroid, so every point counts as inside and the
    /// triangle is replaced at the next insertion.
    pub fn circumcircle(&self) -> Circle {
        let [a, b, c] = self.points;
        let (b, c) = (b - a, c - a);
        let d = 2.0 * cross(b, c);
        if d == 0.0 || !d.is_finite() {
            return Circle::new((a + (a + b) + (a + c)) / 3.0, f64::INFINITY);
        }
        let (b2, c2) = (b.length_squared(), c.length_squared());
        let u = Vec2::new(c.y * b2 - b.y * c2, b.x * c2 - c.x * b2) / d;
        Circle::new(a + u, u.length())
    }
}

// ── R-tree vertex entry ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct VertexEntry {
    point: [f64; 2],
    index: usize,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Triangulation ─────────────────────────────────────────────────────────────

/// Immutable Delaunay mesh over a waypoint set.
#[derive(Clone, Debug)]
pub struct Triangulation {
    points:    Vec<Vec2>,
    triangles: Vec<[usize; 3]>,
    /// Undirected edges `(lo, hi)`, sorted.
    edges:     Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
    index:     RTree<VertexEntry>,
}

/// Working triangle during insertion: vertex indices plus cached circumcircle.
struct Work {
    v:      [usize; 3],
    circle: Circle,
}

impl Triangulation {
    /// Triangulate `input`.
    ///
    /// Non-finite points are ignored and exact duplicates are collapsed to
    /// their first occurrence.  Fewer than three distinct points, or an
    /// all-collinear set, yields an empty mesh.
    pub fn bowyer_watson(input: &[Vec2]) -> Self {
        let pts = dedup(input);
        let n = pts.len();
        if n < 3 {
            debug!(points = n, "too few waypoints to triangulate");
            return Self::assemble(pts, Vec::new());
        }

        // Vertex array: input points followed by the three super vertices.
        let mut verts = pts;
        verts.extend(super_triangle(&verts));
        let circle_of = |v: [usize; 3], verts: &[Vec2]| {
            Triangle::new(verts[v[0]], verts[v[1]], verts[v[2]]).circumcircle()
        };

        let seed = [n, n + 1, n + 2];
        let mut work = vec![Work { v: seed, circle: circle_of(seed, &verts) }];
        let mut edge_count: FxHashMap<(usize, usize), u32> = FxHashMap::default();

        for p in 0..n {
            let point = verts[p];
            let (bad, good): (Vec<Work>, Vec<Work>) =
                work.into_iter().partition(|t| t.circle.contains(point));
            work = good;

            edge_count.clear();
            for t in &bad {
                for (a, b) in tri_edges(t.v) {
                    *edge_count.entry(undirected(a, b)).or_insert(0) += 1;
                }
            }
            // Iterate bad triangles again rather than the map so the new
            // triangles come out in a deterministic order.
            for t in &bad {
                for (a, b) in tri_edges(t.v) {
                    if edge_count.get(&undirected(a, b)) == Some(&1) {
                        let v = [a, b, p];
                        work.push(Work { v, circle: circle_of(v, &verts) });
                    }
                }
            }
        }

        let scale = bbox_extent(&verts[..n]);
        let triangles: Vec<[usize; 3]> = work
            .into_iter()
            .map(|t| t.v)
            .filter(|v| v.iter().all(|&i| i < n))
            .filter(|v| {
                let t = Triangle::new(verts[v[0]], verts[v[1]], verts[v[2]]);
                t.doubled_area().abs() > f64::EPSILON * scale * scale
            })
            .collect();

        verts.truncate(n);
        let mesh = Self::assemble(verts, triangles);
        debug!(
            points = n,
            vertices = mesh.points.len(),
            triangles = mesh.triangles.len(),
            edges = mesh.edges.len(),
            "triangulated waypoints"
        );
        mesh
    }

    /// Compact to the vertices actually used by a triangle and derive edges,
    /// adjacency and the R-tree.
    fn assemble(all: Vec<Vec2>, triangles: Vec<[usize; 3]>) -> Self {
        let mut remap = vec![usize::MAX; all.len()];
        for v in triangles.iter().flatten() {
            remap[*v] = 0;
        }
        let mut points = Vec::new();
        for (old, slot) in remap.iter_mut().enumerate() {
            if *slot == 0 {
                *slot = points.len();
                points.push(all[old]);
            }
        }
        let triangles: Vec<[usize; 3]> =
            triangles.into_iter().map(|t| t.map(|v| remap[v])).collect();

        let mut edge_set: FxHashSet<(usize, usize)> = FxHashSet::default();
        for t in &triangles {
            for (a, b) in tri_edges(*t) {
                edge_set.insert(undirected(a, b));
            }
        }
        let mut edges: Vec<(usize, usize)> = edge_set.into_iter().collect();
        edges.sort_unstable();

        let mut adjacency = vec![Vec::new(); points.len()];
        for &(a, b) in &edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }

        let entries = points
            .iter()
            .enumerate()
            .map(|(index, p)| VertexEntry { point: [p.x, p.y], index })
            .collect();

        Self { points, triangles, edges, adjacency, index: RTree::bulk_load(entries) }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if the mesh has no triangles (and therefore no vertices).
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Deduplicated vertex set.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn point(&self, vertex: usize) -> Option<Vec2> {
        self.points.get(vertex).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles as vertex index triples.
    pub fn indexed_triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| Triangle::new(self.points[a], self.points[b], self.points[c]))
    }

    /// Undirected edges as vertex index pairs `(lo, hi)`, sorted.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn edge_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.edges.iter().map(|&(a, b)| Segment::new(self.points[a], self.points[b]))
    }

    /// Vertices sharing an edge with `vertex`, ascending.  Empty for an
    /// unknown index.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions of the vertices connected to the vertex at exactly `p`.
    /// Empty if `p` is not a vertex.
    pub fn connecting_points(&self, p: Vec2) -> Vec<Vec2> {
        match self.nearest_vertex(p) {
            Some(v) if self.points[v] == p => {
                self.neighbors(v).iter().map(|&u| self.points[u]).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Index of the vertex closest to `p`; `None` for an empty mesh.
    pub fn nearest_vertex(&self, p: Vec2) -> Option<usize> {
        self.index.nearest_neighbor(&[p.x, p.y]).map(|e| e.index)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[inline]
fn tri_edges(v: [usize; 3]) -> [(usize, usize); 3] {
    [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])]
}

#[inline]
fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Finite points in first-occurrence order, exact duplicates removed.
fn dedup(input: &[Vec2]) -> Vec<Vec2> {
    let mut seen: FxHashSet<(u64, u64)> = FxHashSet::default();
    input
        .iter()
        .copied()
        .filter(|p| p.is_finite())
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        .filter(|p| seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())))
        .collect()
}

fn bbox_extent(points: &[Vec2]) -> f64 {
    let (lo, hi) = bbox(points);
    (hi - lo).max_element().max(1.0)
}

fn bbox(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::splat(f64::INFINITY), Vec2::splat(f64::NEG_INFINITY)),
        |(lo, hi), &p| (lo.min(p), hi.max(p)),
    )
}

/// A triangle comfortably enclosing every point.
fn super_triangle(points: &[Vec2]) -> [Vec2; 3] {
    let (lo, hi) = bbox(points);
    let mid = (lo + hi) * 0.5;
    let d = (hi - lo).max_element().max(1.0) * SUPER_SCALE;
    [
        Vec2::new(mid.x - d, mid.y - d),
        Vec2::new(mid.x + d, mid.y - d),
        Vec2::new(mid.x, mid.y + d),
    ]
}
