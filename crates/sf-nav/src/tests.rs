//! Unit tests for sf-nav.

#[cfg(test)]
mod helpers {
    use sf_core::{Rect, Vec2};

    pub fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(v(x0, y0), v(x1, y1)).unwrap()
    }

    /// Unit-ish square with a centre point: four fan triangles.
    pub fn square_with_centre() -> Vec<Vec2> {
        vec![v(0.0, 0.0), v(100.0, 0.0), v(100.0, 100.0), v(0.0, 100.0), v(50.0, 50.0)]
    }

    /// Slightly jittered 3 × 3 lattice, 200 × 200 units.
    pub fn lattice() -> Vec<Vec2> {
        vec![
            v(0.0, 0.0),
            v(100.0, 10.0),
            v(200.0, 0.0),
            v(0.0, 100.0),
            v(110.0, 110.0),
            v(200.0, 100.0),
            v(10.0, 200.0),
            v(100.0, 190.0),
            v(200.0, 200.0),
        ]
    }
}

// ── Goals and paths ───────────────────────────────────────────────────────────

#[cfg(test)]
mod goals {
    use super::helpers::v;
    use crate::{Goal, Path};

    #[test]
    fn negative_range_and_loiter_clamped() {
        let g = Goal::new(v(1.0, 2.0), -5.0, -1.0);
        assert_eq!(g.range, 0.0);
        assert_eq!(g.loiter, 0.0);
    }

    #[test]
    fn path_is_fifo() {
        let mut path: Path = (0..3).map(|i| Goal::new(v(i as f64, 0.0), 1.0, 0.0)).collect();
        assert_eq!(path.len(), 3);
        assert_eq!(path.next_goal().unwrap().target, v(0.0, 0.0));
        assert_eq!(path.next_goal().unwrap().target, v(1.0, 0.0));
        assert_eq!(path.next_goal().unwrap().target, v(2.0, 0.0));
        assert!(path.next_goal().is_none());
        assert!(path.is_empty());
    }

    #[test]
    fn final_loiter_only_touches_last() {
        let mut path: Path = (0..2).map(|i| Goal::new(v(i as f64, 0.0), 1.0, 0.0)).collect();
        path.set_final_loiter(30.0);
        assert_eq!(path.peek().unwrap().loiter, 0.0);
        assert_eq!(path.last().unwrap().loiter, 30.0);

        let mut empty = Path::new();
        empty.set_final_loiter(30.0);
        assert!(empty.is_empty());
    }
}

// ── Triangulation ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod triangulation {
    use super::helpers::{lattice, square_with_centre, v};
    use crate::{Triangle, Triangulation};

    #[test]
    fn circumcircle_of_right_triangle() {
        let c = Triangle::new(v(0.0, 0.0), v(4.0, 0.0), v(0.0, 3.0)).circumcircle();
        assert!((c.center - v(2.0, 1.5)).length() < 1e-12);
        assert!((c.radius - 2.5).abs() < 1e-12);
    }

    #[test]
    fn collinear_circumcircle_is_infinite() {
        let c = Triangle::new(v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)).circumcircle();
        assert!(c.radius.is_infinite());
        assert!(c.center.is_finite());
    }

    #[test]
    fn square_with_centre_fans() {
        let mesh = Triangulation::bowyer_watson(&square_with_centre());
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.edges().len(), 8);

        let centre = mesh.nearest_vertex(v(49.0, 51.0)).unwrap();
        assert_eq!(mesh.point(centre), Some(v(50.0, 50.0)));
        assert_eq!(mesh.neighbors(centre).len(), 4);
    }

    #[test]
    fn collinear_input_gives_empty_mesh() {
        let mesh = Triangulation::bowyer_watson(&[v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)]);
        assert!(mesh.is_empty());
        assert!(mesh.points().is_empty());
        assert!(mesh.nearest_vertex(v(0.0, 0.0)).is_none());
        assert!(mesh.neighbors(0).is_empty());
    }

    #[test]
    fn too_few_points() {
        assert!(Triangulation::bowyer_watson(&[]).is_empty());
        assert!(Triangulation::bowyer_watson(&[v(1.0, 1.0), v(2.0, 2.0)]).is_empty());
    }

    #[test]
    fn duplicates_and_nan_ignored() {
        let mut pts = square_with_centre();
        pts.push(v(50.0, 50.0));
        pts.push(v(0.0, 0.0));
        pts.push(v(f64::NAN, 3.0));
        let mesh = Triangulation::bowyer_watson(&pts);
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn edges_are_undirected_and_unique() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        for &(a, b) in mesh.edges() {
            assert!(a < b);
            assert!(mesh.neighbors(a).contains(&b));
            assert!(mesh.neighbors(b).contains(&a));
        }
        let mut sorted = mesh.edges().to_vec();
        sorted.dedup();
        assert_eq!(sorted.len(), mesh.edges().len());
    }

    #[test]
    fn connecting_points_of_vertex() {
        let mesh = Triangulation::bowyer_watson(&square_with_centre());
        let mut around = mesh.connecting_points(v(50.0, 50.0));
        around.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        assert_eq!(around, vec![v(0.0, 0.0), v(0.0, 100.0), v(100.0, 0.0), v(100.0, 100.0)]);
        assert!(mesh.connecting_points(v(49.0, 50.0)).is_empty());
    }
}

// ── Delaunay and Euler properties ─────────────────────────────────────────────

#[cfg(test)]
mod delaunay {
    use std::f64::consts::TAU;

    use proptest::prelude::*;
    use sf_core::Vec2;

    use crate::Triangulation;

    /// No mesh vertex lies strictly inside any triangle's circumcircle.
    fn assert_empty_circumcircles(mesh: &Triangulation) -> Result<(), TestCaseError> {
        for tri in mesh.triangles() {
            let c = tri.circumcircle();
            for &p in mesh.points() {
                if tri.points.contains(&p) {
                    continue;
                }
                let slack = 1e-7 * c.radius.max(1.0);
                prop_assert!(
                    c.center.distance(p) >= c.radius - slack,
                    "{p} inside circumcircle of {:?}",
                    tri.points
                );
            }
        }
        Ok(())
    }

    /// Irregular convex octagon, radius about 1000.
    fn hull() -> Vec<Vec2> {
        let radii = [1000.0, 950.0, 1010.0, 930.0, 990.0, 960.0, 1020.0, 940.0];
        radii
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let a = 0.1 + i as f64 * TAU / 8.0;
                Vec2::new(r * a.cos(), r * a.sin())
            })
            .collect()
    }

    proptest! {
        #[test]
        fn random_points_are_delaunay(
            raw in prop::collection::vec((0.0f64..1_000.0, 0.0f64..1_000.0), 3..30),
        ) {
            let pts: Vec<Vec2> = raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            let mesh = Triangulation::bowyer_watson(&pts);
            assert_empty_circumcircles(&mesh)?;
        }

        #[test]
        fn triangle_count_matches_euler(
            polar in prop::collection::vec((0.0f64..400.0, 0.0f64..TAU), 0..25),
        ) {
            let mut pts = hull();
            pts.extend(polar.iter().map(|&(r, a)| Vec2::new(r * a.cos(), r * a.sin())));
            let mut distinct = pts.clone();
            distinct.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
            distinct.dedup();

            let mesh = Triangulation::bowyer_watson(&pts);
            let n = distinct.len();
            let k = 8;
            // Every input point is a vertex.
            prop_assert_eq!(mesh.vertex_count(), n);
            prop_assert_eq!(mesh.triangle_count(), 2 * n - 2 - k);
            assert_empty_circumcircles(&mesh)?;
        }
    }
}

// ── A* routing ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use sf_core::Segment;
    use sf_spatial::Obstacle;

    use super::helpers::{lattice, rect, v};
    use crate::{AStarRouter, NavError, Router, Triangulation};

    #[test]
    fn walks_around_solid_obstacle() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        let pillar = Obstacle::solid(rect(40.0, 40.0, 160.0, 160.0));
        let obstacles = [pillar];
        let router = AStarRouter::default();

        let path = router.route(&mesh, &obstacles, v(3.0, -2.0), v(200.0, 200.0)).unwrap();
        let points = path.waypoints();
        assert_eq!(points.first(), Some(&v(0.0, 0.0)));
        assert_eq!(points.last(), Some(&v(200.0, 200.0)));
        for pair in points.windows(2) {
            let seg = Segment::new(pair[0], pair[1]);
            assert!(!pillar.rect.intersects_segment(&seg), "{:?} crosses the pillar", seg);
        }
    }

    #[test]
    fn goal_ranges() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        let path = AStarRouter::default().route(&mesh, &[], v(0.0, 0.0), v(200.0, 200.0)).unwrap();
        assert!(path.len() >= 2);
        let goals: Vec<_> = path.iter().copied().collect();
        let (last, rest) = goals.split_last().unwrap();
        assert_eq!(last.range, 100.0);
        assert_eq!(last.loiter, 0.0);
        assert!(rest.iter().all(|g| g.range == 25.0 && g.loiter == 0.0));
    }

    #[test]
    fn search_is_deterministic() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        let obstacles = [Obstacle::solid(rect(40.0, 40.0, 160.0, 160.0))];
        let router = AStarRouter::default();
        let first = router.route(&mesh, &obstacles, v(0.0, 0.0), v(200.0, 200.0)).unwrap();
        for _ in 0..10 {
            let again = router.route(&mesh, &obstacles, v(0.0, 0.0), v(200.0, 200.0)).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn start_within_tolerance_is_single_goal() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        let path = AStarRouter::default().route(&mesh, &[], v(1.0, 1.0), v(5.0, 5.0)).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.peek().unwrap().target, v(0.0, 0.0));
    }

    #[test]
    fn wall_between_clusters_is_no_path() {
        let pts = [
            v(0.0, 0.0),
            v(50.0, 10.0),
            v(0.0, 100.0),
            v(45.0, 90.0),
            v(300.0, 0.0),
            v(350.0, 10.0),
            v(300.0, 100.0),
            v(345.0, 95.0),
        ];
        let mesh = Triangulation::bowyer_watson(&pts);
        let wall = [Obstacle::solid(rect(100.0, -1_000.0, 200.0, 1_000.0))];
        let err = AStarRouter::default()
            .route(&mesh, &wall, v(0.0, 0.0), v(350.0, 10.0))
            .unwrap_err();
        assert_eq!(err, NavError::NoPath { from: v(0.0, 0.0), to: v(350.0, 10.0) });
    }

    #[test]
    fn containment_does_not_block_edges() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        let screen = [Obstacle::containment(rect(-10.0, -10.0, 150.0, 150.0))];
        assert!(AStarRouter::default().route(&mesh, &screen, v(0.0, 0.0), v(200.0, 200.0)).is_ok());
    }

    #[test]
    fn unreachable_goal_point_is_no_path() {
        let mesh = Triangulation::bowyer_watson(&lattice());
        let result = AStarRouter::default().route(&mesh, &[], v(0.0, 0.0), v(5_000.0, 0.0));
        assert!(matches!(result, Err(NavError::NoPath { .. })));
    }

    #[test]
    fn empty_mesh() {
        let mesh = Triangulation::bowyer_watson(&[v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)]);
        let result = AStarRouter::default().route(&mesh, &[], v(0.0, 0.0), v(2.0, 0.0));
        assert_eq!(result, Err(NavError::EmptyMesh));
    }
}
