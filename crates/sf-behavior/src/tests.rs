//! Unit tests for sf-behavior.

#[cfg(test)]
mod helpers {
    use sf_agent::{Body, BodyParams};
    use sf_core::{AgentId, Rect, Vec2};
    use sf_nav::{Goal, NavError, NavResult, Path, Router, Triangulation};
    use sf_spatial::Obstacle;

    use crate::BehaviorContext;

    pub const DT: f64 = 0.05;

    pub fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(v(x0, y0), v(x1, y1)).unwrap()
    }

    pub fn body(id: u32, x: f64, y: f64) -> Body {
        Body::new(AgentId(id), v(x, y), &BodyParams::default())
    }

    pub fn lattice_mesh() -> Triangulation {
        Triangulation::bowyer_watson(&[
            v(0.0, 0.0),
            v(100.0, 10.0),
            v(200.0, 0.0),
            v(0.0, 100.0),
            v(110.0, 110.0),
            v(200.0, 100.0),
            v(10.0, 200.0),
            v(100.0, 190.0),
            v(200.0, 200.0),
        ])
    }

    /// Router that never finds anything.
    pub struct Nowhere;

    impl Router for Nowhere {
        fn route(
            &self,
            _mesh: &Triangulation,
            _obstacles: &[Obstacle],
            from: Vec2,
            to: Vec2,
        ) -> NavResult<Path> {
            Err(NavError::NoPath { from, to })
        }
    }

    /// Router that walks straight to the destination as a single goal.
    pub struct Direct;

    impl Router for Direct {
        fn route(
            &self,
            _mesh: &Triangulation,
            _obstacles: &[Obstacle],
            _from: Vec2,
            to: Vec2,
        ) -> NavResult<Path> {
            Ok([Goal::new(to, 25.0, 0.0)].into_iter().collect())
        }
    }

    pub fn ctx<'a>(
        bodies: &'a [Body],
        obstacles: &'a [Obstacle],
        mesh: &'a Triangulation,
        router: &'a dyn Router,
    ) -> BehaviorContext<'a> {
        BehaviorContext::new(0.0, DT, bodies, obstacles, mesh, router)
    }
}

// ── GoalBehavior ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod goal {
    use sf_nav::Goal;

    use super::helpers::{DT, body, v};
    use crate::GoalBehavior;

    #[test]
    fn arrival_latch() {
        let mut me = body(0, 0.0, 0.0);
        let mut b = GoalBehavior::new(Goal::new(v(100.0, 0.0), 5.0, 0.0));

        assert_eq!(b.steer(&me, DT), v(100.0, 0.0));

        me.position = v(96.0, 0.0);
        assert_eq!(b.steer(&me, DT), me.position);
        assert!(b.is_close_enough());

        // Drifted to 7: still inside 5 × 1.5.
        me.position = v(93.0, 0.0);
        assert_eq!(b.steer(&me, DT), me.position);

        // Pushed past 7.5: walks back.
        me.position = v(92.0, 0.0);
        assert_eq!(b.steer(&me, DT), v(100.0, 0.0));
        assert!(!b.is_close_enough());
    }

    #[test]
    fn no_goal_holds() {
        let me = body(0, 4.0, 2.0);
        let mut b = GoalBehavior::default();
        assert_eq!(b.steer(&me, DT), me.position);
        assert!(!b.has_loitered());
        assert!(b.is_done());
    }

    #[test]
    fn loiter_accumulates_while_held() {
        let me = body(0, 0.0, 0.0);
        let mut b = GoalBehavior::new(Goal::new(v(1.0, 0.0), 5.0, 1.0));
        b.steer(&me, 0.5);
        b.steer(&me, 0.5);
        assert!(!b.has_loitered());
        b.steer(&me, 0.5);
        assert!(b.has_loitered());
    }

    #[test]
    fn set_goal_resets_latch() {
        let me = body(0, 0.0, 0.0);
        let mut b = GoalBehavior::new(Goal::new(v(1.0, 0.0), 5.0, 0.0));
        b.steer(&me, DT);
        assert!(b.has_loitered());

        b.set_goal(Goal::new(v(50.0, 0.0), 5.0, 0.0));
        assert!(!b.is_close_enough());
        assert_eq!(b.loitered(), 0.0);
        assert_eq!(b.steer(&me, DT), v(50.0, 0.0));
    }

    #[test]
    fn move_goal_keeps_latch() {
        let me = body(0, 0.0, 0.0);
        let mut b = GoalBehavior::new(Goal::new(v(2.0, 0.0), 5.0, 0.0));
        b.steer(&me, DT);
        b.move_goal(Goal::new(v(6.0, 0.0), 5.0, 0.0));
        assert!(b.is_close_enough());
        assert_eq!(b.steer(&me, DT), me.position);
    }
}

// ── FollowerBehavior ──────────────────────────────────────────────────────────

#[cfg(test)]
mod follower {
    use sf_core::AgentId;
    use sf_nav::AStarRouter;
    use sf_spatial::Obstacle;

    use super::helpers::{body, ctx, lattice_mesh, rect, v};
    use crate::FollowerBehavior;

    #[test]
    fn heads_for_visible_leader() {
        let bodies = [body(0, 0.0, 0.0), body(1, 100.0, 0.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);

        let mut f = FollowerBehavior::new(AgentId(1));
        assert_eq!(f.steer(&bodies[0], &c), v(100.0, 0.0));
        assert_eq!(f.last_seen(), Some(v(100.0, 0.0)));
    }

    #[test]
    fn stops_short_of_leader() {
        // Radii 10 + 10: keep-away range 30.
        let bodies = [body(0, 0.0, 0.0), body(1, 25.0, 0.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);

        let mut f = FollowerBehavior::new(AgentId(1));
        assert_eq!(f.steer(&bodies[0], &c), bodies[0].position);
    }

    #[test]
    fn remembers_last_sighting_behind_wall() {
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let mut f = FollowerBehavior::new(AgentId(1));

        let open = [body(0, 0.0, 0.0), body(1, 100.0, 0.0)];
        f.steer(&open[0], &ctx(&open, &[], &mesh, &router));

        let wall = [Obstacle::solid(rect(40.0, -50.0, 60.0, 200.0))];
        let hidden = [body(0, 0.0, 0.0), body(1, 100.0, 150.0)];
        let target = f.steer(&hidden[0], &ctx(&hidden, &wall, &mesh, &router));
        assert_eq!(target, v(100.0, 0.0));
        assert_eq!(f.last_seen(), Some(v(100.0, 0.0)));
    }

    #[test]
    fn containment_does_not_block_sight() {
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let screen = [Obstacle::containment(rect(-10.0, -10.0, 50.0, 50.0))];
        let bodies = [body(0, 0.0, 0.0), body(1, 100.0, 0.0)];
        let mut f = FollowerBehavior::new(AgentId(1));
        assert_eq!(f.steer(&bodies[0], &ctx(&bodies, &screen, &mesh, &router)), v(100.0, 0.0));
    }
}

// ── WanderBehavior ────────────────────────────────────────────────────────────

#[cfg(test)]
mod wander {
    use sf_core::{AgentId, AgentRng};
    use sf_nav::{AStarRouter, Goal};
    use sf_spatial::Obstacle;

    use super::helpers::{body, ctx, lattice_mesh, rect, v};
    use crate::WanderBehavior;

    #[test]
    fn empty_candidates_rejected() {
        assert!(WanderBehavior::new(Vec::new()).is_err());
    }

    #[test]
    fn no_reachable_candidate_holds() {
        // Every candidate sits inside a containment region the agent is outside of.
        let candidates = vec![
            Goal::new(v(10.0, 10.0), 5.0, 0.0),
            Goal::new(v(20.0, 20.0), 5.0, 0.0),
            Goal::new(v(30.0, 10.0), 5.0, 0.0),
        ];
        let fence = [Obstacle::containment(rect(0.0, 0.0, 40.0, 40.0))];
        let bodies = [body(0, 200.0, 200.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &fence, &mesh, &router);
        let mut rng = AgentRng::new(0, AgentId(0));

        let mut w = WanderBehavior::new(candidates).unwrap();
        for _ in 0..5 {
            assert_eq!(w.steer(&bodies[0], &c, &mut rng), bodies[0].position);
        }
        assert!(w.current().is_none());
    }

    #[test]
    fn picks_only_reachable_candidates() {
        let behind = Goal::new(v(300.0, 0.0), 5.0, 0.0);
        let open = Goal::new(v(0.0, 300.0), 5.0, 0.0);
        let pillar = [Obstacle::solid(rect(100.0, -50.0, 200.0, 50.0))];
        let bodies = [body(0, 0.0, 0.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &pillar, &mesh, &router);

        for seed in 0..20 {
            let mut rng = AgentRng::new(seed, AgentId(0));
            let mut w = WanderBehavior::new(vec![behind, open]).unwrap();
            assert_eq!(w.steer(&bodies[0], &c, &mut rng), open.target);
        }
    }

    #[test]
    fn moves_on_after_loitering() {
        let here = Goal::new(v(0.0, 0.0), 5.0, 0.0);
        let there = Goal::new(v(50.0, 0.0), 5.0, 0.0);
        let bodies = [body(0, 0.0, 0.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);
        let mut rng = AgentRng::new(9, AgentId(0));

        let mut w = WanderBehavior::new(vec![here, there]).unwrap();
        let mut seen_there = false;
        for _ in 0..50 {
            if w.steer(&bodies[0], &c, &mut rng) == there.target {
                seen_there = true;
                break;
            }
        }
        assert!(seen_there);
    }
}

// ── PathBehavior ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use sf_nav::{Goal, Path};

    use super::helpers::{DT, body, v};
    use crate::PathBehavior;

    fn two_stop_path() -> Path {
        [Goal::new(v(10.0, 0.0), 5.0, 0.0), Goal::new(v(100.0, 0.0), 10.0, 1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn follows_goals_in_order() {
        let mut me = body(0, 0.0, 0.0);
        let mut p = PathBehavior::new(two_stop_path());
        assert_eq!(p.steer(&me, DT), v(10.0, 0.0));

        me.position = v(9.0, 0.0);
        assert_eq!(p.steer(&me, DT), me.position);
        // Zero loiter: the next tick moves on.
        assert_eq!(p.steer(&me, DT), v(100.0, 0.0));
        assert!(p.remaining().is_empty());
        assert!(!p.is_finished());
    }

    #[test]
    fn finishes_after_final_loiter() {
        let mut me = body(0, 100.0, 0.0);
        let mut p = PathBehavior::new(Path::from_iter([Goal::new(v(100.0, 0.0), 10.0, 1.0)]));
        // Quarter-second steps keep the loiter sum exact: 4 × 0.25 = 1.0.
        for _ in 0..4 {
            assert_eq!(p.steer(&me, 0.25), me.position);
        }
        assert!(!p.is_finished());
        p.steer(&me, 0.25);
        assert!(p.is_finished());

        // Path used up: holds at the last goal...
        assert_eq!(p.steer(&me, DT), me.position);
        // ...and walks back when shoved away from it.
        me.position = v(70.0, 0.0);
        assert_eq!(p.steer(&me, DT), v(100.0, 0.0));
    }

    #[test]
    fn empty_path_holds() {
        let me = body(0, 3.0, 3.0);
        let mut p = PathBehavior::new(Path::new());
        assert!(p.is_finished());
        assert_eq!(p.steer(&me, DT), me.position);
    }
}

// ── PathfinderBehavior ────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinder {
    use sf_core::{AgentId, AgentRng};
    use sf_nav::{AStarRouter, Triangulation};

    use super::helpers::{DT, Direct, Nowhere, body, ctx, lattice_mesh, v};
    use crate::PathfinderBehavior;

    #[test]
    fn first_step_plans_to_mesh_vertex() {
        let bodies = [body(0, 5.0, 5.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);
        let mut rng = AgentRng::new(1, AgentId(0));

        let mut p = PathfinderBehavior::new();
        let s = p.steer(&bodies[0], &c, &mut rng);
        assert!(s.reset_stall);

        let dest = p.destination().unwrap();
        assert!(mesh.points().contains(&dest));
        let route = p.route().unwrap();
        let last = route.remaining().last().or(route.current().goal()).unwrap();
        assert_eq!(last.range, 100.0);
        assert!((10.0..60.0).contains(&last.loiter));

        // No replan while the route is being walked.
        let s = p.steer(&bodies[0], &c, &mut rng);
        assert!(!s.reset_stall);
        assert_eq!(p.destination(), Some(dest));
    }

    #[test]
    fn no_path_holds_until_timeout() {
        let bodies = [body(0, 5.0, 5.0)];
        let mesh = lattice_mesh();
        let c = ctx(&bodies, &[], &mesh, &Nowhere);
        let mut rng = AgentRng::new(1, AgentId(0));

        let mut p = PathfinderBehavior::new();
        let s = p.steer(&bodies[0], &c, &mut rng);
        assert!(s.reset_stall);
        assert!(s.is_hold(&bodies[0]));
        assert!(p.route().is_none());
        assert!(p.destination().is_some());

        // 60 s at 0.05 s per tick: 1200 held ticks without a replan.
        for _ in 0..1_200 {
            let s = p.steer(&bodies[0], &c, &mut rng);
            assert!(!s.reset_stall);
            assert!(s.is_hold(&bodies[0]));
        }
        assert!(p.waited() >= 60.0 - DT);
        let mut replanned = false;
        for _ in 0..2 {
            replanned |= p.steer(&bodies[0], &c, &mut rng).reset_stall;
        }
        assert!(replanned);
    }

    #[test]
    fn long_trip_still_loiters_in_full() {
        let mesh = lattice_mesh();
        let mut rng = AgentRng::new(0, AgentId(0));
        let mut p = PathfinderBehavior::new();

        // 45 s stuck far from every mesh vertex, short of the 60 s timeout.
        let far = [body(0, 1_000.0, 1_000.0)];
        let c = ctx(&far, &[], &mesh, &Direct);
        assert!(p.steer(&far[0], &c, &mut rng).reset_stall);
        let dest = p.destination().unwrap();
        let loiter = p.route().unwrap().current().goal().unwrap().loiter;
        assert!((10.0..60.0).contains(&loiter));
        for _ in 0..900 {
            assert!(!p.steer(&far[0], &c, &mut rng).reset_stall);
        }

        // Arrive and count the held time until the next replan.
        let there = [body(0, dest.x, dest.y)];
        let c = ctx(&there, &[], &mesh, &Direct);
        let mut held = 0u32;
        while !p.steer(&there[0], &c, &mut rng).reset_stall {
            held += 1;
            assert!(held < 2_000, "never replanned after arriving");
        }
        let stayed = held as f64 * DT;
        assert!(stayed + 1e-9 >= loiter, "left after {stayed} s of {loiter} s");
    }

    #[test]
    fn empty_mesh_holds() {
        let bodies = [body(0, 5.0, 5.0)];
        let mesh = Triangulation::bowyer_watson(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)]);
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);
        let mut rng = AgentRng::new(1, AgentId(0));

        let mut p = PathfinderBehavior::new();
        assert!(p.steer(&bodies[0], &c, &mut rng).is_hold(&bodies[0]));
        assert!(p.destination().is_none());
    }

    #[test]
    fn same_seed_same_destination() {
        let bodies = [body(0, 5.0, 5.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);

        let pick = |seed| {
            let mut rng = AgentRng::new(seed, AgentId(0));
            let mut p = PathfinderBehavior::new();
            p.steer(&bodies[0], &c, &mut rng);
            p.destination()
        };
        assert_eq!(pick(4), pick(4));
    }
}

// ── Behavior enum ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod behavior {
    use sf_core::{AgentId, AgentRng};
    use sf_nav::{AStarRouter, Goal};

    use super::helpers::{body, ctx, lattice_mesh, v};
    use crate::{Behavior, BehaviorError, FollowerBehavior, GoalBehavior};

    #[test]
    fn idle_holds() {
        let bodies = [body(0, 1.0, 2.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);
        let mut rng = AgentRng::new(0, AgentId(0));
        let s = Behavior::default().steer(&bodies[0], &c, &mut rng);
        assert!(s.is_hold(&bodies[0]));
        assert!(!s.reset_stall);
    }

    #[test]
    fn goal_variant_dispatches() {
        let bodies = [body(0, 0.0, 0.0)];
        let mesh = lattice_mesh();
        let router = AStarRouter::default();
        let c = ctx(&bodies, &[], &mesh, &router);
        let mut rng = AgentRng::new(0, AgentId(0));
        let mut b = Behavior::Goal(GoalBehavior::new(Goal::new(v(40.0, 0.0), 5.0, 0.0)));
        assert_eq!(b.kind(), "goal");
        assert_eq!(b.steer(&bodies[0], &c, &mut rng).target, v(40.0, 0.0));
    }

    #[test]
    fn follower_validation() {
        let me = AgentId(2);
        let own = Behavior::Follow(FollowerBehavior::new(me));
        assert!(matches!(own.validate(me, 5), Err(BehaviorError::Config(_))));

        let ghost = Behavior::Follow(FollowerBehavior::new(AgentId(9)));
        assert!(matches!(
            ghost.validate(me, 5),
            Err(BehaviorError::UnknownTarget { target: AgentId(9), .. })
        ));

        let ok = Behavior::Follow(FollowerBehavior::new(AgentId(0)));
        assert!(ok.validate(me, 5).is_ok());
    }
}
