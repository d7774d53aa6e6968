//! Unit tests for sf-agent.

#[cfg(test)]
mod params {
    use crate::BodyParams;

    #[test]
    fn defaults_are_valid() {
        let p = BodyParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.radius, 10.0);
        assert_eq!(p.mass, 60.0);
    }

    #[test]
    fn non_positive_radius_or_mass_rejected() {
        let bad_radius = BodyParams { radius: 0.0, ..BodyParams::default() };
        assert!(bad_radius.validate().is_err());
        let bad_mass = BodyParams { mass: -60.0, ..BodyParams::default() };
        assert!(bad_mass.validate().is_err());
        let nan_speed = BodyParams { desired_speed: f64::NAN, ..BodyParams::default() };
        assert!(nan_speed.validate().is_err());
    }
}

#[cfg(test)]
mod store {
    use sf_core::{AgentId, SfError, Vec2};

    use crate::{AgentStoreBuilder, BodyParams};

    #[test]
    fn ids_match_indices() {
        let mut b = AgentStoreBuilder::new(1);
        for i in 0..5 {
            let id = b.add(Vec2::new(i as f64 * 30.0, 0.0), BodyParams::default()).unwrap();
            assert_eq!(id, AgentId(i));
        }
        let (store, rngs) = b.build();
        assert_eq!(store.count, 5);
        assert_eq!(rngs.len(), 5);
        for id in store.agent_ids() {
            assert_eq!(store.bodies[id.index()].id, id);
        }
    }

    #[test]
    fn new_bodies_are_at_rest() {
        let mut b = AgentStoreBuilder::new(1);
        b.add(Vec2::new(3.0, 4.0), BodyParams::default()).unwrap();
        let (store, _) = b.build();
        let body = store.body(AgentId(0)).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.time_since_goal, 0.0);
        assert_eq!(store.position(AgentId(0)), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn missing_agent_is_error() {
        let (store, _) = AgentStoreBuilder::new(1).build();
        assert!(store.is_empty());
        assert!(matches!(store.body(AgentId(3)), Err(SfError::AgentNotFound(AgentId(3)))));
    }

    #[test]
    fn invalid_params_rejected_at_add() {
        let mut b = AgentStoreBuilder::new(1);
        let params = BodyParams { radius: -1.0, ..BodyParams::default() };
        assert!(b.add(Vec2::ZERO, params).is_err());
        assert!(b.add(Vec2::new(f64::INFINITY, 0.0), BodyParams::default()).is_err());
        assert!(b.is_empty());
    }
}

#[cfg(test)]
mod scatter {
    use sf_core::{AgentId, Rect, SimRng, Vec2};

    use crate::{AgentStoreBuilder, BodyParams};

    fn spawn_area() -> Rect {
        Rect::new(Vec2::new(-800.0, -150.0), Vec2::new(-400.0, 150.0)).unwrap()
    }

    #[test]
    fn scattered_agents_do_not_overlap() {
        let mut b = AgentStoreBuilder::new(3);
        let mut rng = SimRng::new(11);
        let ids = b.scatter(32, &spawn_area(), BodyParams::default(), &mut rng).unwrap();
        assert_eq!(ids, AgentId(0)..AgentId(32));

        let (store, _) = b.build();
        for (i, a) in store.bodies.iter().enumerate() {
            assert!(spawn_area().contains(a.position));
            for other in &store.bodies[..i] {
                assert!(a.position.distance(other.position) >= a.radius + other.radius * 1.1);
            }
        }
    }

    #[test]
    fn groups_get_contiguous_ranges() {
        let mut b = AgentStoreBuilder::new(3);
        let mut rng = SimRng::new(11);
        let left = b.scatter(4, &spawn_area(), BodyParams::default(), &mut rng).unwrap();
        let right_area = Rect::new(Vec2::new(400.0, -150.0), Vec2::new(800.0, 150.0)).unwrap();
        let right = b.scatter(4, &right_area, BodyParams::default(), &mut rng).unwrap();
        assert_eq!(left, AgentId(0)..AgentId(4));
        assert_eq!(right, AgentId(4)..AgentId(8));
    }

    #[test]
    fn same_seed_same_layout() {
        let layout = |seed| {
            let mut b = AgentStoreBuilder::new(0);
            let mut rng = SimRng::new(seed);
            b.scatter(10, &spawn_area(), BodyParams::default(), &mut rng).unwrap();
            let (store, _) = b.build();
            store.bodies.iter().map(|b| b.position).collect::<Vec<_>>()
        };
        assert_eq!(layout(5), layout(5));
        assert_ne!(layout(5), layout(6));
    }

    #[test]
    fn crowded_area_fails_instead_of_spinning() {
        let tiny = Rect::new(Vec2::ZERO, Vec2::new(15.0, 15.0)).unwrap();
        let mut b = AgentStoreBuilder::new(0).max_attempts(50);
        let mut rng = SimRng::new(1);
        assert!(b.scatter(10, &tiny, BodyParams::default(), &mut rng).is_err());
    }

    #[test]
    fn failed_scatter_leaves_no_partial_group() {
        let tiny = Rect::new(Vec2::ZERO, Vec2::new(15.0, 15.0)).unwrap();
        let mut b = AgentStoreBuilder::new(0).max_attempts(50);
        let mut rng = SimRng::new(1);
        b.scatter(3, &spawn_area(), BodyParams::default(), &mut rng).unwrap();
        assert!(b.scatter(10, &tiny, BodyParams::default(), &mut rng).is_err());
        assert_eq!(b.len(), 3);

        // Ids stay contiguous for the next group.
        let next = b.scatter(2, &spawn_area(), BodyParams::default(), &mut rng).unwrap();
        assert_eq!(next, AgentId(3)..AgentId(5));
    }
}
