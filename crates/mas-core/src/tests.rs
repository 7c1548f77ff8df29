//! Unit tests for mas-core primitives.

#[cfg(test)]
mod ids {
    use crate::ObjectId;

    #[test]
    fn random_ids_are_unique() {
        let a = ObjectId::random();
        let b = ObjectId::random();
        assert_ne!(a, b);
        assert!(!a.is_nil());
    }

    #[test]
    fn default_is_nil() {
        assert_eq!(ObjectId::default(), ObjectId::NIL);
        assert!(ObjectId::NIL.is_nil());
    }

    #[test]
    fn digest_is_stable() {
        let id = ObjectId::random();
        assert_eq!(id.as_u64(), id.as_u64());
        assert_eq!(ObjectId::NIL.as_u64(), 0);
    }
}

#[cfg(test)]
mod vector {
    use crate::{Point2d, Vector2d};

    #[test]
    fn length_and_dot() {
        let v = Vector2d::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-12);
        assert!((v.dot(Vector2d::new(1.0, 0.0)) - 3.0).abs() < 1e-12);
        assert!(v.dot(-v) < 0.0);
    }

    #[test]
    fn angle_roundtrip() {
        let angle = 1.25_f64;
        let v = Vector2d::from_angle(angle);
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.angle() - angle).abs() < 1e-12);
    }

    #[test]
    fn limit_length_caps_and_keeps_direction() {
        let v = Vector2d::new(6.0, 8.0); // length 10
        let capped = v.limit_length(5.0);
        assert!((capped.length() - 5.0).abs() < 1e-12);
        assert!((capped.x / capped.y - v.x / v.y).abs() < 1e-12);

        // Under the cap: unchanged.
        assert_eq!(v.limit_length(20.0), v);
    }

    #[test]
    fn zero_vector_is_inert() {
        assert_eq!(Vector2d::ZERO.with_length(5.0), Vector2d::ZERO);
        assert_eq!(Vector2d::ZERO.limit_length(5.0), Vector2d::ZERO);
        assert!(Vector2d::ZERO.is_zero());
    }

    #[test]
    fn point_vector_arithmetic() {
        let p = Point2d::new(1.0, 2.0);
        let q = p + Vector2d::new(3.0, -1.0);
        assert_eq!(q, Point2d::new(4.0, 1.0));
        assert_eq!(q - p, Vector2d::new(3.0, -1.0));
        assert!((p.distance(q) - 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn nan_detection() {
        assert!(Point2d::new(f64::NAN, 0.0).has_nan());
        assert!(Vector2d::new(0.0, f64::NAN).has_nan());
        assert!(!Point2d::new(1.0, 2.0).has_nan());
    }
}

#[cfg(test)]
mod shape {
    use crate::{Point2d, Shape2d};

    #[test]
    fn circle_bounds_at_position() {
        let shape = Shape2d::circle(2.0);
        let bounds = shape.bounds_at(Point2d::new(10.0, 5.0));
        assert_eq!(bounds.min, Point2d::new(8.0, 3.0));
        assert_eq!(bounds.max, Point2d::new(12.0, 7.0));
        assert_eq!(bounds.center(), Point2d::new(10.0, 5.0));
    }

    #[test]
    fn rectangle_bounds() {
        let shape = Shape2d::rectangle(4.0, 2.0);
        let bounds = shape.bounds();
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 2.0);
    }

    #[test]
    fn point_has_zero_extent() {
        let bounds = Shape2d::point().bounds_at(Point2d::new(3.0, 3.0));
        assert_eq!(bounds.min, bounds.max);
        assert_eq!(Shape2d::point().outer_radius(), 0.0);
    }

    #[test]
    fn rectangle_outer_radius_is_half_diagonal() {
        let shape = Shape2d::rectangle(6.0, 8.0);
        assert!((shape.outer_radius() - 5.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod time {
    use crate::{StepClock, TimeUnit};

    #[test]
    fn unit_conversions() {
        assert_eq!(TimeUnit::Hours.from_secs(7_200.0), 2.0);
        assert_eq!(TimeUnit::Days.from_secs(86_400.0), 1.0);
        assert_eq!(TimeUnit::Milliseconds.from_secs(1.5), 1_500.0);
        assert_eq!(TimeUnit::Minutes.to_secs(2.0), 120.0);
        assert_eq!(TimeUnit::Nanoseconds.from_secs(1.0), 1e9);
    }

    #[test]
    fn increment_adds_fixed_step() {
        let clock = StepClock::new(500.0); // 500 ms per tick
        assert_eq!(clock.current_time(), 0.0);
        clock.increment();
        clock.increment();
        assert!((clock.current_time() - 1.0).abs() < 1e-12);
        assert!((clock.last_step_duration() - 0.5).abs() < 1e-12);
        assert!((clock.current_time_in(TimeUnit::Milliseconds) - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_pair_is_coherent() {
        let clock = StepClock::new(1_000.0);
        clock.increment();
        let snap = clock.snapshot();
        assert_eq!(snap.time, 1.0);
        assert_eq!(snap.step, 1.0);
    }

    #[test]
    fn delay_clamps_to_zero() {
        let clock = StepClock::new(100.0);
        assert_eq!(clock.simulation_delay(), crate::time::DEFAULT_SIMULATION_DELAY_MS);
        clock.set_simulation_delay(-5.0);
        assert_eq!(clock.simulation_delay(), 0.0);
        clock.set_simulation_delay(25.0);
        assert_eq!(clock.simulation_delay(), 25.0);
    }

    #[test]
    fn per_second_scales_by_step() {
        let clock = StepClock::new(500.0);
        assert_eq!(clock.per_second(4.0), 2.0);
    }

    #[test]
    fn concurrent_readers_see_monotonic_time() {
        let clock = StepClock::new(10.0);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut last = 0.0;
                    for _ in 0..1_000 {
                        let snap = clock.snapshot();
                        assert!(snap.time >= last, "time went backwards");
                        assert_eq!(snap.step, 0.01);
                        last = snap.time;
                    }
                });
            }
            for _ in 0..1_000 {
                clock.increment();
            }
        });
        assert!((clock.current_time() - 10.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod rng {
    use crate::{BodyRng, ObjectId, WorldRng};

    #[test]
    fn same_seed_same_stream() {
        let id = ObjectId::random();
        let mut a = BodyRng::new(7, id);
        let mut b = BodyRng::new(7, id);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn different_bodies_diverge() {
        let mut a = BodyRng::new(7, ObjectId::random());
        let mut b = BodyRng::new(7, ObjectId::random());
        let same = (0..16).filter(|_| a.random::<u64>() == b.random::<u64>()).count();
        assert!(same < 16);
    }

    #[test]
    fn world_rng_children_are_independent() {
        let mut root = WorldRng::new(99);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        assert_ne!(c1.gen_range(0..u64::MAX), c2.gen_range(0..u64::MAX));
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = BodyRng::new(1, ObjectId::random());
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        // Out-of-range probabilities clamp instead of panicking.
        assert!(rng.gen_bool(2.0));
    }
}
