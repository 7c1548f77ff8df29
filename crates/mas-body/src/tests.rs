//! Unit tests for bodies, influences, percepts, and frustums.

use mas_core::{ObjectId, Point2d, Shape2d, Vector2d};
use mas_object::MotionLimits;

use crate::{AgentBody, Frustum, Influence, InfluenceKind, MotionKind, Percept};

fn body_with_limits(limits: MotionLimits) -> AgentBody {
    AgentBody::new(ObjectId::random(), Shape2d::point(), limits, Frustum::circle(10.0))
}

fn default_body() -> AgentBody {
    body_with_limits(MotionLimits::new(5.0, 2.0, 3.0, 1.0))
}

#[cfg(test)]
mod influence_types {
    use super::*;

    #[test]
    fn acting_object_falls_back_to_emitter() {
        let emitter = ObjectId::random();
        let target = ObjectId::random();

        let mut untargeted = Influence::kill();
        untargeted.emitter = emitter;
        assert_eq!(untargeted.acting_object(), emitter);

        let targeted = Influence::kill().with_target(target);
        assert_eq!(targeted.acting_object(), target);
    }

    #[test]
    fn constructors_leave_emitter_unstamped() {
        assert!(Influence::kinematic(Vector2d::new(1.0, 0.0), 0.0).emitter.is_nil());
        assert!(Influence::custom("ping", vec![1, 2]).emitter.is_nil());
    }

    #[test]
    fn default_influence_is_a_stop_request() {
        let influence = Influence::default();
        match influence.kind {
            InfluenceKind::Motion { mode, linear, angular } => {
                assert_eq!(mode, MotionKind::Kinematic);
                assert_eq!(linear, Vector2d::ZERO);
                assert_eq!(angular, 0.0);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }
}

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn self_motion_is_consumed_locally() {
        let body = default_body();
        let queued = body.influence(Influence::kinematic(Vector2d::new(1.0, 0.0), 0.5));
        assert!(!queued);

        let motion = body.consume_motion_influence().unwrap();
        assert_eq!(motion.emitter, body.id());
        assert_eq!(motion.target, body.id());
        assert_eq!(motion.mode, MotionKind::Kinematic);
        assert!(body.consume_other_influences().is_empty());
    }

    #[test]
    fn self_targeted_motion_is_consumed_locally() {
        let body = default_body();
        let influence = Influence::steering(Vector2d::new(1.0, 0.0), 0.0).with_target(body.id());
        assert!(!body.influence(influence));
        assert!(body.consume_motion_influence().is_some());
    }

    #[test]
    fn foreign_targeted_motion_is_queued() {
        let body = default_body();
        let other = ObjectId::random();
        let influence = Influence::kinematic(Vector2d::new(1.0, 0.0), 0.0).with_target(other);
        assert!(body.influence(influence));

        assert!(body.consume_motion_influence().is_none());
        let others = body.consume_other_influences();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].target, Some(other));
    }

    #[test]
    fn kill_and_custom_are_queued() {
        let body = default_body();
        assert!(body.influence(Influence::kill()));
        assert!(body.influence(Influence::custom("pheromone", vec![7])));

        let others = body.consume_other_influences();
        assert_eq!(others.len(), 2);
        assert!(matches!(others[0].kind, InfluenceKind::Kill));
        assert!(matches!(others[1].kind, InfluenceKind::Custom { ref tag, .. } if tag == "pheromone"));
    }
}

#[cfg(test)]
mod clamping {
    use super::*;

    #[test]
    fn kinematic_intake_clamps_to_speed_limits() {
        let body = body_with_limits(MotionLimits::new(2.0, 1.0, 1.0, 1.0));
        body.influence_kinematic(Vector2d::new(6.0, 8.0), 5.0);

        let motion = body.consume_motion_influence().unwrap();
        assert!((motion.linear.length() - 2.0).abs() < 1e-12);
        assert_eq!(motion.angular, 1.0);
    }

    #[test]
    fn steering_intake_clamps_to_acceleration_limits() {
        let body = body_with_limits(MotionLimits::new(10.0, 1.5, 10.0, 0.25));
        body.influence_steering(Vector2d::new(-30.0, 0.0), -2.0);

        let motion = body.consume_motion_influence().unwrap();
        assert_eq!(motion.mode, MotionKind::Steering);
        assert!((motion.linear.length() - 1.5).abs() < 1e-12);
        assert!(motion.linear.x < 0.0);
        assert_eq!(motion.angular, -0.25);
    }

    #[test]
    fn within_limit_requests_pass_through() {
        let body = body_with_limits(MotionLimits::new(5.0, 2.0, 3.0, 1.0));
        body.influence_kinematic(Vector2d::new(1.0, 1.0), -2.5);

        let motion = body.consume_motion_influence().unwrap();
        assert_eq!(motion.linear, Vector2d::new(1.0, 1.0));
        assert_eq!(motion.angular, -2.5);
    }
}

#[cfg(test)]
mod consume {
    use super::*;

    #[test]
    fn motion_is_consumed_exactly_once() {
        let body = default_body();
        body.influence_kinematic(Vector2d::new(1.0, 0.0), 0.0);

        assert!(body.consume_motion_influence().is_some());
        assert!(body.consume_motion_influence().is_none());
    }

    #[test]
    fn later_motion_overwrites_earlier() {
        let body = default_body();
        body.influence_kinematic(Vector2d::new(1.0, 0.0), 0.0);
        body.influence_steering(Vector2d::new(0.0, 2.0), 0.5);

        let motion = body.consume_motion_influence().unwrap();
        assert_eq!(motion.mode, MotionKind::Steering);
        assert_eq!(motion.linear, Vector2d::new(0.0, 2.0));
    }

    #[test]
    fn others_drain_once_and_are_stamped() {
        let body = default_body();
        body.influence(Influence::custom("a", vec![]));
        body.influence(Influence::custom("b", vec![]));

        let others = body.consume_other_influences();
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|i| i.emitter == body.id()));
        assert!(body.consume_other_influences().is_empty());
    }
}

#[cfg(test)]
mod percepts {
    use super::*;

    #[test]
    fn snapshot_starts_empty_and_replaces_wholesale() {
        let body = default_body();
        assert!(body.perceived_objects().is_empty());

        let other = default_body();
        body.set_perceptions(vec![Percept::of_body(&other)]);
        let snapshot = body.perceived_objects();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, other.id());
        assert_eq!(snapshot[0].body, Some(other.id()));
    }

    #[test]
    fn held_snapshot_is_immune_to_later_writes() {
        let body = default_body();
        let other = default_body();
        body.set_perceptions(vec![Percept::of_body(&other)]);

        let held = body.perceived_objects();
        body.set_perceptions(Vec::new());

        assert_eq!(held.len(), 1);
        assert!(body.perceived_objects().is_empty());
    }

    #[test]
    fn percept_of_mobile_keeps_motion_state() {
        let mut source = default_body();
        source.mobile_mut().set_position(Point2d::new(50.0, 50.0));
        source
            .mobile_mut()
            .translate_within(Vector2d::new(2.0, 0.0), 1.0, 100.0, 100.0);

        let percept = Percept::of_body(&source);
        assert_eq!(percept.position, Point2d::new(52.0, 50.0));
        assert_eq!(percept.linear_motion, Vector2d::new(2.0, 0.0));
        assert!(percept.is_body());
    }
}

#[cfg(test)]
mod frustum {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn circle_is_omnidirectional() {
        let frustum = Frustum::circle(5.0);
        let origin = Point2d::new(10.0, 10.0);
        assert!(frustum.contains(origin, 0.0, Point2d::new(6.0, 10.0)));
        assert!(frustum.contains(origin, PI, Point2d::new(14.0, 10.0)));
        assert!(!frustum.contains(origin, 0.0, Point2d::new(16.0, 10.0)));
    }

    #[test]
    fn cone_respects_heading() {
        let frustum = Frustum::cone(10.0, 0.5);
        let origin = Point2d::ORIGIN;
        // Looking along +x: ahead is visible, behind is not.
        assert!(frustum.contains(origin, 0.0, Point2d::new(3.0, 0.5)));
        assert!(!frustum.contains(origin, 0.0, Point2d::new(-3.0, 0.0)));
        // Looking along +y.
        assert!(frustum.contains(origin, FRAC_PI_2, Point2d::new(0.0, 3.0)));
    }

    #[test]
    fn cone_sees_across_the_angle_wrap() {
        let frustum = Frustum::cone(10.0, 0.5);
        // Heading just below +π, target bearing just above -π: the signed
        // difference must wrap instead of reading as ~2π.
        let heading = PI - 0.1;
        let target = Point2d::new(-3.0, -0.3);
        assert!(frustum.contains(Point2d::ORIGIN, heading, target));
    }

    #[test]
    fn self_position_is_always_visible() {
        let frustum = Frustum::cone(10.0, 0.1);
        let origin = Point2d::new(4.0, 4.0);
        assert!(frustum.contains(origin, 2.0, origin));
    }
}

#[cfg(test)]
mod concurrent {
    use super::*;

    #[test]
    fn parallel_senders_never_lose_influences() {
        let body = default_body();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for i in 0..100 {
                        body.influence(Influence::custom("burst", vec![i as u8]));
                    }
                });
            }
        });
        assert_eq!(body.consume_other_influences().len(), 800);
    }

    #[test]
    fn parallel_motion_writers_leave_exactly_one_pending() {
        let body = default_body();
        let body = &body;
        std::thread::scope(|scope| {
            for t in 0..4 {
                scope.spawn(move || {
                    body.influence_kinematic(Vector2d::new(t as f64, 0.0), 0.0);
                });
            }
        });
        assert!(body.consume_motion_influence().is_some());
        assert!(body.consume_motion_influence().is_none());
    }
}
