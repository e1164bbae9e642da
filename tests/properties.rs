//! Property tests for the entity engine and the cross-lane revive rule

use glam::Vec2;
use lane_runner::sim::{Channel, Entity, GameState, Interpolation, Jump, ObstacleKind, ParticleSystem};
use lane_runner::{AssetHandles, SimRng};
use proptest::prelude::*;
use rand::SeedableRng;

proptest! {
    #[test]
    fn interpolation_lands_exactly_on_target(
        start in -1000.0f32..1000.0,
        target in -1000.0f32..1000.0,
        duration in 0.05f32..5.0,
        dts in prop::collection::vec(0.001f32..0.5, 1..200),
    ) {
        let mut rng = SimRng::seed_from_u64(0);
        let mut e = Entity::new();
        e.add_behaviour(Interpolation::new(Channel::PositionX, start, target, duration));

        let mut elapsed = 0.0f32;
        let mut finishes = 0;
        for dt in dts {
            elapsed += dt;
            finishes += e.update(dt, &mut rng).finished.len();
            if elapsed >= duration {
                prop_assert_eq!(e.position.x, target);
            }
        }
        prop_assert!(finishes <= 1);
        if elapsed >= duration {
            prop_assert_eq!(finishes, 1);
        }
    }

    #[test]
    fn jump_is_ignored_while_airborne(
        power in 100.0f32..1000.0,
        gravity in 100.0f32..2000.0,
        steps in prop::collection::vec(0.001f32..0.05, 1..100),
    ) {
        let mut rng = SimRng::seed_from_u64(0);
        let mut e = Entity::at(Vec2::new(0.0, 100.0));
        let slot = e.add_behaviour(Jump::new(Vec2::new(0.0, 100.0), power, gravity));

        let jump = e.behaviour_mut(slot).and_then(|b| b.as_jump_mut()).unwrap();
        prop_assert!(jump.jump());

        for dt in steps {
            e.update(dt, &mut rng);
            let jump = e.behaviour_mut(slot).and_then(|b| b.as_jump_mut()).unwrap();
            if !jump.is_jumping() {
                break;
            }
            let velocity = jump.velocity();
            prop_assert!(!jump.jump());
            prop_assert_eq!(jump.velocity(), velocity);
        }
    }

    #[test]
    fn collision_is_symmetric(
        ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.0f32..100.0,
        bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.0f32..100.0,
    ) {
        let a = Entity::at(Vec2::new(ax, ay)).with_radius(ar);
        let b = Entity::at(Vec2::new(bx, by)).with_radius(br);
        prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        prop_assert!(a.collides_with(&a));
    }

    #[test]
    fn particle_lives_exactly_its_lifespan(quarters in 0u32..40, ticks in 0u32..60) {
        let lifespan = quarters as f32 * 0.25;
        let mut rng = SimRng::seed_from_u64(0);
        let mut system = ParticleSystem::new();
        system.add_particle(Entity::new(), lifespan);

        for _ in 0..ticks {
            system.update(0.25, &mut rng);
        }
        let age = ticks as f32 * 0.25;
        prop_assert_eq!(system.len() == 1, age < lifespan || ticks == 0);
    }

    #[test]
    fn third_pickup_anywhere_else_revives(sources in prop::collection::vec(1usize..3, 3..8)) {
        let mut state = GameState::new(Default::default(), AssetHandles::default(), 7);
        state.lanes_mut()[0].game_over = true;

        for (i, &source) in sources.iter().enumerate() {
            let lane = &mut state.lanes_mut()[source];
            let at = lane.character.position;
            lane.push_obstacle(ObstacleKind::Collectible, Entity::at(at).with_radius(5.0));
            state.update(0.01);

            let picked = i as u32 + 1;
            if picked < 3 {
                prop_assert!(state.lanes()[0].game_over);
                prop_assert_eq!(state.lanes()[0].stars_after_game_over, picked);
            } else {
                prop_assert!(!state.lanes()[0].game_over);
            }
        }
    }
}
