//! Property tests for the physics, collision and scoring invariants

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use hoop_shot::consts::*;
use hoop_shot::persistence::ScoreStore;
use hoop_shot::sim::{
    Field, GameEvent, GameState, HoopDetector, HoopGeometry, Projectile, TickInput, plan_launch,
    solve_launch_velocity, tick,
};
use hoop_shot::{BestScore, Difficulty, DifficultyProfile, Settings};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Store whose contents the test can still see after handing it over
struct SharedStore(Rc<Cell<Option<u32>>>);

impl ScoreStore for SharedStore {
    fn load(&self) -> hoop_shot::Result<Option<u32>> {
        Ok(self.0.get())
    }

    fn store(&mut self, value: u32) -> hoop_shot::Result<()> {
        self.0.set(Some(value));
        Ok(())
    }
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard)
    ]
}

proptest! {
    #[test]
    fn launch_lands_on_target(
        x0 in 200.0f32..600.0,
        y0 in 400.0f32..500.0,
        dx in -150.0f32..150.0,
        dy in -250.0f32..50.0,
    ) {
        // Field large enough that nothing but gravity acts on the ball
        let field = Field::new(100_000.0, 100_000.0);
        let start = Vec2::new(x0, y0);
        let target = start + Vec2::new(dx, dy);

        let mut ball = Projectile::new(start, BALL_RADIUS, 0.7);
        ball.launch(solve_launch_velocity(start, target, FLIGHT_TICKS));
        for _ in 0..FLIGHT_TICKS as usize {
            ball.step(1.0, &field);
        }

        prop_assert!(ball.pos.distance(target) < 0.05, "ended at {:?}, wanted {:?}", ball.pos, target);
    }

    #[test]
    fn launch_speed_never_exceeds_max_force(
        drag_x in -2000.0f32..2000.0,
        drag_y in -2000.0f32..2000.0,
        level in difficulty(),
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let profile = level.profile();
        let ball = Vec2::new(REST_X, REST_Y);

        if let Some(v) = plan_launch(ball, Vec2::new(drag_x, drag_y), &profile, &mut rng) {
            prop_assert!(v.length() <= profile.max_force + 1e-3);
        }
    }

    #[test]
    fn clamped_launch_keeps_direction(
        drag_x in -1000.0f32..1000.0,
        drag_y in -1000.0f32..-100.0,
        max_force in 5.0f32..40.0,
    ) {
        let mut rng = Pcg32::seed_from_u64(0);
        let profile = DifficultyProfile { max_force, launch_error: 0.0, ..DifficultyProfile::default() };
        let ball = Vec2::new(REST_X, REST_Y);
        let drag = Vec2::new(drag_x, drag_y);

        let target = hoop_shot::sim::aim_target(ball, drag, profile.aim_factor);
        let raw = solve_launch_velocity(ball, target, FLIGHT_TICKS);
        let launched = plan_launch(ball, drag, &profile, &mut rng);

        if raw.length() > max_force {
            let v = launched.unwrap();
            prop_assert!((v.length() - max_force).abs() < 1e-3);
            prop_assert!(v.normalize().dot(raw.normalize()) > 1.0 - 1e-5);
        }
    }

    #[test]
    fn dropped_ball_settles_on_floor(
        x in 100.0f32..700.0,
        y in 50.0f32..500.0,
        vx in -0.9f32..0.9,
        restitution in 0.3f32..0.95,
    ) {
        let field = Field::default();
        let mut ball = Projectile::new(Vec2::new(x, y), BALL_RADIUS, restitution);
        ball.launch(Vec2::new(vx, 0.0));

        let mut ticks = 0;
        while ball.in_motion && ticks < 5000 {
            ball.step(1.0, &field);
            ticks += 1;
        }

        prop_assert!(!ball.in_motion, "still bouncing after {} ticks", ticks);
        prop_assert_eq!(ball.pos.y, field.ground_y - BALL_RADIUS);
        prop_assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn fast_ball_cannot_tunnel_into_throat(
        speed in 1.0f32..50.0,
        vy in -3.0f32..3.0,
        from_left in any::<bool>(),
    ) {
        let hoop = HoopDetector::new(HoopGeometry::default(), Field::default(), 0.7);
        let g = hoop.geometry;
        let r = g.ball_radius;

        let (x, vx) = if from_left {
            (g.rim_left - r - 3.0, speed)
        } else {
            (g.rim_right + r + 3.0, -speed)
        };
        let mut ball = Projectile::new(Vec2::new(x, g.rim_y), r, 0.7);
        ball.launch(Vec2::new(vx, vy));
        ball.step(1.0, &hoop.field);
        hoop.resolve_collision(&mut ball);

        if from_left {
            prop_assert!(ball.pos.x <= g.rim_left + SUPPORT_INSET * r);
        } else {
            prop_assert!(ball.pos.x >= g.rim_right - SUPPORT_INSET * r);
        }
    }

    #[test]
    fn diagonal_ball_cannot_tunnel_past_support(
        speed in 1.0f32..50.0,
        vy in -20.0f32..25.0,
        start_dy in -40.0f32..40.0,
        from_left in any::<bool>(),
    ) {
        let hoop = HoopDetector::new(HoopGeometry::default(), Field::default(), 0.7);
        let g = hoop.geometry;
        let r = g.ball_radius;

        let (x, vx, support) = if from_left {
            (g.rim_left - r - 3.0, speed, g.rim_left)
        } else {
            (g.rim_right + r + 3.0, -speed, g.rim_right)
        };
        let mut ball = Projectile::new(Vec2::new(x, g.rim_y + start_dy), r, 0.7);
        ball.launch(Vec2::new(vx, vy));
        ball.step(1.0, &hoop.field);
        let (from, to) = (ball.prev_pos, ball.pos);
        hoop.resolve_collision(&mut ball);

        // Only paths that cross the support point at rim height must be stopped
        if (from.x - support) * (to.x - support) >= 0.0 {
            return Ok(());
        }
        let t = (support - from.x) / (to.x - from.x);
        let y_at_support = from.y + (to.y - from.y) * t;
        if (y_at_support - g.rim_y).abs() >= r + SUPPORT_BAND {
            return Ok(());
        }

        if from_left {
            prop_assert!(ball.pos.x <= g.rim_left + SUPPORT_INSET * r, "ended at {:?}", ball.pos);
        } else {
            prop_assert!(ball.pos.x >= g.rim_right - SUPPORT_INSET * r, "ended at {:?}", ball.pos);
        }
    }

    #[test]
    fn centred_drop_passes_clean_and_scores_once(
        offset in -0.35f32..0.35,
        vy in 0.5f32..12.0,
    ) {
        let mut hoop = HoopDetector::new(HoopGeometry::default(), Field::default(), 0.7);
        let g = hoop.geometry;
        let r = g.ball_radius;

        // Start just under the backboard, above the rim
        let x = g.rim_center_x() + offset * r;
        let mut ball = Projectile::new(Vec2::new(x, 345.0), r, 0.7);
        ball.launch(Vec2::new(0.0, vy));

        let mut scores = 0;
        while ball.pos.y <= g.rim_y + 3.0 * r {
            ball.step(1.0, &hoop.field);
            prop_assert_eq!(hoop.resolve_collision(&mut ball), None);
            if hoop.check_score(&ball) {
                scores += 1;
            }
        }
        prop_assert_eq!(scores, 1);
    }

    #[test]
    fn one_score_at_most_per_throw(
        drag_x in 0.0f32..400.0,
        drag_y in -300.0f32..0.0,
        level in difficulty(),
        seed in any::<u64>(),
    ) {
        let settings = Settings::from_difficulty(level);
        let store = hoop_shot::persistence::MemoryStore::new();
        let mut state = GameState::new(&settings, Box::new(store), seed).unwrap();

        let at = state.ball.pos;
        let throw = TickInput {
            press: Some(at),
            release: Some(at + Vec2::new(drag_x, drag_y)),
            ..Default::default()
        };
        tick(&mut state, &throw, 1.0);
        for _ in 0..2000 {
            if !state.ball.in_motion {
                break;
            }
            tick(&mut state, &TickInput::default(), 1.0);
        }

        let scored = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
        prop_assert!(scored <= 1);
        prop_assert_eq!(state.score as usize, scored);
    }

    #[test]
    fn best_score_only_goes_up(
        initial in proptest::option::of(0u32..50),
        submissions in proptest::collection::vec(0u32..100, 0..30),
    ) {
        let cell = Rc::new(Cell::new(initial));
        let mut best = BestScore::load(Box::new(SharedStore(cell.clone())));
        let mut expected = initial.unwrap_or(0);

        for candidate in submissions {
            let before = best.value();
            let improved = best.submit(candidate);

            prop_assert!(best.value() >= before);
            prop_assert_eq!(improved, candidate > before);
            expected = expected.max(candidate);
            prop_assert_eq!(best.value(), expected);
        }

        // Stored value tracks the best whenever one was written
        if best.value() > initial.unwrap_or(0) {
            prop_assert_eq!(cell.get(), Some(best.value()));
        } else {
            prop_assert_eq!(cell.get(), initial);
        }
    }
}
