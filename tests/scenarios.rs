//! End-to-end sessions through the public API

use glam::Vec2;
use hoop_shot::consts::*;
use hoop_shot::persistence::{FileStore, MemoryStore};
use hoop_shot::sim::{
    Contact, Field, FrameClock, GameEvent, GameState, HoopGeometry, Rect, TickInput, run_frame,
    tick,
};
use hoop_shot::{Difficulty, Settings};

fn idle(state: &mut GameState, ticks: usize) {
    for _ in 0..ticks {
        tick(state, &TickInput::default(), 1.0);
    }
}

fn throw(state: &GameState, drag: Vec2) -> TickInput {
    let at = state.ball.pos;
    TickInput {
        press: Some(at),
        drag: Some(at + drag),
        release: Some(at + drag),
        ..Default::default()
    }
}

/// Hoop with the rim at y = 300 and supports at x = 440 and 500
fn low_hoop() -> HoopGeometry {
    HoopGeometry::new(Rect::new(500.0, 150.0, 10.0, 100.0), 300.0, 440.0, 500.0, BALL_RADIUS)
        .unwrap()
}

/// Drop the ball straight through the low hoop's throat
fn drop_through_low_hoop(state: &mut GameState) {
    state.ball.pos = Vec2::new(470.0, 260.0);
    state.ball.launch(Vec2::new(0.0, 5.0));
    idle(state, 60);
}

fn temp_file(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("hoop_shot_it_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("best.json");
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn lob_reaches_aim_point_after_flight_time() {
    // Short field: ball rests at (100, 280)
    let field = Field::new(FIELD_WIDTH, 300.0);
    let hoop = HoopGeometry::new(Rect::new(640.0, 60.0, 10.0, 100.0), 200.0, 600.0, 640.0, BALL_RADIUS)
        .unwrap();
    let mut state = GameState::with_layout(
        &Settings::default(),
        Box::new(MemoryStore::new()),
        1,
        field,
        hoop,
    )
    .unwrap();
    assert_eq!(state.ball.pos, Vec2::new(100.0, 280.0));

    // Drag straight up 100px with aim factor 1.5: target (100, 150)
    let input = throw(&state, Vec2::new(0.0, -100.0));
    tick(&mut state, &input, 1.0);

    let launched = state.drain_events();
    let Some(GameEvent::Launched { velocity }) = launched.first().copied() else {
        panic!("expected a launch, got {:?}", launched);
    };
    assert_eq!(velocity.x, 0.0);
    assert!((velocity.y - (-130.0 / 45.0 - 11.25)).abs() < 1e-3);

    // Launch tick already moved the ball once
    idle(&mut state, FLIGHT_TICKS as usize - 1);
    assert!(state.ball.pos.distance(Vec2::new(100.0, 150.0)) < 0.05);
}

#[test]
fn clean_basket_scores_once_and_returns_ball() {
    let mut state = GameState::with_layout(
        &Settings::default(),
        Box::new(MemoryStore::new()),
        1,
        Field::default(),
        low_hoop(),
    )
    .unwrap();

    drop_through_low_hoop(&mut state);

    let events = state.drain_events();
    let scores: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Scored { .. }))
        .collect();
    assert_eq!(scores.len(), 1);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Contact(_))));
    assert_eq!(state.score, 1);
    assert_eq!(state.best_score(), 1);

    // Ball handed back at its spot
    assert!(!state.ball.in_motion);
    assert_eq!(state.ball.pos, state.ball.rest_pos);
}

#[test]
fn backboard_rebound() {
    let mut state =
        GameState::new(&Settings::default(), Box::new(MemoryStore::new()), 1).unwrap();
    state.ball.pos = Vec2::new(620.0, 280.0);
    state.ball.launch(Vec2::new(15.0, 0.0));

    idle(&mut state, 4);

    let events = state.drain_events();
    assert!(events.contains(&GameEvent::Contact(Contact::Backboard)));
    assert_eq!(state.ball.pos.x, 670.0);
    assert!((state.ball.vel.x - (-15.0 * 0.7)).abs() < 1e-4);
}

#[test]
fn diagonal_shot_bounces_off_rim_end() {
    let mut state =
        GameState::new(&Settings::default(), Box::new(MemoryStore::new()), 1).unwrap();
    // Coming down onto the front of the rim from outside
    state.ball.pos = Vec2::new(RIM_LEFT_X - 20.0, RIM_Y - 30.0);
    state.ball.launch(Vec2::new(28.0, 20.0));

    idle(&mut state, 1);

    assert_eq!(
        state.drain_events(),
        vec![GameEvent::Contact(Contact::LeftSupport)]
    );
    assert!(state.ball.pos.x <= RIM_LEFT_X - BALL_RADIUS);
    assert!(state.ball.vel.x < 0.0);
}

#[test]
fn reset_mid_shot_cancels_basket() {
    let mut state = GameState::with_layout(
        &Settings::default(),
        Box::new(MemoryStore::new()),
        1,
        Field::default(),
        low_hoop(),
    )
    .unwrap();

    state.ball.pos = Vec2::new(470.0, 260.0);
    state.ball.launch(Vec2::new(0.0, 5.0));
    idle(&mut state, 2);

    let reset = TickInput {
        reset_ball: true,
        ..Default::default()
    };
    tick(&mut state, &reset, 1.0);
    idle(&mut state, 60);

    assert_eq!(state.score, 0);
    assert!(!state.ball.in_motion);
}

#[test]
fn best_score_survives_sessions() {
    let path = temp_file("sessions");

    {
        let mut state = GameState::with_layout(
            &Settings::default(),
            Box::new(FileStore::new(&path)),
            1,
            Field::default(),
            low_hoop(),
        )
        .unwrap();
        assert_eq!(state.best_score(), 0);

        drop_through_low_hoop(&mut state);
        drop_through_low_hoop(&mut state);
        assert_eq!(state.score, 2);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            1.0,
        );
        assert_eq!(state.score, 0);
    }

    let state = GameState::new(&Settings::default(), Box::new(FileStore::new(&path)), 2).unwrap();
    assert_eq!(state.best_score(), 2);

    std::fs::remove_file(&path).ok();
}

#[test]
fn corrupt_save_starts_fresh_and_is_overwritten() {
    let path = temp_file("corrupt");
    std::fs::write(&path, "{ not json").unwrap();

    let mut state = GameState::with_layout(
        &Settings::default(),
        Box::new(FileStore::new(&path)),
        1,
        Field::default(),
        low_hoop(),
    )
    .unwrap();
    assert_eq!(state.best_score(), 0);

    drop_through_low_hoop(&mut state);
    let stored = std::fs::read_to_string(&path).unwrap();
    assert_eq!(hoop_shot::persistence::decode(&stored).unwrap(), 1);

    std::fs::remove_file(&path).ok();
}

#[test]
fn difficulty_switch_applies_new_restitution() {
    let mut state =
        GameState::new(&Settings::default(), Box::new(MemoryStore::new()), 1).unwrap();
    let input = TickInput {
        difficulty: Some(Difficulty::Easy),
        ..Default::default()
    };
    tick(&mut state, &input, 1.0);
    assert!(
        state
            .drain_events()
            .contains(&GameEvent::DifficultyChanged(Difficulty::Easy))
    );

    // Off the left wall at the Easy restitution
    state.ball.pos = Vec2::new(30.0, 200.0);
    state.ball.launch(Vec2::new(-20.0, 0.0));
    idle(&mut state, 1);
    assert!((state.ball.vel.x - 20.0 * 0.95).abs() < 1e-4);
}

#[test]
fn same_seed_same_session() {
    fn play(seed: u64) -> (Vec<GameEvent>, u32, Vec2) {
        let settings = Settings::from_difficulty(Difficulty::Hard);
        let mut state = GameState::new(&settings, Box::new(MemoryStore::new()), seed).unwrap();
        let mut clock = FrameClock::new();
        let mut events = Vec::new();

        for drag in [
            Vec2::new(600.0, -500.0),
            Vec2::new(700.0, -400.0),
            Vec2::new(650.0, -600.0),
        ] {
            let input = throw(&state, drag);
            run_frame(&mut state, &mut clock, &input, SIM_DT);
            for _ in 0..900 {
                if !state.ball.in_motion {
                    break;
                }
                run_frame(&mut state, &mut clock, &TickInput::default(), SIM_DT);
            }
            events.extend(state.drain_events());
        }
        (events, state.score, state.ball.pos)
    }

    assert_eq!(play(2024), play(2024));
}
