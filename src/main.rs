//! Hoop Shot native driver
//!
//! Plays a short autoplay session against the real simulation and keeps the
//! best score on disk. The browser build is driven from JavaScript through
//! `platform::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use glam::Vec2;
    use hoop_shot::consts::*;
    use hoop_shot::persistence::FileStore;
    use hoop_shot::sim::{FrameClock, GameEvent, GameState, TickInput, drag_for_target, run_frame};
    use hoop_shot::{Result, Settings};

    const BEST_SCORE_FILE: &str = "hoop_shot_best.json";
    const ATTEMPTS: u32 = 10;
    /// Give up on an attempt after this many simulated frames (30 s)
    const MAX_FRAMES_PER_ATTEMPT: u32 = 30 * 60;

    fn load_settings() -> Result<Settings> {
        match std::env::args().nth(1) {
            Some(path) => Settings::load_from(path),
            None => Ok(Settings::default()),
        }
    }

    fn seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Press on the ball and release with the drag that aims above the rim centre
    fn aim_input(state: &GameState) -> TickInput {
        let hoop = &state.hoop.geometry;
        let target = Vec2::new(hoop.rim_center_x(), hoop.rim_y - hoop.ball_radius * 3.0);
        let ball = state.ball.pos;
        let drag = drag_for_target(ball, target, state.profile.aim_factor);

        TickInput {
            press: Some(ball),
            drag: Some(ball + drag),
            release: Some(ball + drag),
            ..Default::default()
        }
    }

    fn log_events(state: &mut GameState) {
        for event in state.drain_events() {
            match event {
                GameEvent::Launched { velocity } => {
                    log::info!("Launched at ({:.2}, {:.2})", velocity.x, velocity.y)
                }
                GameEvent::Scored {
                    score,
                    best,
                    new_best,
                } => log::info!(
                    "Basket! score={} best={}{}",
                    score,
                    best,
                    if new_best { " (new best)" } else { "" }
                ),
                GameEvent::Settled { position } => {
                    log::info!("Missed, ball at ({:.0}, {:.0})", position.x, position.y)
                }
                GameEvent::Contact(contact) => log::debug!("Hit {:?}", contact),
                other => log::debug!("{:?}", other),
            }
        }
    }

    pub fn run() -> ExitCode {
        hoop_shot::platform::init_logging();
        log::info!("Hoop Shot (native) starting...");

        let settings = match load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let store = FileStore::new(BEST_SCORE_FILE);
        let mut state = match GameState::new(&settings, Box::new(store), seed()) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Could not start session: {}", e);
                return ExitCode::FAILURE;
            }
        };
        log::info!("Best score so far: {}", state.best_score());

        let mut clock = FrameClock::new();
        for attempt in 1..=ATTEMPTS {
            log::info!("Attempt {}/{}", attempt, ATTEMPTS);
            let mut input = aim_input(&state);

            for _ in 0..MAX_FRAMES_PER_ATTEMPT {
                run_frame(&mut state, &mut clock, &input, SIM_DT);
                input = TickInput::default();
                log_events(&mut state);
                if !state.ball.in_motion {
                    break;
                }
            }

            // Stuck bouncing: hand the ball back for the next throw
            if state.ball.in_motion {
                state.reset_ball();
                log_events(&mut state);
            }
        }

        let score = state.score;
        state.restart();
        log_events(&mut state);
        log::info!(
            "Session over: {} of {} made, best {}",
            score,
            ATTEMPTS,
            state.best_score()
        );
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebGame, this is just to satisfy the compiler
}
