//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::Contact;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::settings::Difficulty;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer went down here
    pub press: Option<Vec2>,
    /// Pointer moved here
    pub drag: Option<Vec2>,
    /// Pointer came up here (throws the ball)
    pub release: Option<Vec2>,
    /// Put the ball back on its spot
    pub reset_ball: bool,
    /// Zero the score and start over
    pub restart: bool,
    /// Switch difficulty preset
    pub difficulty: Option<Difficulty>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply the player's commands. Order matters: a tick may carry a whole
/// press/drag/release gesture.
fn apply_input(state: &mut GameState, input: &TickInput) {
    if let Some(difficulty) = input.difficulty {
        if let Err(e) = state.set_difficulty(difficulty) {
            log::warn!("Difficulty change rejected: {}", e);
        }
    }
    if input.restart {
        state.restart();
    }
    if input.reset_ball {
        state.reset_ball();
    }
    if let Some(point) = input.press {
        state.press(point);
    }
    if let Some(point) = input.drag {
        state.drag(point);
    }
    if let Some(point) = input.release {
        state.release(point);
    }
}

/// Advance the game state by one fixed timestep (`dt` in ticks, normally 1.0)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    apply_input(state, input);

    // Clock anomaly: skip the tick entirely
    if !(dt > 0.0) {
        return;
    }
    state.time_ticks += 1;

    if !state.ball.in_motion {
        return;
    }

    let field = state.field();
    if state.ball.step(dt, &field) {
        state.push_event(GameEvent::Contact(Contact::Boundary));
    }

    if let Some(contact) = state.hoop.resolve_collision(&mut state.ball) {
        log::trace!(
            "Contact {:?} at ({:.1}, {:.1})",
            contact,
            state.ball.pos.x,
            state.ball.pos.y
        );
        state.push_event(GameEvent::Contact(contact));
    }

    if state.hoop.check_score(&state.ball) {
        state.commit_score();
    } else if !state.ball.in_motion {
        let position = state.ball.pos;
        log::debug!("Ball settled at ({:.1}, {:.1})", position.x, position.y);
        state.push_event(GameEvent::Settled { position });
    }
}

/// Converts wall-clock frame time into whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Unspent time (seconds)
    accumulator: f32,
    /// Timestamp of the previous `advance_ms` call
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `elapsed` seconds and return how many ticks are due.
    ///
    /// Long frames (tab in background, debugger) are clamped to `MAX_FRAME_TIME`
    /// and at most `MAX_SUBSTEPS` ticks run per frame to prevent spiral of death.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if elapsed > 0.0 {
            self.accumulator += elapsed.min(MAX_FRAME_TIME);
        }

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        // Drop whatever the substep cap left behind
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }

    /// Same as `advance`, fed with an absolute timestamp (e.g. requestAnimationFrame)
    pub fn advance_ms(&mut self, now_ms: f64) -> u32 {
        let elapsed = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.advance(elapsed)
    }

    /// Forget the previous timestamp and any pending time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_ms = None;
    }
}

/// Run `ticks` ticks with `input` applied once: on the first tick, or on its
/// own when no tick is due this frame.
pub fn run_ticks(state: &mut GameState, input: &TickInput, ticks: u32) {
    if ticks == 0 {
        if !input.is_empty() {
            apply_input(state, input);
        }
        return;
    }

    let idle = TickInput::default();
    for i in 0..ticks {
        let input = if i == 0 { input } else { &idle };
        tick(state, input, 1.0);
    }
}

/// Run one rendered frame that took `elapsed` seconds. Returns ticks run.
pub fn run_frame(
    state: &mut GameState,
    clock: &mut FrameClock,
    input: &TickInput,
    elapsed: f32,
) -> u32 {
    let ticks = clock.advance(elapsed);
    run_ticks(state, input, ticks);
    ticks
}
