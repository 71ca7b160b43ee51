//! Hoop Shot - A drag-to-shoot arcade basketball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, hoop collisions, scoring)
//! - `settings`: Difficulty presets and player preferences
//! - `highscores`: Best score tracking
//! - `persistence`: Best score storage backends and save format
//! - `platform`: Browser/native platform glue (logging, LocalStorage, JS binding)

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::BestScore;
pub use settings::{Difficulty, DifficultyProfile, Settings};

/// Game configuration constants
///
/// Simulation units are pixels and ticks: one tick is one frame at `TICK_RATE`.
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: f32 = 60.0;
    /// Seconds per tick, for converting wall-clock time
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the clock will account for (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Floor line (the visible floor strip is 10px tall)
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    /// Where the ball waits between attempts
    pub const REST_X: f32 = 100.0;
    pub const REST_Y: f32 = GROUND_Y - BALL_RADIUS;
    /// Press must land within this many ball radii of the centre to start aiming
    pub const GRAB_RADII: f32 = 2.0;

    /// Gravity (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Below this speed on both axes a grounded ball stops (pixels/tick)
    pub const SETTLE_SPEED: f32 = 1.0;

    /// Ticks the aiming solution assumes the arc takes to reach its target
    pub const FLIGHT_TICKS: f32 = 45.0;
    /// Aim targets are never placed above this line
    pub const MIN_AIM_HEIGHT: f32 = 50.0;
    /// Launches at or below this speed are treated as taps (pixels/tick)
    pub const MIN_LAUNCH_SPEED: f32 = 1.0;

    /// Hoop defaults: rim exactly one ball diameter wide, tucked under the backboard
    pub const RIM_Y: f32 = 380.0;
    pub const RIM_RIGHT_X: f32 = 690.0;
    pub const RIM_LEFT_X: f32 = RIM_RIGHT_X - BALL_RADIUS * 2.0;
    pub const BACKBOARD_X: f32 = RIM_RIGHT_X;
    pub const BACKBOARD_WIDTH: f32 = 10.0;
    pub const BACKBOARD_HEIGHT: f32 = 120.0;
    pub const BACKBOARD_Y: f32 = RIM_Y - BALL_RADIUS * 2.0 - BACKBOARD_HEIGHT;

    /// Rim supports: horizontal bounce factor (glancing, softer than the board)
    pub const SUPPORT_BOUNCE: f32 = 0.6;
    /// Vertical reach of a support beyond the ball radius
    pub const SUPPORT_BAND: f32 = 6.0;
    /// Gap left between ball and support after a push
    pub const SUPPORT_CLEARANCE: f32 = 2.0;
    /// How far (in ball radii) a support's solid zone reaches into the throat
    pub const SUPPORT_INSET: f32 = 0.2;

    /// How far (in ball radii) the scoring window stays clear of each support
    pub const SCORE_INSET: f32 = 0.4;
    /// Upper edge must drop this far below the rim to count
    pub const SCORE_CLEARANCE: f32 = 6.0;
    /// Rising this many ball radii above the rim clears a pending entry
    pub const ENTRY_RESET_RADII: f32 = 3.0;
}
