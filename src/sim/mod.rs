//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one 60 Hz frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod geometry;
pub mod hoop;
pub mod state;
pub mod tick;

pub use aim::{aim_target, drag_for_target, plan_launch, predict_path, solve_launch_velocity};
pub use collision::{CollisionResult, Contact, RimSide};
pub use geometry::{Field, HoopGeometry, Rect};
pub use hoop::{HoopDetector, ScorePhase};
pub use state::{AimState, GameEvent, GameState, Projectile};
pub use tick::{FrameClock, TickInput, run_frame, run_ticks, tick};
