//! Drag-to-shoot aiming
//!
//! The drag vector picks a target point; the launch velocity is the one that
//! puts an unobstructed ball on that point after exactly `FLIGHT_TICKS` ticks:
//!
//! ```text
//! vx = (target.x - ball.x) / T
//! vy = (target.y - ball.y) / T - g * T / 2
//! ```
//!
//! Difficulty then adds random error and caps the speed.

use glam::Vec2;
use rand::Rng;

use super::geometry::Field;
use crate::consts::*;
use crate::settings::DifficultyProfile;

/// Point the drag aims at. Never above `MIN_AIM_HEIGHT`.
pub fn aim_target(ball: Vec2, drag: Vec2, aim_factor: f32) -> Vec2 {
    let target = ball + drag * aim_factor;
    Vec2::new(target.x, target.y.max(MIN_AIM_HEIGHT))
}

/// Drag that aims at `target` (inverse of `aim_target` below the height limit)
pub fn drag_for_target(ball: Vec2, target: Vec2, aim_factor: f32) -> Vec2 {
    (target - ball) / aim_factor
}

/// Launch velocity reaching `target` after `flight_ticks` ticks under gravity
pub fn solve_launch_velocity(from: Vec2, target: Vec2, flight_ticks: f32) -> Vec2 {
    debug_assert!(flight_ticks > 0.0, "flight time must be positive");
    let t = flight_ticks.max(1.0);

    Vec2::new(
        (target.x - from.x) / t,
        (target.y - from.y) / t - 0.5 * GRAVITY * t,
    )
}

/// Scale the velocity by a random error factor `u` in `[-magnitude, magnitude]`:
/// x by `1 + u`, y by `1 + u / 2`. No randomness is drawn when disabled.
pub fn apply_launch_error<R: Rng + ?Sized>(velocity: Vec2, magnitude: f32, rng: &mut R) -> Vec2 {
    if magnitude <= 0.0 {
        return velocity;
    }
    let u = rng.random_range(-magnitude..=magnitude);
    Vec2::new(velocity.x * (1.0 + u), velocity.y * (1.0 + u * 0.5))
}

/// Cap speed at `max_speed`, keeping direction
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Full launch pipeline for a released drag.
///
/// Returns None when the throw is too weak to count (an accidental tap).
pub fn plan_launch<R: Rng + ?Sized>(
    ball: Vec2,
    drag: Vec2,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<Vec2> {
    let target = aim_target(ball, drag, profile.aim_factor);
    let velocity = solve_launch_velocity(ball, target, FLIGHT_TICKS);
    let velocity = apply_launch_error(velocity, profile.launch_error, rng);

    // Judged on the raw speed, before the cap
    if velocity.length() <= MIN_LAUNCH_SPEED {
        return None;
    }
    Some(clamp_speed(velocity, profile.max_force))
}

/// Ball positions for the next `max_ticks` ticks of free flight (the aim line).
///
/// Stops at the first point that touches the floor or leaves the field.
pub fn predict_path(
    start: Vec2,
    velocity: Vec2,
    radius: f32,
    field: &Field,
    max_ticks: usize,
) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(max_ticks);
    let mut pos = start;
    let mut vel = velocity;

    for _ in 0..max_ticks {
        pos += vel + Vec2::new(0.0, 0.5 * GRAVITY);
        vel.y += GRAVITY;
        points.push(pos);

        if pos.y >= field.ground_y - radius || !field.contains(pos) {
            break;
        }
    }
    points
}
