//! Collision detection and response for the hoop and the field edges
//!
//! The tricky part of Hoop Shot: the rim is exactly one ball wide, so the two
//! supports must be solid from the outside while the throat between them stays
//! open. Every check works on the ball centre and resolves against the current
//! tick's overlap; fast balls are caught with a swept test against the
//! previous position so they can't skip through a thin obstacle.

use glam::Vec2;

use super::geometry::{Field, HoopGeometry, Rect};
use super::state::Projectile;
use crate::consts::*;

/// Which obstacle stopped the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Backboard,
    LeftSupport,
    RightSupport,
    /// Left wall, right wall or ceiling
    Boundary,
}

/// End of the rim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RimSide {
    Left,
    Right,
}

impl RimSide {
    /// Sign of the direction pointing away from the rim centre
    #[inline]
    fn outward(self) -> f32 {
        match self {
            RimSide::Left => -1.0,
            RimSide::Right => 1.0,
        }
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Ball centre after resolution
    pub position: Vec2,
    /// Ball velocity after resolution
    pub velocity: Vec2,
}

impl CollisionResult {
    pub fn miss(ball: &Projectile) -> Self {
        Self {
            hit: false,
            position: ball.pos,
            velocity: ball.vel,
        }
    }

    /// Write the resolved state back to the ball
    pub fn apply(&self, ball: &mut Projectile) {
        if self.hit {
            ball.pos = self.position;
            ball.vel = self.velocity;
        }
    }
}

/// Does the segment `from → to` touch the box `[min, max]`? (slab test)
fn segment_hits_box(from: Vec2, to: Vec2, min: Vec2, max: Vec2) -> bool {
    let delta = to - from;
    let mut enter = 0.0f32;
    let mut exit = 1.0f32;

    for (start, d, lo, hi) in [
        (from.x, delta.x, min.x, max.x),
        (from.y, delta.y, min.y, max.y),
    ] {
        if d.abs() < f32::EPSILON {
            if start < lo || start > hi {
                return false;
            }
            continue;
        }
        let (a, b) = ((lo - start) / d, (hi - start) / d);
        enter = enter.max(a.min(b));
        exit = exit.min(a.max(b));
        if enter > exit {
            return false;
        }
    }
    true
}

/// Check the ball against the backboard panel.
///
/// The board is hit when the ball's horizontal extent overlaps it while the
/// centre is inside its vertical span, or when the path since the previous
/// tick crossed the board through that zone. The ball is pushed out on the
/// side it came from.
pub fn backboard_collision(ball: &Projectile, board: &Rect, restitution: f32) -> CollisionResult {
    let r = ball.radius;
    let pos = ball.pos;
    let prev = ball.prev_pos;

    let in_span = pos.y > board.top() && pos.y < board.bottom();
    let overlap = in_span && pos.x + r > board.left() && pos.x - r < board.right();
    let swept = !overlap
        && (prev.x < board.center_x()) != (pos.x < board.center_x())
        && segment_hits_box(
            prev,
            pos,
            Vec2::new(board.left() - r, board.top()),
            Vec2::new(board.right() + r, board.bottom()),
        );

    if !(overlap || swept) {
        return CollisionResult::miss(ball);
    }

    let from_left = prev.x < board.center_x();
    let (x, vx) = if from_left {
        (board.left() - r, -ball.vel.x.abs() * restitution)
    } else {
        (board.right() + r, ball.vel.x.abs() * restitution)
    };

    CollisionResult {
        hit: true,
        position: Vec2::new(x, pos.y),
        velocity: Vec2::new(vx, ball.vel.y),
    }
}

/// Check the ball against one rim support.
///
/// A support is a point at the rim end. Its solid zone (for the ball centre)
/// runs from `r + SUPPORT_CLEARANCE` outside the point to `SUPPORT_INSET * r`
/// inside it, within `r + SUPPORT_BAND` of rim height. The throat between the
/// two zones is never solid.
pub fn support_collision(ball: &Projectile, hoop: &HoopGeometry, side: RimSide) -> CollisionResult {
    let r = ball.radius;
    let outward = side.outward();
    let support = match side {
        RimSide::Left => hoop.rim_left,
        RimSide::Right => hoop.rim_right,
    };
    let inset = r * SUPPORT_INSET;

    // Distance from the support point, positive on the outer side
    let outer = (ball.pos.x - support) * outward;
    let prev_outer = (ball.prev_pos.x - support) * outward;
    let reach = r + SUPPORT_CLEARANCE;

    let in_zone = hoop.in_support_band(ball.pos.y) && outer > -inset && outer < reach;

    // Came from outside and ended past the zone: did the path go through it?
    let band = r + SUPPORT_BAND;
    let crossed = !in_zone
        && prev_outer > 0.0
        && outer <= -inset
        && segment_hits_box(
            Vec2::new(prev_outer, ball.prev_pos.y),
            Vec2::new(outer, ball.pos.y),
            Vec2::new(-inset, hoop.rim_y - band),
            Vec2::new(reach, hoop.rim_y + band),
        );

    if !(in_zone || crossed) {
        return CollisionResult::miss(ball);
    }

    let (x, vx) = if outer > 0.0 || crossed {
        // Hit from outside: back out, bounce away from the hoop
        (
            support + outward * reach,
            outward * ball.vel.x.abs() * SUPPORT_BOUNCE,
        )
    } else {
        // Clipped from inside the throat: nudge toward the centre
        (
            support - outward * r,
            -outward * ball.vel.x.abs() * SUPPORT_BOUNCE,
        )
    };

    CollisionResult {
        hit: true,
        position: Vec2::new(x, ball.pos.y),
        velocity: Vec2::new(vx, ball.vel.y),
    }
}

/// Keep the ball inside the left wall, right wall and ceiling.
///
/// The floor is handled by the ball's own step (it owns settling).
pub fn boundary_collision(ball: &Projectile, field: &Field, restitution: f32) -> CollisionResult {
    let r = ball.radius;
    let mut position = ball.pos;
    let mut velocity = ball.vel;
    let mut hit = false;

    if position.x - r < 0.0 {
        position.x = r;
        velocity.x = velocity.x.abs() * restitution;
        hit = true;
    }
    if position.x + r > field.width {
        position.x = field.width - r;
        velocity.x = -velocity.x.abs() * restitution;
        hit = true;
    }
    if position.y - r < 0.0 {
        position.y = r;
        velocity.y = velocity.y.abs() * restitution;
        hit = true;
    }

    CollisionResult {
        hit,
        position,
        velocity,
    }
}
