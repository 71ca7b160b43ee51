//! The hoop: solid obstacles plus the made-shot detector
//!
//! Each tick, after the ball moves:
//! 1. `resolve_collision` pushes the ball out of the backboard, a rim support
//!    or the field edge (first match wins)
//! 2. `check_score` advances the scoring state machine
//!
//! Scoring states:
//!
//! ```text
//!            in throat, lower edge above rim, falling
//!   Above ─────────────────────────────────────────────▶ Entering
//!     ▲  ◀──────── rose 3 radii above rim ─────────────────┘ │
//!     │                                                      │
//!     └──────── upper edge below rim + clearance (SCORE) ◀───┘
//! ```

use super::collision::{
    Contact, RimSide, backboard_collision, boundary_collision, support_collision,
};
use super::geometry::{Field, HoopGeometry};
use super::state::Projectile;
use crate::consts::*;

/// Scoring state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePhase {
    /// No shot in progress
    #[default]
    Above,
    /// Ball seen dropping into the throat from above
    Entering,
}

/// Hoop collision and scoring
#[derive(Debug, Clone)]
pub struct HoopDetector {
    pub geometry: HoopGeometry,
    pub field: Field,
    /// Restitution for the backboard and field edges
    pub map_restitution: f32,
    phase: ScorePhase,
}

impl HoopDetector {
    pub fn new(geometry: HoopGeometry, field: Field, map_restitution: f32) -> Self {
        Self {
            geometry,
            field,
            map_restitution,
            phase: ScorePhase::Above,
        }
    }

    pub fn phase(&self) -> ScorePhase {
        self.phase
    }

    /// Forget any shot in progress (new launch or ball reset)
    pub fn reset(&mut self) {
        self.phase = ScorePhase::Above;
    }

    /// Push the ball out of whatever solid part of the court it overlaps.
    ///
    /// Checks run backboard, left support, right support, field edges; the
    /// first hit is resolved and the rest are skipped for this tick. In a
    /// session `Projectile::step` has already kept the ball off the walls, so
    /// the field-edge check only fires for balls moved by other callers or
    /// pushed into a wall by the backboard.
    pub fn resolve_collision(&self, ball: &mut Projectile) -> Option<Contact> {
        let result = backboard_collision(ball, &self.geometry.backboard, self.map_restitution);
        if result.hit {
            result.apply(ball);
            return Some(Contact::Backboard);
        }

        for (side, contact) in [
            (RimSide::Left, Contact::LeftSupport),
            (RimSide::Right, Contact::RightSupport),
        ] {
            let result = support_collision(ball, &self.geometry, side);
            if result.hit {
                result.apply(ball);
                return Some(contact);
            }
        }

        let result = boundary_collision(ball, &self.field, self.map_restitution);
        if result.hit {
            result.apply(ball);
            return Some(Contact::Boundary);
        }

        None
    }

    /// Advance the scoring state machine. Returns true exactly once per made shot.
    pub fn check_score(&mut self, ball: &Projectile) -> bool {
        if !ball.in_motion {
            return false;
        }

        let hoop = &self.geometry;
        let r = ball.radius;
        let (window_left, window_right) = hoop.scoring_window();
        let in_throat = ball.pos.x > window_left && ball.pos.x < window_right;

        match self.phase {
            ScorePhase::Above => {
                if in_throat && ball.pos.y + r < hoop.rim_y && ball.vel.y > 0.0 {
                    self.phase = ScorePhase::Entering;
                }
                false
            }
            ScorePhase::Entering => {
                if ball.pos.y - r > hoop.rim_y + SCORE_CLEARANCE {
                    self.phase = ScorePhase::Above;
                    return true;
                }
                // Went back up without dropping through
                if ball.pos.y < hoop.rim_y - r * ENTRY_RESET_RADII {
                    self.phase = ScorePhase::Above;
                }
                false
            }
        }
    }
}
