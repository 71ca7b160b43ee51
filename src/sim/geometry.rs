//! Static geometry: playing field and hoop layout
//!
//! Screen coordinates: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Playing field: walls at x = 0 and x = width, ceiling at y = 0, floor at `ground_y`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub ground_y: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            ground_y: GROUND_Y,
        }
    }
}

impl Field {
    pub fn new(width: f32, ground_y: f32) -> Self {
        Self { width, ground_y }
    }

    /// Is a point inside the open air of the field?
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > 0.0 && point.x < self.width && point.y > 0.0 && point.y < self.ground_y
    }
}

/// Hoop layout: backboard panel plus a rim whose two ends are solid supports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoopGeometry {
    pub backboard: Rect,
    pub rim_y: f32,
    /// Left support point (x)
    pub rim_left: f32,
    /// Right support point (x)
    pub rim_right: f32,
    /// Radius of the ball this hoop is sized for
    pub ball_radius: f32,
}

impl Default for HoopGeometry {
    fn default() -> Self {
        Self {
            backboard: Rect::new(BACKBOARD_X, BACKBOARD_Y, BACKBOARD_WIDTH, BACKBOARD_HEIGHT),
            rim_y: RIM_Y,
            rim_left: RIM_LEFT_X,
            rim_right: RIM_RIGHT_X,
            ball_radius: BALL_RADIUS,
        }
    }
}

impl HoopGeometry {
    /// Build and validate a hoop. The rim must be at least one ball diameter wide,
    /// otherwise nothing can pass between the supports.
    pub fn new(
        backboard: Rect,
        rim_y: f32,
        rim_left: f32,
        rim_right: f32,
        ball_radius: f32,
    ) -> Result<Self> {
        let hoop = Self {
            backboard,
            rim_y,
            rim_left,
            rim_right,
            ball_radius,
        };
        hoop.validate()?;
        Ok(hoop)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.ball_radius > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "ball radius {} must be positive",
                self.ball_radius
            )));
        }
        if !(self.backboard.width > 0.0 && self.backboard.height > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "backboard {}x{} must have positive size",
                self.backboard.width, self.backboard.height
            )));
        }
        if !(self.rim_left < self.rim_right) {
            return Err(Error::InvalidGeometry(format!(
                "rim left end {} must be left of right end {}",
                self.rim_left, self.rim_right
            )));
        }
        if self.rim_span() < self.ball_radius * 2.0 {
            return Err(Error::InvalidGeometry(format!(
                "rim span {} is narrower than the ball ({})",
                self.rim_span(),
                self.ball_radius * 2.0
            )));
        }
        Ok(())
    }

    /// Distance between the supports
    #[inline]
    pub fn rim_span(&self) -> f32 {
        self.rim_right - self.rim_left
    }

    #[inline]
    pub fn rim_center_x(&self) -> f32 {
        (self.rim_left + self.rim_right) / 2.0
    }

    /// Horizontal window (ball centre) in which a descent counts as a shot
    pub fn scoring_window(&self) -> (f32, f32) {
        let inset = self.ball_radius * SCORE_INSET;
        (self.rim_left + inset, self.rim_right - inset)
    }

    /// Is the ball centre inside the vertical reach of the supports?
    #[inline]
    pub fn in_support_band(&self, y: f32) -> bool {
        (y - self.rim_y).abs() < self.ball_radius + SUPPORT_BAND
    }
}
