//! Game state and core simulation types
//!
//! `GameState` is the whole play session: the ball, the hoop, the active
//! difficulty, the score and the aim gesture in progress.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aim;
use super::collision::{Contact, boundary_collision};
use super::geometry::{Field, HoopGeometry};
use super::hoop::HoopDetector;
use crate::consts::*;
use crate::error::Result;
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::settings::{Difficulty, DifficultyProfile, Settings};

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Position at the start of the last step (for swept collision tests)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Floor/wall bounce factor, in (0, 1]
    pub restitution: f32,
    /// False means the ball is frozen and stepping is a no-op
    pub in_motion: bool,
    /// Where `reset` puts the ball
    pub rest_pos: Vec2,
}

impl Projectile {
    pub fn new(rest_pos: Vec2, radius: f32, restitution: f32) -> Self {
        Self {
            pos: rest_pos,
            prev_pos: rest_pos,
            vel: Vec2::ZERO,
            radius,
            restitution,
            in_motion: false,
            rest_pos,
        }
    }

    /// Arm the ball with a launch velocity
    pub fn launch(&mut self, vel: Vec2) {
        self.vel = vel;
        self.prev_pos = self.pos;
        self.in_motion = true;
    }

    /// Back to the rest position, frozen
    pub fn reset(&mut self) {
        self.pos = self.rest_pos;
        self.prev_pos = self.rest_pos;
        self.vel = Vec2::ZERO;
        self.in_motion = false;
    }

    /// Advance by `dt` ticks under gravity, bouncing off the floor and field edges.
    ///
    /// Uses the exact constant-acceleration update, so the path matches the
    /// closed-form parabola at every whole tick. Negative or NaN `dt` is ignored.
    /// Returns true if the ball bounced off a wall or the ceiling.
    pub fn step(&mut self, dt: f32, field: &Field) -> bool {
        if !self.in_motion || !(dt > 0.0) {
            return false;
        }

        self.prev_pos = self.pos;
        self.pos += self.vel * dt + Vec2::new(0.0, 0.5 * GRAVITY * dt * dt);
        self.vel.y += GRAVITY * dt;

        // Floor
        let floor = field.ground_y - self.radius;
        if self.pos.y >= floor {
            // Speed at the moment of contact, not after sinking past the floor;
            // otherwise every bounce gains energy and the ball never settles
            let overshoot = self.pos.y - floor;
            let contact_speed = (self.vel.y * self.vel.y - 2.0 * GRAVITY * overshoot)
                .max(0.0)
                .sqrt();

            self.pos.y = floor;
            self.vel.y = -contact_speed * self.restitution;

            if self.vel.y.abs() < SETTLE_SPEED && self.vel.x.abs() < SETTLE_SPEED {
                self.in_motion = false;
                self.vel = Vec2::ZERO;
            }
        }

        // Walls and ceiling
        let edge = boundary_collision(self, field, self.restitution);
        edge.apply(self);
        edge.hit
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Does a pointer press at `point` grab the ball?
    pub fn can_grab(&self, point: Vec2) -> bool {
        !self.in_motion && point.distance(self.pos) < self.radius * GRAB_RADII
    }
}

/// Aim gesture state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimState {
    Idle,
    /// Pointer went down on the ball at `start`, currently at `current`
    Aiming { start: Vec2, current: Vec2 },
}

/// Something that happened during a tick, for sound/UI hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Launched { velocity: Vec2 },
    /// Release was too weak to count as a throw
    TapIgnored,
    Contact(Contact),
    Scored { score: u32, best: u32, new_best: bool },
    /// Ball came to rest on the floor
    Settled { position: Vec2 },
    BallReset,
    DifficultyChanged(Difficulty),
    /// Score cleared by the player
    Restarted,
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    pub ball: Projectile,
    pub hoop: HoopDetector,
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    /// Made shots this session
    pub score: u32,
    pub best: BestScore,
    pub aim: AimState,
    pub show_aim_preview: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Launch error source
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the default court.
    ///
    /// `seed` drives the launch error unless the settings pin one.
    pub fn new(settings: &Settings, store: Box<dyn ScoreStore>, seed: u64) -> Result<Self> {
        Self::with_layout(
            settings,
            store,
            seed,
            Field::default(),
            HoopGeometry::default(),
        )
    }

    /// Create a session on a custom court
    pub fn with_layout(
        settings: &Settings,
        store: Box<dyn ScoreStore>,
        seed: u64,
        field: Field,
        geometry: HoopGeometry,
    ) -> Result<Self> {
        let profile = settings.profile();
        profile.validate()?;
        geometry.validate()?;

        let seed = settings.seed.unwrap_or(seed);
        let rest = Vec2::new(REST_X, field.ground_y - geometry.ball_radius);

        log::info!(
            "New session: difficulty={}, seed={}",
            settings.difficulty.as_str(),
            seed
        );

        Ok(Self {
            ball: Projectile::new(rest, geometry.ball_radius, profile.map_restitution),
            hoop: HoopDetector::new(geometry, field, profile.map_restitution),
            difficulty: settings.difficulty,
            profile,
            score: 0,
            best: BestScore::load(store),
            aim: AimState::Idle,
            show_aim_preview: settings.show_aim_preview,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    pub fn field(&self) -> Field {
        self.hoop.field
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pointer down. Starts aiming if the ball is at rest and under the pointer.
    pub fn press(&mut self, point: Vec2) -> bool {
        if !self.ball.can_grab(point) {
            return false;
        }
        self.aim = AimState::Aiming {
            start: point,
            current: point,
        };
        true
    }

    /// Pointer moved
    pub fn drag(&mut self, point: Vec2) {
        if let AimState::Aiming { current, .. } = &mut self.aim {
            *current = point;
        }
    }

    /// Predicted path for the drag in progress
    pub fn aim_preview(&self) -> Option<Vec<Vec2>> {
        let AimState::Aiming { start, current } = self.aim else {
            return None;
        };
        let target = aim::aim_target(self.ball.pos, current - start, self.profile.aim_factor);
        let velocity = aim::solve_launch_velocity(self.ball.pos, target, FLIGHT_TICKS);
        Some(aim::predict_path(
            self.ball.pos,
            velocity,
            self.ball.radius,
            &self.field(),
            FLIGHT_TICKS as usize,
        ))
    }

    /// Pointer up. Throws the ball; returns the launch velocity, or None for a tap.
    pub fn release(&mut self, point: Vec2) -> Option<Vec2> {
        let AimState::Aiming { start, .. } = self.aim else {
            return None;
        };
        self.aim = AimState::Idle;

        match aim::plan_launch(self.ball.pos, point - start, &self.profile, &mut self.rng) {
            Some(velocity) => {
                self.ball.launch(velocity);
                self.hoop.reset();
                log::debug!("Launch: vel=({:.2}, {:.2})", velocity.x, velocity.y);
                self.push_event(GameEvent::Launched { velocity });
                Some(velocity)
            }
            None => {
                log::debug!("Release too weak, ignoring tap");
                self.push_event(GameEvent::TapIgnored);
                None
            }
        }
    }

    /// Ball back to the rest spot, any pending shot forgotten
    pub fn reset_ball(&mut self) {
        self.ball.reset();
        self.hoop.reset();
        self.aim = AimState::Idle;
        log::debug!("Ball reset");
        self.push_event(GameEvent::BallReset);
    }

    /// Start over: keep the best score, zero the current one
    pub fn restart(&mut self) {
        self.best.submit(self.score);
        self.score = 0;
        self.push_event(GameEvent::Restarted);
        self.reset_ball();
    }

    /// Switch preset. Resets the ball so the new rules apply from rest.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.set_profile(difficulty.profile())?;
        self.difficulty = difficulty;
        log::info!("Difficulty changed to {}", difficulty.as_str());
        self.push_event(GameEvent::DifficultyChanged(difficulty));
        Ok(())
    }

    /// Switch to an arbitrary profile. Rejected profiles leave the session untouched.
    pub fn set_profile(&mut self, profile: DifficultyProfile) -> Result<()> {
        profile.validate()?;
        self.profile = profile;
        self.ball.restitution = profile.map_restitution;
        self.hoop.map_restitution = profile.map_restitution;
        self.reset_ball();
        Ok(())
    }

    /// Record a made shot and hand the ball back to the player
    pub(crate) fn commit_score(&mut self) {
        self.score += 1;
        let new_best = self.best.submit(self.score);
        log::info!("Score! {} (best {})", self.score, self.best.value());
        self.push_event(GameEvent::Scored {
            score: self.score,
            best: self.best.value(),
            new_best,
        });
        self.reset_ball();
    }
}
