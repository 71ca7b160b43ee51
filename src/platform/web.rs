//! Browser glue: LocalStorage persistence and the handle the page's render
//! loop drives.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use crate::error::{Error, Result};
use crate::persistence::{self, ScoreStore};
use crate::settings::{Difficulty, Settings};
use crate::sim::{FrameClock, GameState, TickInput, run_ticks};

/// LocalStorage key holding the best score
pub const BEST_SCORE_KEY: &str = "hoop_shot_best_score";

fn local_storage() -> Result<Storage> {
    web_sys::window()
        .ok_or_else(|| Error::Storage("no window".into()))?
        .local_storage()
        .map_err(|e| Error::Storage(format!("{:?}", e)))?
        .ok_or_else(|| Error::Storage("LocalStorage unavailable".into()))
}

/// Best score kept in the browser's LocalStorage
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_key(BEST_SCORE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>> {
        let item = local_storage()?
            .get_item(&self.key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))?;
        item.map(|text| persistence::decode(&text)).transpose()
    }

    fn store(&mut self, value: u32) -> Result<()> {
        let text = persistence::encode(value)?;
        local_storage()?
            .set_item(&self.key, &text)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

/// Game session driven from JavaScript.
///
/// The page forwards pointer events and calls `frame` from its
/// requestAnimationFrame callback, then draws using the accessors.
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session. Without a seed the launch error is seeded from the clock.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> std::result::Result<WebGame, JsValue> {
        crate::platform::init_logging();
        let settings = Settings::load();
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = GameState::new(&settings, Box::new(LocalStorageStore::new()), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Hoop Shot ready (best {})", state.best_score());

        Ok(WebGame {
            state,
            clock: FrameClock::new(),
            input: TickInput::default(),
        })
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.input.press = Some(Vec2::new(x, y));
    }

    pub fn drag(&mut self, x: f32, y: f32) {
        self.input.drag = Some(Vec2::new(x, y));
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.input.release = Some(Vec2::new(x, y));
    }

    pub fn reset_ball(&mut self) {
        self.input.reset_ball = true;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    /// Queue a preset change by name. Returns false for an unknown name.
    pub fn set_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(difficulty) => {
                self.input.difficulty = Some(difficulty);
                let settings = Settings {
                    show_aim_preview: self.state.show_aim_preview,
                    ..Settings::load().with_difficulty(difficulty)
                };
                settings.save();
                true
            }
            None => {
                log::warn!("Unknown difficulty '{}'", name);
                false
            }
        }
    }

    /// Advance to `now_ms` (requestAnimationFrame timestamp). Returns ticks run.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let ticks = self.clock.advance_ms(now_ms);
        let input = std::mem::take(&mut self.input);
        run_ticks(&mut self.state, &input, ticks);

        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
        }
        ticks
    }

    pub fn ball_x(&self) -> f32 {
        self.state.ball.pos.x
    }

    pub fn ball_y(&self) -> f32 {
        self.state.ball.pos.y
    }

    pub fn ball_radius(&self) -> f32 {
        self.state.ball.radius
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score()
    }

    /// Predicted path as flattened x,y pairs (empty when not aiming or disabled)
    pub fn aim_preview(&self) -> Vec<f32> {
        if !self.state.show_aim_preview {
            return Vec::new();
        }
        self.state
            .aim_preview()
            .unwrap_or_default()
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }
}
