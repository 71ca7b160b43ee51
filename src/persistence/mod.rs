//! Best score storage
//!
//! Features:
//! - Versioned JSON envelope
//! - Reads the legacy bare-integer format
//! - In-memory store for tests and headless runs
//! - Single-file store on native targets (LocalStorage lives in `platform::web`)

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Storage backend for the best score
pub trait ScoreStore {
    /// Stored best score, `None` if nothing was ever saved
    fn load(&self) -> Result<Option<u32>>;
    /// Overwrite the stored best score
    fn store(&mut self, value: u32) -> Result<()>;
}

/// On-disk/LocalStorage representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub best_score: u32,
}

impl SaveEnvelope {
    pub fn new(best_score: u32) -> Self {
        Self {
            version: SAVE_VERSION,
            best_score,
        }
    }
}

/// Encode a best score for storage
pub fn encode(best_score: u32) -> Result<String> {
    Ok(serde_json::to_string(&SaveEnvelope::new(best_score))?)
}

/// Decode a stored best score.
///
/// Accepts either the JSON envelope or a bare integer.
pub fn decode(text: &str) -> Result<u32> {
    let text = text.trim();
    if let Ok(legacy) = text.parse::<u32>() {
        return Ok(legacy);
    }

    let envelope: SaveEnvelope = serde_json::from_str(text)?;
    if envelope.version > SAVE_VERSION {
        return Err(Error::UnsupportedSaveVersion(envelope.version));
    }
    Ok(envelope.best_score)
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.value)
    }

    fn store(&mut self, value: u32) -> Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

/// Single-file store (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => decode(&text).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&mut self, value: u32) -> Result<()> {
        std::fs::write(&self.path, encode(value)?)?;
        Ok(())
    }
}
