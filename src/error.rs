//! Error type for configuration and persistence.
//!
//! The simulation itself never fails; everything here comes from loading
//! data (difficulty profiles, hoop geometry, saved scores).

/// Crate-wide error.
#[derive(Debug)]
pub enum Error {
    /// A difficulty profile field is out of range
    InvalidProfile { field: &'static str, value: f32 },
    /// Hoop geometry cannot be played (e.g. rim narrower than the ball)
    InvalidGeometry(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Save written by a newer build
    UnsupportedSaveVersion(u32),
    /// Browser storage unavailable or rejected the write
    Storage(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidProfile { field, value } => {
                write!(f, "Invalid difficulty profile: {} = {}", field, value)
            }
            Error::InvalidGeometry(msg) => write!(f, "Invalid hoop geometry: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::UnsupportedSaveVersion(v) => write!(f, "Unsupported save version: {}", v),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
