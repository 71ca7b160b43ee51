//! Best score tracking
//!
//! The best score only ever goes up. It is written through to a `ScoreStore`
//! whenever it improves.

use crate::error::Error;
use crate::persistence::ScoreStore;

/// Best score plus the store it persists to
pub struct BestScore {
    value: u32,
    store: Box<dyn ScoreStore>,
    /// False while the stored value could not be read; nothing is written
    /// until it can be, so a larger stored best is never overwritten
    synced: bool,
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore")
            .field("value", &self.value)
            .field("synced", &self.synced)
            .finish()
    }
}

impl BestScore {
    /// Load from a store. Unreadable saves count as no score.
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let mut best = Self {
            value: 0,
            store,
            synced: false,
        };
        best.sync();
        match (best.synced, best.value) {
            (false, _) => {}
            (true, 0) => log::info!("No best score found, starting fresh"),
            (true, value) => log::info!("Loaded best score: {}", value),
        }
        best
    }

    /// Read the stored value, keeping the larger of it and the in-memory best
    fn sync(&mut self) {
        match self.store.load() {
            Ok(stored) => {
                self.value = self.value.max(stored.unwrap_or(0));
                self.synced = true;
            }
            // Corrupt save: nothing worth keeping, it may be overwritten
            Err(Error::Json(e)) => {
                log::warn!("Discarding unreadable best score: {}", e);
                self.synced = true;
            }
            Err(e) => log::warn!("Could not load best score: {}", e),
        }
    }

    /// Current best
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Offer a score. Returns true if it became the new best.
    ///
    /// A failed write is logged; the in-memory best still rises. While the
    /// store can't be read the best is kept in memory only.
    pub fn submit(&mut self, candidate: u32) -> bool {
        if !self.synced {
            self.sync();
        }
        if candidate <= self.value {
            return false;
        }

        self.value = candidate;
        if !self.synced {
            log::warn!("Best score {} kept in memory only, store unreadable", candidate);
            return true;
        }
        match self.store.store(candidate) {
            Ok(()) => log::info!("New best score saved: {}", candidate),
            Err(e) => log::warn!("Could not save best score {}: {}", candidate, e),
        }
        true
    }
}
