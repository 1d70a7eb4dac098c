//! Best score tracking
//!
//! The current score lives on `GameState`; this tracks the best score across
//! runs and hands it to whatever store the platform provides.

/// Persistence seam for the single best-score scalar
pub trait BestScoreStore {
    /// Stored best, or 0 when absent or unreadable
    fn load_best_score(&self) -> u32;
    /// Persist a new best. Failures are the store's to report; they never
    /// reach the game.
    fn save_best_score(&mut self, score: u32);
}

/// Parse a stored best score the lenient way: leading digits count,
/// anything else (missing, empty, garbage) is 0.
pub fn parse_best_score(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    match trimmed[..digits_end].parse() {
        Ok(score) => score,
        Err(_) => {
            if !raw.trim().is_empty() {
                log::warn!("Ignoring malformed best score {raw:?}");
            }
            0
        }
    }
}

/// Store that forgets everything on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self) -> u32 {
        self.best
    }

    fn save_best_score(&mut self, score: u32) {
        self.best = score;
    }
}

/// Best score across runs
pub struct ScoreTracker {
    best: u32,
    store: Box<dyn BestScoreStore>,
}

impl ScoreTracker {
    /// Load the stored best score once, up front
    pub fn new(store: Box<dyn BestScoreStore>) -> Self {
        let best = store.load_best_score();
        log::info!("Best score loaded: {best}");
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Whether a run's score beats the best so far
    pub fn is_new_best(&self, score: u32) -> bool {
        score > self.best
    }

    /// Replace and persist the best score if `score` beats it.
    ///
    /// Returns true when a new best was saved.
    pub fn commit(&mut self, score: u32) -> bool {
        if !self.is_new_best(score) {
            return false;
        }
        self.best = score;
        self.store.save_best_score(score);
        log::info!("New best score saved: {score}");
        true
    }
}

impl std::fmt::Debug for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreTracker")
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records how many times it was asked to save
    struct CountingStore {
        saves: Rc<Cell<u32>>,
    }

    impl BestScoreStore for CountingStore {
        fn load_best_score(&self) -> u32 {
            5
        }

        fn save_best_score(&mut self, _score: u32) {
            self.saves.set(self.saves.get() + 1);
        }
    }

    #[test]
    fn test_parse_best_score() {
        assert_eq!(parse_best_score(None), 0);
        assert_eq!(parse_best_score(Some("")), 0);
        assert_eq!(parse_best_score(Some("42")), 42);
        assert_eq!(parse_best_score(Some(" 17\n")), 17);
        assert_eq!(parse_best_score(Some("12abc")), 12);
        assert_eq!(parse_best_score(Some("abc")), 0);
        assert_eq!(parse_best_score(Some("-3")), 0);
        assert_eq!(parse_best_score(Some("99999999999999999999")), 0);
    }

    #[test]
    fn test_commit_only_saves_improvements() {
        let saves = Rc::new(Cell::new(0));
        let mut tracker = ScoreTracker::new(Box::new(CountingStore {
            saves: Rc::clone(&saves),
        }));
        assert_eq!(tracker.best(), 5);

        assert!(!tracker.commit(3));
        assert!(!tracker.commit(5));
        assert_eq!(saves.get(), 0);

        assert!(tracker.commit(8));
        assert_eq!(tracker.best(), 8);
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load_best_score(), 0);
        store.save_best_score(12);
        assert_eq!(store.load_best_score(), 12);
    }
}
