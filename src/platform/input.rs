//! Direction intents from the input collaborator
//!
//! Key handlers may fire at any time, from any thread. They write into a
//! single pending slot; the game loop drains it once at the start of each
//! tick. The latest intent wins and the reversal rule is applied by the
//! simulation, not here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sim::Direction;

/// Single-slot mailbox shared between input handlers and the game loop
#[derive(Debug, Clone, Default)]
pub struct DirectionSlot {
    pending: Arc<Mutex<Option<Direction>>>,
}

impl DirectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Direction>> {
        // A panicking writer cannot leave an Option half-written
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record an intent, replacing any not yet consumed
    pub fn push(&self, direction: Direction) {
        *self.lock() = Some(direction);
    }

    /// Take the pending intent, leaving the slot empty
    pub fn take(&self) -> Option<Direction> {
        self.lock().take()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }
}

/// Map a key name (DOM `KeyboardEvent.key` style) to a heading
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}
