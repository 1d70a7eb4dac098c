//! Snake Modes - a grid snake rule engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, mode rules)
//! - `scheduler`: Fixed-rate game loop and run state machine
//! - `score`: Current/best score tracking and the best-score store seam
//! - `platform`: Input slot and storage backends (file on native, LocalStorage on web)
//! - `settings`: Run configuration

pub mod platform;
pub mod scheduler;
pub mod score;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::{Frame, GameLoop, LoopState, RenderSink};
pub use score::{BestScoreStore, MemoryStore, ScoreTracker};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Board is a fixed square of cells
    pub const GRID_SIZE: i32 = 20;

    /// Starting snake, head first
    pub const INITIAL_SNAKE: [(i32, i32); 2] = [(1, 10), (0, 10)];

    /// Ticks per second at the start of every run
    pub const INITIAL_TICK_RATE: f32 = 10.0;
    /// Speed mode multiplies the tick rate by this on every meal
    pub const SPEED_MULTIPLIER: f32 = 1.10;

    /// Random draws before a spawn falls back to enumerating free cells
    pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

    /// Largest frame delta the loop will accumulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_TICKS_PER_ADVANCE: u32 = 8;
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: glam::IVec2, b: glam::IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
