//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - One move per tick
//! - Seeded RNG only
//! - No rendering, timing or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod modes;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::suggest_direction;
pub use collision::{CollisionKind, CollisionPolicy, check_collision};
pub use grid::GridSpace;
pub use modes::{CollectibleLayout, EatenEffect, EdgeBehavior, ModeRules, resolve_consumption};
pub use snake::Snake;
pub use spawn::{Occupancy, SpawnError, spawn_food, spawn_portal_pair, spawn_wall};
pub use state::{
    Collectible, CollectibleKind, Direction, EndReason, GameState, Mode, Position, UnknownMode,
};
pub use tick::{GameEvent, TickInput, tick};
