//! Game state and core simulation types
//!
//! A `GameState` is created when a run starts and replaced on reset. It owns
//! everything the rules mutate, including the run's RNG.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionKind;
use super::grid::GridSpace;
use super::modes::CollectibleLayout;
use super::snake::Snake;
use super::spawn::{Occupancy, SpawnError, spawn_food, spawn_portal_pair};
use crate::consts::INITIAL_TICK_RATE;

/// A board cell. Off-board values only exist as unchecked candidate heads.
pub type Position = IVec2;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One-cell offset for this heading (y grows downward)
    pub const fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Game mode, fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    #[default]
    Classic,
    NoDie,
    Speed,
    Walls,
    Portal,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Classic,
        Mode::NoDie,
        Mode::Speed,
        Mode::Walls,
        Mode::Portal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::NoDie => "noDie",
            Mode::Speed => "speed",
            Mode::Walls => "walls",
            Mode::Portal => "portal",
        }
    }

    /// Parse a mode name, falling back to classic for anything unrecognized
    pub fn from_name_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(mode) => mode,
            Err(err) => {
                log::warn!("{err}, falling back to {}", Mode::Classic);
                Mode::Classic
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode name that matches no known mode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game mode {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Mode::Classic),
            "nodie" | "no-die" | "no_die" => Ok(Mode::NoDie),
            "speed" => Ok(Mode::Speed),
            "walls" => Ok(Mode::Walls),
            "portal" => Ok(Mode::Portal),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectibleKind {
    Food,
    PortalA,
    PortalB,
}

/// Something the head can consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Position,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn food(pos: Position) -> Self {
        Self {
            pos,
            kind: CollectibleKind::Food,
        }
    }

    /// Linked portals; touching one exits through the other
    pub fn portal_pair(a: Position, b: Position) -> [Self; 2] {
        [
            Self {
                pos: a,
                kind: CollectibleKind::PortalA,
            },
            Self {
                pos: b,
                kind: CollectibleKind::PortalB,
            },
        ]
    }

    pub fn is_portal(&self) -> bool {
        matches!(self.kind, CollectibleKind::PortalA | CollectibleKind::PortalB)
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    /// Terminal collision for the active mode
    Collision(CollisionKind),
    /// No free cell left for a required spawn
    BoardFull,
    /// Ended from outside (menu, exit button)
    Stopped,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Mode chosen at start
    pub mode: Mode,
    pub grid: GridSpace,
    pub snake: Snake,
    /// Either one food or one portal pair, depending on mode
    pub collectibles: Vec<Collectible>,
    /// Append-only for the run (walls mode only)
    pub walls: Vec<Position>,
    pub score: u32,
    /// Ticks per second
    pub tick_rate: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub running: bool,
    pub end_reason: Option<EndReason>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new run on the standard board with the starting snake
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self::with_snake(mode, seed, GridSpace::default(), Snake::initial())
    }

    /// Create a run with a custom board and snake, then place its collectibles
    pub fn with_snake(mode: Mode, seed: u64, grid: GridSpace, snake: Snake) -> Self {
        let mut state = Self {
            seed,
            mode,
            grid,
            snake,
            collectibles: Vec::new(),
            walls: Vec::new(),
            score: 0,
            tick_rate: INITIAL_TICK_RATE,
            time_ticks: 0,
            running: true,
            end_reason: None,
            rng: Pcg32::seed_from_u64(seed),
        };

        if let Err(err) = state.replenish_collectibles() {
            log::warn!("Run could not place its first collectible: {err}");
            state.finish(EndReason::BoardFull);
        }

        state
    }

    /// Place the collectibles this mode needs, replacing any that remain
    pub fn replenish_collectibles(&mut self) -> Result<(), SpawnError> {
        self.collectibles.clear();
        let occupancy = Occupancy::new(&self.snake, &self.walls, &self.collectibles);
        match self.mode.rules().collectibles {
            CollectibleLayout::Food => {
                let food = spawn_food(&mut self.rng, &self.grid, &occupancy)?;
                self.collectibles.push(food);
            }
            CollectibleLayout::PortalPair => {
                let pair = spawn_portal_pair(&mut self.rng, &self.grid, &occupancy)?;
                self.collectibles.extend(pair);
            }
        }
        Ok(())
    }

    /// Collectible under the given cell, if any
    pub fn collectible_at(&self, pos: Position) -> Option<Collectible> {
        self.collectibles.iter().copied().find(|c| c.pos == pos)
    }

    pub fn food(&self) -> Option<Position> {
        self.collectibles
            .iter()
            .find(|c| c.kind == CollectibleKind::Food)
            .map(|c| c.pos)
    }

    /// Both portal positions, when a pair is on the board
    pub fn portals(&self) -> Option<(Position, Position)> {
        let a = self
            .collectibles
            .iter()
            .find(|c| c.kind == CollectibleKind::PortalA)?;
        let b = self
            .collectibles
            .iter()
            .find(|c| c.kind == CollectibleKind::PortalB)?;
        Some((a.pos, b.pos))
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    /// Stop the run; the first reason recorded wins
    pub fn finish(&mut self, reason: EndReason) {
        if self.running {
            self.running = false;
            self.end_reason = Some(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), IVec2::new(0, -1));
        assert_eq!(Direction::Down.delta(), IVec2::new(0, 1));
        assert_eq!(Direction::Left.delta(), IVec2::new(-1, 0));
        assert_eq!(Direction::Right.delta(), IVec2::new(1, 0));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("noDie".parse::<Mode>(), Ok(Mode::NoDie));
        assert_eq!(" Walls ".parse::<Mode>(), Ok(Mode::Walls));
        assert_eq!(
            "hardcore".parse::<Mode>(),
            Err(UnknownMode("hardcore".to_string()))
        );
        assert_eq!(Mode::from_name_or_default("hardcore"), Mode::Classic);
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::NoDie).unwrap(), "\"noDie\"");
        let mode: Mode = serde_json::from_str("\"portal\"").unwrap();
        assert_eq!(mode, Mode::Portal);
    }

    #[test]
    fn test_new_classic_run_has_one_food() {
        let state = GameState::new(Mode::Classic, 7);
        assert!(state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.collectibles.len(), 1);
        let food = state.food().expect("food placed");
        assert!(!state.snake.contains(food));
        assert!(state.portals().is_none());
    }

    #[test]
    fn test_new_portal_run_has_pair_and_no_food() {
        let state = GameState::new(Mode::Portal, 7);
        assert!(state.food().is_none());
        let (a, b) = state.portals().expect("portal pair placed");
        assert_ne!(a, b);
        assert!(!state.snake.contains(a));
        assert!(!state.snake.contains(b));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(Mode::Walls, 42);
        let b = GameState::new(Mode::Walls, 42);
        assert_eq!(a.collectibles, b.collectibles);
    }

    #[test]
    fn test_zero_sized_board_ends_instead_of_panicking() {
        let snake = Snake::from_segments([IVec2::ZERO], Direction::Right).expect("non-empty");
        let state = GameState::with_snake(Mode::Classic, 1, GridSpace::new(0, 0), snake);
        assert!(!state.running);
        assert_eq!(state.end_reason, Some(EndReason::BoardFull));
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_finish_keeps_first_reason() {
        let mut state = GameState::new(Mode::Classic, 1);
        state.finish(EndReason::BoardFull);
        state.finish(EndReason::Stopped);
        assert!(!state.running);
        assert_eq!(state.end_reason, Some(EndReason::BoardFull));
    }
}
