//! Procedural placement of food, portals and walls
//!
//! Placement is rejection sampling over the whole board with a bounded number
//! of draws. When the board is too crowded for sampling to succeed, the free
//! cells are enumerated and one is picked uniformly; only when too few free
//! cells remain does placement fail with [`SpawnError::BoardFull`].

use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::GridSpace;
use super::snake::Snake;
use super::state::{Collectible, Position};
use crate::consts::MAX_SPAWN_ATTEMPTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("board full: needed {needed} free cell(s), found {free}")]
    BoardFull { needed: usize, free: usize },
}

/// Everything a new item must not land on
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    snake: &'a Snake,
    walls: &'a [Position],
    collectibles: &'a [Collectible],
}

impl<'a> Occupancy<'a> {
    pub fn new(snake: &'a Snake, walls: &'a [Position], collectibles: &'a [Collectible]) -> Self {
        Self {
            snake,
            walls,
            collectibles,
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.snake.contains(pos)
            || self.walls.contains(&pos)
            || self.collectibles.iter().any(|c| c.pos == pos)
    }

    fn free_cells(&self, grid: &GridSpace) -> Vec<Position> {
        grid.cells().filter(|&cell| !self.is_occupied(cell)).collect()
    }
}

fn random_cell<R: Rng>(rng: &mut R, grid: &GridSpace) -> Position {
    Position::new(
        rng.random_range(0..grid.width()),
        rng.random_range(0..grid.height()),
    )
}

fn free_cell<R: Rng>(
    rng: &mut R,
    grid: &GridSpace,
    occupancy: &Occupancy<'_>,
) -> Result<Position, SpawnError> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = random_cell(rng, grid);
        if !occupancy.is_occupied(candidate) {
            return Ok(candidate);
        }
    }

    let free = occupancy.free_cells(grid);
    log::warn!(
        "Spawn sampling exhausted after {MAX_SPAWN_ATTEMPTS} draws, {} free cell(s) left",
        free.len()
    );
    free.choose(rng)
        .copied()
        .ok_or(SpawnError::BoardFull { needed: 1, free: 0 })
}

/// Place a single food item
pub fn spawn_food<R: Rng>(
    rng: &mut R,
    grid: &GridSpace,
    occupancy: &Occupancy<'_>,
) -> Result<Collectible, SpawnError> {
    free_cell(rng, grid, occupancy).map(Collectible::food)
}

/// Place a wall cell. The caller appends it to the wall set.
pub fn spawn_wall<R: Rng>(
    rng: &mut R,
    grid: &GridSpace,
    occupancy: &Occupancy<'_>,
) -> Result<Position, SpawnError> {
    free_cell(rng, grid, occupancy)
}

/// Place two linked portals on distinct free cells.
///
/// Each endpoint is validated on its own and the pair is redrawn if both
/// endpoints landed on the same cell.
pub fn spawn_portal_pair<R: Rng>(
    rng: &mut R,
    grid: &GridSpace,
    occupancy: &Occupancy<'_>,
) -> Result<[Collectible; 2], SpawnError> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let a = random_cell(rng, grid);
        let b = random_cell(rng, grid);
        if a != b && !occupancy.is_occupied(a) && !occupancy.is_occupied(b) {
            return Ok(Collectible::portal_pair(a, b));
        }
    }

    let free = occupancy.free_cells(grid);
    log::warn!(
        "Portal sampling exhausted after {MAX_SPAWN_ATTEMPTS} draws, {} free cell(s) left",
        free.len()
    );
    let picked: Vec<Position> = free.choose_multiple(rng, 2).copied().collect();
    match picked.as_slice() {
        [a, b] => Ok(Collectible::portal_pair(*a, *b)),
        _ => Err(SpawnError::BoardFull {
            needed: 2,
            free: free.len(),
        }),
    }
}
