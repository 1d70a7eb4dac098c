//! The snake body and its per-tick movement
//!
//! Growth is deferred: eating queues one extra segment, and the next move that
//! finds the queue non-empty keeps its tail instead of dropping it.

use std::collections::VecDeque;

use super::state::{Direction, Position};
use crate::consts::INITIAL_SNAKE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Head first; never empty
    body: VecDeque<Position>,
    direction: Direction,
    growth_queue: u32,
}

impl Snake {
    /// The starting snake: two cells on row 10, heading right
    pub fn initial() -> Self {
        let body = INITIAL_SNAKE
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect();
        Self {
            body,
            direction: Direction::Right,
            growth_queue: 0,
        }
    }

    /// Build a snake from explicit segments (head first).
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            growth_queue: 0,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth_queue(&self) -> u32 {
        self.growth_queue
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Change heading unless it would reverse onto the neck.
    ///
    /// Returns whether the new heading was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Head shifted one cell along the heading, before any edge handling
    pub fn next_head(&self) -> Position {
        self.head() + self.direction.delta()
    }

    /// Whether the next move keeps the current tail in place
    pub fn retains_tail(&self) -> bool {
        self.growth_queue > 0
    }

    /// Whether `pos` will still be covered by the body once the next move
    /// commits. The tail only counts when it is not about to vacate.
    pub fn occupies_after_move(&self, pos: Position) -> bool {
        let kept = if self.retains_tail() {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(kept).any(|&seg| seg == pos)
    }

    /// Commit a move to `new_head`, consuming one queued growth if present
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_front(new_head);
        if self.growth_queue > 0 {
            self.growth_queue -= 1;
        } else {
            self.body.pop_back();
        }
    }

    /// Queue one extra segment for a later move
    pub fn grow(&mut self) {
        self.growth_queue += 1;
    }

    /// Overwrite the head cell in place (portal exit)
    pub fn relocate_head(&mut self, pos: Position) {
        self.body[0] = pos;
    }
}
