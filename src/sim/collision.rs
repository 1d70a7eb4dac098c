//! Collision detection for the candidate head
//!
//! The candidate is checked before it is committed, against the body as it
//! will look after the move: the tail is excluded when it is about to vacate
//! and included when pending growth keeps it in place.

use serde::{Deserialize, Serialize};

use super::grid::GridSpace;
use super::snake::Snake;
use super::state::Position;

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionKind {
    OffBoard,
    SelfOverlap,
    Wall,
}

/// Which collisions end the run for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPolicy {
    pub off_board: bool,
    pub self_overlap: bool,
    pub walls: bool,
}

impl CollisionPolicy {
    /// Board edges and own body are lethal
    pub const STANDARD: Self = Self {
        off_board: true,
        self_overlap: true,
        walls: false,
    };
    /// Standard plus placed walls
    pub const WALLED: Self = Self {
        off_board: true,
        self_overlap: true,
        walls: true,
    };
    /// Nothing is lethal
    pub const IMMORTAL: Self = Self {
        off_board: false,
        self_overlap: false,
        walls: false,
    };
}

/// Decide whether moving the head to `candidate` ends the run
pub fn check_collision(
    policy: &CollisionPolicy,
    grid: &GridSpace,
    snake: &Snake,
    walls: &[Position],
    candidate: Position,
) -> Option<CollisionKind> {
    if policy.off_board && !grid.in_bounds(candidate) {
        return Some(CollisionKind::OffBoard);
    }

    if policy.self_overlap && snake.occupies_after_move(candidate) {
        return Some(CollisionKind::SelfOverlap);
    }

    if policy.walls && walls.contains(&candidate) {
        return Some(CollisionKind::Wall);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Snake curled into a square; heading down puts the head on its tail.
    fn curled() -> Snake {
        Snake::from_segments([p(1, 1), p(2, 1), p(2, 2), p(1, 2)], Direction::Down)
            .expect("non-empty")
    }

    #[test]
    fn test_off_board_is_terminal_when_bounded() {
        let grid = GridSpace::default();
        let snake = Snake::from_segments([p(0, 10)], Direction::Left).expect("non-empty");
        let hit = check_collision(&CollisionPolicy::STANDARD, &grid, &snake, &[], p(-1, 10));
        assert_eq!(hit, Some(CollisionKind::OffBoard));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_safe() {
        let grid = GridSpace::default();
        let snake = curled();
        // Heading down from (1,1) lands on (1,2), the current tail
        let hit = check_collision(&CollisionPolicy::STANDARD, &grid, &snake, &[], p(1, 2));
        assert_eq!(hit, None);
    }

    #[test]
    fn test_moving_into_retained_tail_is_terminal() {
        let grid = GridSpace::default();
        let mut snake = curled();
        snake.grow();
        let hit = check_collision(&CollisionPolicy::STANDARD, &grid, &snake, &[], p(1, 2));
        assert_eq!(hit, Some(CollisionKind::SelfOverlap));
    }

    #[test]
    fn test_body_overlap_is_terminal() {
        let grid = GridSpace::default();
        let snake = curled();
        let hit = check_collision(&CollisionPolicy::STANDARD, &grid, &snake, &[], p(2, 2));
        assert_eq!(hit, Some(CollisionKind::SelfOverlap));
    }

    #[test]
    fn test_walls_only_lethal_when_policy_says_so() {
        let grid = GridSpace::default();
        let snake = Snake::initial();
        let walls = [p(2, 10)];
        assert_eq!(
            check_collision(&CollisionPolicy::STANDARD, &grid, &snake, &walls, p(2, 10)),
            None
        );
        assert_eq!(
            check_collision(&CollisionPolicy::WALLED, &grid, &snake, &walls, p(2, 10)),
            Some(CollisionKind::Wall)
        );
    }

    #[test]
    fn test_immortal_policy_never_reports() {
        let grid = GridSpace::default();
        let snake = curled();
        let walls = [p(5, 5)];
        for candidate in [p(-1, 0), p(2, 2), p(5, 5), p(20, 20)] {
            assert_eq!(
                check_collision(&CollisionPolicy::IMMORTAL, &grid, &snake, &walls, candidate),
                None
            );
        }
    }
}
