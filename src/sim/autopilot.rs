//! Idle/demo steering
//!
//! Greedy: head for the nearest collectible using any heading that does not
//! reverse and does not end the run on the next move.

use super::collision::check_collision;
use super::state::{Direction, GameState};
use crate::manhattan;

/// Pick a heading for the next tick, or `None` to keep going straight
pub fn suggest_direction(state: &GameState) -> Option<Direction> {
    let rules = state.mode.rules();
    let head = state.snake.head();
    let current = state.snake.direction();

    let target = state
        .collectibles
        .iter()
        .map(|c| c.pos)
        .min_by_key(|&pos| manhattan(head, pos));

    let mut best: Option<(i32, Direction)> = None;
    for direction in Direction::ALL {
        if current.is_opposite(direction) {
            continue;
        }
        let candidate = state.grid.resolve(head + direction.delta(), rules.edges);
        let terminal = check_collision(
            &rules.collision,
            &state.grid,
            &state.snake,
            &state.walls,
            candidate,
        )
        .is_some();
        // Even in modes without lethal collisions, prefer not to bite
        if terminal || state.snake.occupies_after_move(candidate) {
            continue;
        }

        let score = target.map_or(0, |t| manhattan(candidate, t));
        // Ties keep the current heading
        let better = match best {
            None => true,
            Some((best_score, _)) => {
                score < best_score || (score == best_score && direction == current)
            }
        };
        if better {
            best = Some((score, direction));
        }
    }

    best.map(|(_, direction)| direction)
}
