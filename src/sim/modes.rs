//! Per-mode rule table and the "collectible eaten" dispatch
//!
//! Every mode difference lives in [`ModeRules`]; adding a mode means adding
//! one table entry, not touching the tick.

use super::collision::CollisionPolicy;
use super::spawn::{Occupancy, SpawnError, spawn_wall};
use super::state::{CollectibleKind, GameState, Mode};
use super::tick::GameEvent;
use crate::consts::SPEED_MULTIPLIER;

/// What happens when the head crosses a board edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeBehavior {
    /// Toroidal wrap to the opposite edge
    Wrap,
    /// Position is left off-board for the collision check
    Bounded,
}

/// Which collectibles a mode keeps on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleLayout {
    Food,
    /// Portals replace food
    PortalPair,
}

/// Extra effect applied after each meal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EatenEffect {
    /// Multiply the tick rate by `SPEED_MULTIPLIER`
    SpeedUp,
    /// Add one wall cell
    SpawnWall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRules {
    pub edges: EdgeBehavior,
    pub collision: CollisionPolicy,
    pub collectibles: CollectibleLayout,
    pub on_eaten: &'static [EatenEffect],
}

const CLASSIC: ModeRules = ModeRules {
    edges: EdgeBehavior::Bounded,
    collision: CollisionPolicy::STANDARD,
    collectibles: CollectibleLayout::Food,
    on_eaten: &[],
};

const NO_DIE: ModeRules = ModeRules {
    edges: EdgeBehavior::Wrap,
    collision: CollisionPolicy::IMMORTAL,
    collectibles: CollectibleLayout::Food,
    on_eaten: &[],
};

const SPEED: ModeRules = ModeRules {
    on_eaten: &[EatenEffect::SpeedUp],
    ..CLASSIC
};

const WALLS: ModeRules = ModeRules {
    collision: CollisionPolicy::WALLED,
    on_eaten: &[EatenEffect::SpawnWall],
    ..CLASSIC
};

const PORTAL: ModeRules = ModeRules {
    collectibles: CollectibleLayout::PortalPair,
    ..CLASSIC
};

impl Mode {
    /// Rule table entry for this mode
    pub const fn rules(self) -> &'static ModeRules {
        match self {
            Mode::Classic => &CLASSIC,
            Mode::NoDie => &NO_DIE,
            Mode::Speed => &SPEED,
            Mode::Walls => &WALLS,
            Mode::Portal => &PORTAL,
        }
    }
}

/// Resolve whatever the freshly moved head is standing on.
///
/// Food grows the snake and is replaced; a portal sends the head to its
/// partner, grows the snake, and the pair is replaced. Each meal scores one
/// point and then runs the mode's extra effects.
pub fn resolve_consumption(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
) -> Result<(), SpawnError> {
    let head = state.snake.head();
    let Some(item) = state.collectible_at(head) else {
        return Ok(());
    };

    match item.kind {
        CollectibleKind::Food => {
            state.snake.grow();
            events.push(GameEvent::AteFood { at: head });
        }
        CollectibleKind::PortalA | CollectibleKind::PortalB => {
            let exit = state
                .collectibles
                .iter()
                .find(|c| c.is_portal() && c.kind != item.kind)
                .map(|c| c.pos)
                .unwrap_or(head);
            state.snake.relocate_head(exit);
            state.snake.grow();
            events.push(GameEvent::Teleported {
                from: head,
                to: exit,
            });
        }
    }

    state.score = state.score.saturating_add(1);
    state.replenish_collectibles()?;

    for effect in state.mode.rules().on_eaten {
        match effect {
            EatenEffect::SpeedUp => {
                state.tick_rate *= SPEED_MULTIPLIER;
                events.push(GameEvent::SpedUp {
                    tick_rate: state.tick_rate,
                });
            }
            EatenEffect::SpawnWall => {
                let occupancy = Occupancy::new(&state.snake, &state.walls, &state.collectibles);
                let wall = spawn_wall(&mut state.rng, &state.grid, &occupancy)?;
                state.walls.push(wall);
                events.push(GameEvent::WallSpawned { at: wall });
            }
        }
    }

    Ok(())
}
