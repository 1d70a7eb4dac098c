//! Discrete simulation tick
//!
//! Order within a tick is fixed: steer, compute candidate head, check
//! collision (stop here if terminal), commit the move, resolve whatever the
//! head landed on. Rendering happens outside, after the tick returns.

use serde::Serialize;

use super::autopilot::suggest_direction;
use super::collision::{CollisionKind, check_collision};
use super::modes::resolve_consumption;
use super::spawn::SpawnError;
use super::state::{Direction, EndReason, GameState, Position};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested heading, drained from the input slot at tick start
    pub direction: Option<Direction>,
    /// Idle/demo mode - steer automatically when no direction was requested
    pub autopilot: bool,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A requested heading was refused as a reversal
    TurnRejected { requested: Direction },
    Moved { head: Position },
    AteFood { at: Position },
    Teleported { from: Position, to: Position },
    SpedUp { tick_rate: f32 },
    WallSpawned { at: Position },
    Collided { kind: CollisionKind, at: Position },
    BoardFull,
}

/// Advance the game state by one move.
///
/// Returns the events produced; a stopped run yields none and is left as is.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.running {
        return events;
    }

    let requested = input.direction.or_else(|| {
        if input.autopilot {
            suggest_direction(state)
        } else {
            None
        }
    });
    if let Some(direction) = requested {
        if !state.snake.steer(direction) {
            events.push(GameEvent::TurnRejected {
                requested: direction,
            });
        }
    }

    let rules = state.mode.rules();
    let candidate = state.grid.resolve(state.snake.next_head(), rules.edges);

    if let Some(kind) = check_collision(
        &rules.collision,
        &state.grid,
        &state.snake,
        &state.walls,
        candidate,
    ) {
        log::debug!("Collision ({kind:?}) at {candidate} after {} ticks", state.time_ticks);
        state.finish(EndReason::Collision(kind));
        events.push(GameEvent::Collided {
            kind,
            at: candidate,
        });
        return events;
    }

    state.snake.advance(candidate);
    state.time_ticks += 1;
    events.push(GameEvent::Moved { head: candidate });

    if let Err(SpawnError::BoardFull { needed, free }) = resolve_consumption(state, &mut events) {
        log::info!("Board full (needed {needed}, free {free}), ending run");
        state.finish(EndReason::BoardFull);
        events.push(GameEvent::BoardFull);
    }

    for event in &events {
        match event {
            GameEvent::AteFood { at } => log::debug!("Ate food at {at}, score {}", state.score),
            GameEvent::Teleported { from, to } => log::debug!("Portal {from} -> {to}"),
            GameEvent::SpedUp { tick_rate } => log::debug!("Tick rate now {tick_rate:.2}/s"),
            GameEvent::WallSpawned { at } => log::debug!("Wall placed at {at}"),
            _ => {}
        }
    }

    events
}
