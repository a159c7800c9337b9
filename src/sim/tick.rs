//! Per-frame simulation tick
//!
//! One call advances the world by one frame and reports what happened.

use glam::Vec2;

use super::patrol;
use super::state::{GameEvent, GamePhase, GameState};
use crate::LevelError;

/// Player intent for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal direction, -1 (left) to 1 (right)
    pub move_x: f32,
    /// Jump was pressed since the last tick
    pub jump: bool,
    /// Restart was clicked since the last tick
    pub restart: bool,
}

/// Advance the game by one frame.
///
/// Every level was checked when the session started, so advancing always
/// succeeds for a state built by `GameState::new`. Errors only come from an
/// out-of-range level index, and leave the state as it was.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<Vec<GameEvent>, LevelError> {
    let mut events = Vec::new();

    // End states only listen for restart
    if state.phase.is_over() {
        if input.restart {
            state.restart()?;
            events.push(GameEvent::Restarted {
                level: state.level_index,
            });
        }
        return Ok(events);
    }

    state.time_ticks += 1;

    apply_intent(state, input, &mut events);

    state
        .physics
        .step(&mut state.entities.player.body, &state.entities.obstacles);

    patrol::advance_all(&mut state.entities.hazards);

    collect_items(state, &mut events);

    patrol::reflect_all(
        &mut state.entities.hazards,
        state.level.reflecting_surfaces(),
    );

    let player = state.entities.player.bounds();
    if state
        .entities
        .hazards
        .iter()
        .any(|h| h.bounds().overlaps(&player))
    {
        log::info!("Defeated on level {} with score {}", state.level_index, state.score);
        state.phase = GamePhase::GameOver;
        state.viewport_origin = Vec2::ZERO;
        events.push(GameEvent::Defeated);
        return Ok(events);
    }

    let mut viewport_reset = false;

    if state.level.respawn_on_fall && player.center().y < state.settings.fall_depth {
        log::debug!("Player fell off level {}", state.level_index);
        state.respawn_player();
        viewport_reset = true;
        events.push(GameEvent::Fell);
    }

    let player = state.entities.player.bounds();
    if state
        .entities
        .lethal_tiles
        .iter()
        .any(|t| t.overlaps(&player))
    {
        log::debug!("Player touched lethal terrain at {:?}", player.center());
        state.respawn_player();
        viewport_reset = true;
        events.push(GameEvent::TouchedHazard);
    }

    if state.reached_end() {
        if state.is_final_level() {
            log::info!("Final level cleared with score {}", state.score);
            state.phase = GamePhase::Victory;
            events.push(GameEvent::Victory);
        } else {
            let next = state.level_index + 1;
            state.setup(next)?;
            events.push(GameEvent::LevelAdvanced { level: next });
        }
        return Ok(events);
    }

    if !viewport_reset {
        let player = state.entities.player.bounds();
        if let Some(origin) = state.camera.follow(state.viewport_origin, &player) {
            state.viewport_origin = origin;
        }
    }

    Ok(events)
}

fn apply_intent(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let body = &mut state.entities.player.body;
    body.velocity.x = input.move_x.clamp(-1.0, 1.0) * state.settings.movement_speed;

    if input.jump {
        let grounded = state.physics.can_jump(body, &state.entities.obstacles);
        body.velocity.y = if grounded && state.level.full_jump {
            state.settings.jump_speed
        } else {
            state.settings.reduced_jump_speed()
        };
        events.push(GameEvent::Jumped);
    }
}

/// Remove every collectible the player overlaps, one point each
fn collect_items(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.entities.player.bounds();
    let before = state.entities.collectibles.len();
    state
        .entities
        .collectibles
        .retain(|c| !c.bounds.overlaps(&player));
    let collected = (before - state.entities.collectibles.len()) as u32;

    if collected > 0 {
        state.score += collected;
        events.extend(std::iter::repeat_n(GameEvent::Collected, collected as usize));
    }
}
