//! Pointer input on the active bird
//!
//! Press inside the active bird to grab it, drag to pull the sling, release
//! to launch. Launching immediately spawns the next bird at the sling.
//! Input outside [`GamePhase::Active`] is ignored.

use glam::Vec2;

use super::error::SimError;
use super::state::{Bird, EntityId, GameEvent, GamePhase, GameState};
use crate::consts::{LAUNCH_BASE, LAUNCH_PER_PIXEL};

/// Launch velocity for a bird released at `release` from a sling anchored at `anchor`.
///
/// The pull is scaled by a factor that grows with its length, so longer
/// drags launch disproportionately faster.
pub fn launch_velocity(anchor: Vec2, release: Vec2) -> Vec2 {
    let pull = anchor - release;
    pull * (LAUNCH_BASE + pull.length() * LAUNCH_PER_PIXEL)
}

/// Id of the active bird; its absence while playing is a broken invariant
fn active_bird_id(state: &GameState) -> Result<EntityId, SimError> {
    state.active_bird.ok_or_else(|| {
        log::error!("Input with no active bird");
        SimError::NoActiveBird
    })
}

fn active_bird_mut(state: &mut GameState) -> Result<&mut Bird, SimError> {
    let id = active_bird_id(state)?;
    state.bird_mut(id).ok_or_else(|| {
        log::error!("Active bird {} is not alive", id);
        SimError::UnknownEntity(id)
    })
}

/// Begin dragging if `pos` is inside the active bird. Returns whether a drag started.
pub fn pointer_down(state: &mut GameState, pos: Vec2) -> Result<bool, SimError> {
    if state.phase != GamePhase::Active {
        return Ok(false);
    }
    let bird = active_bird_mut(state)?;
    if bird.in_flight || !bird.contains_point(pos) {
        return Ok(false);
    }
    bird.is_dragging = true;
    Ok(true)
}

/// Move the dragged bird and the sling end. Returns whether anything moved.
pub fn pointer_move(state: &mut GameState, pos: Vec2) -> Result<bool, SimError> {
    if state.phase != GamePhase::Active {
        return Ok(false);
    }
    let bird = active_bird_mut(state)?;
    if !bird.is_dragging {
        return Ok(false);
    }
    bird.pos = pos;
    state.sling.end = pos;
    Ok(true)
}

/// Release the dragged bird. Returns the launched bird's id.
pub fn pointer_up(state: &mut GameState) -> Result<Option<EntityId>, SimError> {
    if state.phase != GamePhase::Active {
        return Ok(None);
    }
    let anchor = state.sling.start;
    let bird = active_bird_mut(state)?;
    if !bird.is_dragging {
        return Ok(None);
    }

    let vel = launch_velocity(anchor, bird.pos);
    bird.vel = vel;
    bird.is_dragging = false;
    bird.in_flight = true;
    let id = bird.id;

    state.sling.reset();
    let next = state.spawn_bird();
    state.emit(GameEvent::BirdLaunched { id, vel });
    log::debug!("Launched bird {} at {:?}, next bird {}", id, vel, next);
    Ok(Some(id))
}
