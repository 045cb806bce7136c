//! Frame loop
//!
//! One call to [`tick`] is one display frame. Order within a frame:
//! fire due timers, integrate, resolve collisions, prune, check for a
//! cleared level. Collisions must see the frame's integrated positions.

use super::collision::resolve_collisions;
use super::level::{advance_level, check_level_clear, prune};
use super::physics::integrate;
use super::state::{GamePhase, GameState};
use super::timers::TimerKind;

/// Advance the game by one frame
pub fn tick(state: &mut GameState) {
    if state.phase == GamePhase::Completed {
        return;
    }

    for timer in state.timers.advance() {
        match timer {
            TimerKind::BirdFade { bird } => {
                if let Some(bird) = state.bird_mut(bird) {
                    bird.fade_timer = None;
                    bird.fading = true;
                }
            }
            TimerKind::LevelClear { .. } => advance_level(state),
        }
    }

    // Frames are suspended between clearing a level and advancing
    if state.phase != GamePhase::Active {
        return;
    }

    integrate(state);
    resolve_collisions(state);
    prune(state);
    check_level_clear(state);
}
