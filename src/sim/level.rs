//! Level generation and progression

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Star, Target, TargetColor};
use super::timers::TimerKind;
use crate::consts::*;
use crate::secs_to_ticks;

/// Targets on a given level
pub fn target_count(level: u32) -> usize {
    level as usize + 3
}

/// Stars on a given level
pub fn star_count(level: u32) -> usize {
    level as usize + 2
}

/// Random top-left corner right of `SPAWN_MIN_X` that keeps the object on the canvas
pub fn random_position(rng: &mut impl Rng, canvas: Vec2, size: Vec2) -> Vec2 {
    let span_x = (canvas.x - SPAWN_MIN_X - size.x).max(0.0);
    let span_y = (canvas.y - size.y).max(0.0);
    Vec2::new(
        SPAWN_MIN_X + rng.random::<f32>() * span_x,
        rng.random::<f32>() * span_y,
    )
}

pub fn generate_targets(state: &mut GameState, level: u32) -> Vec<Target> {
    let canvas = state.canvas_size();
    (0..target_count(level))
        .map(|i| {
            let pos = random_position(&mut state.rng, canvas, Vec2::splat(TARGET_SIZE));
            Target::new(state.next_entity_id(), pos, TargetColor::for_index(i))
        })
        .collect()
}

pub fn generate_stars(state: &mut GameState, level: u32) -> Vec<Star> {
    let canvas = state.canvas_size();
    (0..star_count(level))
        .map(|_| {
            let pos = random_position(&mut state.rng, canvas, Vec2::splat(STAR_SIZE));
            Star::new(state.next_entity_id(), pos)
        })
        .collect()
}

/// Hand-placed targets of the opening board
pub fn starter_targets(state: &mut GameState) -> Vec<Target> {
    [(1500.0, 300.0), (1300.0, 400.0), (1400.0, 250.0), (1200.0, 330.0)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| {
            Target::new(state.next_entity_id(), Vec2::new(x, y), TargetColor::for_index(i))
        })
        .collect()
}

/// Hand-placed stars of the opening board
pub fn starter_stars(state: &mut GameState) -> Vec<Star> {
    [(1400.0, 450.0), (1350.0, 250.0), (1250.0, 300.0)]
        .into_iter()
        .map(|(x, y)| Star::new(state.next_entity_id(), Vec2::new(x, y)))
        .collect()
}

impl GameState {
    /// Replace stars and targets with a fresh batch for the current level
    pub fn regenerate_level(&mut self) {
        let level = self.level;
        self.stars = generate_stars(self, level);
        self.targets = generate_targets(self, level);
        log::debug!(
            "Level {}: {} targets, {} stars",
            level,
            self.targets.len(),
            self.stars.len()
        );
    }
}

/// Drop faded birds and stars. Targets stay.
pub fn prune(state: &mut GameState) {
    let timers = &mut state.timers;
    state.birds.retain(|bird| {
        let alive = bird.opacity > 0.0;
        if let (false, Some(timer)) = (alive, bird.fade_timer) {
            timers.cancel(timer);
        }
        alive
    });
    state.stars.retain(|star| star.opacity > 0.0);
}

/// Latch the clear once the last star is gone. Returns true on the latching frame.
pub fn check_level_clear(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Active || !state.stars.is_empty() {
        return false;
    }
    let level = state.level;
    let delay = secs_to_ticks(LEVEL_CLEAR_DELAY_SECS, state.settings.ticks_per_second);
    state.phase = GamePhase::Clearing { level };
    state.timers.schedule(delay, TimerKind::LevelClear { level });
    log::debug!("Level {} cleared", level);
    true
}

/// Announce the cleared level and move on, or finish the game after the last one
pub fn advance_level(state: &mut GameState) {
    let GamePhase::Clearing { level } = state.phase else {
        log::warn!("Level advance outside of clearing phase ({:?})", state.phase);
        return;
    };

    state.emit(GameEvent::LevelComplete { level });

    // Terminal: the last board is not regenerated and frames stop here.
    // Playing on requires `GameState::restart`.
    if state.level >= MAX_LEVEL {
        state.phase = GamePhase::Completed;
        state.emit(GameEvent::GameComplete);
        log::debug!("Game complete");
        return;
    }

    state.level += 1;
    state.timers.cancel_bird_timers();
    state.birds.clear();
    state.sling.reset();
    state.spawn_bird();
    state.regenerate_level();
    state.phase = GamePhase::Active;
}
