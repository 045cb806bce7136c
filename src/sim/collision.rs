//! Bird vs. target/star overlap
//!
//! Birds are boxes of half-extent `width` around their center; targets and
//! stars are boxes anchored at their top-left corner.

use glam::Vec2;

use super::state::{Bird, GameEvent, GameState, Star, Target, TargetColor};
use crate::consts::IMPACT_SCALE;

/// Overlap between a bird and a top-left anchored box
#[inline]
pub fn bird_overlaps_box(bird: &Bird, corner: Vec2, size: Vec2) -> bool {
    let w = bird.width;
    bird.pos.x + w > corner.x
        && bird.pos.x - w < corner.x + size.x
        && bird.pos.y + w > corner.y
        && bird.pos.y - w < corner.y + size.y
}

/// Velocity handed to a target struck by `bird`
#[inline]
pub fn impact_velocity(bird: &Bird, target_mass: f32) -> Vec2 {
    bird.vel * bird.width / target_mass * IMPACT_SCALE
}

/// Resolve one bird/target pair.
///
/// Returns true when the target was standing before this hit. Sustained
/// overlap re-stamps the velocity every frame.
pub fn bird_hits_target(bird: &Bird, target: &mut Target) -> bool {
    if !bird_overlaps_box(bird, target.pos, Vec2::new(target.width, target.height)) {
        return false;
    }
    let toppled = !target.is_falling;
    target.color = TargetColor::Destroyed;
    target.is_falling = true;
    target.vel = impact_velocity(bird, target.mass);
    toppled
}

/// Resolve one bird/star pair. Returns true on the first touch.
pub fn bird_hits_star(bird: &Bird, star: &mut Star) -> bool {
    if !bird_overlaps_box(bird, star.pos, Vec2::new(star.width, star.height)) {
        return false;
    }
    let collected = !star.fade_started;
    star.fade_started = true;
    collected
}

/// Check every bird against every target and star
pub fn resolve_collisions(state: &mut GameState) {
    let mut events = Vec::new();

    for bird in &state.birds {
        for target in &mut state.targets {
            if bird_hits_target(bird, target) {
                log::debug!("Bird {} toppled target {}", bird.id, target.id);
                events.push(GameEvent::TargetToppled { id: target.id });
            }
        }
        for star in &mut state.stars {
            if bird_hits_star(bird, star) {
                log::debug!("Bird {} collected star {}", bird.id, star.id);
                events.push(GameEvent::StarCollected { id: star.id });
            }
        }
    }

    for event in events {
        state.emit(event);
    }
}
