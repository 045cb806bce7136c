//! Per-tick integration of birds, targets and stars
//!
//! Birds and falling targets use separate gravity/friction so that knocked
//! targets drift in slow motion. Both reflect off the floor and side walls;
//! there is no ceiling.

use glam::Vec2;

use super::state::{Bird, GameState, Star, Target};
use super::timers::TimerKind;
use crate::consts::*;
use crate::secs_to_ticks;

/// Opacity after one tick of fading, floored at zero
#[inline]
pub fn fade_opacity(opacity: f32) -> f32 {
    (opacity - FADE_STEP).max(0.0)
}

/// Advance an airborne bird. Dragged or resting birds are untouched.
pub fn step_bird(bird: &mut Bird, canvas: Vec2) {
    if bird.is_dragging || !bird.in_flight {
        return;
    }

    bird.vel.y += GRAVITY;
    bird.vel *= FRICTION;
    bird.pos += bird.vel;

    if bird.pos.y + bird.width > canvas.y {
        bird.pos.y = canvas.y - bird.width;
        bird.vel.y = -bird.vel.y * FRICTION;
    }
    if bird.pos.x + bird.width > canvas.x {
        bird.pos.x = canvas.x - bird.width;
        bird.vel.x = -bird.vel.x * FRICTION;
    }
    if bird.pos.x - bird.width < 0.0 {
        bird.pos.x = bird.width;
        bird.vel.x = -bird.vel.x * FRICTION;
    }

    if bird.is_at_rest() {
        bird.in_flight = false;
    }
}

/// Advance a falling target. Left wall clamps to 0, not to the width.
pub fn step_target(target: &mut Target, canvas: Vec2) {
    if !target.is_falling {
        return;
    }

    target.vel.x *= SLOW_MOTION_FRICTION;
    target.vel.y += SLOW_MOTION_GRAVITY;
    target.vel.y *= SLOW_MOTION_FRICTION;
    target.pos += target.vel;

    if target.pos.y + target.height > canvas.y {
        target.pos.y = canvas.y - target.height;
        target.vel.y = -target.vel.y * SLOW_MOTION_FRICTION;
    }
    if target.pos.x + target.width > canvas.x {
        target.pos.x = canvas.x - target.width;
        target.vel.x = -target.vel.x * SLOW_MOTION_FRICTION;
    }
    if target.pos.x < 0.0 {
        target.pos.x = 0.0;
        target.vel.x = -target.vel.x * SLOW_MOTION_FRICTION;
    }
}

pub fn step_star(star: &mut Star) {
    if star.fade_started {
        star.opacity = fade_opacity(star.opacity);
    }
}

/// Integrate every entity for one frame.
///
/// Spent birds (not active, not dragged) arm their fade timer here, once.
pub fn integrate(state: &mut GameState) {
    let canvas = state.canvas_size();
    let active = state.active_bird;
    let fade_delay = secs_to_ticks(BIRD_FADE_DELAY_SECS, state.settings.ticks_per_second);

    for bird in &mut state.birds {
        step_bird(bird, canvas);

        if !bird.is_dragging && Some(bird.id) != active && !bird.fade_started {
            bird.fade_started = true;
            bird.fade_timer = Some(
                state
                    .timers
                    .schedule(fade_delay, TimerKind::BirdFade { bird: bird.id }),
            );
        }

        if bird.fading {
            bird.opacity = fade_opacity(bird.opacity);
        }
    }

    for target in &mut state.targets {
        step_target(target, canvas);
    }

    for star in &mut state.stars {
        step_star(star);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::TargetColor;

    const CANVAS: Vec2 = Vec2::new(1920.0, 600.0);

    fn flying_bird(pos: Vec2, vel: Vec2) -> Bird {
        let mut bird = Bird::new(1, pos, 0);
        bird.vel = vel;
        bird.in_flight = true;
        bird
    }

    #[test]
    fn test_bird_gravity_and_friction() {
        let mut bird = flying_bird(Vec2::new(500.0, 200.0), Vec2::new(10.0, 0.0));
        step_bird(&mut bird, CANVAS);

        assert!((bird.vel.x - 9.68).abs() < 1e-4);
        assert!((bird.vel.y - 0.484).abs() < 1e-4);
        assert!((bird.pos.x - 509.68).abs() < 1e-3);
        assert!((bird.pos.y - 200.484).abs() < 1e-3);
    }

    #[test]
    fn test_bird_bounces_off_floor() {
        let mut bird = flying_bird(Vec2::new(500.0, 570.0), Vec2::new(0.0, 20.0));
        step_bird(&mut bird, CANVAS);

        assert_eq!(bird.pos.y, CANVAS.y - bird.width);
        assert!(bird.vel.y < 0.0);
    }

    #[test]
    fn test_bird_left_wall_clamps_to_width() {
        let mut bird = flying_bird(Vec2::new(30.0, 300.0), Vec2::new(-20.0, 0.0));
        step_bird(&mut bird, CANVAS);

        assert_eq!(bird.pos.x, bird.width);
        assert!(bird.vel.x > 0.0);
    }

    #[test]
    fn test_bird_right_wall() {
        let mut bird = flying_bird(Vec2::new(1890.0, 300.0), Vec2::new(20.0, 0.0));
        step_bird(&mut bird, CANVAS);

        assert_eq!(bird.pos.x, CANVAS.x - bird.width);
        assert!(bird.vel.x < 0.0);
    }

    #[test]
    fn test_bird_settles_when_slow() {
        // At the apex gravity cancels the remaining upward speed
        let mut bird = flying_bird(Vec2::new(500.0, 300.0), Vec2::new(0.05, -0.5));
        step_bird(&mut bird, CANVAS);
        assert!(bird.is_at_rest());
        assert!(!bird.in_flight);

        // Settled birds stay put
        let pos = bird.pos;
        step_bird(&mut bird, CANVAS);
        assert_eq!(bird.pos, pos);
    }

    #[test]
    fn test_resting_bird_is_untouched() {
        let mut bird = Bird::new(1, Vec2::new(100.0, 100.0), 0);
        bird.vel = Vec2::new(3.0, 4.0);
        let before = bird.clone();
        step_bird(&mut bird, CANVAS);
        assert_eq!(bird, before);
    }

    #[test]
    fn test_dragged_bird_is_untouched() {
        let mut bird = flying_bird(Vec2::new(100.0, 100.0), Vec2::new(3.0, 4.0));
        bird.is_dragging = true;
        let before = bird.clone();
        step_bird(&mut bird, CANVAS);
        assert_eq!(bird, before);
    }

    #[test]
    fn test_target_only_moves_when_falling() {
        let mut target = Target::new(1, Vec2::new(1200.0, 100.0), TargetColor::Green);
        step_target(&mut target, CANVAS);
        assert_eq!(target.pos, Vec2::new(1200.0, 100.0));

        target.is_falling = true;
        step_target(&mut target, CANVAS);
        assert!((target.vel.y - 0.097).abs() < 1e-5);
        assert!(target.pos.y > 100.0);
    }

    #[test]
    fn test_target_left_wall_clamps_to_zero() {
        let mut target = Target::new(1, Vec2::new(1.0, 100.0), TargetColor::Blue);
        target.is_falling = true;
        target.vel = Vec2::new(-5.0, 0.0);
        step_target(&mut target, CANVAS);

        assert_eq!(target.pos.x, 0.0);
        assert!(target.vel.x > 0.0);
    }

    #[test]
    fn test_target_floor_uses_height() {
        let mut target = Target::new(1, Vec2::new(1200.0, 549.0), TargetColor::Blue);
        target.is_falling = true;
        target.vel = Vec2::new(0.0, 5.0);
        step_target(&mut target, CANVAS);

        assert_eq!(target.pos.y, CANVAS.y - target.height);
        assert!(target.vel.y < 0.0);
    }

    #[test]
    fn test_star_fades_to_zero() {
        let mut star = Star::new(1, Vec2::new(1300.0, 200.0));
        step_star(&mut star);
        assert_eq!(star.opacity, 1.0);

        star.fade_started = true;
        for _ in 0..200 {
            step_star(&mut star);
            assert!((0.0..=1.0).contains(&star.opacity));
        }
        assert_eq!(star.opacity, 0.0);
    }

    #[test]
    fn test_spent_bird_arms_fade_once() {
        let mut state = GameState::new(Settings::with_canvas(1920.0, 600.0), 1);
        let spent = state.birds[0].id;
        state.spawn_bird();

        integrate(&mut state);
        integrate(&mut state);

        assert!(state.bird(spent).is_some_and(|b| b.fade_started && !b.fading));
        assert!(state.bird(spent).is_some_and(|b| b.fade_timer.is_some()));
        assert_eq!(state.timers.len(), 1);
        assert!(state.timers.is_pending(&TimerKind::BirdFade { bird: spent }));
    }

    #[test]
    fn test_active_bird_never_arms_fade() {
        let mut state = GameState::new(Settings::with_canvas(1920.0, 600.0), 1);
        for _ in 0..10 {
            integrate(&mut state);
        }
        assert!(state.timers.is_empty());
        assert!(!state.birds[0].fade_started);
    }
}
