//! Slingshot - launch birds at falling targets and collect the stars
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level lifecycle)
//! - `settings`: Canvas size, tick rate and seed
//! - `web`: Browser facade (wasm32 only)

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Bird gravity (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Bird velocity damping per tick
    pub const FRICTION: f32 = 0.968;
    /// Falling target gravity - slower so impacts drift
    pub const SLOW_MOTION_GRAVITY: f32 = 0.1;
    /// Falling target velocity damping per tick
    pub const SLOW_MOTION_FRICTION: f32 = 0.970;

    /// Below this speed on both axes a bird is at rest
    pub const REST_THRESHOLD: f32 = 0.1;
    /// Opacity lost per tick while fading
    pub const FADE_STEP: f32 = 0.01;

    /// Bird half-extent
    pub const BIRD_WIDTH: f32 = 25.0;
    /// Number of bird sprites the host provides
    pub const BIRD_SPRITES: u8 = 3;
    pub const TARGET_SIZE: f32 = 50.0;
    pub const TARGET_MASS: f32 = 1.0;
    pub const STAR_SIZE: f32 = 30.0;

    /// Spawn point x; y is measured up from the canvas bottom
    pub const BIRD_START_X: f32 = 250.0;
    pub const BIRD_START_FROM_BOTTOM: f32 = 300.0;

    /// Launch velocity = drag * (LAUNCH_BASE + distance * LAUNCH_PER_PIXEL)
    pub const LAUNCH_BASE: f32 = 0.1;
    pub const LAUNCH_PER_PIXEL: f32 = 0.001;

    /// Impulse scale applied when a bird hits a target
    pub const IMPACT_SCALE: f32 = 0.01;

    /// Generated objects never spawn left of this x
    pub const SPAWN_MIN_X: f32 = 1000.0;

    /// Last level; clearing it completes the game
    pub const MAX_LEVEL: u32 = 3;

    /// Delay before a spent bird starts fading (seconds)
    pub const BIRD_FADE_DELAY_SECS: f32 = 2.0;
    /// Delay between clearing a level and advancing (seconds)
    pub const LEVEL_CLEAR_DELAY_SECS: f32 = 1.0;
}

/// Convert a delay in seconds to whole ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32, ticks_per_second: u32) -> u64 {
    ((secs * ticks_per_second as f32).round() as u64).max(1)
}
