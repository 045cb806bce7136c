//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, delays measured in ticks
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod input;
pub mod level;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{bird_overlaps_box, impact_velocity, resolve_collisions};
pub use error::SimError;
pub use input::{launch_velocity, pointer_down, pointer_move, pointer_up};
pub use level::{generate_stars, generate_targets, random_position};
pub use snapshot::RenderSnapshot;
pub use state::{
    Bird, EntityId, GameEvent, GamePhase, GameState, Sling, Star, Target, TargetColor,
};
pub use tick::tick;
pub use timers::{TimerId, TimerKind, TimerQueue};
