//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{starter_stars, starter_targets};
use super::timers::{TimerId, TimerQueue};
use crate::Settings;
use crate::consts::*;

/// Unique, monotonically allocated entity id
pub type EntityId = u32;

/// Lifecycle phase of the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stars remain; frames run
    Active,
    /// All stars gone; frames suspended until the clear timer fires
    Clearing { level: u32 },
    /// Final level cleared
    Completed,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BirdLaunched { id: EntityId, vel: Vec2 },
    TargetToppled { id: EntityId },
    StarCollected { id: EntityId },
    LevelComplete { level: u32 },
    GameComplete,
}

/// A bird. `width` is a half-extent around `pos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub id: EntityId,
    pub pos: Vec2,
    pub width: f32,
    pub vel: Vec2,
    pub is_dragging: bool,
    pub in_flight: bool,
    /// Fade timer has been armed (one-shot)
    pub fade_started: bool,
    /// Pending fade timer, cancelled if the bird goes away first
    pub fade_timer: Option<TimerId>,
    /// Opacity decay is running
    pub fading: bool,
    pub opacity: f32,
    /// Index into the host's bird images
    pub sprite: u8,
}

impl Bird {
    pub fn new(id: EntityId, pos: Vec2, sprite: u8) -> Self {
        Self {
            id,
            pos,
            width: BIRD_WIDTH,
            vel: Vec2::ZERO,
            is_dragging: false,
            in_flight: false,
            fade_started: false,
            fade_timer: None,
            fading: false,
            opacity: 1.0,
            sprite,
        }
    }

    /// Strictly inside the bird's box
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.pos.x - self.width
            && point.x < self.pos.x + self.width
            && point.y > self.pos.y - self.width
            && point.y < self.pos.y + self.width
    }

    pub fn is_at_rest(&self) -> bool {
        self.vel.x.abs() < REST_THRESHOLD && self.vel.y.abs() < REST_THRESHOLD
    }
}

/// Target fill color. `Destroyed` marks a toppled target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetColor {
    Green,
    Blue,
    Yellow,
    Orange,
    Destroyed,
}

impl TargetColor {
    /// Colors cycled through when generating a level
    pub const PALETTE: [TargetColor; 4] = [
        TargetColor::Green,
        TargetColor::Blue,
        TargetColor::Yellow,
        TargetColor::Orange,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// CSS color name for the host
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetColor::Green => "green",
            TargetColor::Blue => "blue",
            TargetColor::Yellow => "yellow",
            TargetColor::Orange => "orange",
            TargetColor::Destroyed => "black",
        }
    }
}

/// A block to knock over. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: TargetColor,
    pub vel: Vec2,
    pub mass: f32,
    /// Once set, never cleared
    pub is_falling: bool,
}

impl Target {
    pub fn new(id: EntityId, pos: Vec2, color: TargetColor) -> Self {
        Self {
            id,
            pos,
            width: TARGET_SIZE,
            height: TARGET_SIZE,
            color,
            vel: Vec2::ZERO,
            mass: TARGET_MASS,
            is_falling: false,
        }
    }
}

/// A collectible star. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: EntityId,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
    /// Once set, never cleared
    pub fade_started: bool,
}

impl Star {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            width: STAR_SIZE,
            height: STAR_SIZE,
            opacity: 1.0,
            fade_started: false,
        }
    }
}

/// The slingshot band, drawn from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sling {
    pub start: Vec2,
    pub end: Vec2,
}

impl Sling {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            start: anchor,
            end: anchor,
        }
    }

    pub fn reset(&mut self) {
        self.end = self.start;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Current level (1..=MAX_LEVEL)
    pub level: u32,
    pub phase: GamePhase,
    /// Live birds (sorted by id)
    pub birds: Vec<Bird>,
    /// Targets of the current level (sorted by id)
    pub targets: Vec<Target>,
    /// Remaining stars (sorted by id)
    pub stars: Vec<Star>,
    /// The bird input acts on
    pub active_bird: Option<EntityId>,
    pub sling: Sling,
    /// Virtual clock and pending one-shot timers
    pub timers: TimerQueue,
    /// Events not yet drained by the host
    pub events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    /// New game on the hand-placed first board
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self::empty(settings, seed);
        state.targets = starter_targets(&mut state);
        state.stars = starter_stars(&mut state);
        state.spawn_bird();
        log::info!("New game (seed {})", seed);
        state
    }

    /// New game with a generated first level
    pub fn new_randomized(settings: Settings, seed: u64) -> Self {
        let mut state = Self::empty(settings, seed);
        state.regenerate_level();
        state.spawn_bird();
        log::info!("New randomized game (seed {})", seed);
        state
    }

    fn empty(settings: Settings, seed: u64) -> Self {
        let anchor = Self::spawn_point_for(&settings);
        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            phase: GamePhase::Active,
            birds: Vec::new(),
            targets: Vec::new(),
            stars: Vec::new(),
            active_bird: None,
            sling: Sling::new(anchor),
            timers: TimerQueue::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Back to level 1 on the first board; keeps the RNG stream
    pub fn restart(&mut self) {
        self.level = 1;
        self.phase = GamePhase::Active;
        self.birds.clear();
        self.active_bird = None;
        self.timers.clear();
        self.events.clear();
        self.sling.reset();
        self.targets = starter_targets(self);
        self.stars = starter_stars(self);
        self.spawn_bird();
        log::info!("Game restarted");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_point_for(settings: &Settings) -> Vec2 {
        Vec2::new(BIRD_START_X, settings.canvas_height - BIRD_START_FROM_BOTTOM)
    }

    /// Where new birds appear and the sling is anchored
    pub fn spawn_point(&self) -> Vec2 {
        Self::spawn_point_for(&self.settings)
    }

    /// Spawn a bird at the sling and make it the active bird
    pub fn spawn_bird(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let sprite = self.rng.random_range(0..BIRD_SPRITES);
        self.birds.push(Bird::new(id, self.spawn_point(), sprite));
        self.active_bird = Some(id);
        id
    }

    pub fn bird(&self, id: EntityId) -> Option<&Bird> {
        self.birds.iter().find(|b| b.id == id)
    }

    pub fn bird_mut(&mut self, id: EntityId) -> Option<&mut Bird> {
        self.birds.iter_mut().find(|b| b.id == id)
    }

    /// Whether the host should keep scheduling frames
    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::Completed
    }

    /// Current virtual time in ticks
    pub fn time_ticks(&self) -> u64 {
        self.timers.now()
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.settings.canvas_width, self.settings.canvas_height)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
