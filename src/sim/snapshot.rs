//! Read-only view of the game for the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EntityId, GamePhase, GameState, Sling, TargetColor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdSprite {
    pub id: EntityId,
    /// Center
    pub pos: Vec2,
    /// Half-extent
    pub width: f32,
    pub sprite: u8,
    pub opacity: f32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSprite {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: TargetColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSprite {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub opacity: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub level: u32,
    pub stars_left: usize,
    pub phase: GamePhase,
    pub sling: Sling,
    pub birds: Vec<BirdSprite>,
    pub targets: Vec<TargetSprite>,
    pub stars: Vec<StarSprite>,
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            level: self.level,
            stars_left: self.stars.len(),
            phase: self.phase,
            sling: self.sling,
            birds: self
                .birds
                .iter()
                .map(|b| BirdSprite {
                    id: b.id,
                    pos: b.pos,
                    width: b.width,
                    sprite: b.sprite,
                    opacity: b.opacity,
                    active: self.active_bird == Some(b.id),
                })
                .collect(),
            targets: self
                .targets
                .iter()
                .map(|t| TargetSprite {
                    id: t.id,
                    pos: t.pos,
                    size: Vec2::new(t.width, t.height),
                    color: t.color,
                })
                .collect(),
            stars: self
                .stars
                .iter()
                .map(|s| StarSprite {
                    id: s.id,
                    pos: s.pos,
                    size: Vec2::new(s.width, s.height),
                    opacity: s.opacity,
                })
                .collect(),
        }
    }
}
