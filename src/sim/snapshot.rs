//! Read-only view of the world for the renderer and HUD

use glam::Vec2;
use serde::Serialize;

use super::components::Shape;
use super::entity::{EntityId, Tag};
use super::state::GameState;

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEntity {
    pub id: EntityId,
    pub tag: Tag,
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    pub shape: Shape,
    /// Remaining/total lifespan for entities that expire, `None` otherwise
    pub fade: Option<f32>,
}

/// Everything the render collaborator needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub score: i64,
    pub paused: bool,
    pub fps: u32,
    pub special_weapons_left: u32,
    pub entities: Vec<RenderEntity>,
}

impl GameState {
    /// Capture the drawable state; entities lacking a transform or shape are skipped
    pub fn snapshot(&self, fps: u32) -> RenderSnapshot {
        let c = &self.store.components;
        let entities = self
            .store
            .entities()
            .into_iter()
            .filter_map(|id| {
                let tfm = c.transforms.get(id)?;
                let shape = c.shapes.get(id)?;
                Some(RenderEntity {
                    id,
                    tag: self.store.tag(id)?,
                    pos: tfm.pos,
                    rotation: tfm.rotation,
                    shape: *shape,
                    fade: c.lifespans.get(id).map(|l| l.fade_ratio()),
                })
            })
            .collect();

        RenderSnapshot {
            score: self.score,
            paused: self.paused,
            fps,
            special_weapons_left: self.special_weapons_left(),
            entities,
        }
    }
}

impl RenderSnapshot {
    pub fn positions(&self, tag: Tag) -> Vec<Vec2> {
        self.entities
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.pos)
            .collect()
    }
}
