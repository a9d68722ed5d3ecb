//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entity creation order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod components;
pub mod entity;
pub mod lifespan;
pub mod motion;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, ArenaBounds, Viewport};
pub use collision::{CollisionReport, circles_overlap};
pub use components::{Collision, ComponentTable, Components, Input, Lifespan, Score, Shape, Transform};
pub use entity::{EntityId, EntityStore, Tag};
pub use snapshot::{RenderEntity, RenderSnapshot};
pub use state::{GameState, SpawnerState};
pub use tick::{Scheduler, step};
