//! Game state and core simulation types
//!
//! Everything a simulation step reads or writes lives in `GameState`:
//! the entity store, spawner bookkeeping, the session score and pause flag.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::{Arena, ArenaBounds};
use super::components::{Input, Transform};
use super::entity::{EntityId, EntityStore, Tag};
use crate::config::GameConfig;

/// Spawner bookkeeping that persists across steps
#[derive(Debug, Clone, Default)]
pub struct SpawnerState {
    /// Seconds until the next large enemy arrives
    pub countdown: f32,
    /// Special weapons fired this session (never reset)
    pub special_weapon_uses: u32,
}

/// Complete game state
pub struct GameState {
    pub config: GameConfig,
    pub store: EntityStore,
    pub spawner: SpawnerState,
    /// Session score; may go negative
    pub score: i64,
    /// When set, steps do nothing
    pub paused: bool,
    /// Simulation steps run so far (paused steps excluded)
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) player: Option<EntityId>,
    bounds: Box<dyn ArenaBounds>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("score", &self.score)
            .field("paused", &self.paused)
            .field("time_ticks", &self.time_ticks)
            .field("player", &self.player)
            .field("entities", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a new game with a fixed arena matching the configured window
    ///
    /// The player is spawned immediately and committed.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let arena = Arena::sized(config.window.width, config.window.height);
        Self::with_bounds(config, seed, Box::new(arena))
    }

    /// Create a new game whose arena is supplied by `bounds`
    pub fn with_bounds(config: GameConfig, seed: u64, bounds: Box<dyn ArenaBounds>) -> Self {
        let mut state = Self {
            config,
            store: EntityStore::new(),
            spawner: SpawnerState::default(),
            score: 0,
            paused: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            player: None,
            bounds,
        };
        state.spawn_player();
        state.store.update();
        state
    }

    /// Current playable rectangle (queried fresh every call)
    pub fn arena(&self) -> Arena {
        self.bounds.arena()
    }

    /// Replace the arena source, e.g. when the camera changes
    pub fn set_bounds(&mut self, bounds: Box<dyn ArenaBounds>) {
        self.bounds = bounds;
    }

    /// The active player entity, if any
    pub fn player(&self) -> Option<EntityId> {
        self.player.filter(|id| self.store.is_active(*id))
    }

    pub fn player_transform(&self) -> Option<&Transform> {
        self.player()
            .and_then(|id| self.store.components.transforms.get(id))
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player_transform().map(|t| t.pos)
    }

    /// Directional input of the active player, for the input collaborator
    pub fn player_input_mut(&mut self) -> Option<&mut Input> {
        let id = self.player()?;
        self.store.components.inputs.get_mut(id)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Committed, active entities with `tag`
    pub fn count(&self, tag: Tag) -> usize {
        self.store.count(tag)
    }
}
