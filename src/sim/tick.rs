//! Fixed timestep simulation tick
//!
//! `step` advances the game by exactly one tick; `Scheduler` turns wall-clock
//! frame time into a whole number of steps.

use std::time::Duration;

use super::collision::{self, CollisionReport};
use super::state::GameState;
use super::{lifespan, motion};
use crate::consts::TICK;

/// Advance the game state by one fixed timestep
///
/// Paused games are left untouched. Otherwise: respawn a missing player,
/// sync the store, then spawner, lifespan, motion and collision in that
/// order, and sync again so removals and spawns of this step are committed.
pub fn step(state: &mut GameState, dt: f32) -> CollisionReport {
    if state.paused {
        return CollisionReport::default();
    }

    if state.player().is_none() {
        state.spawn_player();
    }
    state.store.update();

    state.time_ticks += 1;
    state.enemy_spawner(dt);
    lifespan::run(state, dt);
    motion::run(state, dt);
    let report = collision::run(state);

    state.store.update();
    report
}

/// Fixed timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    accumulator: Duration,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time carried over to the next frame (always less than one tick after `advance`)
    pub fn remainder(&self) -> Duration {
        self.accumulator
    }

    /// Add `elapsed` and call `on_step` once per whole tick it covers
    ///
    /// Returns the number of steps run.
    pub fn advance(&mut self, elapsed: Duration, mut on_step: impl FnMut()) -> u32 {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= TICK {
            self.accumulator -= TICK;
            on_step();
            steps += 1;
        }
        steps
    }
}
