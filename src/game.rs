//! Frame driver
//!
//! Owns the game state, the fixed-step scheduler and the FPS counter. The
//! platform layer hands it wall-clock frame time plus an `InputSource`;
//! input is drained before every simulation step so events never arrive
//! mid-step.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;

use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::sim::{GameState, RenderSnapshot, Scheduler, step};
use crate::stats::FrameStats;

/// Movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Events delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Movement key pressed or released
    Direction { dir: Direction, pressed: bool },
    /// Primary fire toward a point in arena coordinates
    FirePrimary(Vec2),
    /// Special weapon toward a point in arena coordinates
    FireSpecial(Vec2),
    TogglePause,
    Quit,
}

/// Polled event queue (window system, script, network...)
pub trait InputSource {
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl InputSource for VecDeque<InputEvent> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}

/// A running session
pub struct Game {
    pub state: GameState,
    scheduler: Scheduler,
    stats: FrameStats,
    running: bool,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("New game (seed {})", seed);
        Self::from_state(GameState::new(config, seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            scheduler: Scheduler::new(),
            stats: FrameStats::new(),
            running: true,
        }
    }

    /// False once a quit event has been handled
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> u32 {
        self.stats.fps()
    }

    /// Process one rendered frame that took `elapsed`
    ///
    /// Returns the number of simulation steps run.
    pub fn frame(&mut self, elapsed: Duration, input: &mut impl InputSource) -> u32 {
        let Self {
            state,
            scheduler,
            stats,
            running,
        } = self;

        drain(state, running, input);
        let steps = scheduler.advance(elapsed, || {
            drain(&mut *state, &mut *running, &mut *input);
            if *running {
                step(&mut *state, SIM_DT);
            }
        });

        if stats.record(elapsed) {
            log::debug!("FPS {} | score {} | entities {}", stats.fps(), state.score, state.store.len());
        }
        steps
    }

    /// What the renderer should draw now
    pub fn snapshot(&self) -> RenderSnapshot {
        self.state.snapshot(self.stats.fps())
    }
}

fn drain(state: &mut GameState, running: &mut bool, input: &mut impl InputSource) {
    while let Some(event) = input.poll_event() {
        apply(state, running, event);
    }
}

fn apply(state: &mut GameState, running: &mut bool, event: InputEvent) {
    match event {
        InputEvent::Direction { dir, pressed } => {
            if let Some(keys) = state.player_input_mut() {
                match dir {
                    Direction::Up => keys.up = pressed,
                    Direction::Down => keys.down = pressed,
                    Direction::Left => keys.left = pressed,
                    Direction::Right => keys.right = pressed,
                }
            }
        }
        InputEvent::FirePrimary(target) => {
            state.spawn_bullet(target);
        }
        InputEvent::FireSpecial(target) => {
            state.spawn_special_weapon(target);
        }
        InputEvent::TogglePause => state.toggle_pause(),
        InputEvent::Quit => {
            log::info!("Quit requested (score {})", state.score);
            *running = false;
        }
    }
}
