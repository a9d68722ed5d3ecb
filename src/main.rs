//! Geo Wars entry point
//!
//! Headless native runner: loads the config, then drives the simulation in
//! real time with a simple autopilot standing in for keyboard and mouse.
//!
//! Usage: `geo-wars [config.json] [seconds] [seed]`

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use glam::Vec2;

use geo_wars::sim::{GameState, Tag};
use geo_wars::{Direction, Game, GameConfig, InputEvent, InputSource};

const DEFAULT_CONFIG: &str = "assets/config.json";
const DEFAULT_SECONDS: u64 = 10;
/// Target frame pacing of the headless loop
const FRAME_BUDGET: Duration = Duration::from_millis(8);

/// Fires at the nearest large enemy and strafes, a few times per second
struct Autopilot {
    queue: VecDeque<InputEvent>,
    frames: u64,
    strafe: Direction,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            frames: 0,
            strafe: Direction::Left,
        }
    }

    /// Decide this frame's events from the current state
    fn think(&mut self, state: &GameState) {
        self.frames += 1;

        if self.frames % 15 == 0 {
            if let Some(target) = nearest_enemy(state) {
                self.queue.push_back(InputEvent::FirePrimary(target));
            }
        }

        if self.frames % 240 == 0 {
            self.queue.push_back(InputEvent::Direction {
                dir: self.strafe,
                pressed: false,
            });
            self.strafe = match self.strafe {
                Direction::Left => Direction::Right,
                _ => Direction::Left,
            };
            self.queue.push_back(InputEvent::Direction {
                dir: self.strafe,
                pressed: true,
            });
        }

        // Crowded screen: use a special weapon
        if state.count(Tag::LargeEnemy) >= 6 {
            if let Some(target) = nearest_enemy(state) {
                self.queue.push_back(InputEvent::FireSpecial(target));
            }
        }
    }
}

impl InputSource for Autopilot {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}

fn nearest_enemy(state: &GameState) -> Option<Vec2> {
    let origin = state.player_position()?;
    state
        .store
        .entities_with_tag(Tag::LargeEnemy)
        .into_iter()
        .filter_map(|id| state.store.components.transforms.get(id).map(|t| t.pos))
        .min_by(|a, b| {
            a.distance_squared(origin)
                .partial_cmp(&b.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let seconds = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SECONDS);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let config = match GameConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}", config_path, e);
            eprintln!("geo-wars: {config_path}: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Geo Wars (headless) starting for {}s", seconds);
    let mut game = Game::new(config, seed);
    let mut pilot = Autopilot::new();

    let run_for = Duration::from_secs(seconds);
    let start = Instant::now();
    let mut last = start;
    let mut last_report = start;

    while game.is_running() && start.elapsed() < run_for {
        let now = Instant::now();
        let elapsed = now - last;
        last = now;

        pilot.think(&game.state);
        game.frame(elapsed, &mut pilot);

        if now.duration_since(last_report) >= Duration::from_secs(1) {
            last_report = now;
            let snap = game.snapshot();
            log::info!(
                "score {:>6} | fps {:>4} | enemies {:>2} | small {:>2} | bullets {:>2} | specials left {}",
                snap.score,
                snap.fps,
                snap.positions(Tag::LargeEnemy).len(),
                snap.positions(Tag::SmallEnemy).len(),
                snap.positions(Tag::Bullet).len(),
                snap.special_weapons_left,
            );
        }

        std::thread::sleep(FRAME_BUDGET);
    }

    println!("Final score: {}", game.state.score);
}
