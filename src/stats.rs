//! Frame-rate statistic shown on the HUD

use std::time::Duration;

/// Counts rendered frames and publishes the count once per second
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    elapsed: Duration,
    frames: u32,
    fps: u32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rendered frame that took `dt`; returns true when a new value was published
    pub fn record(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        self.frames += 1;
        if self.elapsed >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.elapsed -= Duration::from_secs(1);
            self.frames = 0;
            return true;
        }
        false
    }

    /// Frames counted during the last full second
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
