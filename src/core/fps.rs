/// How often the frame rate is reported, in seconds
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame rate averaged over fixed reporting windows
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    interval: f32,
    frames: u32,
    accumulated: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            frames: 0,
            accumulated: 0.0,
            fps: 0.0,
        }
    }

    /// Count one frame; returns the new average when a window completes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.accumulated += delta;

        if self.accumulated < self.interval {
            return None;
        }

        self.fps = self.frames as f32 / self.accumulated;
        self.frames = 0;
        self.accumulated = 0.0;
        Some(self.fps)
    }

    /// Most recent completed average
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(FPS_UPDATE_INTERVAL)
    }
}
