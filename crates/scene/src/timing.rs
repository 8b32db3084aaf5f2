/// Default window over which frames are averaged, in seconds.
pub const DEFAULT_WINDOW: f32 = 0.5;

/// Frame-rate counter. Averages over a fixed window and publishes the result
/// once per window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    window: f32,
    elapsed: f32,
    frames: u32,
    fps: Option<f32>,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FrameTiming {
    pub fn new(window: f32) -> Self {
        Self {
            window: if window.is_finite() && window > 0.0 { window } else { DEFAULT_WINDOW },
            elapsed: 0.0,
            frames: 0,
            fps: None,
        }
    }

    /// Count one frame. Returns the new average when a window closes.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.frames += 1;
        if self.elapsed < self.window {
            return None;
        }
        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        self.fps = Some(fps);
        tracing::trace!(fps, "frame window closed");
        Some(fps)
    }

    /// Most recently published average; `None` until the first window closes.
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}
