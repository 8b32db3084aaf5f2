use std::fmt;

use glyphgrid_common::{CameraMode, GridParameters};

/// One-line summary of what is on screen, suitable for a window title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStatus {
    pub mode: CameraMode,
    pub grid: GridParameters,
    pub fps: Option<f32>,
}

impl fmt::Display for SceneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Glyph Grid | mode: {} | N={} ({} glyphs) | spacing={:.1} | orbit max={}",
            self.mode,
            self.grid.size(),
            self.grid.glyph_count(),
            self.grid.spacing(),
            self.grid.orbit_max(),
        )?;
        match self.fps {
            Some(fps) => write!(f, " | FPS={fps:.1}"),
            None => write!(f, " | FPS=--"),
        }
    }
}
