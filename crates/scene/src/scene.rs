use glyphgrid_common::GridParameters;
use glyphgrid_input::Action;
use serde::{Deserialize, Serialize};

use crate::clock::AnimationClock;
use crate::layout::SceneFrame;

/// Scene settings loadable from the app config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: GridParameters,
    /// Glyph spin in radians per second.
    pub spin_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: GridParameters::default(),
            spin_rate: 0.5,
        }
    }
}

/// Owns the grid parameters and the animation clock.
#[derive(Debug, Clone)]
pub struct Scene {
    grid: GridParameters,
    clock: AnimationClock,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            grid: config.grid.clamped(),
            clock: AnimationClock::new(config.spin_rate),
        }
    }

    pub fn grid(&self) -> &GridParameters {
        &self.grid
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Apply a grid parameter action. Returns whether the grid changed.
    ///
    /// Mode switches are not scene actions and are ignored here.
    pub fn apply(&mut self, action: &Action) -> bool {
        let before = self.grid;
        match *action {
            Action::AdjustGridSize(delta) => self.grid.adjust_size(delta),
            Action::AdjustSpacing(delta) => self.grid.adjust_spacing(delta),
            Action::AdjustOrbitMax(delta) => self.grid.adjust_orbit_max(delta),
            Action::SetCameraMode(_) => return false,
        }
        let changed = self.grid != before;
        if changed {
            tracing::debug!(
                size = self.grid.size(),
                spacing = self.grid.spacing(),
                orbit_max = self.grid.orbit_max(),
                "grid parameters changed"
            );
        }
        changed
    }

    pub fn advance(&mut self, dt: f32) {
        self.clock.advance(dt);
    }

    /// Snapshot for laying out this frame's instances.
    pub fn frame(&self) -> SceneFrame {
        SceneFrame::new(self.grid, self.clock.angle())
    }
}
