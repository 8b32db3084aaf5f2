use serde::{Deserialize, Serialize};

/// The active camera behaviour. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Frames the whole glyph grid; no manual control.
    AutoFit,
    /// Six-degree-of-freedom flight with roll.
    #[default]
    FreeFlight,
    /// Looks out of the avatar's eyes.
    FirstPerson,
    /// Trails behind and above the avatar.
    ThirdPerson,
}

impl CameraMode {
    pub const ALL: [CameraMode; 4] = [
        CameraMode::AutoFit,
        CameraMode::FreeFlight,
        CameraMode::FirstPerson,
        CameraMode::ThirdPerson,
    ];

    /// Human-readable name used in status lines and logs.
    pub fn name(self) -> &'static str {
        match self {
            CameraMode::AutoFit => "auto-fit",
            CameraMode::FreeFlight => "free-flight",
            CameraMode::FirstPerson => "first-person",
            CameraMode::ThirdPerson => "third-person",
        }
    }

    /// Whether the avatar drives the camera in this mode.
    pub fn is_avatar_mode(self) -> bool {
        matches!(self, CameraMode::FirstPerson | CameraMode::ThirdPerson)
    }

    /// Whether mouse motion steers the view in this mode.
    pub fn mouse_look(self) -> bool {
        self != CameraMode::AutoFit
    }
}

impl std::fmt::Display for CameraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Grid size bounds (glyphs per axis).
pub const GRID_SIZE_MIN: u32 = 1;
pub const GRID_SIZE_MAX: u32 = 200;
/// Spacing bounds between neighbouring glyph centres.
pub const SPACING_MIN: f32 = 1.0;
pub const SPACING_MAX: f32 = 20.0;
/// Upper bound on orbiting child glyphs per main glyph.
pub const ORBIT_COUNT_LIMIT: u32 = 6;

/// Layout parameters of the glyph grid.
///
/// Owned by the scene. The camera reads it only while auto-fitting. Values are
/// clamped by every mutator, so readers never need to re-validate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParameters {
    size: u32,
    spacing: f32,
    orbit_radius: f32,
    orbit_min: u32,
    orbit_max: u32,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            size: 2,
            spacing: 4.5,
            orbit_radius: 2.5,
            orbit_min: 1,
            orbit_max: 3,
        }
    }
}

impl GridParameters {
    /// Create parameters with the given size and spacing (both clamped).
    pub fn new(size: u32, spacing: f32) -> Self {
        let mut grid = Self::default();
        grid.set_size(size);
        grid.set_spacing(spacing);
        grid
    }

    /// Glyphs per axis, in `[GRID_SIZE_MIN, GRID_SIZE_MAX]`.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance between neighbouring glyph centres.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Radius of the child glyph orbit around its parent.
    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn orbit_min(&self) -> u32 {
        self.orbit_min
    }

    pub fn orbit_max(&self) -> u32 {
        self.orbit_max
    }

    /// Total number of main glyphs (N³).
    pub fn glyph_count(&self) -> u64 {
        u64::from(self.size).pow(3)
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(GRID_SIZE_MIN, GRID_SIZE_MAX);
    }

    /// Grow or shrink the grid by `delta` glyphs per axis.
    pub fn adjust_size(&mut self, delta: i32) {
        let next = i64::from(self.size) + i64::from(delta);
        let next = next.clamp(i64::from(GRID_SIZE_MIN), i64::from(GRID_SIZE_MAX));
        self.size = next as u32;
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = if spacing.is_finite() {
            spacing.clamp(SPACING_MIN, SPACING_MAX)
        } else {
            Self::default().spacing
        };
    }

    pub fn adjust_spacing(&mut self, delta: f32) {
        self.set_spacing(self.spacing + delta);
    }

    pub fn set_orbit_radius(&mut self, radius: f32) {
        self.orbit_radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    }

    /// Raise or lower the orbit-count ceiling. The floor follows it down.
    pub fn adjust_orbit_max(&mut self, delta: i32) {
        let next = (i64::from(self.orbit_max) + i64::from(delta))
            .clamp(0, i64::from(ORBIT_COUNT_LIMIT));
        self.orbit_max = next as u32;
        self.orbit_min = self.orbit_min.min(self.orbit_max);
    }

    /// Re-apply every bound. Used after deserializing untrusted values.
    pub fn clamped(mut self) -> Self {
        self.set_size(self.size);
        self.set_spacing(self.spacing);
        self.set_orbit_radius(self.orbit_radius);
        self.orbit_max = self.orbit_max.min(ORBIT_COUNT_LIMIT);
        self.orbit_min = self.orbit_min.min(self.orbit_max);
        self
    }
}
