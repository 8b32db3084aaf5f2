use glyphgrid_common::CameraMode;

/// A discrete request produced by a key press.
///
/// The camera and scene consume actions, never raw keys, so remapping keys
/// never touches camera or scene code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Switch the active camera mode.
    SetCameraMode(CameraMode),
    /// Grow or shrink the grid by this many glyphs per axis.
    AdjustGridSize(i32),
    /// Change the spacing between glyph centres.
    AdjustSpacing(f32),
    /// Raise or lower the maximum number of orbiting child glyphs.
    AdjustOrbitMax(i32),
}

impl Action {
    /// Whether this action changes grid parameters.
    pub fn touches_grid(&self) -> bool {
        !matches!(self, Action::SetCameraMode(_))
    }
}
