use std::fmt::Write;

use crate::submission::FrameSubmission;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes one submission per frame and produces output. It
/// cannot reach back into camera or scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &FrameSubmission) -> Self::Output;
}

/// Debug text renderer, standing in for a GPU backend.
///
/// Produces a human-readable dump of the frame: camera, counts and the
/// first few draws. Useful for CLI output, logging, and testing.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// How many glyph instances to list individually.
    listed: usize,
    frames: u64,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::with_listed(8)
    }

    pub fn with_listed(listed: usize) -> Self {
        Self { listed, frames: 0 }
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FrameSubmission) -> String {
        self.frames += 1;
        let matrices = &frame.matrices;
        let grid = &frame.scene.grid;
        let eye = frame.eye();
        let forward = matrices.view.inverse().transform_vector3(glam::Vec3::Z);

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "=== Frame {} (mode={}) ===", self.frames, matrices.mode);
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) forward=({:.3}, {:.3}, {:.3})",
            eye.x, eye.y, eye.z, forward.x, forward.y, forward.z
        );
        let _ = writeln!(
            out,
            "Grid: N={} spacing={:.1} angle={:.3}",
            grid.size(),
            grid.spacing(),
            frame.scene.angle
        );
        let _ = writeln!(
            out,
            "Draws: {} (glyphs={}, orbiters={}, avatar={})",
            frame.draw_count(),
            grid.glyph_count(),
            frame.orbiter_count(),
            if frame.avatar.is_some() { "yes" } else { "no" }
        );

        for instance in frame.glyphs().take(self.listed) {
            let p = instance.world.transform_point3(glam::Vec3::ZERO);
            let role = if FrameSubmission::is_orbiter(&instance) { "orbit" } else { "main " };
            let cell = instance.cell;
            let _ = writeln!(
                out,
                "  [{},{},{}] {} glyph={} pos=({:.2}, {:.2}, {:.2})",
                cell.x, cell.y, cell.z, role, instance.glyph, p.x, p.y, p.z
            );
        }
        if let Some(avatar) = frame.avatar {
            let p = avatar.position;
            let _ = writeln!(
                out,
                "  avatar pos=({:.2}, {:.2}, {:.2}) yaw={:.3}",
                p.x, p.y, p.z, avatar.yaw
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use glyphgrid_camera::{CameraConfig, CameraModel, PlayerTransform};
    use glyphgrid_common::GridParameters;
    use glyphgrid_scene::SceneFrame;

    fn frame(grid: GridParameters, avatar: bool) -> FrameSubmission {
        let camera = CameraModel::new(CameraConfig::default(), 16.0 / 9.0, &grid);
        FrameSubmission {
            matrices: *camera.view_projection(),
            scene: SceneFrame::new(grid, 0.0),
            avatar: avatar.then(|| PlayerTransform {
                position: Vec3::new(0.0, 0.0, -60.0),
                yaw: 0.0,
            }),
        }
    }

    #[test]
    fn debug_renderer_reports_counts() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&frame(GridParameters::new(1, 4.5), false));

        assert!(output.contains("Frame 1 (mode=free-flight)"));
        assert!(output.contains("glyphs=1"));
        assert!(output.contains("avatar=no"));
        assert!(output.contains("eye=(0.00, 20.00, -80.00)"));
    }

    #[test]
    fn debug_renderer_limits_listing() {
        let mut renderer = DebugTextRenderer::with_listed(3);
        let output = renderer.render(&frame(GridParameters::new(5, 4.5), true));
        let listed = output.lines().filter(|l| l.contains("glyph=")).count();
        assert_eq!(listed, 3);
        assert!(output.contains("avatar pos=(0.00, 0.00, -60.00)"));
    }

    #[test]
    fn frame_counter_advances() {
        let mut renderer = DebugTextRenderer::new();
        let f = frame(GridParameters::default(), true);
        renderer.render(&f);
        let output = renderer.render(&f);
        assert_eq!(renderer.frames(), 2);
        assert!(output.starts_with("=== Frame 2"));
    }
}
