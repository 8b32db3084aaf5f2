use glam::{Mat4, Vec3};
use glyphgrid_camera::{PlayerTransform, ViewProjection};
use glyphgrid_scene::{GlyphInstance, InstanceKind, SceneFrame};

use crate::uniform::FrameUniform;

/// Which indexed mesh a draw binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    /// One of the glyph meshes, `0..GLYPH_KINDS`.
    Glyph(u8),
    Avatar,
}

/// One draw of indexed geometry with its full matrix set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub uniform: FrameUniform,
}

/// Everything a renderer sees for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSubmission {
    pub matrices: ViewProjection,
    pub scene: SceneFrame,
    /// Avatar placement; absent when the view is from its own eyes.
    pub avatar: Option<PlayerTransform>,
}

impl FrameSubmission {
    pub fn eye(&self) -> Vec3 {
        self.matrices.eye
    }

    /// Glyph instances in draw order.
    pub fn glyphs(&self) -> impl Iterator<Item = GlyphInstance> + '_ {
        self.scene.instances()
    }

    pub fn avatar_world(&self) -> Option<Mat4> {
        self.avatar.map(|avatar| avatar.world_matrix())
    }

    /// Every draw for the frame: glyphs, then the avatar if visible.
    pub fn draws(&self) -> impl Iterator<Item = DrawCall> + '_ {
        let glyphs = self.glyphs().map(move |instance| DrawCall {
            mesh: MeshId::Glyph(instance.glyph),
            uniform: FrameUniform::new(instance.world, &self.matrices),
        });
        let avatar = self.avatar_world().map(|world| DrawCall {
            mesh: MeshId::Avatar,
            uniform: FrameUniform::new(world, &self.matrices),
        });
        glyphs.chain(avatar)
    }

    pub fn draw_count(&self) -> u64 {
        self.scene.instance_count() + u64::from(self.avatar.is_some())
    }

    /// Number of orbiting child glyphs.
    pub fn orbiter_count(&self) -> u64 {
        self.scene.instance_count() - self.scene.grid.glyph_count()
    }

    pub(crate) fn is_orbiter(instance: &GlyphInstance) -> bool {
        matches!(instance.kind, InstanceKind::Orbiter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphgrid_camera::{CameraConfig, CameraModel};
    use glyphgrid_common::GridParameters;

    fn submission(grid: GridParameters, with_avatar: bool) -> FrameSubmission {
        let camera = CameraModel::new(CameraConfig::default(), 1.0, &grid);
        FrameSubmission {
            matrices: *camera.view_projection(),
            scene: SceneFrame::new(grid, 0.3),
            avatar: with_avatar.then(|| PlayerTransform {
                position: Vec3::new(0.0, 0.0, -60.0),
                yaw: 0.2,
            }),
        }
    }

    #[test]
    fn draws_cover_glyphs_then_avatar() {
        let frame = submission(GridParameters::new(3, 4.5), true);
        let draws: Vec<DrawCall> = frame.draws().collect();
        assert_eq!(draws.len() as u64, frame.draw_count());
        assert_eq!(draws.last().map(|d| d.mesh), Some(MeshId::Avatar));
        let glyphs = &draws[..draws.len() - 1];
        assert!(glyphs.iter().all(|d| matches!(d.mesh, MeshId::Glyph(g) if g < 4)));
    }

    #[test]
    fn every_draw_shares_view_and_projection() {
        let frame = submission(GridParameters::default(), true);
        let view = frame.matrices.view.to_cols_array_2d();
        let proj = frame.matrices.projection.to_cols_array_2d();
        assert!(frame.draws().all(|d| d.uniform.view == view && d.uniform.proj == proj));
    }

    #[test]
    fn no_avatar_draw_when_hidden() {
        let frame = submission(GridParameters::new(2, 4.5), false);
        assert!(frame.draws().all(|d| d.mesh != MeshId::Avatar));
        assert_eq!(frame.draw_count(), frame.scene.instance_count());
        assert!(frame.avatar_world().is_none());
    }

    #[test]
    fn orbiter_count_excludes_main_glyphs() {
        let frame = submission(GridParameters::new(4, 4.5), false);
        let counted = frame.glyphs().filter(FrameSubmission::is_orbiter).count() as u64;
        assert_eq!(frame.orbiter_count(), counted);
    }
}
