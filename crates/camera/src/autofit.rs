use glam::Vec3;
use glyphgrid_common::{GridParameters, clamp_pitch, safe_normalize};

use crate::config::AutoFitConfig;
use crate::pose::CameraPose;

const SQRT_3: f32 = 1.732_050_8;

/// Radius of a sphere that holds the whole grid under any rotation.
///
/// The grid's half extent times √3 bounds the cube's half diagonal.
pub fn fit_radius(grid: &GridParameters, fit: &AutoFitConfig) -> f32 {
    let half_extent = (grid.size() - 1) as f32 * grid.spacing() * 0.5;
    (half_extent * SQRT_3 + fit.margin).max(fit.min_radius)
}

/// Camera placement that frames the grid, plus matching clip planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoFitFrame {
    pub radius: f32,
    /// Eye, looking at the origin with +Y up.
    pub eye: Vec3,
    /// Pose whose forward axis points at the origin from `eye`.
    pub pose: CameraPose,
    pub near: f32,
    pub far: f32,
}

impl AutoFitFrame {
    pub fn compute(grid: &GridParameters, fit: &AutoFitConfig, pitch_epsilon: f32) -> Self {
        let radius = fit_radius(grid, fit);
        let eye = Vec3::new(0.0, radius * fit.elevation_ratio, -radius * fit.back_ratio);

        let direction = safe_normalize(-eye);
        let yaw = direction.x.atan2(direction.z);
        // Positive pitch looks down, so a downward direction means positive pitch.
        let pitch = clamp_pitch(-direction.y.clamp(-1.0, 1.0).asin(), pitch_epsilon);

        Self {
            radius,
            eye,
            pose: CameraPose {
                position: eye,
                yaw,
                pitch,
                roll: 0.0,
            },
            near: fit.near,
            far: fit.min_far.max(radius * fit.far_ratio),
        }
    }
}
