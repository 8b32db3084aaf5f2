use glam::{Mat4, Vec3};
use glyphgrid_common::{CameraMode, MIN_LENGTH_SQUARED, safe_normalize};

use crate::autofit::AutoFitFrame;
use crate::config::{CameraConfig, PerspectiveConfig};
use crate::pose::{CameraPose, PlayerPose};

/// Active perspective parameters. Refreshed on resize and on mode switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    pub fn new(config: &PerspectiveConfig, aspect: f32) -> Self {
        Self {
            fov_y: config.fov_y,
            aspect: sanitize_aspect(aspect),
            near: config.near,
            far: config.far,
        }
    }

    /// Parameters for auto-fit, whose clip planes follow the fit radius.
    pub fn auto_fit(frame: &AutoFitFrame, fov_y: f32, aspect: f32) -> Self {
        Self {
            fov_y,
            aspect: sanitize_aspect(aspect),
            near: frame.near,
            far: frame.far,
        }
    }

    /// Left-handed perspective matrix, depth mapped to [0, 1].
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, sanitize_aspect(self.aspect), self.near, self.far)
    }
}

/// Width over height; anything unusable collapses to square.
pub fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 }
}

/// The matrix pair handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub mode: CameraMode,
    pub view: Mat4,
    pub projection: Mat4,
    /// World-space eye the view was built from.
    pub eye: Vec3,
}

impl ViewProjection {
    /// Projection times view.
    pub fn combined(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Derive the matrices for `mode` from the current poses.
    pub fn build(
        mode: CameraMode,
        camera: &CameraPose,
        player: &PlayerPose,
        config: &CameraConfig,
        perspective: &Perspective,
    ) -> Self {
        let (eye, view) = match mode {
            CameraMode::AutoFit => {
                let view = look_at(camera.position, Vec3::ZERO, Vec3::Y);
                (camera.position, view)
            }
            CameraMode::FreeFlight => {
                let axes = camera.axes();
                (camera.position, look_to(camera.position, axes.forward, axes.up))
            }
            CameraMode::FirstPerson => {
                let eye = player.eye(config.eye_height);
                (eye, look_to(eye, player.forward(), Vec3::Y))
            }
            CameraMode::ThirdPerson => {
                let target = player.eye(config.eye_height);
                let eye = third_person_eye(player, config);
                (eye, look_at(eye, target, Vec3::Y))
            }
        };
        Self {
            mode,
            view,
            projection: perspective.matrix(),
            eye,
        }
    }
}

/// Point trailing the avatar's eye by exactly `follow_distance` along its
/// look direction, before the height offset is applied.
pub fn third_person_pivot(player: &PlayerPose, config: &CameraConfig) -> Vec3 {
    player.eye(config.eye_height) - player.forward() * config.follow_distance
}

/// Third-person camera position: behind and above the avatar.
pub fn third_person_eye(player: &PlayerPose, config: &CameraConfig) -> Vec3 {
    third_person_pivot(player, config) + Vec3::Y * config.follow_height
}

/// Left-handed look-to that never returns NaN.
///
/// A degenerate direction falls back to +Z; an up vector parallel to the
/// direction is replaced by whichever world axis is least aligned with it.
pub fn look_to(eye: Vec3, direction: Vec3, up: Vec3) -> Mat4 {
    let mut direction = safe_normalize(direction);
    if direction == Vec3::ZERO {
        direction = Vec3::Z;
    }
    let mut up = safe_normalize(up);
    if up == Vec3::ZERO || direction.cross(up).length_squared() < MIN_LENGTH_SQUARED {
        up = least_aligned_axis(direction);
    }
    Mat4::look_to_lh(eye, direction, up)
}

/// Left-handed look-at with the same fallbacks as [`look_to`].
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    look_to(eye, target - eye, up)
}

fn least_aligned_axis(direction: Vec3) -> Vec3 {
    let abs = direction.abs();
    if abs.y <= abs.x && abs.y <= abs.z {
        Vec3::Y
    } else if abs.z <= abs.x {
        Vec3::Z
    } else {
        Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphgrid_common::PITCH_EPSILON;
    use std::f32::consts::FRAC_PI_2;

    fn is_finite(m: &Mat4) -> bool {
        m.to_cols_array().iter().all(|v| v.is_finite())
    }

    #[test]
    fn look_to_maps_forward_to_positive_z() {
        let view = look_to(Vec3::new(1.0, 2.0, 3.0), Vec3::Z, Vec3::Y);
        let p = view.transform_point3(Vec3::new(1.0, 2.0, 13.0));
        assert!((p - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn look_to_survives_degenerate_input() {
        assert!(is_finite(&look_to(Vec3::ZERO, Vec3::ZERO, Vec3::Y)));
        assert!(is_finite(&look_to(Vec3::ZERO, Vec3::Y, Vec3::Y)));
        assert!(is_finite(&look_at(Vec3::ONE, Vec3::ONE, Vec3::Y)));
        assert!(is_finite(&look_to(Vec3::ZERO, Vec3::X, Vec3::ZERO)));
    }

    #[test]
    fn third_person_pivot_keeps_follow_distance() {
        let config = CameraConfig::default();
        for yaw_step in -6..=6 {
            for pitch_step in -6..=6 {
                let player = PlayerPose {
                    position: Vec3::new(3.0, 1.0, -7.0),
                    yaw: yaw_step as f32 * 0.5,
                    pitch: (pitch_step as f32 * 0.26)
                        .clamp(-FRAC_PI_2 + PITCH_EPSILON, FRAC_PI_2 - PITCH_EPSILON),
                };
                let target = player.eye(config.eye_height);
                let pivot = third_person_pivot(&player, &config);
                let distance = (pivot - target).length();
                assert!((distance - config.follow_distance).abs() < 1e-3);
                let eye = third_person_eye(&player, &config);
                assert!((eye.y - pivot.y - config.follow_height).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn third_person_straight_above_target_picks_fallback_up() {
        let config = CameraConfig {
            follow_distance: 0.0,
            ..CameraConfig::default()
        };
        let player = PlayerPose {
            position: Vec3::new(4.0, 0.0, -2.0),
            yaw: 0.3,
            pitch: 0.0,
        };
        let perspective = Perspective::new(&config.perspective, 1.0);
        let vp = ViewProjection::build(
            CameraMode::ThirdPerson,
            &CameraPose::default(),
            &player,
            &config,
            &perspective,
        );
        assert!(is_finite(&vp.view));
        let target = player.eye(config.eye_height);
        assert!((vp.eye - target - Vec3::Y * config.follow_height).length() < 1e-5);
        // Looking straight down: the target lands on the view axis.
        let p = vp.view.transform_point3(target);
        assert!((p - Vec3::Z * config.follow_height).length() < 1e-4);
    }

    #[test]
    fn projection_survives_bad_aspect() {
        let perspective = Perspective::new(&PerspectiveConfig::default(), f32::NAN);
        assert_eq!(perspective.aspect, 1.0);
        assert!(is_finite(&perspective.matrix()));
        let perspective = Perspective::new(&PerspectiveConfig::default(), 0.0);
        assert!(is_finite(&perspective.matrix()));
    }

    #[test]
    fn first_person_eye_sits_above_feet() {
        let config = CameraConfig::default();
        let player = PlayerPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.0,
            pitch: 0.0,
        };
        let perspective = Perspective::new(&config.perspective, 16.0 / 9.0);
        let vp = ViewProjection::build(
            CameraMode::FirstPerson,
            &CameraPose::default(),
            &player,
            &config,
            &perspective,
        );
        assert_eq!(vp.eye, Vec3::new(1.0, 10.0, 3.0));
        assert!(vp.view.transform_point3(vp.eye).length() < 1e-4);
    }

    #[test]
    fn free_flight_view_respects_roll() {
        let config = CameraConfig::default();
        let camera = CameraPose {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: FRAC_PI_2,
        };
        let perspective = Perspective::new(&config.perspective, 1.0);
        let vp = ViewProjection::build(
            CameraMode::FreeFlight,
            &camera,
            &PlayerPose::default(),
            &config,
            &perspective,
        );
        let world_up_in_view = vp.view.transform_vector3(Vec3::Y);
        assert!(world_up_in_view.y.abs() < 1e-4);
        assert!(world_up_in_view.x.abs() > 0.99);
    }
}
