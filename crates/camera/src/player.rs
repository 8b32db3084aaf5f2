use glam::{Mat4, Quat, Vec3};
use glyphgrid_input::ControlFrame;

use crate::config::CameraConfig;
use crate::pose::{CameraPose, PlayerPose};
use crate::view::third_person_eye;

/// What the renderer needs to place the avatar mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTransform {
    /// Feet position.
    pub position: Vec3,
    pub yaw: f32,
}

impl PlayerTransform {
    /// World matrix for a unit cube scaled into a standing figure.
    ///
    /// The body is lifted by half its height so its base rests on `position`.
    pub fn world_matrix(&self) -> Mat4 {
        const BODY: Vec3 = Vec3::new(1.5, 2.5, 1.5);
        Mat4::from_scale_rotation_translation(
            BODY,
            Quat::from_rotation_y(self.yaw),
            self.position + Vec3::Y * (BODY.y * 0.5),
        )
    }
}

/// The avatar: a pose plus the walking integration applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerModel {
    pose: PlayerPose,
}

impl PlayerModel {
    pub fn new(pose: PlayerPose, pitch_epsilon: f32) -> Self {
        Self {
            pose: pose.normalized(pitch_epsilon),
        }
    }

    pub fn pose(&self) -> &PlayerPose {
        &self.pose
    }

    pub fn transform(&self) -> PlayerTransform {
        PlayerTransform {
            position: self.pose.position,
            yaw: self.pose.yaw,
        }
    }

    /// Replace the pose wholesale (used to restore the last valid state).
    pub(crate) fn restore(&mut self, pose: PlayerPose) {
        self.pose = pose;
    }

    /// Put the avatar's eye where the camera is, looking the same way.
    ///
    /// Roll is discarded; the avatar never rolls.
    pub fn place_at_eye(&mut self, camera: &CameraPose, config: &CameraConfig) {
        self.pose = PlayerPose {
            position: camera.position - Vec3::Y * config.eye_height,
            yaw: camera.yaw,
            pitch: camera.pitch,
        }
        .normalized(config.pitch_epsilon);
    }

    /// Place the avatar ahead of the camera so the third-person view starts
    /// exactly where the camera is.
    pub fn place_ahead_of(&mut self, camera: &CameraPose, config: &CameraConfig) {
        let aligned = PlayerPose {
            position: Vec3::ZERO,
            yaw: camera.yaw,
            pitch: camera.pitch,
        }
        .normalized(config.pitch_epsilon);
        let offset = third_person_eye(&aligned, config);
        self.pose = PlayerPose {
            position: camera.position - offset,
            ..aligned
        };
    }

    /// Mouse look plus ground-plane walking. Vertical motion comes only from
    /// the lift axis, independent of where the avatar looks.
    ///
    /// A control frame carrying NaN or infinity leaves the pose untouched.
    pub fn walk(&mut self, control: &ControlFrame, dt: f32, config: &CameraConfig) {
        if !control.is_finite() {
            return;
        }
        let mut pose = self.pose;
        pose.yaw += control.look.x * config.mouse_sensitivity;
        pose.pitch += control.look.y * config.mouse_sensitivity;
        pose = pose.normalized(config.pitch_epsilon);

        let (forward, right) = pose.ground_axes();
        let movement = control.movement;
        let step = config.player_move_speed * dt;
        pose.position += (forward * movement.forward + right * movement.strafe) * step;
        pose.position.y += movement.lift * step;

        self.pose = pose;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphgrid_input::MovementIntent;

    fn model() -> (PlayerModel, CameraConfig) {
        let config = CameraConfig::default();
        let pose = PlayerPose {
            position: Vec3::new(0.0, 0.0, -60.0),
            yaw: 0.0,
            pitch: 0.6,
        };
        (PlayerModel::new(pose, config.pitch_epsilon), config)
    }

    #[test]
    fn walking_ignores_pitch() {
        let (mut player, config) = model();
        let start = player.pose().position;
        player.walk(
            &ControlFrame::moving(MovementIntent {
                forward: 1.0,
                ..Default::default()
            }),
            0.5,
            &config,
        );
        let moved = player.pose().position - start;
        assert!(moved.y.abs() < 1e-6);
        assert!((moved.length() - config.player_move_speed * 0.5).abs() < 1e-3);
        assert!(moved.z > 0.0);
    }

    #[test]
    fn lift_moves_straight_up() {
        let (mut player, config) = model();
        let start = player.pose().position;
        player.walk(
            &ControlFrame::moving(MovementIntent {
                lift: 1.0,
                ..Default::default()
            }),
            1.0,
            &config,
        );
        let moved = player.pose().position - start;
        assert!((moved - Vec3::Y * config.player_move_speed).length() < 1e-4);
    }

    #[test]
    fn look_integrates_and_clamps() {
        let (mut player, config) = model();
        player.walk(&ControlFrame::looking(0.0, 1e6), 0.016, &config);
        assert!(player.pose().pitch < std::f32::consts::FRAC_PI_2);
        player.walk(&ControlFrame::looking(400.0, 0.0), 0.016, &config);
        assert!((player.pose().yaw - 1.0).abs() < 1e-5);
    }

    #[test]
    fn walk_ignores_non_finite_control() {
        let (mut player, config) = model();
        let before = *player.pose();
        player.walk(&ControlFrame::looking(f32::NAN, f32::INFINITY), 0.016, &config);
        assert_eq!(*player.pose(), before);
        let run = ControlFrame::moving(MovementIntent {
            strafe: f32::NEG_INFINITY,
            ..Default::default()
        });
        player.walk(&run, 0.016, &config);
        assert_eq!(*player.pose(), before);
    }

    #[test]
    fn avatar_matrix_lifts_body_onto_feet() {
        let transform = PlayerTransform {
            position: Vec3::new(2.0, 0.0, 1.0),
            yaw: 0.0,
        };
        let base = transform.world_matrix().transform_point3(Vec3::new(0.0, -0.5, 0.0));
        assert!((base - transform.position).length() < 1e-5);
    }
}
