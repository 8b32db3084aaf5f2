use glam::{EulerRot, Quat, Vec3};
use glyphgrid_common::{clamp_pitch, flatten, wrap_angle};
use serde::{Deserialize, Serialize};

/// Orthonormal basis of an oriented pose.
///
/// Left-handed: +X right, +Y up, +Z forward at zero rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Axes {
    /// Yaw about +Y, then pitch about the local X, then roll about the local Z.
    ///
    /// Positive pitch tilts the forward axis down, positive yaw turns it
    /// toward +X.
    pub fn from_angles(yaw: f32, pitch: f32, roll: f32) -> Self {
        let rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll);
        Self {
            forward: rotation * Vec3::Z,
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
        }
    }
}

/// Free camera orientation and position. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }
}

impl CameraPose {
    pub fn axes(&self) -> Axes {
        Axes::from_angles(self.yaw, self.pitch, self.roll)
    }

    pub fn forward(&self) -> Vec3 {
        self.axes().forward
    }

    /// Clamp pitch and wrap yaw and roll into their canonical ranges.
    pub fn normalized(self, pitch_epsilon: f32) -> Self {
        Self {
            position: self.position,
            yaw: wrap_angle(self.yaw),
            pitch: clamp_pitch(self.pitch, pitch_epsilon),
            roll: wrap_angle(self.roll),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.yaw.is_finite()
            && self.pitch.is_finite()
            && self.roll.is_finite()
    }
}

/// Avatar state on the ground plane. Never rolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// Feet position.
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for PlayerPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl PlayerPose {
    /// Look axes; up is the rolled-free local up.
    pub fn axes(&self) -> Axes {
        Axes::from_angles(self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.axes().forward
    }

    /// Forward and right projected onto the ground plane.
    ///
    /// Either may be the zero vector when the look direction is vertical.
    pub fn ground_axes(&self) -> (Vec3, Vec3) {
        let axes = self.axes();
        (flatten(axes.forward), flatten(axes.right))
    }

    /// Eye position for the given eye height.
    pub fn eye(&self, eye_height: f32) -> Vec3 {
        self.position + Vec3::Y * eye_height
    }

    pub fn normalized(self, pitch_epsilon: f32) -> Self {
        Self {
            position: self.position,
            yaw: wrap_angle(self.yaw),
            pitch: clamp_pitch(self.pitch, pitch_epsilon),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.yaw.is_finite() && self.pitch.is_finite()
    }
}
