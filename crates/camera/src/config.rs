use glam::Vec3;
use glyphgrid_common::{CameraMode, PITCH_EPSILON};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use crate::pose::{CameraPose, PlayerPose};

/// A configuration value outside its usable range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid camera setting `{field}`: {reason}")]
pub struct InvalidConfig {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidConfig {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Perspective parameters for the manually controlled modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_4 * 1.1,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Framing rules for auto-fit mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFitConfig {
    /// Added to the grid's bounding radius.
    pub margin: f32,
    /// Lower bound on the fit radius.
    pub min_radius: f32,
    /// Eye height as a fraction of the radius.
    pub elevation_ratio: f32,
    /// Eye distance behind the origin (along -Z) as a fraction of the radius.
    pub back_ratio: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    /// Far plane is `max(min_far, radius * far_ratio)`.
    pub min_far: f32,
    pub far_ratio: f32,
}

impl Default for AutoFitConfig {
    fn default() -> Self {
        Self {
            margin: 8.0,
            min_radius: 12.0,
            elevation_ratio: 0.45,
            back_ratio: 1.3,
            fov_y: FRAC_PI_4 * 1.2,
            near: 1.0,
            min_far: 1000.0,
            far_ratio: 6.0,
        }
    }
}

/// Tuning for every camera mode, plus the start-up state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_mode: CameraMode,
    pub initial_camera: CameraPose,
    pub initial_player: PlayerPose,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Free-flight speed in units per second.
    pub move_speed: f32,
    /// Free-flight roll rate in radians per second.
    pub roll_speed: f32,
    /// Avatar walking speed in units per second.
    pub player_move_speed: f32,
    /// Eye height above the avatar's feet.
    pub eye_height: f32,
    /// Third-person distance behind the avatar's eye.
    pub follow_distance: f32,
    /// Third-person extra height above the trailing point.
    pub follow_height: f32,
    /// Gap kept between the pitch limit and vertical.
    pub pitch_epsilon: f32,
    pub perspective: PerspectiveConfig,
    pub auto_fit: AutoFitConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_mode: CameraMode::FreeFlight,
            initial_camera: CameraPose {
                position: Vec3::new(0.0, 20.0, -80.0),
                yaw: 0.0,
                pitch: 0.25,
                roll: 0.0,
            },
            initial_player: PlayerPose {
                position: Vec3::new(0.0, 0.0, -60.0),
                yaw: 0.0,
                pitch: 0.0,
            },
            mouse_sensitivity: 0.0025,
            move_speed: 35.0,
            roll_speed: 60.0_f32.to_radians(),
            player_move_speed: 22.0,
            eye_height: 8.0,
            follow_distance: 25.0,
            follow_height: 8.0,
            pitch_epsilon: PITCH_EPSILON,
            perspective: PerspectiveConfig::default(),
            auto_fit: AutoFitConfig::default(),
        }
    }
}

impl CameraConfig {
    /// Reject values that would make the derived matrices degenerate.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let finite_non_negative = [
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("move_speed", self.move_speed),
            ("roll_speed", self.roll_speed),
            ("player_move_speed", self.player_move_speed),
            ("eye_height", self.eye_height),
            ("follow_height", self.follow_height),
            ("auto_fit.margin", self.auto_fit.margin),
            ("auto_fit.elevation_ratio", self.auto_fit.elevation_ratio),
        ];
        for (field, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfig::new(field, format!("{value} must be finite and >= 0")));
            }
        }

        let positive = [
            ("follow_distance", self.follow_distance),
            ("auto_fit.min_radius", self.auto_fit.min_radius),
            ("auto_fit.back_ratio", self.auto_fit.back_ratio),
            ("auto_fit.min_far", self.auto_fit.min_far),
            ("auto_fit.far_ratio", self.auto_fit.far_ratio),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidConfig::new(field, format!("{value} must be finite and > 0")));
            }
        }

        if !(self.pitch_epsilon > 0.0 && self.pitch_epsilon < 0.5) {
            return Err(InvalidConfig::new("pitch_epsilon", "must lie in (0, 0.5)"));
        }

        let manual = &self.perspective;
        check_frustum("perspective", manual.fov_y, manual.near, manual.far)?;
        let fit = &self.auto_fit;
        check_frustum("auto_fit", fit.fov_y, fit.near, fit.min_far)?;

        if !self.initial_camera.is_finite() {
            return Err(InvalidConfig::new("initial_camera", "pose must be finite"));
        }
        if !self.initial_player.is_finite() {
            return Err(InvalidConfig::new("initial_player", "pose must be finite"));
        }
        Ok(())
    }
}

fn check_frustum(
    field: &'static str,
    fov_y: f32,
    near: f32,
    far: f32,
) -> Result<(), InvalidConfig> {
    if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
        return Err(InvalidConfig::new(field, format!("fov_y {fov_y} must lie in (0, π)")));
    }
    if !(near > 0.0 && near.is_finite()) {
        return Err(InvalidConfig::new(field, format!("near {near} must be > 0")));
    }
    if !(far > near && far.is_finite()) {
        return Err(InvalidConfig::new(field, format!("far {far} must exceed near {near}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));
    }

    #[test]
    fn auto_fit_fov_is_wider_than_manual() {
        let config = CameraConfig::default();
        assert!(config.auto_fit.fov_y > config.perspective.fov_y);
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let mut config = CameraConfig::default();
        config.perspective.far = 0.05;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "perspective");
    }

    #[test]
    fn rejects_zero_follow_distance() {
        let config = CameraConfig {
            follow_distance: 0.0,
            ..CameraConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "follow_distance");
    }

    #[test]
    fn rejects_nan_speed() {
        let config = CameraConfig {
            move_speed: f32::NAN,
            ..CameraConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "move_speed");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "move_speed: 10.0\nperspective:\n  far: 500.0\n";
        let config: CameraConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.move_speed, 10.0);
        assert_eq!(config.perspective.far, 500.0);
        assert_eq!(config.perspective.near, 0.1);
        assert_eq!(config.eye_height, 8.0);
        assert_eq!(config.validate(), Ok(()));
    }
}
