use glam::{Mat4, Vec3};
use glyphgrid_common::{CameraMode, GridParameters, wrap_angle};
use glyphgrid_input::{ControlFrame, LookControl};

use crate::autofit::AutoFitFrame;
use crate::config::CameraConfig;
use crate::player::{PlayerModel, PlayerTransform};
use crate::pose::{CameraPose, PlayerPose};
use crate::view::{Perspective, ViewProjection, third_person_eye};

/// The camera state machine.
///
/// One update function per mode, dispatched from [`CameraModel::update`], and
/// one explicit transition function run only on a mode change. The view and
/// projection are re-derived after every mutation and are never edited in
/// place.
#[derive(Debug, Clone)]
pub struct CameraModel {
    config: CameraConfig,
    mode: CameraMode,
    camera: CameraPose,
    player: PlayerModel,
    aspect: f32,
    perspective: Perspective,
    matrices: ViewProjection,
}

impl CameraModel {
    /// Start in `config.initial_mode` with the configured poses.
    pub fn new(config: CameraConfig, aspect: f32, grid: &GridParameters) -> Self {
        let camera = config.initial_camera.normalized(config.pitch_epsilon);
        let player = PlayerModel::new(config.initial_player, config.pitch_epsilon);
        let perspective = Perspective::new(&config.perspective, aspect);
        let matrices = ViewProjection::build(
            config.initial_mode,
            &camera,
            player.pose(),
            &config,
            &perspective,
        );
        let mut model = Self {
            mode: config.initial_mode,
            camera,
            player,
            aspect: perspective.aspect,
            perspective,
            matrices,
            config,
        };
        if model.mode == CameraMode::AutoFit {
            model.apply_auto_fit(grid);
        }
        model.refresh(grid);
        model
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn camera_pose(&self) -> &CameraPose {
        &self.camera
    }

    pub fn player_pose(&self) -> &PlayerPose {
        self.player.pose()
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    /// Matrices for the current frame.
    pub fn view_projection(&self) -> &ViewProjection {
        &self.matrices
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.matrices.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.matrices.projection
    }

    /// Where the view is rendered from in the active mode.
    pub fn eye_position(&self) -> Vec3 {
        self.matrices.eye
    }

    /// Avatar placement for drawing; `None` while looking out of its eyes.
    pub fn player_transform(&self) -> Option<PlayerTransform> {
        (self.mode != CameraMode::FirstPerson).then(|| self.player.transform())
    }

    /// Viewport resize. A zero height is treated as one pixel.
    pub fn set_viewport(&mut self, width: u32, height: u32, grid: &GridParameters) {
        self.set_aspect(width.max(1) as f32 / height.max(1) as f32, grid);
    }

    pub fn set_aspect(&mut self, aspect: f32, grid: &GridParameters) {
        self.aspect = crate::view::sanitize_aspect(aspect);
        self.refresh(grid);
    }

    /// Switch modes. Returns `false` (and does nothing) if `mode` is already
    /// active.
    ///
    /// Always re-arms the input's first-sample guard and drops pending mouse
    /// motion, so the first look sample in the new mode can't jump.
    pub fn set_mode(
        &mut self,
        mode: CameraMode,
        grid: &GridParameters,
        look: &mut impl LookControl,
    ) -> bool {
        if mode == self.mode {
            return false;
        }
        let from = self.mode;
        self.transition(from, mode, grid);

        look.set_look_enabled(mode.mouse_look());
        look.reset_look();

        tracing::info!(from = %from, to = %mode, "camera mode changed");
        true
    }

    /// Advance one frame in the active mode.
    ///
    /// Non-finite control input is rejected before it is integrated, and a
    /// non-finite result is discarded. Either way the previous pose is kept.
    pub fn update(&mut self, control: &ControlFrame, dt: f32, grid: &GridParameters) {
        let _span = tracing::trace_span!("camera_update", mode = %self.mode).entered();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if !control.is_finite() {
            tracing::warn!(mode = %self.mode, "non-finite control input, keeping previous pose");
            if self.mode == CameraMode::AutoFit {
                self.apply_auto_fit(grid);
            }
            self.refresh(grid);
            return;
        }
        let previous_camera = self.camera;
        let previous_player = *self.player.pose();

        match self.mode {
            CameraMode::AutoFit => self.apply_auto_fit(grid),
            CameraMode::FreeFlight => self.fly(control, dt),
            CameraMode::FirstPerson | CameraMode::ThirdPerson => {
                self.player.walk(control, dt, &self.config)
            }
        }

        if !self.camera.is_finite() || !self.player.pose().is_finite() {
            tracing::warn!(mode = %self.mode, "non-finite camera state, keeping previous pose");
            self.camera = previous_camera;
            self.player.restore(previous_player);
        }

        self.refresh(grid);
    }

    fn transition(&mut self, from: CameraMode, to: CameraMode, grid: &GridParameters) {
        use CameraMode::*;

        match (from, to) {
            (AutoFit | FreeFlight, FirstPerson) => {
                self.player.place_at_eye(&self.camera, &self.config)
            }
            (AutoFit | FreeFlight, ThirdPerson) => {
                self.player.place_ahead_of(&self.camera, &self.config)
            }
            (FirstPerson | ThirdPerson, FreeFlight) => {
                let player = *self.player.pose();
                let eye = match from {
                    FirstPerson => player.eye(self.config.eye_height),
                    _ => third_person_eye(&player, &self.config),
                };
                self.camera = CameraPose {
                    position: eye,
                    yaw: player.yaw,
                    pitch: player.pitch,
                    roll: 0.0,
                };
            }
            // First <-> third person share the avatar; auto-fit is recomputed below.
            _ => {}
        }

        if to != FreeFlight {
            self.camera.roll = 0.0;
        }
        self.mode = to;
        if to == AutoFit {
            self.apply_auto_fit(grid);
        }
        self.refresh(grid);
    }

    fn apply_auto_fit(&mut self, grid: &GridParameters) {
        let auto_fit = &self.config.auto_fit;
        let frame = AutoFitFrame::compute(grid, auto_fit, self.config.pitch_epsilon);
        self.camera = frame.pose;
    }

    fn fly(&mut self, control: &ControlFrame, dt: f32) {
        let config = &self.config;
        let mut pose = self.camera;
        pose.yaw += control.look.x * config.mouse_sensitivity;
        pose.pitch += control.look.y * config.mouse_sensitivity;
        pose.roll = wrap_angle(pose.roll + control.movement.roll * config.roll_speed * dt);
        pose = pose.normalized(config.pitch_epsilon);

        let axes = pose.axes();
        let movement = control.movement;
        let step = config.move_speed * dt;
        pose.position += (axes.forward * movement.forward + axes.right * movement.strafe) * step;
        pose.position.y += movement.lift * step;

        self.camera = pose;
    }

    /// Recompute projection parameters and matrices from the current state.
    fn refresh(&mut self, grid: &GridParameters) {
        self.perspective = match self.mode {
            CameraMode::AutoFit => {
                let auto_fit = &self.config.auto_fit;
                let frame = AutoFitFrame::compute(grid, auto_fit, self.config.pitch_epsilon);
                Perspective::auto_fit(&frame, auto_fit.fov_y, self.aspect)
            }
            _ => Perspective::new(&self.config.perspective, self.aspect),
        };
        self.matrices = ViewProjection::build(
            self.mode,
            &self.camera,
            self.player.pose(),
            &self.config,
            &self.perspective,
        );
    }
}
