use glam::Vec2;
use glyphgrid_camera::CameraModel;
use glyphgrid_common::CameraMode;
use glyphgrid_input::{Action, InputEvent, InputSampler, KeyBindings};
use glyphgrid_render::FrameSubmission;
use glyphgrid_scene::{FrameTiming, Scene, SceneStatus};

use crate::config::{AppConfig, Viewport};

/// Longest frame the simulation will integrate in one step, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

/// One running viewer: input, camera, scene and frame timing.
#[derive(Debug)]
pub struct Session {
    sampler: InputSampler,
    bindings: KeyBindings,
    camera: CameraModel,
    scene: Scene,
    timing: FrameTiming,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let scene = Scene::new(&config.scene);
        let Viewport { width, height } = config.viewport;
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera = CameraModel::new(config.camera.clone(), aspect, scene.grid());
        let mut sampler = InputSampler::new();
        sampler.set_look_enabled(camera.mode().mouse_look());

        tracing::info!(
            mode = %camera.mode(),
            grid = scene.grid().size(),
            width,
            height,
            "session started"
        );
        Self {
            sampler,
            bindings: config.bindings.clone(),
            camera,
            scene,
            timing: FrameTiming::default(),
        }
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sampler(&self) -> &InputSampler {
        &self.sampler
    }

    /// Queue a platform event for the next step.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.sampler.handle_event(event);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height, self.scene.grid());
    }

    /// Switch camera mode outside of key input (scripts, CLI).
    pub fn set_mode(&mut self, mode: CameraMode) -> bool {
        self.camera.set_mode(mode, self.scene.grid(), &mut self.sampler)
    }

    /// Apply one action. Returns whether anything changed.
    pub fn apply(&mut self, action: &Action) -> bool {
        match *action {
            Action::SetCameraMode(mode) => self.set_mode(mode),
            _ => self.scene.apply(action),
        }
    }

    /// Advance one frame and return what to draw.
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_DT]` so a stall never turns into a
    /// teleport.
    pub fn step(&mut self, dt: f32) -> FrameSubmission {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        let _span = tracing::trace_span!("step", dt).entered();

        let snapshot = self.sampler.sample();
        let mut control = self.bindings.control(&snapshot);

        let mut switched = false;
        for action in self.bindings.actions(&snapshot) {
            if self.apply(&action) && !action.touches_grid() {
                switched = true;
            }
        }
        // Motion sampled before a switch belongs to the previous mode.
        if switched {
            control.look = Vec2::ZERO;
        }

        self.camera.update(&control, dt, self.scene.grid());
        self.scene.advance(dt);
        self.timing.tick(dt);

        FrameSubmission {
            matrices: *self.camera.view_projection(),
            scene: self.scene.frame(),
            avatar: self.camera.player_transform(),
        }
    }

    pub fn status(&self) -> SceneStatus {
        SceneStatus {
            mode: self.camera.mode(),
            grid: *self.scene.grid(),
            fps: self.timing.fps(),
        }
    }
}
