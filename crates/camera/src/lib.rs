//! Camera core: a four-mode state machine and the matrices derived from it.
//!
//! # Invariants
//! - Pitch stays strictly inside (-π/2, π/2); yaw and roll stay in (-π, π].
//! - View and projection are derived every frame, never edited directly.
//! - Mode switches reconcile camera and avatar poses so the view doesn't jump.
//! - Every matrix builder is total: finite state always yields a finite matrix.

pub mod autofit;
pub mod config;
pub mod model;
pub mod player;
pub mod pose;
pub mod view;

pub use autofit::{AutoFitFrame, fit_radius};
pub use config::{AutoFitConfig, CameraConfig, InvalidConfig, PerspectiveConfig};
pub use model::CameraModel;
pub use player::{PlayerModel, PlayerTransform};
pub use pose::{Axes, CameraPose, PlayerPose};
pub use view::{Perspective, ViewProjection};
