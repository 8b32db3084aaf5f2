//! Shared vocabulary: camera modes, grid parameters and guarded math helpers.
//!
//! # Invariants
//! - Every helper is total: finite inputs never produce NaN or infinity.
//! - Grid parameters are clamped where they are mutated, never downstream.

pub mod math;
pub mod types;

pub use math::{
    MIN_LENGTH_SQUARED, PITCH_EPSILON, clamp_pitch, flatten, safe_normalize, wrap_angle,
};
pub use types::{
    CameraMode, GRID_SIZE_MAX, GRID_SIZE_MIN, GridParameters, ORBIT_COUNT_LIMIT, SPACING_MAX,
    SPACING_MIN,
};
