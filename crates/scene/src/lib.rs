//! Scene content for the glyph grid: which glyph sits where, how it spins,
//! and the orbiters circling it.
//!
//! # Invariants
//! - Layout is a pure function of grid parameters, cell coordinates and the
//!   animation angle. The same inputs always produce the same instances.
//! - Glyph ids are always in `0..GLYPH_KINDS`.
//! - Grid parameter changes go through [`Scene::apply`], which clamps.

pub mod clock;
pub mod layout;
pub mod scene;
pub mod status;
pub mod timing;

pub use clock::AnimationClock;
pub use layout::{
    GLYPH_KINDS, GlyphInstance, GridCell, InstanceKind, SceneFrame, glyph_id, glyph_scale,
};
pub use scene::{Scene, SceneConfig};
pub use status::SceneStatus;
pub use timing::FrameTiming;
