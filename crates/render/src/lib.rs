//! Rendering boundary: what a frame hands to a renderer, and the uniform
//! layout a GPU backend uploads per draw.
//!
//! # Invariants
//! - Renderers only read a [`FrameSubmission`]; camera and scene state are
//!   never reachable from here.
//! - Every draw carries a complete world/view/projection set.
//! - [`FrameUniform`] matches the shader constant buffer byte for byte.
//!
//! # Workaround
//! Ships a debug text renderer instead of a GPU backend. The trait is
//! stable; a GPU implementation slots in without changing consumers.

mod renderer;
mod submission;
mod uniform;

pub use renderer::{DebugTextRenderer, Renderer};
pub use submission::{DrawCall, FrameSubmission, MeshId};
pub use uniform::FrameUniform;
