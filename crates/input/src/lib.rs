//! Input layer: raw events in, one snapshot per frame out.
//!
//! # Invariants
//! - The camera never polls devices; it consumes an injected [`ControlFrame`].
//! - The first motion sample after a focus change or mode switch is discarded.
//! - Mode-switch and parameter keys fire once per press, not once per frame.

pub mod action;
pub mod bindings;
pub mod key;
pub mod sampler;

pub use action::Action;
pub use bindings::{ControlFrame, KeyBindings, MovementIntent};
pub use key::{InputEvent, Key};
pub use sampler::{InputSampler, InputSnapshot, LookControl};
