//! Runtime: owns every piece of per-frame state and steps it in a fixed order.
//!
//! # Invariants
//! - One owner per pose; nothing is shared or updated concurrently.
//! - Each step runs input sampling, actions, camera update, then scene layout.
//! - Configuration is validated before a session is built from it.

mod config;
mod session;

pub use config::{AppConfig, ConfigError, Viewport};
pub use session::{MAX_FRAME_DT, Session};
