use glam::Vec2;
use std::collections::HashSet;

use crate::key::{InputEvent, Key};

/// Everything the frame update needs to know about the devices, captured once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    mouse_delta: Vec2,
    held: HashSet<Key>,
    pressed: Vec<Key>,
}

impl InputSnapshot {
    /// Build a snapshot directly. The platform path goes through [`InputSampler`].
    pub fn new(
        mouse_delta: Vec2,
        held: impl IntoIterator<Item = Key>,
        pressed: impl IntoIterator<Item = Key>,
    ) -> Self {
        Self {
            mouse_delta,
            held: held.into_iter().collect(),
            pressed: pressed.into_iter().collect(),
        }
    }

    /// Mouse motion accumulated since the previous sample, in pixels.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Whether `key` went down during this frame.
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Keys that went down this frame, in arrival order.
    pub fn pressed(&self) -> &[Key] {
        &self.pressed
    }
}

/// The part of the input layer a camera mode switch needs to touch.
pub trait LookControl {
    /// Drop pending motion and re-arm the first-sample guard.
    fn reset_look(&mut self);
    /// Enable or disable mouse look.
    fn set_look_enabled(&mut self, enabled: bool);
}

/// Accumulates raw events between frames and hands out [`InputSnapshot`]s.
///
/// Holds a first-sample guard: right after start-up, a focus change or
/// [`InputSampler::reset_look`], the next motion event only establishes a
/// baseline and contributes no delta. Without it the first cursor event after
/// a mode switch would read as a jump across the whole window.
#[derive(Debug, Clone)]
pub struct InputSampler {
    held: HashSet<Key>,
    pressed: Vec<Key>,
    mouse_delta: Vec2,
    last_cursor: Option<Vec2>,
    guard_armed: bool,
    look_enabled: bool,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSampler {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: Vec::new(),
            mouse_delta: Vec2::ZERO,
            last_cursor: None,
            guard_armed: true,
            look_enabled: true,
        }
    }

    /// Feed one platform event.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                if self.held.insert(key) {
                    self.pressed.push(key);
                }
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
            InputEvent::CursorMoved { x, y } => self.cursor_moved(Vec2::new(x, y)),
            InputEvent::MouseMotion { dx, dy } => self.mouse_motion(Vec2::new(dx, dy)),
            InputEvent::FocusGained => {
                tracing::debug!("focus gained, re-arming look guard");
                self.reset_look();
            }
            InputEvent::FocusLost => {
                tracing::debug!("focus lost, releasing held keys");
                self.held.clear();
                self.reset_look();
            }
        }
    }

    /// Take the state accumulated since the last call.
    pub fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            mouse_delta: std::mem::take(&mut self.mouse_delta),
            held: self.held.clone(),
            pressed: std::mem::take(&mut self.pressed),
        }
    }

    /// Drop pending motion and re-arm the first-sample guard.
    pub fn reset_look(&mut self) {
        self.guard_armed = true;
        self.mouse_delta = Vec2::ZERO;
        self.last_cursor = None;
    }

    /// Enable or disable mouse look. Re-enabling re-arms the guard.
    pub fn set_look_enabled(&mut self, enabled: bool) {
        if self.look_enabled == enabled {
            return;
        }
        self.look_enabled = enabled;
        self.reset_look();
    }

    pub fn look_enabled(&self) -> bool {
        self.look_enabled
    }

    /// Whether the next motion event will be swallowed.
    pub fn guard_armed(&self) -> bool {
        self.guard_armed
    }

    fn cursor_moved(&mut self, position: Vec2) {
        if !self.look_enabled || !position.is_finite() {
            return;
        }
        if self.guard_armed {
            tracing::trace!("first cursor sample suppressed");
            self.guard_armed = false;
        } else if let Some(last) = self.last_cursor {
            self.mouse_delta += position - last;
        }
        self.last_cursor = Some(position);
    }

    fn mouse_motion(&mut self, delta: Vec2) {
        if !self.look_enabled || !delta.is_finite() {
            return;
        }
        if self.guard_armed {
            tracing::trace!("first motion sample suppressed");
            self.guard_armed = false;
            return;
        }
        self.mouse_delta += delta;
    }
}

impl LookControl for InputSampler {
    fn reset_look(&mut self) {
        InputSampler::reset_look(self);
    }

    fn set_look_enabled(&mut self, enabled: bool) {
        InputSampler::set_look_enabled(self, enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion(dx: f32, dy: f32) -> InputEvent {
        InputEvent::MouseMotion { dx, dy }
    }

    #[test]
    fn first_motion_is_suppressed() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&motion(500.0, 300.0));
        sampler.handle_event(&motion(2.0, -1.0));
        let snap = sampler.sample();
        assert_eq!(snap.mouse_delta(), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn first_cursor_position_sets_baseline() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&InputEvent::CursorMoved { x: 640.0, y: 360.0 });
        assert_eq!(sampler.sample().mouse_delta(), Vec2::ZERO);
        sampler.handle_event(&InputEvent::CursorMoved { x: 650.0, y: 355.0 });
        sampler.handle_event(&InputEvent::CursorMoved { x: 652.0, y: 356.0 });
        assert_eq!(sampler.sample().mouse_delta(), Vec2::new(12.0, -4.0));
    }

    #[test]
    fn reset_look_zeroes_pending_and_rearms() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&motion(0.0, 0.0));
        sampler.handle_event(&motion(5.0, 5.0));
        sampler.reset_look();
        assert!(sampler.guard_armed());
        sampler.handle_event(&motion(100.0, 100.0));
        assert_eq!(sampler.sample().mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn sample_resets_accumulator() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&motion(0.0, 0.0));
        sampler.handle_event(&motion(3.0, 4.0));
        assert_eq!(sampler.sample().mouse_delta(), Vec2::new(3.0, 4.0));
        assert_eq!(sampler.sample().mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn pressed_fires_once_per_press() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&InputEvent::KeyDown(Key::Digit1));
        sampler.handle_event(&InputEvent::KeyDown(Key::Digit1));
        let snap = sampler.sample();
        assert_eq!(snap.pressed(), &[Key::Digit1]);
        assert!(snap.is_held(Key::Digit1));

        let snap = sampler.sample();
        assert!(!snap.was_pressed(Key::Digit1));
        assert!(snap.is_held(Key::Digit1));
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&InputEvent::KeyDown(Key::W));
        sampler.handle_event(&InputEvent::FocusLost);
        assert!(!sampler.sample().is_held(Key::W));
        assert!(sampler.guard_armed());
    }

    #[test]
    fn disabled_look_ignores_motion() {
        let mut sampler = InputSampler::new();
        sampler.set_look_enabled(false);
        sampler.handle_event(&motion(1.0, 1.0));
        sampler.handle_event(&motion(1.0, 1.0));
        assert_eq!(sampler.sample().mouse_delta(), Vec2::ZERO);

        sampler.set_look_enabled(true);
        sampler.handle_event(&motion(50.0, 50.0));
        sampler.handle_event(&motion(1.0, 2.0));
        assert_eq!(sampler.sample().mouse_delta(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn non_finite_motion_is_dropped() {
        let mut sampler = InputSampler::new();
        sampler.handle_event(&motion(0.0, 0.0));
        sampler.handle_event(&motion(f32::NAN, 1.0));
        assert_eq!(sampler.sample().mouse_delta(), Vec2::ZERO);
    }
}
