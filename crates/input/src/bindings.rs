use glam::Vec2;
use glyphgrid_common::CameraMode;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::key::Key;
use crate::sampler::InputSnapshot;

/// Spacing change per key press.
const SPACING_STEP: f32 = 0.5;

/// Signed movement axes for one frame, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Forward (+) / backward (-).
    pub forward: f32,
    /// Right (+) / left (-).
    pub strafe: f32,
    /// Up (+) / down (-), along world Y.
    pub lift: f32,
    /// Roll right (+) / left (-).
    pub roll: f32,
}

/// What the camera consumes each frame: look delta plus movement intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlFrame {
    /// Mouse motion in pixels; +x right, +y down the screen.
    pub look: Vec2,
    pub movement: MovementIntent,
}

impl ControlFrame {
    /// A frame with only held movement and no mouse motion.
    pub fn moving(movement: MovementIntent) -> Self {
        Self {
            look: Vec2::ZERO,
            movement,
        }
    }

    /// A frame with only mouse motion.
    pub fn looking(dx: f32, dy: f32) -> Self {
        Self {
            look: Vec2::new(dx, dy),
            movement: MovementIntent::default(),
        }
    }

    /// Whether every axis and the look delta are finite numbers.
    pub fn is_finite(&self) -> bool {
        let m = self.movement;
        self.look.is_finite()
            && [m.forward, m.strafe, m.lift, m.roll]
                .iter()
                .all(|v| v.is_finite())
    }
}

/// Key mapping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    /// Second descend key, held alongside or instead of `down`.
    pub down_alt: Key,
    pub roll_left: Key,
    pub roll_right: Key,
    pub auto_fit: Key,
    pub free_flight: Key,
    pub first_person: Key,
    pub third_person: Key,
    pub grid_grow: Key,
    pub grid_shrink: Key,
    pub spacing_up: Key,
    pub spacing_down: Key,
    pub orbit_more: Key,
    pub orbit_fewer: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
            up: Key::Space,
            down: Key::Ctrl,
            down_alt: Key::Shift,
            roll_left: Key::Q,
            roll_right: Key::E,
            auto_fit: Key::Digit0,
            first_person: Key::Digit1,
            third_person: Key::Digit2,
            free_flight: Key::Digit3,
            grid_grow: Key::Plus,
            grid_shrink: Key::Minus,
            spacing_down: Key::LeftBracket,
            spacing_up: Key::RightBracket,
            orbit_fewer: Key::Comma,
            orbit_more: Key::Period,
        }
    }
}

impl KeyBindings {
    /// Movement axes from the keys held in `snapshot`.
    pub fn movement(&self, snapshot: &InputSnapshot) -> MovementIntent {
        let held = |key: Key| f32::from(u8::from(snapshot.is_held(key)));
        let axis = |pos: Key, neg: Key| held(pos) - held(neg);
        let descend = snapshot.is_held(self.down) || snapshot.is_held(self.down_alt);
        MovementIntent {
            forward: axis(self.forward, self.backward),
            strafe: axis(self.right, self.left),
            lift: held(self.up) - f32::from(u8::from(descend)),
            roll: axis(self.roll_right, self.roll_left),
        }
    }

    /// Look delta and movement for the camera update.
    pub fn control(&self, snapshot: &InputSnapshot) -> ControlFrame {
        ControlFrame {
            look: snapshot.mouse_delta(),
            movement: self.movement(snapshot),
        }
    }

    /// Map a single pressed key to its action, if bound.
    pub fn action_for(&self, key: Key) -> Option<Action> {
        let action = match key {
            k if k == self.auto_fit => Action::SetCameraMode(CameraMode::AutoFit),
            k if k == self.free_flight => Action::SetCameraMode(CameraMode::FreeFlight),
            k if k == self.first_person => Action::SetCameraMode(CameraMode::FirstPerson),
            k if k == self.third_person => Action::SetCameraMode(CameraMode::ThirdPerson),
            k if k == self.grid_grow => Action::AdjustGridSize(1),
            k if k == self.grid_shrink => Action::AdjustGridSize(-1),
            k if k == self.spacing_up => Action::AdjustSpacing(SPACING_STEP),
            k if k == self.spacing_down => Action::AdjustSpacing(-SPACING_STEP),
            k if k == self.orbit_more => Action::AdjustOrbitMax(1),
            k if k == self.orbit_fewer => Action::AdjustOrbitMax(-1),
            _ => return None,
        };
        Some(action)
    }

    /// Actions for every key pressed this frame, in press order.
    pub fn actions(&self, snapshot: &InputSnapshot) -> Vec<Action> {
        snapshot
            .pressed()
            .iter()
            .filter_map(|&key| self.action_for(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn w_only_is_pure_forward() {
        let bindings = KeyBindings::default();
        let snap = InputSnapshot::new(Vec2::ZERO, [Key::W], []);
        let m = bindings.movement(&snap);
        assert_eq!(m.forward, 1.0);
        assert_eq!(m.strafe, 0.0);
        assert_eq!(m.lift, 0.0);
        assert_eq!(m.roll, 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let bindings = KeyBindings::default();
        let snap = InputSnapshot::new(Vec2::ZERO, [Key::A, Key::D, Key::Q], []);
        let m = bindings.movement(&snap);
        assert_eq!(m.strafe, 0.0);
        assert_eq!(m.roll, -1.0);
    }

    #[test]
    fn shift_also_descends() {
        let bindings = KeyBindings::default();
        let shift = InputSnapshot::new(Vec2::ZERO, [Key::Shift], []);
        assert_eq!(bindings.movement(&shift).lift, -1.0);
        let both = InputSnapshot::new(Vec2::ZERO, [Key::Shift, Key::Ctrl], []);
        assert_eq!(bindings.movement(&both).lift, -1.0);
        let cancel = InputSnapshot::new(Vec2::ZERO, [Key::Shift, Key::Space], []);
        assert_eq!(bindings.movement(&cancel).lift, 0.0);
    }

    #[test]
    fn non_finite_control_is_detected() {
        assert!(ControlFrame::looking(400.0, -40.0).is_finite());
        assert!(!ControlFrame::looking(f32::NAN, 0.0).is_finite());
        assert!(!ControlFrame::looking(0.0, f32::INFINITY).is_finite());
        let roll = ControlFrame::moving(MovementIntent {
            roll: f32::NEG_INFINITY,
            ..Default::default()
        });
        assert!(!roll.is_finite());
    }

    #[test]
    fn digits_switch_modes() {
        let bindings = KeyBindings::default();
        let snap = InputSnapshot::new(Vec2::ZERO, [], [Key::Digit1, Key::Digit0, Key::W]);
        assert_eq!(
            bindings.actions(&snap),
            vec![
                Action::SetCameraMode(CameraMode::FirstPerson),
                Action::SetCameraMode(CameraMode::AutoFit),
            ]
        );
    }

    #[test]
    fn parameter_keys_map_to_adjustments() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for(Key::Plus), Some(Action::AdjustGridSize(1)));
        assert_eq!(bindings.action_for(Key::LeftBracket), Some(Action::AdjustSpacing(-0.5)));
        assert_eq!(bindings.action_for(Key::Comma), Some(Action::AdjustOrbitMax(-1)));
        assert_eq!(bindings.action_for(Key::Escape), None);
    }

    #[test]
    fn control_carries_mouse_delta() {
        let bindings = KeyBindings::default();
        let snap = InputSnapshot::new(Vec2::new(4.0, -2.0), [Key::Space], []);
        let control = bindings.control(&snap);
        assert_eq!(control.look, Vec2::new(4.0, -2.0));
        assert_eq!(control.movement.lift, 1.0);
    }

    #[test]
    fn bindings_load_from_yaml_with_defaults() {
        let bindings: KeyBindings =
            serde_yaml::from_str("forward: q\nroll_left: w\n").unwrap();
        assert_eq!(bindings.forward, Key::Q);
        assert_eq!(bindings.roll_left, Key::W);
        assert_eq!(bindings.backward, Key::S);
    }
}
