use serde::{Deserialize, Serialize};

/// Keys the viewer reacts to. Anything else is dropped by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    Ctrl,
    Shift,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Plus,
    Minus,
    LeftBracket,
    RightBracket,
    Comma,
    Period,
    Escape,
}

/// Platform-independent input events, produced by whatever owns the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Absolute cursor position in window pixels.
    CursorMoved { x: f32, y: f32 },
    /// Raw relative mouse motion (pointer-locked devices).
    MouseMotion { dx: f32, dy: f32 },
    FocusGained,
    FocusLost,
}
