//! Input events delivered to the editor by the host platform.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// A pointer sample from mouse, pen or touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Position in client coordinates.
    pub position: Point,
    #[serde(default)]
    pub button: PointerButton,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Pen pressure in `(0, 1]`; absent for devices that don't report it.
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Event timestamp in milliseconds.
    #[serde(default)]
    pub time_ms: f64,
}

impl PointerInput {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
            pressure: None,
            time_ms: 0.0,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn at_time(mut self, time_ms: f64) -> Self {
        self.time_ms = time_ms;
        self
    }
}

/// Logical key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Character(char),
    Space,
    Delete,
    Backspace,
    Escape,
    Enter,
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Shorthand for a Ctrl/Cmd chord.
    pub fn command(ch: char) -> Self {
        Self::new(Key::Character(ch)).with_modifiers(Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        })
    }
}

/// Events the editor consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    /// The platform aborted the pointer stream.
    PointerCancel,
    DoubleClick { position: Point },
    /// Positive `delta_y` scrolls away from the user and zooms out.
    Wheel { position: Point, delta_y: f64 },
    KeyDown(KeyInput),
    KeyUp(KeyInput),
    /// The window lost focus.
    Blur,
    /// Canvas layout or device pixel ratio changed.
    Resize {
        origin: Point,
        size: Size,
        #[serde(default = "default_pixel_ratio")]
        device_pixel_ratio: f64,
    },
}

fn default_pixel_ratio() -> f64 {
    1.0
}
