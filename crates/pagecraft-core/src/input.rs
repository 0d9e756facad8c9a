//! Input state for pointer and keyboard events, and the gestures built on them.

use crate::element::ElementId;
use crate::geometry::ResizeDirection;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// Keyboard event carrying the key name (`"a"`, `"Delete"`, `"Shift"`...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Key that turns multi-select mode on while held.
pub const MULTI_SELECT_KEY: &str = "Shift";

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Editing command produced by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Delete the selection, or the active element when nothing is selected.
    Delete,
    SelectAll,
    Undo,
    Redo,
    Duplicate,
    /// Multi-select key went down (`true`) or up (`false`).
    MultiSelect(bool),
}

/// Map a key event to an editing command.
pub fn key_action(event: &KeyEvent, modifiers: Modifiers) -> Option<KeyAction> {
    match event {
        KeyEvent::Released(key) if key == MULTI_SELECT_KEY => Some(KeyAction::MultiSelect(false)),
        KeyEvent::Released(_) => None,
        KeyEvent::Pressed(key) if key == MULTI_SELECT_KEY => Some(KeyAction::MultiSelect(true)),
        KeyEvent::Pressed(key) => match key.as_str() {
            "Delete" | "Backspace" => Some(KeyAction::Delete),
            _ if !modifiers.command() => None,
            "a" | "A" => Some(KeyAction::SelectAll),
            "z" | "Z" if modifiers.shift => Some(KeyAction::Redo),
            "z" | "Z" => Some(KeyAction::Undo),
            "y" | "Y" => Some(KeyAction::Redo),
            "d" | "D" => Some(KeyAction::Duplicate),
            _ => None,
        },
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: bool, shift: bool, description: &'static str) -> Self {
        Self {
            key,
            command,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// All keyboard shortcuts understood by the canvas.
pub fn shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new("A", true, false, "Select all elements"),
        Shortcut::new("Z", true, false, "Undo"),
        Shortcut::new("Z", true, true, "Redo"),
        Shortcut::new("Y", true, false, "Redo"),
        Shortcut::new("D", true, false, "Duplicate active element"),
        Shortcut::new("Delete", false, false, "Delete selected elements"),
        Shortcut::new("Backspace", false, false, "Delete selected elements"),
        Shortcut::new("Shift", false, false, "Hold for multi-select"),
    ]
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving an element. The position is committed on pointer-up.
    Drag {
        id: ElementId,
        origin: Point,
        preview: Point,
        last: Point,
    },
    /// Resizing an element through one of its handles.
    Resize {
        id: ElementId,
        direction: ResizeDirection,
        last: Point,
    },
    /// Rubber-band selection.
    Marquee { start: Point, current: Point },
}

impl Gesture {
    /// Check if no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// Tracks pointer, modifier and double-click state across events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Currently pressed keys.
    pressed_keys: HashSet<String>,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the latest pointer-down completed a double-click.
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            modifiers: Modifiers::default(),
            pressed_buttons: HashSet::new(),
            pressed_keys: HashSet::new(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
                self.double_click_detected = false;

                if button == MouseButton::Left {
                    let now = Instant::now();
                    let is_double = match (self.last_click_time, self.last_click_position) {
                        (Some(last_time), Some(last_pos)) => {
                            now.duration_since(last_time).as_millis() < DOUBLE_CLICK_TIME_MS
                                && position.distance(last_pos) < DOUBLE_CLICK_DISTANCE
                        }
                        _ => false,
                    };

                    if is_double {
                        self.double_click_detected = true;
                        // Reset so a triple-click is not a second double-click
                        self.last_click_time = None;
                        self.last_click_position = None;
                    } else {
                        self.last_click_time = Some(now);
                        self.last_click_position = Some(position);
                    }
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
            }
        }
    }

    /// Process a key event.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => {
                self.pressed_keys.insert(key.clone());
            }
            KeyEvent::Released(key) => {
                self.pressed_keys.remove(key);
            }
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Check if a key is currently pressed.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Check if the latest pointer-down completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }
}

/// Delta between two successive pointer positions.
pub fn pointer_delta(last: Point, current: Point) -> Vec2 {
    current - last
}
