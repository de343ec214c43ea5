//! Typed input and window events.

use crate::foundation::core::Point;
use crate::node::tree::NodeId;

/// Mouse buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

/// Keyboard keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Enter / return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Either shift key.
    Shift,
    /// Either control key.
    Ctrl,
    /// Either alt key.
    Alt,
    /// A letter key, uppercase.
    Letter(char),
    /// A digit key `0..=9`.
    Digit(u8),
    /// A function key `F1..=F12`.
    F(u8),
    /// Any other platform key code.
    Other(u32),
}

/// Payload shared by all mouse events.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MouseEvent {
    /// Cursor position in window coordinates.
    pub pos: Point,
    /// Button that changed, for down/up/click.
    #[serde(default)]
    pub button: Option<MouseButton>,
    /// Whether the left button is held.
    #[serde(default)]
    pub left_down: bool,
    /// Whether the right button is held.
    #[serde(default)]
    pub right_down: bool,
    /// Node a hover/out/click was synthesized for.
    #[serde(skip)]
    pub target: Option<NodeId>,
}

impl MouseEvent {
    /// Cursor at `pos` with no button information.
    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            button: None,
            left_down: false,
            right_down: false,
            target: None,
        }
    }

    /// Builder-style button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }
}

/// An immutable event, dispatched by reference.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Cursor moved.
    MouseMove(MouseEvent),
    /// Button pressed.
    MouseDown(MouseEvent),
    /// Button released.
    MouseUp(MouseEvent),
    /// Wheel scrolled.
    MouseWheel {
        /// Cursor state.
        mouse: MouseEvent,
        /// Scroll amount in notches, positive away from the user.
        wheel: f64,
    },
    /// Cursor entered a responsible node.
    MouseHover(MouseEvent),
    /// Cursor left a responsible node.
    MouseOut(MouseEvent),
    /// Press and release over the same responsible node.
    MouseClick(MouseEvent),
    /// Key pressed.
    KeyDown {
        /// The key.
        code: KeyCode,
    },
    /// Key released.
    KeyUp {
        /// The key.
        code: KeyCode,
    },
    /// Character typed.
    KeyChar {
        /// The character.
        value: char,
    },
    /// Window moved.
    WindowMoved {
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Window resized.
    WindowResized {
        /// New client width.
        width: u32,
        /// New client height.
        height: u32,
    },
    /// Focus gained or lost.
    WindowFocusChanged {
        /// Whether the window now has focus.
        focus: bool,
    },
    /// Title changed.
    WindowTitleChanged {
        /// New title.
        title: String,
    },
    /// Window closed.
    WindowClosed,
}

/// Tag identifying the variant of an [`Event`], used to filter listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// [`Event::MouseMove`].
    MouseMove,
    /// [`Event::MouseDown`].
    MouseDown,
    /// [`Event::MouseUp`].
    MouseUp,
    /// [`Event::MouseWheel`].
    MouseWheel,
    /// [`Event::MouseHover`].
    MouseHover,
    /// [`Event::MouseOut`].
    MouseOut,
    /// [`Event::MouseClick`].
    MouseClick,
    /// [`Event::KeyDown`].
    KeyDown,
    /// [`Event::KeyUp`].
    KeyUp,
    /// [`Event::KeyChar`].
    KeyChar,
    /// [`Event::WindowMoved`].
    WindowMoved,
    /// [`Event::WindowResized`].
    WindowResized,
    /// [`Event::WindowFocusChanged`].
    WindowFocusChanged,
    /// [`Event::WindowTitleChanged`].
    WindowTitleChanged,
    /// [`Event::WindowClosed`].
    WindowClosed,
}

impl Event {
    /// The variant tag.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::MouseMove(_) => EventType::MouseMove,
            Self::MouseDown(_) => EventType::MouseDown,
            Self::MouseUp(_) => EventType::MouseUp,
            Self::MouseWheel { .. } => EventType::MouseWheel,
            Self::MouseHover(_) => EventType::MouseHover,
            Self::MouseOut(_) => EventType::MouseOut,
            Self::MouseClick(_) => EventType::MouseClick,
            Self::KeyDown { .. } => EventType::KeyDown,
            Self::KeyUp { .. } => EventType::KeyUp,
            Self::KeyChar { .. } => EventType::KeyChar,
            Self::WindowMoved { .. } => EventType::WindowMoved,
            Self::WindowResized { .. } => EventType::WindowResized,
            Self::WindowFocusChanged { .. } => EventType::WindowFocusChanged,
            Self::WindowTitleChanged { .. } => EventType::WindowTitleChanged,
            Self::WindowClosed => EventType::WindowClosed,
        }
    }

    /// Mouse payload of mouse events.
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            Self::MouseMove(m)
            | Self::MouseDown(m)
            | Self::MouseUp(m)
            | Self::MouseHover(m)
            | Self::MouseOut(m)
            | Self::MouseClick(m)
            | Self::MouseWheel { mouse: m, .. } => Some(m),
            _ => None,
        }
    }

    /// `true` for mouse events.
    pub fn is_mouse(&self) -> bool {
        self.mouse().is_some()
    }

    /// `true` for keyboard events.
    pub fn is_key(&self) -> bool {
        matches!(
            self,
            Self::KeyDown { .. } | Self::KeyUp { .. } | Self::KeyChar { .. }
        )
    }

    /// `true` for window events.
    pub fn is_window(&self) -> bool {
        !self.is_mouse() && !self.is_key()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/event/event.rs"]
mod tests;
