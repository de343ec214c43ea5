//! Buttons: responsible nodes that swap their content with the pointer state.

use std::fmt;
use std::sync::Arc;

use crate::event::event::{Event, MouseButton, MouseEvent};
use crate::event::listener::Listener;
use crate::foundation::error::{TableauError, TableauResult};
use crate::node::node::Content;
use crate::node::tree::{NodeId, NodeTree};

/// Name of the listener a button installs on its node.
pub const BUTTON_LISTENER: &str = "button";

/// Callback run when an enabled button is clicked.
pub type ButtonCallback = Arc<dyn Fn(&mut NodeTree, NodeId)>;

/// Pointer state of a [`Button`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Idle.
    #[default]
    Normal,
    /// Cursor over the button.
    MouseOver,
    /// Pressed and not yet released.
    Selected,
    /// Ignores the pointer.
    Disabled,
}

/// Per-state visuals and the click callback of a button node.
///
/// Missing visuals fall back to `normal`.
#[derive(Clone)]
pub struct Button {
    normal: Content,
    mouse_over: Option<Content>,
    selected: Option<Content>,
    disabled: Option<Content>,
    on_click: Option<ButtonCallback>,
    state: ButtonState,
    enabled: bool,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl Button {
    /// An enabled button showing `normal` in every state.
    pub fn new(normal: Content) -> Self {
        Self {
            normal,
            mouse_over: None,
            selected: None,
            disabled: None,
            on_click: None,
            state: ButtonState::Normal,
            enabled: true,
        }
    }

    /// Builder-style visual for [`ButtonState::MouseOver`].
    pub fn with_mouse_over(mut self, content: Content) -> Self {
        self.mouse_over = Some(content);
        self
    }

    /// Builder-style visual for [`ButtonState::Selected`].
    pub fn with_selected(mut self, content: Content) -> Self {
        self.selected = Some(content);
        self
    }

    /// Builder-style visual for [`ButtonState::Disabled`].
    pub fn with_disabled(mut self, content: Content) -> Self {
        self.disabled = Some(content);
        self
    }

    /// Builder-style click callback.
    pub fn on_click(mut self, callback: impl Fn(&mut NodeTree, NodeId) + 'static) -> Self {
        self.on_click = Some(Arc::new(callback));
        self
    }

    /// Builder-style enabled flag.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Current pointer state.
    pub fn state(&self) -> ButtonState {
        if self.enabled {
            self.state
        } else {
            ButtonState::Disabled
        }
    }

    /// Whether the button reacts to the pointer.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn visual(&self) -> &Content {
        let picked = match self.state() {
            ButtonState::Normal => None,
            ButtonState::MouseOver => self.mouse_over.as_ref(),
            ButtonState::Selected => self.selected.as_ref(),
            ButtonState::Disabled => self.disabled.as_ref(),
        };
        picked.unwrap_or(&self.normal)
    }
}

fn primary(mouse: &MouseEvent) -> bool {
    matches!(mouse.button, None | Some(MouseButton::Left))
}

impl NodeTree {
    /// Turn `id` into a button.
    ///
    /// Makes the node responsible, shows the visual for the current state and installs a
    /// listener named [`BUTTON_LISTENER`]. A click fires when the button is pressed and
    /// released inside; dragging out cancels the press.
    pub fn make_button(&mut self, id: NodeId, mut button: Button) -> TableauResult<()> {
        let node = self.node_mut(id)?;
        if node.button.is_some() {
            return Err(TableauError::structure("node is already a button"));
        }
        button.state = if node.hovering {
            ButtonState::MouseOver
        } else {
            ButtonState::Normal
        };
        node.set_responsible(true);
        node.set_content(button.visual().clone());
        node.button = Some(button);
        self.add_listener(
            id,
            Listener::all(|tree, id, event, _| tree.drive_button(id, event)).named(BUTTON_LISTENER),
        )
    }

    /// The button state of `id`, or `None` if it is not a button.
    pub fn button_state(&self, id: NodeId) -> Option<ButtonState> {
        self.get(id)?.button.as_ref().map(Button::state)
    }

    /// Enable or disable the button `id`. A disabled button shows its disabled visual and
    /// ignores clicks.
    pub fn set_button_enabled(&mut self, id: NodeId, enabled: bool) -> TableauResult<()> {
        let node = self.node_mut(id)?;
        let hovering = node.hovering;
        let Some(button) = node.button.as_mut() else {
            return Err(TableauError::structure("node is not a button"));
        };
        if button.enabled == enabled {
            return Ok(());
        }
        button.enabled = enabled;
        button.state = if hovering {
            ButtonState::MouseOver
        } else {
            ButtonState::Normal
        };
        if !enabled {
            node.pressed = false;
        }
        self.show_button_state(id);
        Ok(())
    }

    fn drive_button(&mut self, id: NodeId, event: &Event) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let (hovering, pressed) = (node.hovering, node.pressed);
        let Some(button) = node.button.as_mut() else {
            return;
        };
        if !button.enabled {
            return;
        }
        let next = match event {
            Event::MouseHover(_) => ButtonState::MouseOver,
            Event::MouseOut(_) => ButtonState::Normal,
            Event::MouseDown(m) if pressed && primary(m) => ButtonState::Selected,
            Event::MouseUp(_) if hovering => ButtonState::MouseOver,
            Event::MouseUp(_) => ButtonState::Normal,
            Event::MouseClick(m) if primary(m) => {
                if let Some(callback) = button.on_click.clone() {
                    callback(self, id);
                }
                return;
            }
            _ => return,
        };
        if button.state != next {
            button.state = next;
            self.show_button_state(id);
        }
    }

    fn show_button_state(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id)
            && let Some(content) = node.button.as_ref().map(|b| b.visual().clone())
        {
            node.set_content(content);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/button.rs"]
mod tests;
