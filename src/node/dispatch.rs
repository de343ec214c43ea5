//! Event propagation through the tree.

use smallvec::SmallVec;

use crate::event::event::{Event, MouseEvent};
use crate::event::listener::{EventCtx, Listener};
use crate::foundation::error::TableauResult;
use crate::foundation::math::name_hash;
use crate::node::tree::{NodeId, NodeTree};

impl NodeTree {
    /// Attach a listener to `id`.
    pub fn add_listener(&mut self, id: NodeId, mut listener: Listener) -> TableauResult<()> {
        self.node(id)?;
        listener.serial = self.next_serial();
        self.node_mut(id)?.listeners.push(listener);
        Ok(())
    }

    fn with_listeners(&mut self, id: NodeId, name: &str, f: impl Fn(&mut Listener)) -> bool {
        let hash = name_hash(name);
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let mut found = false;
        for l in node
            .listeners
            .iter_mut()
            .filter(|l| l.name_matches(hash, name))
        {
            f(l);
            found = true;
        }
        found
    }

    /// Resume listeners named `name`.
    pub fn start_listener(&mut self, id: NodeId, name: &str) -> bool {
        self.with_listeners(id, name, Listener::start)
    }

    /// Pause listeners named `name`.
    pub fn stop_listener(&mut self, id: NodeId, name: &str) -> bool {
        self.with_listeners(id, name, Listener::stop)
    }

    /// Remove listeners named `name`.
    pub fn remove_listener(&mut self, id: NodeId, name: &str) -> bool {
        let found = self.with_listeners(id, name, Listener::remove);
        self.sweep_listeners(id);
        found
    }

    /// Remove every listener of `id`.
    pub fn remove_all_listeners(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.listeners.clear();
        }
    }

    /// Propagate `event` through the subtree rooted at `id`. Returns whether it was handled.
    pub fn dispatch(&mut self, id: NodeId, event: &Event) -> bool {
        let mut ctx = EventCtx::default();
        self.dispatch_with(id, event, &mut ctx);
        ctx.is_handled()
    }

    /// Children first, topmost first, then the node's own listeners. Hidden subtrees are
    /// skipped. `ctx` is shared, so `handled` accumulates along the way.
    pub fn dispatch_with(&mut self, id: NodeId, event: &Event, ctx: &mut EventCtx) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let swallow = node.swallow_events;
        let responsible = node.responsible;

        if !swallow {
            self.sort_children(id);
            let children: SmallVec<[NodeId; 16]> =
                self.children(id).iter().rev().copied().collect();
            for child in children {
                self.dispatch_with(child, event, ctx);
            }
        }

        if responsible && let Some(mouse) = event.mouse() {
            self.synthesize_mouse(id, event, *mouse, ctx);
        }
        self.notify_listeners(id, event, ctx);
    }

    fn synthesize_mouse(&mut self, id: NodeId, event: &Event, mouse: MouseEvent, ctx: &mut EventCtx) {
        let inside = self.contains_point(id, mouse.pos);
        let claimed = inside && ctx.claim(id);
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let derived = MouseEvent {
            target: Some(id),
            ..mouse
        };

        let synthesized = match event {
            Event::MouseMove(_) => {
                if claimed && !node.hovering {
                    node.hovering = true;
                    Some(Event::MouseHover(derived))
                } else if !claimed && node.hovering {
                    node.hovering = false;
                    node.pressed = false;
                    Some(Event::MouseOut(derived))
                } else {
                    None
                }
            }
            Event::MouseDown(_) => {
                if claimed {
                    node.pressed = true;
                }
                None
            }
            Event::MouseUp(_) => {
                let was_pressed = std::mem::take(&mut node.pressed);
                (claimed && was_pressed).then_some(Event::MouseClick(derived))
            }
            _ => None,
        };

        if let Some(synthesized) = synthesized {
            self.notify_listeners(id, &synthesized, ctx);
        }
    }

    fn notify_listeners(&mut self, id: NodeId, event: &Event, ctx: &mut EventCtx) {
        let Some(node) = self.get(id) else {
            return;
        };
        let due: SmallVec<[u64; 4]> = node
            .listeners
            .iter()
            .filter(|l| l.accepts(event))
            .map(|l| l.serial)
            .collect();

        for serial in due {
            let Some(mut callback) = self
                .get_mut(id)
                .and_then(|n| n.listeners.iter_mut().find(|l| l.serial == serial))
                .and_then(|l| l.callback.take())
            else {
                continue;
            };
            callback(self, id, event, ctx);
            if let Some(l) = self
                .get_mut(id)
                .and_then(|n| n.listeners.iter_mut().find(|l| l.serial == serial))
            {
                l.callback = Some(callback);
            }
        }
        self.sweep_listeners(id);
    }

    fn sweep_listeners(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.listeners.retain(|l| !l.is_removed());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/dispatch.rs"]
mod tests;
