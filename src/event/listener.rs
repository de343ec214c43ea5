//! Event listeners attached to nodes.

use std::fmt;

use crate::event::event::{Event, EventType};
use crate::node::tree::{NodeId, NodeTree};

/// Body of a [`Listener`].
pub type ListenerCallback = Box<dyn FnMut(&mut NodeTree, NodeId, &Event, &mut EventCtx)>;

/// Per-dispatch state shared by every listener that sees one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventCtx {
    handled: bool,
    hit: Option<NodeId>,
}

impl EventCtx {
    /// Whether some listener already consumed the event.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark the event consumed. Later listeners still run and can see the flag.
    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    /// Topmost responsible node under the cursor, once one has claimed the event.
    pub fn hit(&self) -> Option<NodeId> {
        self.hit
    }

    pub(crate) fn claim(&mut self, id: NodeId) -> bool {
        if self.hit.is_some() {
            return false;
        }
        self.hit = Some(id);
        true
    }
}

/// A callback run for events reaching its node.
pub struct Listener {
    pub(crate) serial: u64,
    name: Option<String>,
    name_hash: u64,
    filter: Option<EventType>,
    running: bool,
    removed: bool,
    pub(crate) callback: Option<ListenerCallback>,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl Listener {
    /// Listen to every event.
    pub fn all(
        callback: impl FnMut(&mut NodeTree, NodeId, &Event, &mut EventCtx) + 'static,
    ) -> Self {
        Self {
            serial: 0,
            name: None,
            name_hash: 0,
            filter: None,
            running: true,
            removed: false,
            callback: Some(Box::new(callback)),
        }
    }

    /// Listen to one event type.
    pub fn on(
        event_type: EventType,
        callback: impl FnMut(&mut NodeTree, NodeId, &Event, &mut EventCtx) + 'static,
    ) -> Self {
        Self {
            filter: Some(event_type),
            ..Self::all(callback)
        }
    }

    /// Builder-style name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name_hash = crate::foundation::math::name_hash(&name);
        self.name = Some(name);
        self
    }

    /// Optional name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Event type filter, `None` for all.
    pub fn event_type(&self) -> Option<EventType> {
        self.filter
    }

    /// Whether the listener currently receives events.
    pub fn is_running(&self) -> bool {
        self.running && !self.removed
    }

    /// Resume receiving events.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop receiving events without removing the listener.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Mark for removal after the current dispatch.
    pub fn remove(&mut self) {
        self.removed = true;
    }

    pub(crate) fn is_removed(&self) -> bool {
        self.removed
    }

    pub(crate) fn name_matches(&self, hash: u64, name: &str) -> bool {
        self.name_hash == hash && self.name.as_deref() == Some(name)
    }

    pub(crate) fn accepts(&self, event: &Event) -> bool {
        self.is_running() && self.filter.is_none_or(|t| t == event.event_type())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/event/listener.rs"]
mod tests;
