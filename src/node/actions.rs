//! Per-node action scheduling.

use smallvec::SmallVec;

use crate::animation::action::{Action, ActionState};
use crate::foundation::error::TableauResult;
use crate::foundation::math::name_hash;
use crate::node::tree::{NodeId, NodeTree};

#[derive(Clone, Copy)]
enum Control {
    Pause,
    Resume,
    Stop,
}

impl Control {
    fn apply(self, action: &mut Action) {
        match self {
            Control::Pause => action.pause(),
            Control::Resume => action.resume(),
            Control::Stop => action.stop(),
        }
    }

    fn apply_to_state(self, state: ActionState) -> ActionState {
        match (self, state) {
            (Control::Stop, _) => ActionState::Done,
            (Control::Pause, ActionState::Running) => ActionState::Paused,
            (Control::Resume, ActionState::Paused) => ActionState::Running,
            (_, state) => state,
        }
    }
}

/// The action taken out of its node while it advances.
///
/// Controls addressed to it land in `state` and are applied when it is put back.
pub(crate) struct InFlight {
    name_hash: u64,
    name: Option<String>,
    state: ActionState,
}

impl InFlight {
    fn of(action: &Action) -> Self {
        Self {
            name_hash: action.name_hash(),
            name: action.name().map(str::to_owned),
            state: ActionState::Running,
        }
    }

    fn name_matches(&self, hash: u64, name: &str) -> bool {
        self.name_hash == hash && self.name.as_deref() == Some(name)
    }

    fn settle(&self, action: &mut Action) {
        match self.state {
            ActionState::Done => action.stop(),
            ActionState::Paused => action.pause(),
            ActionState::Idle | ActionState::Running => {}
        }
    }
}

impl NodeTree {
    /// Bind `action` to `id` and start it.
    ///
    /// Fails if the action is already bound to a node (clone it instead) or `id` is dead.
    pub fn run_action(&mut self, id: NodeId, mut action: Action) -> TableauResult<()> {
        self.node(id)?;
        action.bind(id)?;
        action.serial = self.next_serial();
        self.node_mut(id)?.actions.push(action);
        Ok(())
    }

    /// First action on `id` named `name`.
    pub fn action_named(&self, id: NodeId, name: &str) -> Option<&Action> {
        let hash = name_hash(name);
        self.get(id)?
            .actions
            .iter()
            .find(|a| a.name_matches(hash, name))
    }

    fn with_named_actions(&mut self, id: NodeId, name: &str, control: Control) -> bool {
        let hash = name_hash(name);
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let mut found = false;
        for action in node.actions.iter_mut().filter(|a| a.name_matches(hash, name)) {
            control.apply(action);
            found = true;
        }
        for flight in node.in_flight.iter_mut().filter(|f| f.name_matches(hash, name)) {
            flight.state = control.apply_to_state(flight.state);
            found = true;
        }
        found
    }

    fn with_all_actions(&mut self, id: NodeId, control: Control) {
        if let Some(node) = self.get_mut(id) {
            node.actions.iter_mut().for_each(|a| control.apply(a));
            for flight in &mut node.in_flight {
                flight.state = control.apply_to_state(flight.state);
            }
        }
    }

    /// Pause actions named `name`. Returns whether any matched.
    pub fn pause_action(&mut self, id: NodeId, name: &str) -> bool {
        self.with_named_actions(id, name, Control::Pause)
    }

    /// Resume actions named `name`. Returns whether any matched.
    pub fn resume_action(&mut self, id: NodeId, name: &str) -> bool {
        self.with_named_actions(id, name, Control::Resume)
    }

    /// Stop actions named `name`; they are removed on the next update.
    ///
    /// Also reaches an action that is advancing right now, e.g. one stopping itself from its
    /// own callback; it is swept at the end of the current update.
    pub fn stop_action(&mut self, id: NodeId, name: &str) -> bool {
        self.with_named_actions(id, name, Control::Stop)
    }

    /// Pause every action on `id`.
    pub fn pause_all_actions(&mut self, id: NodeId) {
        self.with_all_actions(id, Control::Pause);
    }

    /// Resume every action on `id`.
    pub fn resume_all_actions(&mut self, id: NodeId) {
        self.with_all_actions(id, Control::Resume);
    }

    /// Stop every action on `id`.
    pub fn stop_all_actions(&mut self, id: NodeId) {
        self.with_all_actions(id, Control::Stop);
    }

    /// Advance the running actions of `id`, then drop finished ones.
    ///
    /// Actions started during this pass first advance on the next one.
    pub(crate) fn update_actions(&mut self, id: NodeId, dt: f64) {
        let Some(node) = self.get(id) else {
            return;
        };
        let due: SmallVec<[u64; 8]> = node
            .actions
            .iter()
            .filter(|a| a.is_running())
            .map(|a| a.serial)
            .collect();

        for serial in due {
            let Some(node) = self.get_mut(id) else {
                return;
            };
            let Some(pos) = node.actions.iter().position(|a| a.serial == serial) else {
                continue;
            };
            let mut action = node.actions.remove(pos);
            node.in_flight.push(InFlight::of(&action));
            action.update(self, dt);
            // Callbacks may have destroyed the node; the action goes with it.
            let Some(node) = self.get_mut(id) else {
                return;
            };
            if let Some(flight) = node.in_flight.pop() {
                flight.settle(&mut action);
            }
            let pos = pos.min(node.actions.len());
            node.actions.insert(pos, action);
        }

        if let Some(node) = self.get_mut(id) {
            node.actions.retain(|a| !a.is_done());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/actions.rs"]
mod tests;
