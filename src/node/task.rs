//! Periodic callbacks bound to a node.

use std::fmt;

use smallvec::SmallVec;

use crate::foundation::error::TableauResult;
use crate::foundation::math::name_hash;
use crate::node::tree::{NodeId, NodeTree};

/// Body of a [`Task`].
pub type TaskCallback = Box<dyn FnMut(&mut NodeTree, NodeId)>;

/// A callback fired every `interval` seconds, a limited or unlimited number of times.
///
/// Time is accumulated from frame deltas. An interval of zero fires every frame.
pub struct Task {
    serial: u64,
    name: Option<String>,
    name_hash: u64,
    interval: f64,
    remaining: i32,
    paused: bool,
    stopped: bool,
    since_fire: f64,
    callback: Option<TaskCallback>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("remaining", &self.remaining)
            .field("paused", &self.paused)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl Task {
    /// Fire `callback` every `interval` seconds, `times` times (`-1` for forever).
    pub fn new(
        interval: f64,
        times: i32,
        callback: impl FnMut(&mut NodeTree, NodeId) + 'static,
    ) -> Self {
        Self {
            serial: 0,
            name: None,
            name_hash: 0,
            interval: interval.max(0.0),
            remaining: times.max(-1),
            paused: false,
            stopped: false,
            since_fire: 0.0,
            callback: Some(Box::new(callback)),
        }
    }

    /// Builder-style name for the name-based controls on [`NodeTree`].
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name_hash = name_hash(&name);
        self.name = Some(name);
        self
    }

    /// Optional name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Seconds between runs.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Runs left, `-1` for unlimited.
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// `true` while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// `true` once stopped; the task is removed on the next update.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Pause without losing accumulated time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue after [`Task::pause`].
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Stop for good.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    fn name_matches(&self, hash: u64, name: &str) -> bool {
        self.name_hash == hash && self.name.as_deref() == Some(name)
    }

    /// Accumulate `dt` and report whether the task should fire now.
    fn tick(&mut self, dt: f64) -> bool {
        if self.paused || self.stopped || self.remaining == 0 {
            return false;
        }
        self.since_fire += dt;
        if self.since_fire < self.interval {
            return false;
        }
        self.since_fire = if self.interval > 0.0 {
            (self.since_fire - self.interval).min(self.interval)
        } else {
            0.0
        };
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        true
    }
}

impl NodeTree {
    /// Attach a task to `id`.
    pub fn add_task(&mut self, id: NodeId, mut task: Task) -> TableauResult<()> {
        self.node(id)?;
        task.serial = self.next_serial();
        self.node_mut(id)?.tasks.push(task);
        Ok(())
    }

    fn with_tasks(&mut self, id: NodeId, name: Option<&str>, f: impl Fn(&mut Task)) -> bool {
        let hash = name.map(name_hash);
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let mut found = false;
        for task in &mut node.tasks {
            let hit = match (name, hash) {
                (Some(name), Some(hash)) => task.name_matches(hash, name),
                _ => true,
            };
            if hit {
                f(task);
                found = true;
            }
        }
        found
    }

    /// Resume tasks named `name`.
    pub fn start_task(&mut self, id: NodeId, name: &str) -> bool {
        self.with_tasks(id, Some(name), Task::resume)
    }

    /// Pause tasks named `name`.
    pub fn pause_task(&mut self, id: NodeId, name: &str) -> bool {
        self.with_tasks(id, Some(name), Task::pause)
    }

    /// Stop tasks named `name`; they are removed on the next update.
    pub fn stop_task(&mut self, id: NodeId, name: &str) -> bool {
        self.with_tasks(id, Some(name), Task::stop)
    }

    /// Remove tasks named `name` right away.
    pub fn remove_task(&mut self, id: NodeId, name: &str) -> usize {
        let hash = name_hash(name);
        let Some(node) = self.get_mut(id) else {
            return 0;
        };
        let before = node.tasks.len();
        node.tasks.retain(|t| !t.name_matches(hash, name));
        before - node.tasks.len()
    }

    /// Resume every task on `id`.
    pub fn start_all_tasks(&mut self, id: NodeId) {
        self.with_tasks(id, None, Task::resume);
    }

    /// Pause every task on `id`.
    pub fn pause_all_tasks(&mut self, id: NodeId) {
        self.with_tasks(id, None, Task::pause);
    }

    /// Stop every task on `id`.
    pub fn stop_all_tasks(&mut self, id: NodeId) {
        self.with_tasks(id, None, Task::stop);
    }

    /// Remove every task on `id` right away.
    pub fn remove_all_tasks(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.tasks.clear();
        }
    }

    /// Fire the tasks of `id` that are due, then drop stopped and exhausted ones.
    pub(crate) fn update_tasks(&mut self, id: NodeId, dt: f64) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let due: SmallVec<[u64; 8]> = node
            .tasks
            .iter_mut()
            .filter_map(|t| t.tick(dt).then_some(t.serial))
            .collect();

        for serial in due {
            let Some(mut callback) = self
                .get_mut(id)
                .and_then(|n| n.tasks.iter_mut().find(|t| t.serial == serial))
                .and_then(|t| t.callback.take())
            else {
                continue;
            };
            callback(self, id);
            if let Some(task) = self
                .get_mut(id)
                .and_then(|n| n.tasks.iter_mut().find(|t| t.serial == serial))
            {
                task.callback = Some(callback);
            }
        }

        if let Some(node) = self.get_mut(id) {
            for task in &mut node.tasks {
                if task.remaining == 0 {
                    task.stopped = true;
                }
            }
            node.tasks.retain(|t| !t.stopped);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/task.rs"]
mod tests;
