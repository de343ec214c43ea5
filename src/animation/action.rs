//! Actions: time-driven behaviors bound to one node.

use std::fmt;
use std::sync::Arc;

use crate::animation::group::{Group, Loop};
use crate::animation::tween::Tween;
use crate::animation::walk::Walk;
use crate::foundation::error::{TableauError, TableauResult};
use crate::foundation::math::name_hash;
use crate::node::tree::{NodeId, NodeTree};

/// Callback invoked with the tree and the action's target.
pub type ActionCallback = Arc<dyn Fn(&mut NodeTree, NodeId)>;

/// Lifecycle of an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionState {
    /// Not started, or reset.
    Idle,
    /// Advancing every update.
    Running,
    /// Started but frozen until resumed.
    Paused,
    /// Finished or stopped; removed from its node on the next update.
    Done,
}

/// Shared contract of the timed action variants.
pub(crate) trait Timeline {
    /// Capture start values from the target.
    fn init(&mut self, tree: &mut NodeTree, target: NodeId);

    /// Advance by `dt`. Returns the unused part of `dt` once the timeline has finished.
    fn advance(&mut self, tree: &mut NodeTree, target: NodeId, dt: f64) -> Option<f64>;

    /// Forget runtime progress so the timeline can be initialized again.
    fn reset(&mut self);

    /// Total length, `None` when unbounded.
    fn duration(&self) -> Option<f64>;
}

/// A fixed wait with no effect.
#[derive(Clone, Debug, PartialEq)]
pub struct Delay {
    duration: f64,
    elapsed: f64,
}

impl Delay {
    /// Wait for `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }
}

impl Timeline for Delay {
    fn init(&mut self, _tree: &mut NodeTree, _target: NodeId) {
        self.elapsed = 0.0;
    }

    fn advance(&mut self, _tree: &mut NodeTree, _target: NodeId, dt: f64) -> Option<f64> {
        self.elapsed += dt;
        (self.elapsed >= self.duration).then(|| self.elapsed - self.duration)
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
}

/// The closed set of action behaviors.
#[derive(Clone)]
pub enum ActionKind {
    /// Interpolate a node property.
    Tween(Tween),
    /// Wait.
    Delay(Delay),
    /// Call a function once, taking no time.
    Callback(ActionCallback),
    /// Run children one after another or all at once.
    Group(Group),
    /// Repeat an action.
    Loop(Loop),
    /// Move along a path.
    Walk(Walk),
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tween(t) => f.debug_tuple("Tween").field(t).finish(),
            Self::Delay(d) => f.debug_tuple("Delay").field(d).finish(),
            Self::Callback(_) => f.write_str("Callback"),
            Self::Group(g) => f.debug_tuple("Group").field(g).finish(),
            Self::Loop(l) => f.debug_tuple("Loop").field(l).finish(),
            Self::Walk(w) => f.debug_tuple("Walk").field(w).finish(),
        }
    }
}

impl ActionKind {
    fn timeline(&mut self) -> Option<&mut dyn Timeline> {
        match self {
            Self::Tween(t) => Some(t),
            Self::Delay(d) => Some(d),
            Self::Group(g) => Some(g),
            Self::Loop(l) => Some(l),
            Self::Walk(w) => Some(w),
            Self::Callback(_) => None,
        }
    }

    fn duration(&self) -> Option<f64> {
        match self {
            Self::Tween(t) => t.duration(),
            Self::Delay(d) => d.duration(),
            Self::Group(g) => g.duration(),
            Self::Loop(l) => l.duration(),
            Self::Walk(w) => w.duration(),
            Self::Callback(_) => Some(0.0),
        }
    }

    fn reversed(&self) -> TableauResult<Self> {
        Ok(match self {
            Self::Tween(t) => Self::Tween(t.reversed()?),
            Self::Delay(d) => Self::Delay(Delay::new(d.duration)),
            Self::Callback(cb) => Self::Callback(cb.clone()),
            Self::Group(g) => Self::Group(g.reversed()?),
            Self::Loop(l) => Self::Loop(l.reversed()?),
            Self::Walk(w) => Self::Walk(w.reversed()),
        })
    }
}

/// A time-driven behavior bound to at most one node.
///
/// Actions start `Idle`, become `Running` once handed to [`NodeTree::run_action`], and end
/// `Done`. Cloning yields an unbound `Idle` copy sharing no mutable state with the original.
pub struct Action {
    pub(crate) serial: u64,
    name: Option<String>,
    name_hash: u64,
    state: ActionState,
    target: Option<NodeId>,
    delay: f64,
    delay_left: f64,
    speed: f64,
    initialized: bool,
    on_done: Option<ActionCallback>,
    kind: ActionKind,
}

impl Clone for Action {
    fn clone(&self) -> Self {
        let mut copy = Self {
            serial: 0,
            name: self.name.clone(),
            name_hash: self.name_hash,
            state: ActionState::Idle,
            target: None,
            delay: self.delay,
            delay_left: self.delay,
            speed: self.speed,
            initialized: false,
            on_done: self.on_done.clone(),
            kind: self.kind.clone(),
        };
        if let Some(timeline) = copy.kind.timeline() {
            timeline.reset();
        }
        copy
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("target", &self.target)
            .field("delay", &self.delay)
            .field("speed", &self.speed)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self::new(kind)
    }
}

impl Action {
    /// Wrap a behavior into an idle, unbound action.
    pub fn new(kind: ActionKind) -> Self {
        Self {
            serial: 0,
            name: None,
            name_hash: 0,
            state: ActionState::Idle,
            target: None,
            delay: 0.0,
            delay_left: 0.0,
            speed: 1.0,
            initialized: false,
            on_done: None,
            kind,
        }
    }

    /// Builder-style name used by the name-based controls on [`NodeTree`].
    pub fn named(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name_hash = name_hash(&name);
        self.name = Some(name);
        self
    }

    /// Builder-style start delay in seconds.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self.delay_left = self.delay;
        self
    }

    /// Builder-style speed factor; `2.0` plays twice as fast. Negative values clamp to zero.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    /// Builder-style completion callback, fired once when the action finishes on its own.
    pub fn on_done(mut self, callback: impl Fn(&mut NodeTree, NodeId) + 'static) -> Self {
        self.on_done = Some(Arc::new(callback));
        self
    }

    /// Optional name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn name_hash(&self) -> u64 {
        self.name_hash
    }

    pub(crate) fn name_matches(&self, hash: u64, name: &str) -> bool {
        self.name_hash == hash && self.name.as_deref() == Some(name)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ActionState {
        self.state
    }

    /// `true` while running.
    pub fn is_running(&self) -> bool {
        self.state == ActionState::Running
    }

    /// `true` once finished or stopped.
    pub fn is_done(&self) -> bool {
        self.state == ActionState::Done
    }

    /// Bound node, if started.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The behavior.
    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Start delay in seconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Speed factor.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Wall time from start to completion (delay included), `None` when unbounded.
    pub fn duration(&self) -> Option<f64> {
        let body = self.kind.duration()?;
        if body == 0.0 {
            return Some(self.delay);
        }
        if self.speed == 0.0 {
            return None;
        }
        Some(self.delay + body / self.speed)
    }

    /// Freeze a running action.
    pub fn pause(&mut self) {
        if self.state == ActionState::Running {
            self.state = ActionState::Paused;
        }
    }

    /// Continue a paused action.
    pub fn resume(&mut self) {
        if self.state == ActionState::Paused {
            self.state = ActionState::Running;
        }
    }

    /// Force `Done` immediately. The done callback does not fire.
    pub fn stop(&mut self) {
        self.state = ActionState::Done;
    }

    /// An unbound, idle action that plays this one backwards in time.
    ///
    /// Fails for absolute tweens whose start value is not known yet.
    pub fn reverse(&self) -> TableauResult<Self> {
        let mut reversed = Self::new(self.kind.reversed()?);
        reversed.name.clone_from(&self.name);
        reversed.name_hash = self.name_hash;
        reversed.delay = self.delay;
        reversed.delay_left = self.delay;
        reversed.speed = self.speed;
        reversed.on_done.clone_from(&self.on_done);
        Ok(reversed)
    }

    pub(crate) fn bind(&mut self, target: NodeId) -> TableauResult<()> {
        if let Some(bound) = self.target {
            return Err(TableauError::structure(format!(
                "action is already bound to node {bound:?}; clone it to run it elsewhere"
            )));
        }
        if self.state != ActionState::Idle {
            return Err(TableauError::structure("only idle actions can be started"));
        }
        self.target = Some(target);
        self.state = ActionState::Running;
        Ok(())
    }

    /// Advance a bound, running action by `dt`.
    pub(crate) fn update(&mut self, tree: &mut NodeTree, dt: f64) {
        if self.state != ActionState::Running {
            return;
        }
        if let Some(target) = self.target {
            self.advance(tree, target, dt);
        }
    }

    /// Advance against `target` regardless of binding; used for children of groups and loops.
    ///
    /// Returns the unused part of `dt` once the action is done.
    pub(crate) fn advance(&mut self, tree: &mut NodeTree, target: NodeId, dt: f64) -> Option<f64> {
        match self.state {
            ActionState::Done => return Some(dt),
            ActionState::Paused => return None,
            ActionState::Idle => self.state = ActionState::Running,
            ActionState::Running => {}
        }

        let mut dt = dt;
        if self.delay_left > 0.0 {
            if dt < self.delay_left {
                self.delay_left -= dt;
                return None;
            }
            dt -= self.delay_left;
            self.delay_left = 0.0;
        }
        let dt = dt * self.speed;

        let leftover = match &mut self.kind {
            ActionKind::Callback(cb) => {
                let cb = cb.clone();
                cb(tree, target);
                Some(dt)
            }
            kind => {
                let Some(timeline) = kind.timeline() else {
                    return None;
                };
                if !self.initialized {
                    timeline.init(tree, target);
                    self.initialized = true;
                }
                timeline.advance(tree, target, dt)
            }
        }?;

        self.state = ActionState::Done;
        if let Some(cb) = self.on_done.clone() {
            cb(tree, target);
        }
        Some(if self.speed > 0.0 {
            leftover / self.speed
        } else {
            0.0
        })
    }

    /// Back to `Idle` with runtime progress cleared, keeping the binding.
    pub(crate) fn reset(&mut self) {
        self.state = ActionState::Idle;
        self.delay_left = self.delay;
        self.initialized = false;
        if let Some(timeline) = self.kind.timeline() {
            timeline.reset();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
