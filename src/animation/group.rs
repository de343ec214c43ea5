//! Composite actions: sequential and parallel groups, loops.

use smallvec::SmallVec;

use crate::animation::action::{Action, ActionCallback, Timeline};
use crate::foundation::error::TableauResult;
use crate::node::tree::{NodeId, NodeTree};

/// Several actions run against the same target.
///
/// Sequential groups run one child at a time and hand the time left over by a finishing child
/// to the next one. Parallel groups advance every unfinished child each tick and finish when
/// all children are done.
#[derive(Clone, Debug)]
pub struct Group {
    children: Vec<Action>,
    sequential: bool,
    cursor: usize,
}

impl Group {
    /// Children run one after another.
    pub fn sequence(children: Vec<Action>) -> Self {
        Self::new(children, true)
    }

    /// Children run simultaneously.
    pub fn parallel(children: Vec<Action>) -> Self {
        Self::new(children, false)
    }

    fn new(children: Vec<Action>, sequential: bool) -> Self {
        let mut group = Self {
            children: children.iter().map(Action::clone).collect(),
            sequential,
            cursor: 0,
        };
        group.reset();
        group
    }

    /// Children in run order.
    pub fn children(&self) -> &[Action] {
        &self.children
    }

    /// `true` for sequences.
    pub fn is_sequential(&self) -> bool {
        self.sequential
    }

    /// Index of the child a sequence is currently running.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn reversed(&self) -> TableauResult<Self> {
        if self.sequential {
            let children = self
                .children
                .iter()
                .rev()
                .map(Action::reverse)
                .collect::<TableauResult<Vec<_>>>()?;
            return Ok(Self::sequence(children));
        }

        // Children that finished early must start late when played backwards.
        let longest = self.duration();
        let children = self
            .children
            .iter()
            .map(|child| {
                let reversed = child.reverse()?;
                Ok(match (longest, child.duration()) {
                    (Some(total), Some(own)) if total > own => {
                        let delay = reversed.delay() + (total - own);
                        reversed.with_delay(delay)
                    }
                    _ => reversed,
                })
            })
            .collect::<TableauResult<Vec<_>>>()?;
        Ok(Self::parallel(children))
    }
}

impl Timeline for Group {
    fn init(&mut self, _tree: &mut NodeTree, _target: NodeId) {
        self.reset();
    }

    fn advance(&mut self, tree: &mut NodeTree, target: NodeId, dt: f64) -> Option<f64> {
        if self.sequential {
            let mut dt = dt;
            while let Some(child) = self.children.get_mut(self.cursor) {
                dt = child.advance(tree, target, dt)?;
                self.cursor += 1;
            }
            return Some(dt);
        }

        let mut leftover: Option<f64> = None;
        let mut all_done = true;
        for child in &mut self.children {
            if child.is_done() {
                continue;
            }
            match child.advance(tree, target, dt) {
                Some(left) => leftover = Some(leftover.map_or(left, |l: f64| l.min(left))),
                None => all_done = false,
            }
        }
        all_done.then(|| leftover.unwrap_or(dt))
    }

    fn reset(&mut self) {
        self.cursor = 0;
        for child in &mut self.children {
            child.reset();
        }
    }

    fn duration(&self) -> Option<f64> {
        let mut durations: SmallVec<[f64; 8]> = SmallVec::new();
        for child in &self.children {
            durations.push(child.duration()?);
        }
        Some(if self.sequential {
            durations.iter().sum()
        } else {
            durations.iter().copied().fold(0.0, f64::max)
        })
    }
}

/// Repeats an action a fixed number of times, or forever for negative counts.
#[derive(Clone)]
pub struct Loop {
    inner: Box<Action>,
    times: i32,
    completed: i32,
    on_iteration: Option<ActionCallback>,
}

impl std::fmt::Debug for Loop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loop")
            .field("inner", &self.inner)
            .field("times", &self.times)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl Loop {
    /// Repeat `inner` `times` times (`-1` for forever).
    pub fn new(inner: Action, times: i32) -> Self {
        let mut inner = Box::new(inner.clone());
        inner.reset();
        Self {
            inner,
            times,
            completed: 0,
            on_iteration: None,
        }
    }

    /// Builder-style callback fired after every completed iteration.
    pub fn on_iteration(mut self, callback: impl Fn(&mut NodeTree, NodeId) + 'static) -> Self {
        self.on_iteration = Some(std::sync::Arc::new(callback));
        self
    }

    /// The repeated action.
    pub fn inner(&self) -> &Action {
        &self.inner
    }

    /// Requested repetitions, negative for infinite.
    pub fn times(&self) -> i32 {
        self.times
    }

    /// Iterations finished so far.
    pub fn completed(&self) -> i32 {
        self.completed
    }

    pub(crate) fn reversed(&self) -> TableauResult<Self> {
        Ok(Self {
            inner: Box::new(self.inner.reverse()?),
            times: self.times,
            completed: 0,
            on_iteration: self.on_iteration.clone(),
        })
    }

    fn finished(&self) -> bool {
        self.times >= 0 && self.completed >= self.times
    }
}

impl Timeline for Loop {
    fn init(&mut self, _tree: &mut NodeTree, _target: NodeId) {
        self.reset();
    }

    fn advance(&mut self, tree: &mut NodeTree, target: NodeId, dt: f64) -> Option<f64> {
        if self.finished() {
            return Some(dt);
        }
        let mut dt = dt;
        loop {
            let left = self.inner.advance(tree, target, dt)?;
            self.completed += 1;
            if let Some(cb) = self.on_iteration.clone() {
                cb(tree, target);
            }
            if self.finished() {
                return Some(left);
            }
            self.inner.reset();
            // An iteration that consumed no time waits for the next tick.
            if left >= dt {
                return None;
            }
            dt = left;
        }
    }

    fn reset(&mut self) {
        self.completed = 0;
        self.inner.reset();
    }

    fn duration(&self) -> Option<f64> {
        if self.times < 0 {
            return None;
        }
        Some(self.inner.duration()? * f64::from(self.times))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/group.rs"]
mod tests;
