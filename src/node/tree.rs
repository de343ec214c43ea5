//! Generational arena of nodes and the structural operations on it.

use crate::foundation::core::SceneId;
use crate::foundation::error::{TableauError, TableauResult};
use crate::foundation::math::name_hash;
use crate::node::node::Node;

/// Identifier for a node in a [`NodeTree`].
///
/// Stale ids never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Owner of every node in one scene (or of a free-standing set of nodes).
///
/// The `children` list of a node is its owning edge; parent and scene references are plain ids.
#[derive(Default)]
pub struct NodeTree {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    next_serial: u64,
}

impl std::fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTree")
            .field("live", &self.len())
            .field("capacity", &self.nodes.len())
            .finish()
    }
}

impl NodeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node.
    pub fn insert(&mut self, node: Node) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node);
            NodeId::new(idx as u32, generation)
        } else {
            self.nodes.push(Some(node));
            self.generations.push(1);
            NodeId::new((self.nodes.len() - 1) as u32, 1)
        }
    }

    /// Insert a default node.
    pub fn create(&mut self) -> NodeId {
        self.insert(Node::new())
    }

    /// Return `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.generations.get(id.idx()) == Some(&id.1)
            && self.nodes.get(id.idx()).is_some_and(Option::is_some)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Return `true` when no node is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a live node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_ref()
    }

    /// Mutably borrow a live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_alive(id) {
            return None;
        }
        self.nodes[id.idx()].as_mut()
    }

    /// Like [`NodeTree::get`] but failing with a structure error on stale ids.
    pub fn node(&self, id: NodeId) -> TableauResult<&Node> {
        self.get(id)
            .ok_or_else(|| TableauError::structure(format!("node {id:?} is not alive")))
    }

    /// Like [`NodeTree::get_mut`] but failing with a structure error on stale ids.
    pub fn node_mut(&mut self, id: NodeId) -> TableauResult<&mut Node> {
        self.get_mut(id)
            .ok_or_else(|| TableauError::structure(format!("node {id:?} is not alive")))
    }

    pub(crate) fn next_serial(&mut self) -> u64 {
        self.next_serial += 1;
        self.next_serial
    }

    /// Return `true` if `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` (empty for dead ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Fails, leaving the tree unchanged, if `child` already has a parent, is the root of a
    /// scene, or is `parent` itself or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TableauResult<()> {
        let p = self.node(parent)?;
        let c = self.node(child)?;
        if c.parent.is_some() {
            return Err(TableauError::structure(
                "node already has a parent; remove it first",
            ));
        }
        if c.scene.is_some() {
            return Err(TableauError::structure("a scene root cannot be attached"));
        }
        if self.is_ancestor(child, parent) {
            return Err(TableauError::structure(
                "attaching a node under itself or its descendant would create a cycle",
            ));
        }
        let scene = p.scene;
        let parent_display = p.display_opacity;

        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
            p.dirty_sort = true;
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
            c.dirty_transform = true;
        }
        self.cascade_scene(child, scene);
        self.cascade_opacity(child, parent_display);
        Ok(())
    }

    /// Set the z-order of `child`, then attach it.
    pub fn add_child_with_order(
        &mut self,
        parent: NodeId,
        child: NodeId,
        z_order: i32,
    ) -> TableauResult<()> {
        let previous = self.node(child)?.z_order;
        self.node_mut(child)?.z_order = z_order;
        self.add_child(parent, child).inspect_err(|_| {
            if let Some(c) = self.get_mut(child) {
                c.z_order = previous;
            }
        })
    }

    /// Detach `child` from `parent`. The child stays alive as a standalone node.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TableauResult<()> {
        if self.node(child)?.parent != Some(parent) {
            return Err(TableauError::structure(format!(
                "node {child:?} is not a child of {parent:?}"
            )));
        }
        self.unlink(child);
        Ok(())
    }

    /// Detach `id` from whatever parent it has. No-op for unattached nodes.
    pub fn remove_from_parent(&mut self, id: NodeId) -> TableauResult<()> {
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }
        Ok(())
    }

    /// Destroy every child of `parent` named `name`. Returns how many were removed.
    pub fn remove_children_named(&mut self, parent: NodeId, name: &str) -> usize {
        let matches = self.children_named(parent, name);
        for &child in &matches {
            self.destroy(child);
        }
        matches.len()
    }

    /// Destroy every child of `parent`. Returns how many were removed.
    pub fn remove_all_children(&mut self, parent: NodeId) -> usize {
        let children = self.children(parent).to_vec();
        for &child in &children {
            self.destroy(child);
        }
        children.len()
    }

    /// Destroy `id` and its subtree, dropping their actions, tasks and listeners.
    ///
    /// Returns `false` if `id` was already dead.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if self.parent(id).is_some() {
            self.unlink(id);
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children.iter().copied().filter(|c| self.is_alive(*c)));
                self.free_list.push(cur.idx());
            }
        }
        true
    }

    /// First child of `parent` whose name is `name`.
    pub fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let hash = name_hash(name);
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.get(*c).is_some_and(|n| n.name_matches(hash, name)))
    }

    /// Every child of `parent` whose name is `name`, in child order.
    pub fn children_named(&self, parent: NodeId, name: &str) -> Vec<NodeId> {
        let hash = name_hash(name);
        self.children(parent)
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_some_and(|n| n.name_matches(hash, name)))
            .collect()
    }

    /// Change the z-order of `id`; its parent re-sorts on next traversal.
    pub fn set_z_order(&mut self, id: NodeId, z_order: i32) -> TableauResult<()> {
        let node = self.node_mut(id)?;
        if node.z_order == z_order {
            return Ok(());
        }
        node.z_order = z_order;
        if let Some(parent) = node.parent
            && let Some(p) = self.get_mut(parent)
        {
            p.dirty_sort = true;
        }
        Ok(())
    }

    /// Set own opacity (clamped to `[0, 1]`) and refresh the cascaded opacity of the subtree.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) -> TableauResult<()> {
        let parent_display = match self.node(id)?.parent {
            Some(parent) => self.node(parent)?.display_opacity,
            None => 1.0,
        };
        self.node_mut(id)?.opacity = opacity;
        self.cascade_opacity(id, parent_display);
        Ok(())
    }

    pub(crate) fn set_scene(&mut self, id: NodeId, scene: Option<SceneId>) {
        self.cascade_scene(id, scene);
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
            c.dirty_transform = true;
            c.hovering = false;
            c.pressed = false;
        }
        self.cascade_scene(child, None);
        self.cascade_opacity(child, 1.0);
    }

    fn cascade_scene(&mut self, id: NodeId, scene: Option<SceneId>) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(n) = self.get_mut(cur) {
                n.scene = scene;
                stack.extend(n.children.iter().copied());
            }
        }
    }

    fn cascade_opacity(&mut self, id: NodeId, parent_display: f64) {
        let mut stack = vec![(id, parent_display)];
        while let Some((cur, inherited)) = stack.pop() {
            if let Some(n) = self.get_mut(cur) {
                n.refresh_display_opacity(inherited);
                let display = n.display_opacity;
                stack.extend(n.children.iter().map(|c| (*c, display)));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/tree.rs"]
mod tests;
