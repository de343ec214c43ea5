//! Scenes: a node tree plus the root node that acts as its transform root.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::event::Event;
use crate::foundation::core::{Color, SceneId, Size};
use crate::foundation::error::TableauResult;
use crate::node::node::Node;
use crate::node::tree::{NodeId, NodeTree};
use crate::render::backend::Renderer;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Called with a scene's tree and root when the stage switches to or away from it.
pub type SceneHook = Box<dyn FnMut(&mut NodeTree, NodeId)>;

/// A top-level container owning one node tree.
///
/// The root node carries the scene's transform; transitions move, scale and spin scenes
/// through it.
pub struct Scene {
    id: SceneId,
    tree: NodeTree,
    root: NodeId,
    on_enter: Option<SceneHook>,
    on_exit: Option<SceneHook>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// An empty scene covering `size`.
    pub fn new(size: Size) -> Self {
        let id = SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed));
        let mut tree = NodeTree::new();
        let mut root = Node::new().named("root");
        root.set_size(size);
        let root = tree.insert(root);
        tree.set_scene(root, Some(id));
        Self {
            id,
            tree,
            root,
            on_enter: None,
            on_exit: None,
        }
    }

    /// Identifier carried by every node attached to this scene.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node arena.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Mutable node arena.
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Size of the root node.
    pub fn size(&self) -> Size {
        self.tree.get(self.root).map_or(Size::ZERO, Node::size)
    }

    /// Resize the root node, e.g. after the window changed.
    pub fn set_size(&mut self, size: Size) {
        if let Some(root) = self.tree.get_mut(self.root) {
            root.set_size(size);
        }
    }

    /// Insert `node` and attach it under the root.
    pub fn add(&mut self, node: Node) -> TableauResult<NodeId> {
        let id = self.tree.insert(node);
        self.tree.add_child(self.root, id)?;
        Ok(id)
    }

    /// Insert `node` and attach it under the root with a z-order.
    pub fn add_with_order(&mut self, node: Node, z_order: i32) -> TableauResult<NodeId> {
        let id = self.tree.insert(node);
        self.tree.add_child_with_order(self.root, id, z_order)?;
        Ok(id)
    }

    /// Builder-style hook run when the stage switches to this scene.
    pub fn on_enter(mut self, hook: impl FnMut(&mut NodeTree, NodeId) + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    /// Builder-style hook run when the stage switches away from this scene.
    pub fn on_exit(mut self, hook: impl FnMut(&mut NodeTree, NodeId) + 'static) -> Self {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub(crate) fn entered(&mut self) {
        if let Some(hook) = self.on_enter.as_mut() {
            hook(&mut self.tree, self.root);
        }
    }

    pub(crate) fn exited(&mut self) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook(&mut self.tree, self.root);
        }
    }

    /// Run one update pass over the whole tree.
    pub fn update(&mut self, dt: f64) {
        self.tree.update(self.root, dt);
    }

    /// Draw the whole tree.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.tree.render(self.root, renderer);
    }

    /// Outline every visible node.
    pub fn render_borders(&mut self, renderer: &mut dyn Renderer, color: Color) {
        self.tree.ensure_transform(self.root);
        self.tree.render_borders(self.root, renderer, color);
    }

    /// Propagate `event` from the root. Returns whether a listener handled it.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        self.tree.dispatch(self.root, event)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
