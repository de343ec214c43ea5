//! Update and render passes, transform refresh and geometry queries.

use smallvec::SmallVec;

use crate::foundation::core::{Affine, BezPath, Color, Point, Rect};
use crate::foundation::error::TableauResult;
use crate::node::node::{Content, ShapeStyle};
use crate::node::tree::{NodeId, NodeTree};
use crate::render::backend::{LayerArea, Renderer};
use crate::transform::affine::compose;
use crate::transform::geometry::Quad;

type ChildList = SmallVec<[NodeId; 16]>;

impl NodeTree {
    /// Stable-sort the children of `id` by z-order if they changed since the last sort.
    pub(crate) fn sort_children(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.dirty_sort {
            return;
        }
        let mut keyed: SmallVec<[(i32, NodeId); 16]> = node
            .children
            .iter()
            .map(|c| (self.get(*c).map_or(0, |n| n.z_order), *c))
            .collect();
        keyed.sort_by_key(|(z, _)| *z);
        if let Some(node) = self.get_mut(id) {
            node.children = keyed.into_iter().map(|(_, c)| c).collect();
            node.dirty_sort = false;
        }
    }

    /// Children of `id` in traversal order, split into negative z and the rest.
    fn split_children(&mut self, id: NodeId) -> (ChildList, ChildList) {
        self.sort_children(id);
        let mut below = ChildList::new();
        let mut above = ChildList::new();
        for &c in self.children(id) {
            match self.get(c) {
                Some(n) if n.z_order < 0 => below.push(c),
                Some(_) => above.push(c),
                None => {}
            }
        }
        (below, above)
    }

    /// Recompute the matrices of `id` if dirty, and mark every descendant dirty.
    ///
    /// Only `id` is recomputed; descendants stay dirty until they are refreshed themselves.
    /// Uses the parent's cached basis; call [`NodeTree::ensure_transform`] when ancestors may
    /// be stale too.
    pub fn update_transform(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.dirty_transform {
            return;
        }
        let parent_initial = node
            .parent
            .and_then(|p| self.get(p))
            .map_or(Affine::IDENTITY, |p| p.matrices.initial);

        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.matrices = compose(&node.transform, parent_initial);
        node.quad = Quad::from_transform(node.matrices.final_, node.transform.size);
        node.dirty_transform = false;
        let mut stack: ChildList = node.children.iter().copied().collect();
        while let Some(c) = stack.pop() {
            if let Some(child) = self.get_mut(c) {
                child.dirty_transform = true;
                stack.extend(child.children.iter().copied());
            }
        }
    }

    /// Refresh every stale transform on the path from the root down to `id`.
    pub fn ensure_transform(&mut self, id: NodeId) {
        let mut chain: ChildList = SmallVec::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            chain.push(n);
            cur = self.parent(n);
        }
        for n in chain.into_iter().rev() {
            self.update_transform(n);
        }
    }

    /// World-space axis-aligned bounds of `id`.
    pub fn bounds(&mut self, id: NodeId) -> TableauResult<Rect> {
        self.node(id)?;
        self.ensure_transform(id);
        Ok(self.node(id)?.quad.aabb())
    }

    /// Whether the world-space point lies inside the transformed bounds of `id`.
    pub fn contains_point(&mut self, id: NodeId, point: Point) -> bool {
        self.ensure_transform(id);
        self.get(id).is_some_and(|n| n.quad.contains(point))
    }

    /// Whether the transformed bounds of two nodes overlap.
    pub fn intersects(&mut self, a: NodeId, b: NodeId) -> bool {
        self.ensure_transform(a);
        self.ensure_transform(b);
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.quad.intersects(&b.quad),
            _ => false,
        }
    }

    /// Run one update pass over the subtree rooted at `id`.
    ///
    /// Order per node: negative-z children, the node's hook, actions, tasks and transform,
    /// then the remaining children.
    pub fn update(&mut self, id: NodeId, dt: f64) {
        if !self.is_alive(id) {
            return;
        }
        let (below, above) = self.split_children(id);
        for c in below {
            self.update(c, dt);
        }

        if let Some(mut hook) = self.get_mut(id).and_then(|n| n.update_hook.take()) {
            hook(self, id, dt);
            if let Some(node) = self.get_mut(id)
                && node.update_hook.is_none()
            {
                node.update_hook = Some(hook);
            }
        }
        self.update_actions(id, dt);
        self.update_tasks(id, dt);
        self.update_transform(id);

        for c in above {
            self.update(c, dt);
        }
    }

    /// Draw the subtree rooted at `id`.
    pub fn render(&mut self, id: NodeId, renderer: &mut dyn Renderer) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        self.update_transform(id);
        let (below, above) = self.split_children(id);

        let Some(node) = self.get(id) else {
            return;
        };
        let final_ = node.matrices.final_;
        let size = node.transform.size;
        let clip = node.clip;
        let layer = node.layer.map(|area| LayerArea {
            transform: final_ * area.transform,
            ..area
        });

        if clip {
            renderer.push_clip(final_, size);
        }
        if let Some(area) = &layer {
            renderer.push_layer(area);
        }

        for c in below {
            self.render(c, renderer);
        }
        if let Some(node) = self.get(id) {
            draw_content(node.content(), final_, node.display_opacity, renderer);
        }
        for c in above {
            self.render(c, renderer);
        }

        if layer.is_some() {
            renderer.pop_layer();
        }
        if clip {
            renderer.pop_clip();
        }
    }

    /// Outline the transformed bounds of every visible node in the subtree.
    pub fn render_borders(&mut self, id: NodeId, renderer: &mut dyn Renderer, default: Color) {
        let Some(node) = self.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let color = node.border_color.unwrap_or(default);
        if !node.quad.is_degenerate() {
            let mut path = BezPath::new();
            path.move_to(node.quad.corners[0]);
            for corner in &node.quad.corners[1..] {
                path.line_to(*corner);
            }
            path.close_path();
            renderer.set_transform(Affine::IDENTITY);
            renderer.draw_geometry(
                &path,
                &ShapeStyle {
                    fill: None,
                    stroke: Some(color),
                    stroke_width: 1.0,
                },
                1.0,
            );
        }
        let children: ChildList = node.children.iter().copied().collect();
        for c in children {
            self.render_borders(c, renderer, default);
        }
    }
}

fn draw_content(content: &Content, transform: Affine, opacity: f64, renderer: &mut dyn Renderer) {
    match content {
        Content::Empty => {}
        Content::Sprite(frame) => {
            renderer.set_transform(transform);
            renderer.draw_frame(frame, opacity);
        }
        Content::Shape(shape) => {
            renderer.set_transform(transform);
            renderer.draw_geometry(&shape.path, &shape.style, opacity);
        }
        Content::Text(text) => {
            renderer.set_transform(transform);
            renderer.draw_text(text, opacity);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/traverse.rs"]
mod tests;
