//! The stage: current scene, pending scene and the transition between them.

use crate::event::event::Event;
use crate::foundation::core::{Color, Size};
use crate::render::backend::Renderer;
use crate::scene::scene::Scene;
use crate::scene::transition::Transition;

/// Switches between scenes and forwards frame work to the active one.
#[derive(Debug)]
pub struct Stage {
    current: Option<Scene>,
    next: Option<Scene>,
    transition: Option<Transition>,
    window_size: Size,
    render_borders: bool,
    border_color: Color,
}

impl Stage {
    /// An empty stage for a window of `window_size`.
    pub fn new(window_size: Size) -> Self {
        Self {
            current: None,
            next: None,
            transition: None,
            window_size,
            render_borders: false,
            border_color: Color::RED,
        }
    }

    /// Switch to `scene` on the next update.
    pub fn enter_scene(&mut self, scene: Scene) {
        self.complete_transition();
        self.next = Some(scene);
    }

    /// Switch to `scene` through `transition`. The outgoing scene is dropped once it is done.
    pub fn enter_scene_with(&mut self, mut scene: Scene, mut transition: Transition) {
        self.complete_transition();
        scene.set_size(self.window_size);
        transition.start(self.window_size, self.current.as_mut(), &mut scene);
        tracing::debug!(kind = ?transition.kind(), duration = transition.duration(), "transition started");
        self.next = Some(scene);
        self.transition = Some(transition);
    }

    /// The active scene.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    /// The active scene, mutably.
    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        self.current.as_mut()
    }

    /// The scene waiting to become active.
    pub fn next_scene(&self) -> Option<&Scene> {
        self.next.as_ref()
    }

    /// The scene waiting to become active, mutably.
    pub fn next_scene_mut(&mut self) -> Option<&mut Scene> {
        self.next.as_mut()
    }

    /// The running transition.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// `true` while a transition runs.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Current window size.
    pub fn window_size(&self) -> Size {
        self.window_size
    }

    /// Track a window resize; scenes are resized to match.
    pub fn set_window_size(&mut self, size: Size) {
        self.window_size = size;
        for scene in self.current.iter_mut().chain(self.next.iter_mut()) {
            scene.set_size(size);
        }
    }

    /// Outline every visible node after rendering.
    pub fn set_render_borders(&mut self, enabled: bool) {
        self.render_borders = enabled;
    }

    /// Whether node outlines are drawn.
    pub fn render_borders(&self) -> bool {
        self.render_borders
    }

    /// Color used for nodes without their own border color.
    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    /// Advance the transition and the scenes by `dt` seconds.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, dt: f64) {
        if let Some(mut transition) = self.transition.take() {
            if let Some(next) = self.next.as_mut() {
                transition.update(dt, self.current.as_mut(), next);
                next.update(dt);
            }
            if let Some(current) = self.current.as_mut() {
                current.update(dt);
            }
            if !transition.is_done() {
                self.transition = Some(transition);
                return;
            }
            if let Some(next) = self.next.as_mut() {
                transition.finish(self.current.as_mut(), next);
            }
            tracing::debug!(kind = ?transition.kind(), "transition done");
            self.switch_scene();
            return;
        }

        self.switch_scene();
        if let Some(current) = self.current.as_mut() {
            current.update(dt);
        }
    }

    /// Draw the transition if one runs, else the current scene.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        match (&self.transition, self.next.as_mut()) {
            (Some(transition), Some(next)) => {
                transition.render(renderer, self.current.as_mut(), next);
            }
            _ => {
                if let Some(current) = self.current.as_mut() {
                    current.render(renderer);
                }
            }
        }
        if self.render_borders
            && let Some(current) = self.current.as_mut()
        {
            current.render_borders(renderer, self.border_color);
        }
    }

    /// Route `event` to the current scene. Events are dropped while a transition runs.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        if self.transition.is_some() {
            return false;
        }
        self.current
            .as_mut()
            .is_some_and(|scene| scene.dispatch(event))
    }

    fn switch_scene(&mut self) {
        let Some(mut next) = self.next.take() else {
            return;
        };
        if let Some(mut previous) = self.current.take() {
            previous.exited();
        }
        next.set_size(self.window_size);
        next.entered();
        tracing::debug!(scene = next.id().0, "scene entered");
        self.current = Some(next);
    }

    fn complete_transition(&mut self) {
        if let Some(mut transition) = self.transition.take() {
            if let Some(next) = self.next.as_mut() {
                transition.finish(self.current.as_mut(), next);
            }
            self.switch_scene();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
