//! Window collaborator interface and a headless stand-in.

use std::collections::VecDeque;

use crate::event::event::Event;
use crate::foundation::core::Size;

/// Source of platform events and the client area size.
pub trait Window {
    /// Take every event that arrived since the last poll.
    fn poll_events(&mut self) -> Vec<Event>;

    /// Current client area size.
    fn size(&self) -> Size;

    /// Change the title bar text.
    fn set_title(&mut self, _title: &str) {}
}

/// Window without a platform surface; events are queued by hand.
#[derive(Clone, Debug, Default)]
pub struct HeadlessWindow {
    size: Size,
    title: String,
    queue: VecDeque<Event>,
}

impl HeadlessWindow {
    /// A window of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Queue `event` for the next poll.
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Current title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Window for HeadlessWindow {
    fn poll_events(&mut self) -> Vec<Event> {
        let events: Vec<Event> = self.queue.drain(..).collect();
        for event in &events {
            match event {
                Event::WindowResized { width, height } => {
                    self.size = Size::new(f64::from(*width), f64::from(*height));
                }
                Event::WindowTitleChanged { title } => self.title.clone_from(title),
                _ => {}
            }
        }
        events
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }
}
