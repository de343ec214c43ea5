use std::thread;

use super::*;
use crate::foundation::core::Size;

#[test]
fn drains_in_order_from_any_thread() {
    let queue = DeferredQueue::new();
    queue.post(|stage| stage.set_window_size(Size::new(1.0, 1.0)));
    let sender = queue.sender();
    thread::spawn(move || {
        assert!(sender.post(|stage| stage.set_window_size(Size::new(2.0, 2.0))));
    })
    .join()
    .unwrap();
    assert_eq!(queue.len(), 2);

    let mut stage = Stage::new(Size::ZERO);
    assert_eq!(queue.drain(&mut stage), 2);
    assert_eq!(stage.window_size(), Size::new(2.0, 2.0));
    assert!(queue.is_empty());
}

#[test]
fn work_posted_while_draining_waits_for_the_next_frame() {
    let queue = DeferredQueue::new();
    let sender = queue.sender();
    queue.post(move |_| {
        sender.post(|stage| stage.set_render_borders(true));
    });

    let mut stage = Stage::new(Size::ZERO);
    assert_eq!(queue.drain(&mut stage), 1);
    assert!(!stage.render_borders());
    assert_eq!(queue.drain(&mut stage), 1);
    assert!(stage.render_borders());
}
