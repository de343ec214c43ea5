use super::*;
use crate::event::event::{KeyCode, MouseEvent};
use crate::foundation::core::Point;

fn noop() -> Listener {
    Listener::all(|_, _, _, _| {})
}

#[test]
fn filters_by_event_type() {
    let keys = Listener::on(EventType::KeyDown, |_, _, _, _| {});
    assert_eq!(keys.event_type(), Some(EventType::KeyDown));
    assert!(keys.accepts(&Event::KeyDown { code: KeyCode::Enter }));
    assert!(!keys.accepts(&Event::KeyUp { code: KeyCode::Enter }));
    assert!(noop().accepts(&Event::MouseMove(MouseEvent::at(Point::ZERO))));
}

#[test]
fn stopped_and_removed_listeners_ignore_events() {
    let mut l = noop().named("l");
    assert_eq!(l.name(), Some("l"));
    l.stop();
    assert!(!l.is_running());
    assert!(!l.accepts(&Event::WindowClosed));
    l.start();
    assert!(l.accepts(&Event::WindowClosed));
    l.remove();
    assert!(l.is_removed());
    assert!(!l.accepts(&Event::WindowClosed));
}

#[test]
fn only_the_first_claim_wins() {
    let mut ctx = EventCtx::default();
    let (a, b) = (NodeId::new(1, 0), NodeId::new(2, 0));
    assert!(ctx.claim(a));
    assert!(!ctx.claim(b));
    assert_eq!(ctx.hit(), Some(a));
    assert!(!ctx.is_handled());
    ctx.set_handled();
    assert!(ctx.is_handled());
}

#[test]
fn names_match_exactly() {
    let l = noop().named("jump");
    let hash = crate::foundation::math::name_hash("jump");
    assert!(l.name_matches(hash, "jump"));
    assert!(!l.name_matches(crate::foundation::math::name_hash("jum"), "jum"));
}
