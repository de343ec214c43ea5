use super::*;

#[test]
fn categories() {
    let click = Event::MouseClick(MouseEvent::at(Point::new(1.0, 2.0)));
    assert!(click.is_mouse());
    assert_eq!(click.event_type(), EventType::MouseClick);
    assert_eq!(click.mouse().map(|m| m.pos), Some(Point::new(1.0, 2.0)));

    let key = Event::KeyDown { code: KeyCode::Letter('A') };
    assert!(key.is_key() && !key.is_mouse() && !key.is_window());
    assert!(key.mouse().is_none());

    let resized = Event::WindowResized {
        width: 640,
        height: 480,
    };
    assert!(resized.is_window());
    assert_eq!(resized.event_type(), EventType::WindowResized);
}

#[test]
fn wheel_events_carry_the_cursor() {
    let wheel = Event::MouseWheel {
        mouse: MouseEvent::at(Point::new(3.0, 4.0)),
        wheel: -1.0,
    };
    assert!(wheel.is_mouse());
    assert_eq!(wheel.mouse().unwrap().pos, Point::new(3.0, 4.0));
}

#[test]
fn events_deserialize_from_tagged_json() {
    let down: Event = serde_json::from_str(
        r#"{"type":"mouse_down","pos":{"x":3.0,"y":4.0},"button":"left","left_down":true}"#,
    )
    .unwrap();
    let expected = MouseEvent {
        left_down: true,
        ..MouseEvent::at(Point::new(3.0, 4.0)).with_button(MouseButton::Left)
    };
    assert_eq!(down, Event::MouseDown(expected));

    let closed: Event = serde_json::from_str(r#"{"type":"window_closed"}"#).unwrap();
    assert_eq!(closed, Event::WindowClosed);

    let key: Event = serde_json::from_str(r#"{"type":"key_up","code":"escape"}"#).unwrap();
    assert_eq!(key.event_type(), EventType::KeyUp);
}

#[test]
fn synthesized_target_is_not_serialized() {
    let mut mouse = MouseEvent::at(Point::ZERO);
    mouse.target = Some(NodeId::new(3, 0));
    let json = serde_json::to_string(&Event::MouseHover(mouse)).unwrap();
    assert!(!json.contains("target"));
    assert!(json.contains("\"type\":\"mouse_hover\""));
}
