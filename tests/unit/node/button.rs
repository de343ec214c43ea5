use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::{Point, Size};
use crate::node::node::{Node, Text};

fn label(s: &str) -> Content {
    Content::Text(Text::new(s))
}

fn shown(tree: &NodeTree, id: NodeId) -> String {
    match tree.get(id).unwrap().content() {
        Content::Text(t) => t.content.clone(),
        other => panic!("unexpected {other:?}"),
    }
}

fn at(x: f64, y: f64) -> MouseEvent {
    MouseEvent::at(Point::new(x, y))
}

fn button(tree: &mut NodeTree, clicks: &Rc<Cell<u32>>) -> NodeId {
    let id = tree.insert(Node::new());
    tree.get_mut(id).unwrap().set_size(Size::new(20.0, 10.0));
    let c = clicks.clone();
    tree.make_button(
        id,
        Button::new(label("normal"))
            .with_mouse_over(label("over"))
            .with_selected(label("down"))
            .with_disabled(label("off"))
            .on_click(move |_, _| c.set(c.get() + 1)),
    )
    .unwrap();
    id
}

#[test]
fn pointer_drives_the_visual_state() {
    let clicks = Rc::new(Cell::new(0));
    let mut tree = NodeTree::new();
    let b = button(&mut tree, &clicks);
    assert_eq!(tree.button_state(b), Some(ButtonState::Normal));
    assert_eq!(shown(&tree, b), "normal");

    tree.dispatch(b, &Event::MouseMove(at(5.0, 5.0)));
    assert_eq!(tree.button_state(b), Some(ButtonState::MouseOver));
    assert_eq!(shown(&tree, b), "over");

    tree.dispatch(b, &Event::MouseDown(at(5.0, 5.0).with_button(MouseButton::Left)));
    assert_eq!(tree.button_state(b), Some(ButtonState::Selected));
    assert_eq!(shown(&tree, b), "down");

    tree.dispatch(b, &Event::MouseUp(at(5.0, 5.0).with_button(MouseButton::Left)));
    assert_eq!(tree.button_state(b), Some(ButtonState::MouseOver));
    assert_eq!(clicks.get(), 1);

    tree.dispatch(b, &Event::MouseMove(at(50.0, 5.0)));
    assert_eq!(tree.button_state(b), Some(ButtonState::Normal));
    assert_eq!(shown(&tree, b), "normal");
}

#[test]
fn releasing_outside_does_not_click() {
    let clicks = Rc::new(Cell::new(0));
    let mut tree = NodeTree::new();
    let b = button(&mut tree, &clicks);
    tree.dispatch(b, &Event::MouseMove(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseDown(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseMove(at(50.0, 5.0)));
    tree.dispatch(b, &Event::MouseUp(at(50.0, 5.0)));
    assert_eq!(clicks.get(), 0);
    assert_eq!(tree.button_state(b), Some(ButtonState::Normal));
}

#[test]
fn secondary_buttons_neither_select_nor_click() {
    let clicks = Rc::new(Cell::new(0));
    let mut tree = NodeTree::new();
    let b = button(&mut tree, &clicks);
    tree.dispatch(b, &Event::MouseMove(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseDown(at(5.0, 5.0).with_button(MouseButton::Right)));
    assert_eq!(tree.button_state(b), Some(ButtonState::MouseOver));
    tree.dispatch(b, &Event::MouseUp(at(5.0, 5.0).with_button(MouseButton::Right)));
    assert_eq!(clicks.get(), 0);
}

#[test]
fn disabled_buttons_ignore_clicks() {
    let clicks = Rc::new(Cell::new(0));
    let mut tree = NodeTree::new();
    let b = button(&mut tree, &clicks);
    tree.set_button_enabled(b, false).unwrap();
    assert_eq!(tree.button_state(b), Some(ButtonState::Disabled));
    assert_eq!(shown(&tree, b), "off");

    tree.dispatch(b, &Event::MouseMove(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseDown(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseUp(at(5.0, 5.0)));
    assert_eq!(clicks.get(), 0);
    assert_eq!(shown(&tree, b), "off");

    // Re-enabling under the cursor shows the hover visual.
    tree.set_button_enabled(b, true).unwrap();
    assert_eq!(tree.button_state(b), Some(ButtonState::MouseOver));
    tree.dispatch(b, &Event::MouseDown(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseUp(at(5.0, 5.0)));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn missing_visuals_fall_back_to_normal() {
    let mut tree = NodeTree::new();
    let b = tree.insert(Node::new());
    tree.get_mut(b).unwrap().set_size(Size::new(20.0, 10.0));
    tree.make_button(b, Button::new(label("plain")).enabled(false))
        .unwrap();
    assert_eq!(tree.button_state(b), Some(ButtonState::Disabled));
    assert_eq!(shown(&tree, b), "plain");
    assert!(tree.make_button(b, Button::new(label("again"))).is_err());

    let plain = tree.create();
    assert_eq!(tree.button_state(plain), None);
    assert!(tree.set_button_enabled(plain, true).is_err());
}

#[test]
fn click_callbacks_may_disable_their_button() {
    let mut tree = NodeTree::new();
    let b = tree.insert(Node::new());
    tree.get_mut(b).unwrap().set_size(Size::new(20.0, 10.0));
    tree.make_button(
        b,
        Button::new(label("go")).on_click(|tree, id| {
            tree.set_button_enabled(id, false).unwrap();
        }),
    )
    .unwrap();
    tree.dispatch(b, &Event::MouseDown(at(5.0, 5.0)));
    tree.dispatch(b, &Event::MouseUp(at(5.0, 5.0)));
    assert_eq!(tree.button_state(b), Some(ButtonState::Disabled));
}
