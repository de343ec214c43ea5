use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animation::ops::{call, custom, delay, move_by, sequence};
use crate::foundation::core::{Point, Vec2};

#[test]
fn done_actions_are_swept_and_never_updated_again() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    tree.run_action(n, call(move |_, _| h.set(h.get() + 1)))
        .unwrap();

    tree.update_actions(n, 0.016);
    assert_eq!(hits.get(), 1);
    assert!(tree.get(n).unwrap().actions().is_empty());

    tree.update_actions(n, 0.016);
    assert_eq!(hits.get(), 1);
}

#[test]
fn stop_forces_done_immediately() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, move_by(1.0, Vec2::new(10.0, 0.0)).named("slide"))
        .unwrap();
    tree.update_actions(n, 0.5);
    assert!(tree.stop_action(n, "slide"));
    assert!(tree.action_named(n, "slide").unwrap().is_done());

    tree.update_actions(n, 0.5);
    assert!(tree.get(n).unwrap().actions().is_empty());
    assert!((tree.get(n).unwrap().position().x - 5.0).abs() < 1e-9);
}

#[test]
fn bound_actions_cannot_be_run_twice() {
    let mut tree = NodeTree::new();
    let a = tree.create();
    let b = tree.create();
    let mut action = delay(1.0);
    action.bind(a).unwrap();
    let err = tree.run_action(b, action).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn running_on_dead_node_fails() {
    let mut tree = NodeTree::new();
    let a = tree.create();
    tree.destroy(a);
    assert!(tree.run_action(a, delay(1.0)).is_err());
}

#[test]
fn pause_and_resume_by_name() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, move_by(1.0, Vec2::new(10.0, 0.0)).named("slide"))
        .unwrap();
    assert!(tree.pause_action(n, "slide"));
    tree.update_actions(n, 0.5);
    assert_eq!(tree.get(n).unwrap().position(), Point::ORIGIN);

    assert!(tree.resume_action(n, "slide"));
    tree.update_actions(n, 0.5);
    assert!((tree.get(n).unwrap().position().x - 5.0).abs() < 1e-9);
    assert!(!tree.pause_action(n, "missing"));
}

#[test]
fn callbacks_may_destroy_their_own_node() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(
        n,
        sequence(vec![
            call(|tree, id| {
                tree.destroy(id);
            }),
            delay(1.0),
        ]),
    )
    .unwrap();
    tree.update_actions(n, 0.1);
    assert!(!tree.is_alive(n));
}

#[test]
fn actions_started_by_callbacks_run_next_frame() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(
        n,
        call(|tree, id| {
            tree.run_action(id, move_by(1.0, Vec2::new(1.0, 0.0)))
                .unwrap();
        }),
    )
    .unwrap();

    tree.update_actions(n, 0.5);
    assert_eq!(tree.get(n).unwrap().position(), Point::ORIGIN);
    assert_eq!(tree.get(n).unwrap().actions().len(), 1);

    tree.update_actions(n, 0.5);
    assert!((tree.get(n).unwrap().position().x - 0.5).abs() < 1e-9);
}

#[test]
fn stop_all_clears_everything_next_update() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, delay(1.0)).unwrap();
    tree.run_action(n, delay(2.0)).unwrap();
    tree.pause_all_actions(n);
    assert!(tree.get(n).unwrap().actions().iter().all(|a| a.state() == crate::ActionState::Paused));
    tree.resume_all_actions(n);
    tree.stop_all_actions(n);
    tree.update_actions(n, 0.0);
    assert!(tree.get(n).unwrap().actions().is_empty());
}

#[test]
fn a_sequence_can_stop_itself_by_name() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let found = Rc::new(Cell::new(false));
    let f = found.clone();
    tree.run_action(
        n,
        sequence(vec![
            call(move |tree, id| f.set(tree.stop_action(id, "seq"))),
            delay(1.0),
        ])
        .named("seq"),
    )
    .unwrap();

    tree.update_actions(n, 0.1);
    assert!(found.get());
    assert!(tree.action_named(n, "seq").is_none());
}

#[test]
fn an_action_can_pause_itself_and_be_resumed() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let ticks = Rc::new(Cell::new(0));
    let t = ticks.clone();
    tree.run_action(
        n,
        custom(1.0, move |tree, id, _| {
            t.set(t.get() + 1);
            tree.pause_all_actions(id);
        })
        .named("tick"),
    )
    .unwrap();

    tree.update_actions(n, 0.1);
    assert_eq!(tree.action_named(n, "tick").unwrap().state(), crate::ActionState::Paused);
    tree.update_actions(n, 0.1);
    assert_eq!(ticks.get(), 1);

    assert!(tree.resume_action(n, "tick"));
    tree.update_actions(n, 0.1);
    assert_eq!(ticks.get(), 2);
}
