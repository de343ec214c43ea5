use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut NodeTree, NodeId) + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move |_: &mut NodeTree, _: NodeId| c.set(c.get() + 1))
}

#[test]
fn fires_at_interval_then_removes_itself() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let (count, cb) = counter();
    tree.add_task(n, Task::new(0.5, 3, cb)).unwrap();

    for _ in 0..8 {
        tree.update_tasks(n, 0.25);
    }
    assert_eq!(count.get(), 3);
    assert!(tree.get(n).unwrap().tasks().is_empty());
}

#[test]
fn zero_interval_fires_every_frame_forever() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let (count, cb) = counter();
    tree.add_task(n, Task::new(0.0, -1, cb).named("tick")).unwrap();
    for _ in 0..10 {
        tree.update_tasks(n, 0.016);
    }
    assert_eq!(count.get(), 10);
    assert_eq!(tree.get(n).unwrap().tasks()[0].remaining(), -1);
}

#[test]
fn paused_tasks_do_not_accumulate() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let (count, cb) = counter();
    tree.add_task(n, Task::new(1.0, -1, cb).named("slow")).unwrap();
    assert!(tree.pause_task(n, "slow"));
    tree.update_tasks(n, 5.0);
    assert_eq!(count.get(), 0);
    assert!(tree.start_task(n, "slow"));
    tree.update_tasks(n, 1.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn tasks_can_stop_themselves_from_their_callback() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    tree.add_task(
        n,
        Task::new(0.0, -1, move |tree, id| {
            c.set(c.get() + 1);
            tree.stop_task(id, "once");
        })
        .named("once"),
    )
    .unwrap();
    tree.update_tasks(n, 0.1);
    tree.update_tasks(n, 0.1);
    assert_eq!(count.get(), 1);
    assert!(tree.get(n).unwrap().tasks().is_empty());
}

#[test]
fn remove_by_name_and_all() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.add_task(n, Task::new(1.0, 1, |_, _| {}).named("a")).unwrap();
    tree.add_task(n, Task::new(1.0, 1, |_, _| {}).named("b")).unwrap();
    tree.add_task(n, Task::new(1.0, 1, |_, _| {}).named("a")).unwrap();
    assert_eq!(tree.remove_task(n, "a"), 2);
    tree.stop_all_tasks(n);
    assert!(tree.get(n).unwrap().tasks()[0].is_stopped());
    tree.remove_all_tasks(n);
    assert!(tree.get(n).unwrap().tasks().is_empty());
}
