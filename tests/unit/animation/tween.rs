use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::action::ActionKind;
use crate::animation::ops::{custom, fade_out, fade_to, jump_by, move_by, move_to, rotate_by, scale_to};
use crate::assets::store::{Frame, Texture};
use crate::foundation::core::Rect;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

fn pos(tree: &NodeTree, id: NodeId) -> Point {
    tree.get(id).unwrap().position()
}

#[test]
fn relative_moves_compose_with_outside_movement() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, move_by(1.0, Vec2::new(10.0, 0.0))).unwrap();
    tree.update_actions(n, 0.5);
    assert!(close(pos(&tree, n), Point::new(5.0, 0.0)));

    tree.get_mut(n).unwrap().move_by(Vec2::new(100.0, 0.0));
    tree.update_actions(n, 0.5);
    assert!(close(pos(&tree, n), Point::new(110.0, 0.0)));
}

#[test]
fn move_to_starts_from_the_current_position() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.get_mut(n).unwrap().set_position(Point::new(10.0, 10.0));
    tree.run_action(n, move_to(1.0, Point::new(20.0, 30.0)).named("go"))
        .unwrap();
    tree.update_actions(n, 0.5);
    assert!(close(pos(&tree, n), Point::new(15.0, 20.0)));

    let back = tree.action_named(n, "go").unwrap().reverse().unwrap();
    tree.update_actions(n, 0.5);
    assert!(close(pos(&tree, n), Point::new(20.0, 30.0)));

    tree.run_action(n, back).unwrap();
    tree.update_actions(n, 1.0);
    assert!(close(pos(&tree, n), Point::new(10.0, 10.0)));
}

#[test]
fn jumps_arc_above_the_line_and_land() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, jump_by(1.0, Vec2::new(20.0, 0.0), 10.0, 1))
        .unwrap();
    tree.update_actions(n, 0.25);
    assert!(close(pos(&tree, n), Point::new(5.0, -7.5)));
    tree.update_actions(n, 0.75);
    assert!(close(pos(&tree, n), Point::new(20.0, 0.0)));
}

#[test]
fn scale_and_rotation() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.get_mut(n).unwrap().set_rotation(10.0);
    tree.run_action(n, scale_to(1.0, Vec2::new(3.0, 2.0))).unwrap();
    tree.run_action(n, rotate_by(1.0, 90.0)).unwrap();
    tree.update_actions(n, 0.5);
    let node = tree.get(n).unwrap();
    assert_eq!(node.scale(), Vec2::new(2.0, 1.5));
    assert!((node.rotation() - 55.0).abs() < 1e-9);
}

#[test]
fn fades_cascade_through_the_tree() {
    let mut tree = NodeTree::new();
    let parent = tree.create();
    let child = tree.create();
    tree.add_child(parent, child).unwrap();
    tree.run_action(parent, fade_to(1.0, 0.5)).unwrap();
    tree.update_actions(parent, 1.0);
    assert_eq!(tree.get(parent).unwrap().opacity(), 0.5);
    assert_eq!(tree.get(child).unwrap().display_opacity(), 0.5);
}

#[test]
fn fades_on_a_destroyed_target_are_ignored() {
    let mut tree = NodeTree::new();
    let n = tree.create();
    let mut fade = Tween::new(1.0, TweenKind::Opacity { from: None, to: 0.0 });
    fade.init(&mut tree, n);
    tree.destroy(n);
    assert_eq!(fade.advance(&mut tree, n, 0.5), None);
    assert!(!tree.is_alive(n));
}

#[test]
fn fade_in_and_out_reverse_into_each_other() {
    let reversed = fade_out(1.0).reverse().unwrap();
    match reversed.kind() {
        ActionKind::Tween(t) => {
            assert!(matches!(t.kind(), TweenKind::Opacity { from: None, to } if *to == 1.0));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(fade_to(1.0, 0.3).reverse().is_err());
}

#[test]
fn reversed_tweens_mirror_their_ease() {
    let t = Tween::new(1.0, TweenKind::RotateBy(10.0)).with_ease(Ease::InQuad);
    assert_eq!(t.reversed().unwrap().ease(), Ease::InQuad.mirrored());
}

#[test]
fn custom_tweens_see_progress_and_play_backwards() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let forward = custom(1.0, move |_, _, p| s.borrow_mut().push(p));
    let backward = forward.reverse().unwrap();

    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, forward).unwrap();
    tree.update_actions(n, 0.25);
    tree.run_action(n, backward).unwrap();
    tree.update_actions(n, 0.0);
    tree.update_actions(n, 0.25);

    let seen = seen.borrow();
    assert_eq!(seen[0], 0.25);
    assert!(seen.contains(&0.75));
}

#[test]
fn animate_walks_through_frames() {
    let texture = Arc::new(Texture::new("sheet.png", 30, 10));
    let frames = (0..3)
        .map(|i| {
            Arc::new(Frame::with_crop(
                texture.clone(),
                Rect::new(f64::from(i) * 10.0, 0.0, f64::from(i) * 10.0 + 10.0, 10.0),
            ))
        })
        .collect();
    let seq = Arc::new(FrameSequence::new(frames));

    let mut tree = NodeTree::new();
    let n = tree.create();
    tree.run_action(n, crate::animation::ops::animate(0.3, seq)).unwrap();
    tree.update_actions(n, 0.15);
    let Content::Sprite(frame) = tree.get(n).unwrap().content() else {
        panic!("expected a sprite");
    };
    assert_eq!(frame.crop().x0, 10.0);
    assert_eq!(tree.get(n).unwrap().size().width, 10.0);
}
