use super::*;

fn named(tree: &mut NodeTree, name: &str) -> NodeId {
    tree.insert(Node::new().named(name))
}

#[test]
fn attach_rejects_cycles_and_leaves_tree_unchanged() {
    let mut tree = NodeTree::new();
    let a = named(&mut tree, "a");
    let b = named(&mut tree, "b");
    let c = named(&mut tree, "c");
    tree.add_child(a, b).unwrap();
    tree.add_child(b, c).unwrap();

    let err = tree.add_child(c, a).unwrap_err();
    assert!(err.is_structural());
    assert_eq!(tree.children(c), &[] as &[NodeId]);
    assert_eq!(tree.parent(a), None);

    assert!(tree.add_child(a, a).is_err());
    assert_eq!(tree.children(a), &[b]);
}

#[test]
fn attach_rejects_reparenting() {
    let mut tree = NodeTree::new();
    let p1 = tree.create();
    let p2 = tree.create();
    let child = tree.create();
    tree.add_child(p1, child).unwrap();
    assert!(tree.add_child(p2, child).is_err());
    assert!(tree.children(p2).is_empty());

    tree.remove_child(p1, child).unwrap();
    tree.add_child(p2, child).unwrap();
    assert_eq!(tree.parent(child), Some(p2));
}

#[test]
fn scene_reference_cascades_on_attach_and_clears_on_detach() {
    let mut tree = NodeTree::new();
    let root = tree.create();
    tree.set_scene(root, Some(SceneId(7)));
    let mid = tree.create();
    let leaf = tree.create();
    tree.add_child(mid, leaf).unwrap();
    tree.add_child(root, mid).unwrap();
    assert_eq!(tree.get(leaf).unwrap().scene(), Some(SceneId(7)));

    tree.remove_from_parent(mid).unwrap();
    assert_eq!(tree.get(leaf).unwrap().scene(), None);

    // Scene roots cannot be moved under another node.
    let other = tree.create();
    assert!(tree.add_child(other, root).is_err());
}

#[test]
fn destroy_frees_subtree_and_invalidates_ids() {
    let mut tree = NodeTree::new();
    let root = tree.create();
    let child = tree.create();
    let grandchild = tree.create();
    tree.add_child(root, child).unwrap();
    tree.add_child(child, grandchild).unwrap();

    assert!(tree.destroy(child));
    assert!(!tree.is_alive(child));
    assert!(!tree.is_alive(grandchild));
    assert!(tree.children(root).is_empty());
    assert!(!tree.destroy(child));

    // Slot reuse never resurrects stale ids.
    let fresh = tree.create();
    assert!(tree.is_alive(fresh));
    assert!(!tree.is_alive(child));
    assert!(tree.node(grandchild).is_err());
}

#[test]
fn name_lookup_and_named_removal() {
    let mut tree = NodeTree::new();
    let root = tree.create();
    for name in ["coin", "enemy", "coin"] {
        let n = named(&mut tree, name);
        tree.add_child(root, n).unwrap();
    }
    let first_coin = tree.child_named(root, "coin").unwrap();
    assert_eq!(tree.children(root)[0], first_coin);
    assert_eq!(tree.children_named(root, "coin").len(), 2);
    assert!(tree.child_named(root, "boss").is_none());

    assert_eq!(tree.remove_children_named(root, "coin"), 2);
    assert!(!tree.is_alive(first_coin));
    assert_eq!(tree.children(root).len(), 1);
    assert_eq!(tree.remove_all_children(root), 1);
    assert!(tree.children(root).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn opacity_cascades_through_subtree() {
    let mut tree = NodeTree::new();
    let parent = tree.create();
    let child = tree.create();
    tree.add_child(parent, child).unwrap();

    tree.set_opacity(parent, 0.5).unwrap();
    tree.set_opacity(child, 0.8).unwrap();
    assert!((tree.get(child).unwrap().display_opacity() - 0.4).abs() < 1e-9);

    tree.set_opacity(parent, 1.0).unwrap();
    assert!((tree.get(child).unwrap().display_opacity() - 0.8).abs() < 1e-9);

    tree.set_opacity(child, 3.0).unwrap();
    assert_eq!(tree.get(child).unwrap().opacity(), 1.0);
}

#[test]
fn attaching_applies_parent_opacity() {
    let mut tree = NodeTree::new();
    let parent = tree.create();
    tree.set_opacity(parent, 0.5).unwrap();
    let child = tree.create();
    tree.set_opacity(child, 0.5).unwrap();
    tree.add_child(parent, child).unwrap();
    assert!((tree.get(child).unwrap().display_opacity() - 0.25).abs() < 1e-9);
    tree.remove_child(parent, child).unwrap();
    assert!((tree.get(child).unwrap().display_opacity() - 0.5).abs() < 1e-9);
}

#[test]
fn add_child_with_order_restores_z_on_failure() {
    let mut tree = NodeTree::new();
    let a = tree.create();
    let b = tree.create();
    tree.add_child_with_order(a, b, 5).unwrap();
    assert_eq!(tree.get(b).unwrap().z_order(), 5);

    let c = tree.create();
    assert!(tree.add_child_with_order(c, b, 9).is_err());
    assert_eq!(tree.get(b).unwrap().z_order(), 5);
}

#[test]
fn remove_child_checks_parentage() {
    let mut tree = NodeTree::new();
    let a = tree.create();
    let b = tree.create();
    assert!(tree.remove_child(a, b).is_err());
    assert!(tree.remove_from_parent(b).is_ok());
}
