use super::*;

#[test]
fn nodes_attached_under_the_root_belong_to_the_scene() {
    let mut scene = Scene::new(Size::new(320.0, 240.0));
    let id = scene.add(Node::new().named("hero")).unwrap();
    let tree = scene.tree();
    assert_eq!(tree.get(scene.root()).unwrap().scene(), Some(scene.id()));
    assert_eq!(tree.get(id).unwrap().scene(), Some(scene.id()));
    assert_eq!(tree.child_named(scene.root(), "hero"), Some(id));
    assert_eq!(scene.size(), Size::new(320.0, 240.0));
}

#[test]
fn scene_ids_are_unique() {
    let a = Scene::new(Size::ZERO);
    let b = Scene::new(Size::ZERO);
    assert_ne!(a.id(), b.id());
}

#[test]
fn the_root_cannot_be_reparented() {
    let mut scene = Scene::new(Size::ZERO);
    let root = scene.root();
    let other = scene.tree_mut().create();
    let err = scene.tree_mut().add_child(other, root).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn detached_nodes_lose_the_scene_reference() {
    let mut scene = Scene::new(Size::ZERO);
    let id = scene.add_with_order(Node::new(), 3).unwrap();
    scene.tree_mut().remove_from_parent(id).unwrap();
    assert_eq!(scene.tree().get(id).unwrap().scene(), None);
}

#[test]
fn hooks_receive_the_tree_and_root() {
    let mut scene = Scene::new(Size::ZERO).on_enter(|tree, root| {
        tree.get_mut(root).unwrap().set_name("entered");
    });
    scene.entered();
    scene.exited();
    assert_eq!(scene.tree().get(scene.root()).unwrap().name(), Some("entered"));
}
