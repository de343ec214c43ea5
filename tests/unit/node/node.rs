use super::*;

#[test]
fn setters_mark_transform_dirty_only_on_change() {
    let mut node = Node::new();
    node.dirty_transform = false;
    node.set_position(Point::ORIGIN);
    assert!(!node.is_transform_dirty());
    node.set_position(Point::new(1.0, 2.0));
    assert!(node.is_transform_dirty());

    node.dirty_transform = false;
    node.set_rotation(45.0);
    assert!(node.is_transform_dirty());
    assert_eq!(node.rotation(), 45.0);
}

#[test]
fn shape_content_sizes_node() {
    let node = Node::new().with_content(Content::Shape(Shape::circle(
        5.0,
        ShapeStyle::default(),
    )));
    let size = node.size();
    assert!((size.width - 10.0).abs() < 1e-6);
    assert!((size.height - 10.0).abs() < 1e-6);
}

#[test]
fn sprite_content_takes_frame_size() {
    let texture = Arc::new(crate::assets::store::Texture::new("t.png", 40, 20));
    let node = Node::new().with_content(Content::Sprite(Arc::new(Frame::new(texture))));
    assert_eq!(node.size(), Size::new(40.0, 20.0));
}

#[test]
fn polygon_closes_path() {
    let shape = Shape::polygon(
        &[Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)],
        ShapeStyle::default(),
    );
    assert_eq!(shape.extent(), Size::new(4.0, 3.0));
    assert!(matches!(
        shape.path.elements().last(),
        Some(kurbo::PathEl::ClosePath)
    ));
}

#[test]
fn turning_responsibility_off_clears_pointer_state() {
    let mut node = Node::new();
    node.set_responsible(true);
    node.hovering = true;
    node.pressed = true;
    node.set_responsible(false);
    assert!(!node.hovering && !node.pressed);
}
