use super::*;

fn square_at(x: f64, y: f64, side: f64) -> Quad {
    Quad::from_transform(
        Affine::translate(Vec2::new(x, y)),
        Size::new(side, side),
    )
}

#[test]
fn contains_respects_rotation() {
    let m = Affine::translate(Vec2::new(50.0, 50.0)) * Affine::rotate(std::f64::consts::FRAC_PI_4);
    let q = Quad::from_transform(m, Size::new(10.0, 10.0));
    // The diamond's tip along +y sits at about (50, 64.1).
    assert!(q.contains(Point::new(50.0, 60.0)));
    assert!(!q.contains(Point::new(58.0, 51.0)));
}

#[test]
fn zero_size_contains_nothing() {
    let q = Quad::from_transform(Affine::IDENTITY, Size::new(0.0, 10.0));
    assert!(q.is_degenerate());
    assert!(!q.contains(Point::new(0.0, 5.0)));
}

#[test]
fn aabb_covers_all_corners() {
    let q = square_at(5.0, 7.0, 3.0);
    assert_eq!(q.aabb(), Rect::new(5.0, 7.0, 8.0, 10.0));
}

#[test]
fn sat_detects_overlap_and_separation() {
    let a = square_at(0.0, 0.0, 10.0);
    assert!(a.intersects(&square_at(5.0, 5.0, 10.0)));
    assert!(!a.intersects(&square_at(20.0, 0.0, 10.0)));

    // Rotated square whose AABB overlaps `a` but whose body does not.
    let m = Affine::translate(Vec2::new(14.66, 6.34)) * Affine::rotate(std::f64::consts::FRAC_PI_4);
    let diamond = Quad::from_transform(m, Size::new(8.0, 8.0));
    assert!(diamond.aabb().intersect(a.aabb()).area() > 0.0);
    assert!(!a.intersects(&diamond));
}
