use super::*;

#[test]
fn hex_colors_split_channels() {
    let c = Color::from_hex(0xff8000);
    assert_eq!(c.r, 1.0);
    assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(c.b, 0.0);
    assert_eq!(c.a, 1.0);
}

#[test]
fn alpha_is_clamped() {
    assert_eq!(Color::WHITE.with_alpha(3.0).a, 1.0);
    assert_eq!(Color::WHITE.with_alpha(-1.0).a, 0.0);
    assert!((Color::WHITE.multiply_alpha(0.25).a - 0.25).abs() < 1e-6);
}
