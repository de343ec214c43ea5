use super::*;

const ALL: [Ease; 18] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
    Ease::InExpo,
    Ease::OutExpo,
    Ease::InBack,
    Ease::OutBack,
    Ease::InBounce,
    Ease::OutBounce,
    Ease::InElastic,
    Ease::OutElastic,
];

#[test]
fn endpoints_are_pinned() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-3, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-3, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InQuad.apply(-1.0), 0.0);
    assert_eq!(Ease::InQuad.apply(2.0), 1.0);
}

#[test]
fn mirrored_plays_backwards() {
    for ease in ALL {
        let m = ease.mirrored();
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let expected = 1.0 - ease.apply(1.0 - t);
            assert!(
                (m.apply(t) - expected).abs() < 1e-3,
                "{ease:?} mirrored at {t}: {} vs {expected}",
                m.apply(t)
            );
        }
    }
}
