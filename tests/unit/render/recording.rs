use super::*;

#[test]
fn balanced_frame_ends_cleanly() {
    let mut r = RecordingRenderer::new();
    r.begin_frame(Color::BLACK);
    r.push_clip(Affine::IDENTITY, Size::new(10.0, 10.0));
    r.push_layer(&LayerArea::new(Size::new(10.0, 10.0)));
    r.pop_layer();
    r.pop_clip();
    assert!(r.end_frame().is_ok());
    assert_eq!(r.frames(), 1);
    assert_eq!(r.ops().len(), 5);
}

#[test]
fn unbalanced_frame_is_reported_and_reset() {
    let mut r = RecordingRenderer::new();
    r.push_clip(Affine::IDENTITY, Size::new(1.0, 1.0));
    let err = r.end_frame().unwrap_err();
    assert!(err.to_string().contains("clips=1"));
    assert_eq!(r.clip_depth(), 0);

    r.pop_layer();
    assert!(r.end_frame().is_err());
    assert!(r.end_frame().is_ok());
}

#[test]
fn display_list_serializes_with_op_tags() {
    let mut r = RecordingRenderer::new();
    r.draw_text(&Text::new("hello"), 0.5);
    let json = r.to_json().unwrap();
    assert!(json.contains("\"op\": \"text\""));
    assert!(json.contains("hello"));
    assert_eq!(r.drawn_text(), vec!["hello"]);
}
