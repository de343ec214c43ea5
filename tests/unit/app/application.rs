use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::event::event::{EventType, MouseEvent};
use crate::event::listener::Listener;
use crate::foundation::core::Point;
use crate::network::transport::{HttpRequest, HttpResponse};
use crate::node::node::{Node, Text};
use crate::render::recording::DrawOp;
use crate::scene::scene::Scene;

fn app() -> Application<HeadlessWindow, RecordingRenderer> {
    Application::headless(AppConfig::default()).unwrap()
}

#[test]
fn a_frame_dispatches_updates_and_renders() {
    let mut app = app();
    let clicks = Rc::new(RefCell::new(0));
    let mut scene = Scene::new(Size::ZERO);
    let label = scene
        .add(Node::new().with_content(crate::node::node::Content::Text(Text::new("hi"))))
        .unwrap();
    let c = clicks.clone();
    scene
        .tree_mut()
        .add_listener(
            label,
            Listener::on(EventType::MouseDown, move |_, _, _, _| *c.borrow_mut() += 1),
        )
        .unwrap();
    app.stage_mut().enter_scene(scene);
    app.tick(0.016).unwrap();

    app.window_mut()
        .push_event(Event::MouseDown(MouseEvent::at(Point::new(1.0, 1.0))));
    app.tick(0.016).unwrap();

    assert_eq!(*clicks.borrow(), 1);
    assert_eq!(app.frame(), 2);
    assert_eq!(app.renderer().frames(), 2);
    assert!(matches!(app.renderer().ops()[0], DrawOp::BeginFrame { .. }));
    assert!(app.renderer().drawn_text().contains(&"hi"));
}

#[test]
fn window_events_reach_the_stage() {
    let mut app = app();
    app.window_mut().push_event(Event::WindowResized {
        width: 320,
        height: 200,
    });
    app.tick(0.0).unwrap();
    assert_eq!(app.stage().window_size(), Size::new(320.0, 200.0));
    assert_eq!(app.window().size(), Size::new(320.0, 200.0));

    app.window_mut().push_event(Event::WindowClosed);
    app.run_frames(10, 0.016).unwrap();
    assert!(!app.is_running());
    assert_eq!(app.frame(), 2);
}

#[test]
fn the_title_comes_from_the_config() {
    let config = AppConfig {
        title: "hello".to_owned(),
        ..AppConfig::default()
    };
    let app = Application::headless(config).unwrap();
    assert_eq!(app.window().title(), "hello");
}

#[test]
fn an_empty_window_is_a_platform_error() {
    let err = Application::new(
        AppConfig::default(),
        HeadlessWindow::new(Size::ZERO),
        RecordingRenderer::new(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, TableauError::Platform(_)));
}

#[test]
fn http_completions_arrive_through_the_frame_loop() {
    let mut app = app();
    app.stage_mut().enter_scene(Scene::new(Size::ZERO));
    app.tick(0.0).unwrap();

    app.connect(|req: &HttpRequest| HttpResponse::completed(200, req.url.clone().into_bytes()))
        .unwrap()
        .send(HttpRequest::get("http://borders"), |stage, res| {
            stage.set_render_borders(res.succeeded);
        })
        .unwrap();

    let deadline = Instant::now() + std::time::Duration::from_secs(5);
    while !app.stage().render_borders() && Instant::now() < deadline {
        app.tick(0.0).unwrap();
        std::thread::yield_now();
    }
    assert!(app.stage().render_borders());
}

#[test]
fn deferred_work_runs_before_update() {
    let mut app = app();
    app.deferred()
        .post(|stage| stage.enter_scene(Scene::new(Size::ZERO)));
    app.tick(0.0).unwrap();
    assert!(app.stage().current_scene().is_some());
}
