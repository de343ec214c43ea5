use std::sync::{Arc, Mutex};

use super::*;
use crate::app::deferred::DeferredQueue;
use crate::foundation::core::Size;

fn echo(req: &HttpRequest) -> HttpResponse {
    if req.url.contains("fail") {
        HttpResponse::failed(None, "unreachable")
    } else {
        HttpResponse::completed(200, req.url.clone().into_bytes())
    }
}

#[test]
fn callbacks_run_on_the_draining_thread() {
    let queue = DeferredQueue::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let client = HttpClient::new(echo, queue.sender()).unwrap();
        for url in ["http://a", "http://fail"] {
            let seen = seen.clone();
            client
                .send(HttpRequest::get(url).with_tag(url), move |_, res| {
                    seen.lock()
                        .unwrap()
                        .push((thread::current().id(), res.succeeded, res.tag));
                })
                .unwrap();
        }
    }
    assert!(seen.lock().unwrap().is_empty());

    let mut stage = Stage::new(Size::new(10.0, 10.0));
    assert_eq!(queue.drain(&mut stage), 2);
    let seen = seen.lock().unwrap();
    let me = thread::current().id();
    assert_eq!(
        *seen,
        vec![
            (me, true, Some("http://a".to_owned())),
            (me, false, Some("http://fail".to_owned())),
        ]
    );
}

#[test]
fn callbacks_reach_the_stage() {
    let queue = DeferredQueue::new();
    {
        let client = HttpClient::new(echo, queue.sender()).unwrap();
        client
            .send(HttpRequest::get("http://resize"), |stage, _| {
                stage.set_window_size(Size::new(1.0, 2.0));
            })
            .unwrap();
    }
    let mut stage = Stage::new(Size::ZERO);
    queue.drain(&mut stage);
    assert_eq!(stage.window_size(), Size::new(1.0, 2.0));
}
