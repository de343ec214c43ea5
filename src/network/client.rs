//! HTTP client with a dedicated worker thread.

use std::thread;

use crossbeam_channel::{Sender, unbounded};

use crate::app::deferred::DeferredSender;
use crate::foundation::error::{TableauError, TableauResult};
use crate::network::transport::{HttpRequest, HttpResponse, Transport};
use crate::scene::stage::Stage;

/// Completion callback; runs on the thread that drains the deferred queue.
///
/// The requesting node may be gone by then, so callbacks check `is_alive` before touching it.
pub type ResponseCallback = Box<dyn FnOnce(&mut Stage, HttpResponse) + Send + 'static>;

struct Job {
    request: HttpRequest,
    callback: ResponseCallback,
}

/// Submits requests from the main thread and performs them on one worker thread.
///
/// Requests run in submission order. Dropping the client lets queued requests finish, then
/// joins the worker.
pub struct HttpClient {
    tx: Option<Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("running", &self.worker.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Spawn the worker. Completions are posted through `deferred`.
    pub fn new(transport: impl Transport, deferred: DeferredSender) -> TableauResult<Self> {
        let (tx, rx) = unbounded::<Job>();
        let worker = thread::Builder::new()
            .name("tableau-http".to_owned())
            .spawn(move || {
                tracing::debug!("http worker started");
                while let Ok(Job { request, callback }) = rx.recv() {
                    let mut response = transport.perform(&request);
                    response.tag.clone_from(&request.tag);
                    if !response.succeeded {
                        tracing::warn!(
                            url = %request.url,
                            status = response.status,
                            error = response.error.as_deref().unwrap_or(""),
                            "http request failed"
                        );
                    }
                    if !deferred.post(move |stage| callback(stage, response)) {
                        break;
                    }
                }
                tracing::debug!("http worker stopped");
            })
            .map_err(|e| TableauError::platform(format!("spawn http worker: {e}")))?;
        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Queue `request`; `callback` later receives the response on the main thread.
    pub fn send(
        &self,
        request: HttpRequest,
        callback: impl FnOnce(&mut Stage, HttpResponse) + Send + 'static,
    ) -> TableauResult<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| TableauError::validation("http client is shut down"))?;
        tx.send(Job {
            request,
            callback: Box::new(callback),
        })
        .map_err(|_| TableauError::validation("http worker has stopped"))
    }
}

impl Drop for HttpClient {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::warn!("http worker panicked");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/client.rs"]
mod tests;
