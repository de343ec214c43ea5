//! Main-thread work queue fed from any thread.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::scene::stage::Stage;

/// A closure run on the main thread with access to the stage.
pub type Deferred = Box<dyn FnOnce(&mut Stage) + Send + 'static>;

/// Cloneable handle for posting work onto a [`DeferredQueue`] from other threads.
#[derive(Clone, Debug)]
pub struct DeferredSender {
    tx: Sender<Deferred>,
}

impl DeferredSender {
    /// Queue `f` for the next drain. Returns `false` if the queue is gone.
    pub fn post(&self, f: impl FnOnce(&mut Stage) + Send + 'static) -> bool {
        self.tx.send(Box::new(f)).is_ok()
    }
}

/// Closures queued for the main thread, drained once per frame.
#[derive(Debug)]
pub struct DeferredQueue {
    tx: Sender<Deferred>,
    rx: Receiver<Deferred>,
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DeferredQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// A handle other threads can post through.
    pub fn sender(&self) -> DeferredSender {
        DeferredSender {
            tx: self.tx.clone(),
        }
    }

    /// Queue `f` from the main thread.
    pub fn post(&self, f: impl FnOnce(&mut Stage) + Send + 'static) {
        // The queue owns a receiver, so the channel cannot be disconnected here.
        let _ = self.tx.send(Box::new(f));
    }

    /// Number of queued closures.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Run every closure queued before this call. Work posted while draining waits for the
    /// next drain. Returns the number of closures run.
    pub fn drain(&self, stage: &mut Stage) -> usize {
        let pending = self.rx.len();
        let mut ran = 0;
        for _ in 0..pending {
            let Ok(job) = self.rx.try_recv() else {
                break;
            };
            job(stage);
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/deferred.rs"]
mod tests;
