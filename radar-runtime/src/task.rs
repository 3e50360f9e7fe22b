//! One-shot background jobs reporting back over a bounded queue.
//!
//! Every job spawned through [`TaskQueue::spawn`] posts exactly one
//! [`TaskMessage`]. Errors, panics and cancellation arrive as messages too.
use std::any::Any;
use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_util::sync::CancellationToken;

const QUEUE_CAPACITY: usize = 32;

#[derive(Debug)]
pub struct TaskMessage<T> {
    pub task: String,
    pub outcome: Result<T, String>,
}

pub struct TaskQueue<T> {
    tx: mpsc::Sender<TaskMessage<T>>,
    rx: mpsc::Receiver<TaskMessage<T>>,
    pending: usize,
}

impl<T: Send + 'static> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> TaskQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        Self { tx, rx, pending: 0 }
    }

    /// Jobs spawned whose message has not been received yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Run `fut` on the runtime; exactly one message is posted when it ends,
    /// fails, panics or is cancelled.
    pub fn spawn<F>(
        &mut self,
        handle: &Handle,
        cancel: &CancellationToken,
        name: impl Into<String>,
        fut: F,
    ) where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let task = name.into();
        let tx = self.tx.clone();
        let cancel = cancel.clone();
        let mut job = handle.spawn(fut);
        self.pending += 1;
        tracing::debug!(target: "radar.task", task = %task, "task.spawned");

        handle.spawn(async move {
            let outcome = tokio::select! {
                joined = &mut job => match joined {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(err)) => Err(format!("{err:#}")),
                    Err(err) if err.is_panic() => {
                        Err(format!("task panicked: {}", panic_message(err.into_panic())))
                    }
                    Err(err) => Err(err.to_string()),
                },
                _ = cancel.cancelled() => {
                    job.abort();
                    Err("cancelled".to_string())
                }
            };
            match &outcome {
                Ok(_) => tracing::debug!(target: "radar.task", task = %task, "task.done"),
                Err(e) => tracing::warn!(target: "radar.task", task = %task, error = %e, "task.failed"),
            }
            if tx.send(TaskMessage { task, outcome }).await.is_err() {
                tracing::debug!(target: "radar.task", "task.queue_closed");
            }
        });
    }

    /// Every message available right now, without blocking.
    pub fn try_drain(&mut self) -> Vec<TaskMessage<T>> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => out.push(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.pending = self.pending.saturating_sub(out.len());
        out
    }

    /// Block the calling thread, checking every `interval`, until one message
    /// arrives. `None` when nothing is pending. Must not be called from inside
    /// the runtime.
    pub fn wait_polling(&mut self, interval: Duration) -> Option<TaskMessage<T>> {
        while self.pending > 0 {
            match self.rx.try_recv() {
                Ok(msg) => {
                    self.pending -= 1;
                    return Some(msg);
                }
                Err(TryRecvError::Empty) => std::thread::sleep(interval),
                Err(TryRecvError::Disconnected) => break,
            }
        }
        None
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
