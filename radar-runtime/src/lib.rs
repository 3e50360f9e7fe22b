//! Background execution for the yt-radar shell.
//!
//! A [`JobRunner`] owns a tokio runtime and a [`TaskQueue`]. The shell submits
//! jobs, keeps its own thread free, and collects one [`TaskMessage`] per job.
//! Dropping work early goes through [`JobRunner::cancel`] or
//! [`JobRunner::shutdown`]; either way the job still reports back.
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;

pub mod task;

pub use task::{TaskMessage, TaskQueue};

/// Worker threads: a couple of in-flight requests is all a job needs.
const WORKER_THREADS: usize = 2;

pub struct JobRunner<T> {
    runtime: Runtime,
    cancel: CancellationToken,
    queue: TaskQueue<T>,
}

impl<T: Send + 'static> JobRunner<T> {
    /// Start the runtime. Threads are named `thread_name`.
    ///
    /// ```
    /// use radar_runtime::JobRunner;
    /// use std::time::Duration;
    ///
    /// let mut runner = JobRunner::start("doctest-jobs").expect("runtime builds");
    /// runner.submit("count", async { Ok(3usize) });
    /// let msg = runner.next_message(Duration::from_millis(5)).expect("one message");
    /// assert_eq!(msg.outcome, Ok(3));
    /// runner.shutdown(Duration::from_millis(10));
    /// ```
    pub fn start(thread_name: &str) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .worker_threads(WORKER_THREADS)
            .thread_name(thread_name)
            .build()?;
        tracing::debug!(target: "radar.task", thread_name, "runtime.started");
        Ok(Self {
            runtime,
            cancel: CancellationToken::new(),
            queue: TaskQueue::new(),
        })
    }

    pub fn submit<F>(&mut self, name: impl Into<String>, fut: F)
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.queue
            .spawn(self.runtime.handle(), &self.cancel, name, fut);
    }

    /// Jobs submitted whose message has not been collected yet.
    pub fn pending(&self) -> usize {
        self.queue.pending()
    }

    /// Messages ready right now, without blocking.
    pub fn try_drain(&mut self) -> Vec<TaskMessage<T>> {
        self.queue.try_drain()
    }

    /// Block the calling thread until the next message, checking every
    /// `interval`. `None` once nothing is pending.
    pub fn next_message(&mut self, interval: Duration) -> Option<TaskMessage<T>> {
        self.queue.wait_polling(interval)
    }

    /// Abort every running job; each reports `cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancel outstanding jobs and stop the runtime, waiting at most `grace`.
    pub fn shutdown(self, grace: Duration) {
        let unfinished = self.queue.pending();
        self.cancel.cancel();
        self.runtime.shutdown_timeout(grace);
        tracing::debug!(target: "radar.task", unfinished, "runtime.stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(5);

    fn should_panic() -> bool {
        true
    }

    fn runner<T: Send + 'static>() -> JobRunner<T> {
        JobRunner::start("job-test").expect("runtime")
    }

    #[test]
    fn search_job_posts_one_message() {
        let mut jobs = runner();
        jobs.submit("search", async { Ok(vec!["abc".to_string()]) });
        assert_eq!(jobs.pending(), 1);

        let msg = jobs.next_message(TICK).expect("message");
        assert_eq!(msg.task, "search");
        assert_eq!(msg.outcome, Ok(vec!["abc".to_string()]));
        assert_eq!(jobs.pending(), 0);
        assert!(jobs.next_message(TICK).is_none());
        jobs.shutdown(TICK);
    }

    #[test]
    fn errors_keep_their_context() {
        let mut jobs: JobRunner<()> = runner();
        jobs.submit("comment-terms", async {
            Err(anyhow::anyhow!("quota exceeded").context("comment fetch"))
        });
        let msg = jobs.next_message(TICK).expect("message");
        assert_eq!(msg.outcome, Err("comment fetch: quota exceeded".to_string()));
        jobs.shutdown(TICK);
    }

    #[test]
    fn panics_become_errors() {
        let mut jobs: JobRunner<u8> = runner();
        jobs.submit("analyze", async {
            if should_panic() {
                panic!("ranker blew up");
            }
            Ok(0)
        });
        let msg = jobs.next_message(TICK).expect("message");
        let err = msg.outcome.unwrap_err();
        assert!(err.contains("ranker blew up"), "{err}");
        jobs.shutdown(TICK);
    }

    #[test]
    fn cancel_reports_cancelled() {
        let mut jobs: JobRunner<()> = runner();
        jobs.submit("slow-fetch", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        jobs.cancel();
        let msg = jobs.next_message(TICK).expect("message");
        assert_eq!(msg.outcome, Err("cancelled".to_string()));
        jobs.shutdown(TICK);
    }

    #[test]
    fn try_drain_is_non_blocking() {
        let mut jobs: JobRunner<u8> = runner();
        assert!(jobs.try_drain().is_empty());

        jobs.submit("a", async { Ok(1) });
        jobs.submit("b", async { Ok(2) });
        let mut got = Vec::new();
        while got.len() < 2 {
            got.extend(jobs.try_drain());
            std::thread::sleep(TICK);
        }
        got.sort_by(|x, y| x.task.cmp(&y.task));
        assert_eq!(got[0].outcome, Ok(1));
        assert_eq!(got[1].outcome, Ok(2));
        assert_eq!(jobs.pending(), 0);
        jobs.shutdown(TICK);
    }
}
