use super::{CancelToken, Producer};
use crate::{base::Job, base::JobId, logging, Result};

/// `Dispatcher` is the single producer of a job queue.
/// Jobs are numbered in dispatch order, starting from 1.
#[derive(Debug)]
pub struct Dispatcher<T> {
    jobs: Producer<Job<T>>,
    next_id: JobId,
    cancel: Option<CancelToken>,
}

impl<T> Dispatcher<T> {
    pub fn new(jobs: Producer<Job<T>>) -> Self {
        Dispatcher {
            jobs,
            next_id: 1,
            cancel: None,
        }
    }

    /// Stops enqueuing once `cancel` is triggered.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Amount of jobs enqueued so far.
    pub fn dispatched(&self) -> u64 {
        self.next_id - 1
    }

    /// `dispatch` enqueues every payload, blocking while the job queue is full,
    /// and returns the amount actually enqueued by this call.
    pub fn dispatch<I>(&mut self, payloads: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0;
        for payload in payloads {
            if self.cancel.as_ref().map_or(false, |c| c.is_cancelled()) {
                logging::info!(
                    "[Dispatcher] Batch cancelled, stop dispatching after {} jobs",
                    self.dispatched()
                );
                break;
            }
            self.jobs.put(Job::new(self.next_id, payload))?;
            self.next_id += 1;
            count += 1;
        }
        Ok(count)
    }

    /// `close` closes the job queue. Workers stop after draining what is left.
    pub fn close(self) {
        logging::debug!(
            "[Dispatcher] Closing job queue after {} jobs",
            self.dispatched()
        );
        self.jobs.close();
    }
}

impl Dispatcher<i64> {
    /// Enqueues the integer jobs `1..=count`.
    pub fn dispatch_count(&mut self, count: usize) -> Result<usize> {
        self.dispatch(1..=count as i64)
    }
}
