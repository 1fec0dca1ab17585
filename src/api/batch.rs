use crate::{
    base::{Job, JobResult},
    config, logging,
    pool::{bounded, Aggregator, CancelToken, Dispatcher, PoolReport, Summary, WorkerPool},
    Error, Result,
};
use std::thread;

/// Everything a finished batch produced.
#[derive(Debug)]
pub struct BatchOutput<R> {
    /// one result per dispatched job, in completion order
    pub results: Vec<JobResult<R>>,
    pub dispatched: usize,
    pub report: PoolReport,
}

/// `BatchBuilder` runs a whole dispatcher -> pool -> aggregator flow.
/// Sizes that are not set explicitly come from the global config.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    name: String,
    worker_count: usize,
    queue_capacity: usize,
    cancel: Option<CancelToken>,
}

impl Default for BatchBuilder {
    fn default() -> Self {
        BatchBuilder {
            name: String::from("batch"),
            worker_count: config::worker_count(),
            queue_capacity: config::queue_capacity(),
            cancel: None,
        }
    }
}

impl BatchBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        BatchBuilder {
            name: name.into(),
            ..BatchBuilder::default()
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// `run` would consume the builder. It blocks until every dispatched job has a result.
    pub fn run<I, T, R, F>(self, payloads: I, transform: F) -> Result<BatchOutput<R>>
    where
        I: IntoIterator<Item = T> + Send + 'static,
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Result<R> + Send + Sync + 'static,
    {
        self.run_with(payloads, transform, |aggregator| aggregator.collect())
            .map(|(results, dispatched, report)| BatchOutput {
                results,
                dispatched,
                report,
            })
    }

    /// Like `run`, but folds the completed values instead of collecting every result.
    pub fn fold<I, T, R, F, A, G>(
        self,
        payloads: I,
        transform: F,
        init: A,
        f: G,
    ) -> Result<Summary<A>>
    where
        I: IntoIterator<Item = T> + Send + 'static,
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Result<R> + Send + Sync + 'static,
        G: FnMut(A, R) -> A,
    {
        self.run_with(payloads, transform, |aggregator| aggregator.fold(init, f))
            .map(|(summary, _, _)| summary)
    }

    fn run_with<I, T, R, F, O, D>(
        self,
        payloads: I,
        transform: F,
        drain: D,
    ) -> Result<(O, usize, PoolReport)>
    where
        I: IntoIterator<Item = T> + Send + 'static,
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Result<R> + Send + Sync + 'static,
        D: FnOnce(Aggregator<R>) -> O,
    {
        let BatchBuilder {
            name,
            worker_count,
            queue_capacity,
            cancel,
        } = self;
        if queue_capacity == 0 {
            return Err(Error::msg("batch queue capacity must be at least 1"));
        }
        let mut pool = WorkerPool::new(name.clone(), worker_count)?;
        if let Some(cancel) = &cancel {
            pool = pool.with_cancel_token(cancel.clone());
        }
        let (job_tx, job_rx) = bounded::<Job<T>>(queue_capacity);
        let (res_tx, res_rx) = bounded(queue_capacity);
        let handle = pool.start(job_rx, res_tx, transform)?;

        let mut dispatcher = Dispatcher::new(job_tx);
        if let Some(cancel) = cancel {
            dispatcher = dispatcher.with_cancel_token(cancel);
        }
        let producer = thread::Builder::new()
            .name(format!("{}-dispatcher", name))
            .spawn(move || -> Result<usize> {
                let dispatched = dispatcher.dispatch(payloads);
                dispatcher.close();
                dispatched
            })?;

        let output = drain(Aggregator::new(res_rx));
        let dispatched = producer
            .join()
            .map_err(|_| Error::msg(format!("dispatcher of batch {} panicked", name)))??;
        let report = handle.wait()?;
        if report.panicked > 0 {
            logging::warn!(
                "[Batch] {} of {} workers panicked in batch {}, their jobs have no result",
                report.panicked,
                worker_count,
                name
            );
        }
        Ok((output, dispatched, report))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::Outcome;

    #[test]
    fn run_collects_every_result() {
        let output = BatchBuilder::new("squares")
            .with_worker_count(3)
            .with_queue_capacity(2)
            .run(1..=9i64, |x| Ok(x * x))
            .unwrap();
        assert_eq!(output.dispatched, 9);
        assert_eq!(output.results.len(), 9);
        let sum: i64 = output
            .results
            .iter()
            .filter_map(|r| r.outcome().value())
            .sum();
        assert_eq!(sum, 285);
        assert_eq!(output.report.total_handled(), 9);
    }

    #[test]
    fn fold_sums_squares() {
        let summary = BatchBuilder::new("fold")
            .with_worker_count(4)
            .fold(1..=9i64, |x| Ok(x * x), 0, |acc, v| acc + v)
            .unwrap();
        assert_eq!(summary.value, 285);
        assert_eq!(summary.completed, 9);
    }

    #[test]
    fn invalid_sizes() {
        assert!(BatchBuilder::new("no-workers")
            .with_worker_count(0)
            .run(0..1i64, Ok)
            .is_err());
        assert!(BatchBuilder::new("no-capacity")
            .with_queue_capacity(0)
            .run(0..1i64, Ok)
            .is_err());
    }

    #[test]
    fn panicking_payloads_name_the_batch() {
        let payloads = (1..=3i64).map(|x| {
            if x == 2 {
                panic!("payload {} unavailable", x);
            }
            x
        });
        let err = BatchBuilder::new("broken")
            .with_worker_count(1)
            .run(payloads, Ok)
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn cancelled_batch() {
        let token = CancelToken::new();
        token.cancel();
        let output = BatchBuilder::new("cancelled")
            .with_cancel_token(token)
            .run(1..=5i64, |x| Ok(x))
            .unwrap();
        assert_eq!(output.dispatched, 0);
        assert!(output
            .results
            .iter()
            .all(|r| matches!(r.outcome(), Outcome::Cancelled)));
    }
}
