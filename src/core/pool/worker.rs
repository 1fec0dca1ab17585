use super::{CancelToken, Consumer, Producer};
use crate::{
    base::{Job, JobResult, Outcome},
    logging, Error, Result,
};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// What a pool did during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// `handled[i]` is the amount of jobs taken by worker `i`.
    /// Panicked workers are reported with 0.
    pub handled: Vec<u64>,
    pub panicked: usize,
}

impl PoolReport {
    pub fn total_handled(&self) -> u64 {
        self.handled.iter().sum()
    }
}

/// Handle of a running pool, see `WorkerPool::start`.
#[derive(Debug)]
pub struct PoolHandle {
    name: String,
    coordinator: JoinHandle<PoolReport>,
}

impl PoolHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `wait` blocks until every worker has exited and the result queue is closed.
    ///
    /// The result queue must be drained concurrently (or be large enough),
    /// otherwise workers will block on a full queue and this never returns.
    pub fn wait(self) -> Result<PoolReport> {
        let PoolHandle { name, coordinator } = self;
        coordinator
            .join()
            .map_err(|_| Error::msg(format!("coordinator of pool {} panicked", name)))
    }

    pub fn is_finished(&self) -> bool {
        self.coordinator.is_finished()
    }
}

/// `WorkerPool` runs a fixed number of workers against a job queue and a result queue.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    name: String,
    size: usize,
    cancel: Option<CancelToken>,
}

impl WorkerPool {
    pub fn new<S: Into<String>>(name: S, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::msg("worker pool needs at least one worker"));
        }
        Ok(WorkerPool {
            name: name.into(),
            size,
            cancel: None,
        })
    }

    /// Once `cancel` is triggered, the remaining jobs are answered with
    /// `Outcome::Cancelled` without being transformed.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `start` spawns the workers and a coordinator.
    ///
    /// Each worker takes jobs until the job queue is closed and drained, and puts exactly one
    /// `JobResult` per job. The coordinator waits for all workers and only then releases the
    /// producer it owns, which closes `results`; workers never close it themselves.
    pub fn start<T, R, F>(
        &self,
        jobs: Consumer<Job<T>>,
        results: Producer<JobResult<R>>,
        transform: F,
    ) -> Result<PoolHandle>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Result<R> + Send + Sync + 'static,
    {
        let transform = Arc::new(transform);
        let mut workers = Vec::with_capacity(self.size);
        for index in 0..self.size {
            let jobs = jobs.clone();
            let results = results.clone();
            let transform = Arc::clone(&transform);
            let cancel = self.cancel.clone();
            let pool = self.name.clone();
            let worker = thread::Builder::new()
                .name(format!("{}-worker-{}", self.name, index))
                .spawn(move || run_worker(&pool, index, jobs, results, &*transform, cancel))?;
            workers.push(worker);
        }
        // workers hold their own handles from now on
        drop(jobs);

        let name = self.name.clone();
        let coordinator = thread::Builder::new()
            .name(format!("{}-coordinator", self.name))
            .spawn(move || {
                let mut report = PoolReport::default();
                for (index, worker) in workers.into_iter().enumerate() {
                    match worker.join() {
                        Ok(handled) => report.handled.push(handled),
                        Err(_) => {
                            logging::error!(
                                "[WorkerPool] Worker {} of pool {} panicked",
                                index,
                                name
                            );
                            report.handled.push(0);
                            report.panicked += 1;
                        }
                    }
                }
                results.close();
                logging::debug!(
                    "[WorkerPool] Pool {} finished, {} jobs handled, result queue closed",
                    name,
                    report.total_handled()
                );
                report
            })?;

        logging::info!(
            "[WorkerPool] Pool {} started with {} workers",
            self.name,
            self.size
        );
        Ok(PoolHandle {
            name: self.name.clone(),
            coordinator,
        })
    }
}

fn run_worker<T, R, F>(
    pool: &str,
    index: usize,
    jobs: Consumer<Job<T>>,
    results: Producer<JobResult<R>>,
    transform: &F,
    cancel: Option<CancelToken>,
) -> u64
where
    F: Fn(T) -> Result<R>,
{
    let mut handled = 0;
    while let Some(job) = jobs.take() {
        let id = job.id();
        let outcome = if cancel.as_ref().map_or(false, |c| c.is_cancelled()) {
            Outcome::Cancelled
        } else {
            Outcome::from(transform(job.into_payload()))
        };
        if let Outcome::Failed(err) = &outcome {
            logging::debug!(
                "[WorkerPool] Job {} failed on worker {} of pool {}: {:?}",
                id,
                index,
                pool,
                err
            );
        }
        #[cfg(feature = "exporter")]
        crate::exporter::add_job_handled_counter(pool, outcome.kind());
        handled += 1;
        if results.put(JobResult::new(id, index, outcome)).is_err() {
            logging::warn!(
                "[WorkerPool] Result queue of pool {} has no consumer, worker {} exits",
                pool,
                index
            );
            break;
        }
    }
    handled
}
