use crate::Error;
use std::fmt;

pub type JobId = u64;

/// A unit of work, handed to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job<T> {
    id: JobId,
    payload: T,
}

impl<T> Job<T> {
    pub fn new(id: JobId, payload: T) -> Self {
        Job { id, payload }
    }

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// `Outcome` is what happened to a single job.
#[derive(Debug)]
pub enum Outcome<R> {
    /// The transformation returned a value.
    Completed(R),
    /// The transformation returned an error, the worker moved on to the next job.
    Failed(Error),
    /// The batch was cancelled before this job was started.
    Cancelled,
}

impl<R> Outcome<R> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn value(&self) -> Option<&R> {
        match self {
            Outcome::Completed(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<R> {
        match self {
            Outcome::Completed(v) => Some(v),
            _ => None,
        }
    }

    /// Short label, used in log lines and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Completed(_) => "completed",
            Outcome::Failed(_) => "failed",
            Outcome::Cancelled => "cancelled",
        }
    }
}

impl<R> From<crate::Result<R>> for Outcome<R> {
    fn from(res: crate::Result<R>) -> Self {
        match res {
            Ok(v) => Outcome::Completed(v),
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// The result produced by one worker for one job.
#[derive(Debug)]
pub struct JobResult<R> {
    job_id: JobId,
    worker: usize,
    outcome: Outcome<R>,
}

impl<R> JobResult<R> {
    pub fn new(job_id: JobId, worker: usize, outcome: Outcome<R>) -> Self {
        JobResult {
            job_id,
            worker,
            outcome,
        }
    }

    #[inline]
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Index of the worker that handled the job, starting from 0.
    #[inline]
    pub fn worker(&self) -> usize {
        self.worker
    }

    #[inline]
    pub fn outcome(&self) -> &Outcome<R> {
        &self.outcome
    }

    pub fn into_outcome(self) -> Outcome<R> {
        self.outcome
    }
}

impl<R: fmt::Debug> fmt::Display for JobResult<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Completed(v) => write!(
                f,
                "job {} completed by worker {}: {:?}",
                self.job_id, self.worker, v
            ),
            Outcome::Failed(err) => write!(
                f,
                "job {} failed on worker {}: {}",
                self.job_id, self.worker, err
            ),
            Outcome::Cancelled => write!(f, "job {} cancelled", self.job_id),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_from_result() {
        let ok: Outcome<i64> = Ok(4).into();
        assert!(ok.is_completed());
        assert_eq!(ok.value(), Some(&4));

        let failed: Outcome<i64> = Err(Error::msg("boom")).into();
        assert!(failed.is_failed());
        assert_eq!(failed.kind(), "failed");
        assert!(failed.into_value().is_none());
    }

    #[test]
    fn display() {
        let done = JobResult::new(3, 1, Outcome::Completed(9));
        assert_eq!(done.to_string(), "job 3 completed by worker 1: 9");
        let cancelled: JobResult<i64> = JobResult::new(7, 0, Outcome::Cancelled);
        assert_eq!(cancelled.to_string(), "job 7 cancelled");
    }
}
