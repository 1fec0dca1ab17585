use super::Consumer;
use crate::{
    base::{JobId, JobResult, Outcome},
    Error,
};

/// Folded view of a drained result queue.
#[derive(Debug)]
pub struct Summary<A> {
    pub value: A,
    pub completed: usize,
    pub cancelled: usize,
    pub failures: Vec<(JobId, Error)>,
}

impl<A> Summary<A> {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.completed + self.cancelled + self.failed()
    }
}

/// `Aggregator` is the single consumer of a result queue.
/// Every method drains the queue until it is closed.
#[derive(Debug)]
pub struct Aggregator<R> {
    results: Consumer<JobResult<R>>,
}

impl<R> Aggregator<R> {
    pub fn new(results: Consumer<JobResult<R>>) -> Self {
        Aggregator { results }
    }

    /// Folds the completed values, failed and cancelled jobs are only counted.
    pub fn fold<A, F>(self, init: A, mut f: F) -> Summary<A>
    where
        F: FnMut(A, R) -> A,
    {
        let mut summary = Summary {
            value: init,
            completed: 0,
            cancelled: 0,
            failures: Vec::new(),
        };
        for result in self.results {
            let job_id = result.job_id();
            match result.into_outcome() {
                Outcome::Completed(v) => {
                    summary.value = f(summary.value, v);
                    summary.completed += 1;
                }
                Outcome::Failed(err) => summary.failures.push((job_id, err)),
                Outcome::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }

    pub fn collect(self) -> Vec<JobResult<R>> {
        self.results.into_iter().collect()
    }
}

impl Aggregator<i64> {
    /// Sums the completed values, saturating at the `i64` bounds.
    pub fn sum(self) -> Summary<i64> {
        self.fold(0, |acc, v| acc.saturating_add(v))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pool::bounded;

    #[test]
    fn fold_counts_each_outcome() {
        let (tx, rx) = bounded(8);
        tx.put(JobResult::new(1, 0, Outcome::Completed(4))).unwrap();
        tx.put(JobResult::new(2, 1, Outcome::Failed(Error::msg("boom"))))
            .unwrap();
        tx.put(JobResult::new(3, 0, Outcome::Cancelled)).unwrap();
        tx.put(JobResult::new(4, 1, Outcome::Completed(6))).unwrap();
        tx.close();

        let summary = Aggregator::new(rx).sum();
        assert_eq!(summary.value, 10);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failures[0].0, 2);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn sum_saturates() {
        let (tx, rx) = bounded(4);
        tx.put(JobResult::new(1, 0, Outcome::Completed(i64::MAX))).unwrap();
        tx.put(JobResult::new(2, 0, Outcome::Completed(1))).unwrap();
        tx.close();
        let summary = Aggregator::new(rx).sum();
        assert_eq!(summary.value, i64::MAX);
        assert_eq!(summary.completed, 2);
    }

    #[test]
    fn empty_queue() {
        let (tx, rx) = bounded::<JobResult<i64>>(1);
        drop(tx);
        let summary = Aggregator::new(rx).sum();
        assert_eq!(summary.value, 0);
        assert_eq!(summary.total(), 0);
    }
}
