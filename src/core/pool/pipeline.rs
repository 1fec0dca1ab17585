//! Stages connected by bounded queues: `source -> stage -> stage -> ...`.
//!
//! Every stage runs on its own thread and closes its output once its input is closed
//! and drained, so closing the source eventually closes the whole chain.
//! Within a stage items keep their order.

use super::{bounded, Consumer};
use crate::{logging, Result};
use std::thread;

/// `source` emits `items` on a new thread, then closes the returned queue.
pub fn source<I>(items: I, capacity: usize) -> Result<Consumer<I::Item>>
where
    I: IntoIterator + Send + 'static,
    I::Item: Send + 'static,
{
    let (tx, rx) = bounded(capacity);
    thread::Builder::new()
        .name("pipeline-source".into())
        .spawn(move || {
            for item in items {
                if tx.put(item).is_err() {
                    logging::debug!("[Pipeline] Source has no consumer left, stopping");
                    return;
                }
            }
            tx.close();
        })?;
    Ok(rx)
}

/// `stage` maps every item of `input` with `f` on a new thread.
pub fn stage<T, U, F>(input: Consumer<T>, capacity: usize, f: F) -> Result<Consumer<U>>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> U + Send + 'static,
{
    let (tx, rx) = bounded(capacity);
    thread::Builder::new()
        .name("pipeline-stage".into())
        .spawn(move || {
            for item in input {
                if tx.put(f(item)).is_err() {
                    logging::debug!("[Pipeline] Stage has no consumer left, stopping");
                    return;
                }
            }
            tx.close();
        })?;
    Ok(rx)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn square_then_add_ten() {
        let squared = stage(source(vec![1, 2, 3, 4, 5], 0).unwrap(), 0, |n: i64| n * n).unwrap();
        let out = stage(squared, 0, |n| n + 10).unwrap();
        assert_eq!(out.iter().collect::<Vec<_>>(), vec![11, 14, 19, 26, 35]);
    }

    #[test]
    fn empty_source_closes_chain() {
        let out = stage(source(Vec::<u8>::new(), 1).unwrap(), 1, |n| n).unwrap();
        assert!(out.take().is_none());
    }

    #[test]
    fn dropped_consumer_stops_upstream() {
        let out = stage(source(0..1_000_000u64, 1).unwrap(), 1, |n| n + 1).unwrap();
        assert_eq!(out.take(), Some(1));
        // upstream threads exit once their `put` fails, nothing to join here
        drop(out);
    }
}
