//! A bounded FIFO with blocking `put`/`take` and a one-shot close.
//!
//! The queue is closed once every `Producer` handle has been closed (or dropped).
//! After that, consumers keep receiving the buffered items and `take` returns `None`
//! only when the buffer is drained.

use crate::{Error, Result};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::fmt;
use std::time::Duration;

/// Creates a queue buffering at most `capacity` items.
/// With `capacity == 0` every `put` waits for a matching `take`.
pub fn bounded<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    let (tx, rx) = channel::bounded(capacity);
    (Producer { tx }, Consumer { rx })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeError {
    /// No item arrived in time, the queue is still open.
    TimedOut,
    /// The queue is closed and drained.
    Closed,
}

impl fmt::Display for TakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TakeError::TimedOut => write!(f, "timed out waiting on an open queue"),
            TakeError::Closed => write!(f, "queue closed and drained"),
        }
    }
}

impl std::error::Error for TakeError {}

/// Write half of a queue.
#[derive(Debug)]
pub struct Producer<T> {
    tx: Sender<T>,
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Producer {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Producer<T> {
    /// Blocks while the queue is full.
    /// Fails only if every consumer is gone, the item is dropped in that case.
    pub fn put(&self, item: T) -> Result<()> {
        self.tx
            .send(item)
            .map_err(|_| Error::msg("queue has no consumer left"))
    }

    /// Closes this handle. The queue itself is closed after the last producer handle.
    pub fn close(self) {}

    pub fn len(&self) -> usize {
        self.tx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tx.is_full()
    }
}

/// Read half of a queue.
#[derive(Debug)]
pub struct Consumer<T> {
    rx: Receiver<T>,
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Consumer {
            rx: self.rx.clone(),
        }
    }
}

impl<T> Consumer<T> {
    /// Blocks while the queue is empty and open.
    /// Returns `None` once the queue is closed and every buffered item was taken.
    pub fn take(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    pub fn take_timeout(&self, timeout: Duration) -> std::result::Result<T, TakeError> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => TakeError::TimedOut,
            RecvTimeoutError::Disconnected => TakeError::Closed,
        })
    }

    /// Returns `Ok(None)` when the queue is open but currently empty.
    pub fn try_take(&self) -> std::result::Result<Option<T>, TakeError> {
        match self.rx.try_recv() {
            Ok(item) => Ok(Some(item)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TakeError::Closed),
        }
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// `None` would mean unbounded, which `bounded` never creates.
    pub fn capacity(&self) -> Option<usize> {
        self.rx.capacity()
    }

    /// A blocking iterator, ends when the queue is closed and drained.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.rx.iter()
    }
}

impl<T> IntoIterator for Consumer<T> {
    type Item = T;
    type IntoIter = channel::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rx.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn fifo_then_closed() {
        let (tx, rx) = bounded(4);
        for i in 0..4 {
            tx.put(i).unwrap();
        }
        assert!(tx.is_full());
        tx.close();
        assert_eq!(rx.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(rx.take(), None);
        assert_eq!(rx.try_take(), Err(TakeError::Closed));
    }

    #[test]
    fn closed_only_after_last_producer() {
        let (tx, rx) = bounded(2);
        let tx2 = tx.clone();
        tx.close();
        assert_eq!(rx.try_take(), Ok(None));
        tx2.put(7).unwrap();
        drop(tx2);
        assert_eq!(rx.take(), Some(7));
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn put_blocks_while_full() {
        let (tx, rx) = bounded(1);
        tx.put(1).unwrap();
        let handle = thread::spawn(move || {
            // blocks until the consumer takes the first item
            tx.put(2).unwrap();
        });
        crate::utils::sleep_for_ms(20);
        assert_eq!(rx.len(), 1);
        assert_eq!(rx.take(), Some(1));
        handle.join().unwrap();
        assert_eq!(rx.take(), Some(2));
        assert_eq!(rx.take(), None);
    }

    #[test]
    fn take_timeout() {
        let (tx, rx) = bounded::<u8>(1);
        assert_eq!(
            rx.take_timeout(Duration::from_millis(10)),
            Err(TakeError::TimedOut)
        );
        drop(tx);
        assert_eq!(
            rx.take_timeout(Duration::from_millis(10)),
            Err(TakeError::Closed)
        );
    }

    #[test]
    fn put_without_consumer() {
        let (tx, rx) = bounded(1);
        drop(rx);
        assert!(tx.put(1).is_err());
    }

    #[test]
    fn capacity() {
        let (_tx, rx) = bounded::<u8>(5);
        assert_eq!(rx.capacity(), Some(5));
        assert!(rx.is_empty());
    }
}
