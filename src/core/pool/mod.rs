//! `pool` module wires a bounded job queue to a fixed number of workers:
//!
//!  Dispatcher --> | job queue | --> N workers --> | result queue | --> Aggregator
//!
//! The dispatcher closes the job queue once every job is enqueued; workers drain it and exit.
//! A coordinator waits for all workers before closing the result queue, so the
//! aggregator sees every result exactly once and never blocks forever.

mod aggregator;
mod cancel;
mod dispatcher;
pub mod pipeline;
mod queue;
mod worker;

pub use aggregator::*;
pub use cancel::*;
pub use dispatcher::*;
pub use queue::*;
pub use worker::*;
