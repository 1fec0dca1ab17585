#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]

//! # jobguard
//!
//! jobguard processes batches of jobs on a fixed number of worker threads,
//! and protects fallible operations with circuit breakers.
//!
//! The pool follows the classic worker-pool shape:
//!
//! ```text
//!  Dispatcher --> | job queue | --> N workers --> | result queue | --> Aggregator
//! ```
//!
//! Both queues are bounded. The dispatcher closes the job queue after the last job,
//! the workers drain it and a coordinator closes the result queue only after every worker
//! has exited, so each job yields exactly one `JobResult`.
//!
//! ## Add Dependency
//!
//! ```toml
//! [dependencies]
//! jobguard = { version = "0.1.0", features = ["full"] }
//! ```
//!
//! Optional features lists:
//! - exporter: Export pool and breaker counters to Prometheus.
//! - logger_env: Use `env_logger` to initialize logging.
//! - logger_log4rs: Use `log4rs` to initialize logging.
//!
//! ## General Configurations and Initialization
//!
//! - `init_default()`: Load configurations from environment variable. For undefined configurations, use default values.
//! - `init_with_config_file(config_path: &mut String)`: Load configurations from a YAML file.
//! - `init_with_config(config_entity: ConfigEntity)`: Use hand-crafted `ConfigEntity` to initialize.
//!
//! ```rust
//! use jobguard::{init_default, logging};
//! init_default().unwrap_or_else(|err| logging::error!("{:?}", err));
//! ```
//!
//! ## Run a Batch
//!
//! ```rust
//! use jobguard::BatchBuilder;
//! let summary = BatchBuilder::new("squares")
//!     .with_worker_count(3)
//!     .fold(1..=9i64, |x| Ok(x * x), 0, |acc, v| acc + v)?;
//! assert_eq!(summary.value, 285);
//! ```
//!
//! The pieces can also be wired by hand with `pool::bounded`, `pool::Dispatcher`,
//! `pool::WorkerPool` and `pool::Aggregator`.
//!
//! ## Circuit Breaking
//!
//! ```rust
//! use jobguard::circuitbreaker::{CallError, CircuitBreaker};
//! use std::time::Duration;
//! let breaker = CircuitBreaker::new(3, Duration::from_secs(1))?;
//! match breaker.call(|| query_db()) {
//!     Ok(rows) => {}
//!     Err(CallError::Open(_)) => { /* rejected, the operation was not invoked */ }
//!     Err(CallError::Failed(err)) => { /* the operation's own error */ }
//! }
//! ```

// This module is not intended to be part of the public API.
#[macro_use]
#[doc(hidden)]
pub mod macros;

/// jobguard API
pub mod api;
/// Core implementations: job types, the worker pool and its queues,
/// the circuit breaker and the configuration.
pub mod core;
/// Adapters for different logging crates.
pub mod logging;
cfg_exporter! {
    /// Metric Exporter implementations. Currently, only Prometheus is supported.
    pub mod exporter;
}
// Utility functions for jobguard.
pub mod utils;

// re-export precludes
pub use crate::core::*;
pub use api::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
