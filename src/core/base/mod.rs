//! Fundamental data flowing through the pool: jobs, their results and outcomes.

mod job;

pub use job::*;
