//! `circuitbreaker` module guards a fallible operation against cascading failures.
//!
//! Each `CircuitBreaker` is built from a `Rule` (failure threshold and retry timeout)
//! and is shared by its callers through an `Arc`. It is implemented as a state machine:
//!
//!  1. Closed: every call is carried out. Consecutive failures are counted,
//!     reaching the threshold opens the breaker. A success resets the counter.
//!
//!  2. Open: calls are rejected with `CallError::Open` without touching the operation.
//!     Once the retry timeout has elapsed since the last failure, the next call becomes a probe.
//!
//!  3. Half-Open: exactly one probe is carried out. Success closes the breaker, failure opens it again.
//!
//!                                switch to open when failures reach threshold
//!
//!             +-----------------------------------------------------------------------+
//!             |                                                                       |
//!             |                                                                       v
//!     +----------------+                   +----------------+      Probe      +----------------+
//!     |                |                   |                |<----------------|                |
//!     |                |   Probe succeed   |                |                 |                |
//!     |     Closed     |<------------------|    HalfOpen    |                 |      Open      |
//!     |                |                   |                |   Probe failed  |                |
//!     |                |                   |                +---------------->|                |
//!     +----------------+                   +----------------+                 +----------------+
//!
//! Observers implement `StateChangeListener` and register on a breaker instance.

mod breaker;
mod error;
mod rule;
mod state;

pub use breaker::*;
pub use error::*;
pub use rule::*;
pub use state::*;
