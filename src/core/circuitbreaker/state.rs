use super::Rule;
use std::fmt;
use std::sync::Arc;

/// States of Circuit Breaker State Machine
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    /// calls are allowed
    Closed,
    /// one probing call is in progress
    HalfOpen,
    /// calls are blocked
    Open,
}

impl Default for State {
    fn default() -> State {
        State::Closed
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `StateChangeListener` listens on the circuit breaker state change event.
/// Listeners are called while the breaker lock is held, they must not call into the same breaker.
pub trait StateChangeListener: Sync + Send {
    /// `on_transform_to_closed` is triggered when circuit breaker state transformed to Closed.
    fn on_transform_to_closed(&self, prev: State, rule: Arc<Rule>);

    /// `on_transform_to_open` is triggered when circuit breaker state transformed to Open.
    /// `failures` is the consecutive failure count when the transformation occurs.
    fn on_transform_to_open(&self, prev: State, rule: Arc<Rule>, failures: u32);

    /// `on_transform_to_half_open` is triggered when circuit breaker state transformed to HalfOpen.
    fn on_transform_to_half_open(&self, prev: State, rule: Arc<Rule>);
}
