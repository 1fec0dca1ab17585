use super::*;
use crate::{logging, utils, Result};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy)]
struct BreakerState {
    state: State,
    /// consecutive failures, reset by any success
    failures: u32,
    /// 0 until the first failure is observed
    last_failure_ms: u64,
}

/// `CircuitBreaker` guards an operation, see the module doc for the state machine.
///
/// Every `call` holds one exclusive lock for the state check, the operation and the
/// state update, so concurrent callers are serialized through the breaker.
pub struct CircuitBreaker {
    rule: Arc<Rule>,
    inner: Mutex<BreakerState>,
    listeners: RwLock<Vec<Arc<dyn StateChangeListener>>>,
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("rule", &self.rule)
            .field("inner", &*self.lock())
            .finish()
    }
}

impl CircuitBreaker {
    pub fn new(threshold: u32, retry_timeout: Duration) -> Result<Self> {
        Self::from_rule(Arc::new(Rule::new(
            DEFAULT_BREAKER_NAME,
            threshold,
            retry_timeout,
        )))
    }

    pub fn from_rule(rule: Arc<Rule>) -> Result<Self> {
        rule.is_valid()?;
        Ok(CircuitBreaker {
            rule,
            inner: Mutex::new(BreakerState::default()),
            listeners: RwLock::new(Vec::new()),
        })
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        // a panicking operation poisons the lock, the state itself stays consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `bound_rule` returns the rule the breaker was built with.
    #[inline]
    pub fn bound_rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.rule.name
    }

    /// `current_state` returns current state of the circuit breaker.
    /// Blocks while a call is in progress.
    pub fn current_state(&self) -> State {
        self.lock().state
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failures
    }

    pub fn last_failure_ms(&self) -> u64 {
        self.lock().last_failure_ms
    }

    pub fn register_state_change_listeners(&self, mut listeners: Vec<Arc<dyn StateChangeListener>>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(&mut listeners);
    }

    pub fn clear_state_change_listeners(&self) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// `reset` forces the breaker back to Closed with no failure recorded.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if inner.state != State::Closed {
            self.transform(&mut inner, State::Closed);
        }
        *inner = BreakerState::default();
    }

    /// `call` carries out `op` if the breaker state allows it.
    ///
    /// Returns `CallError::Open` without invoking `op` while the breaker is open and the
    /// retry timeout has not elapsed since the last failure. Otherwise returns what `op`
    /// returned, its error wrapped in `CallError::Failed`.
    pub fn call<T, E, F>(&self, op: F) -> std::result::Result<T, CallError<E>>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let mut inner = self.lock();
        match inner.state {
            State::Closed => {}
            State::Open => {
                let now = utils::curr_time_millis();
                let next_retry = inner
                    .last_failure_ms
                    .saturating_add(self.rule.retry_timeout_ms);
                if now < next_retry {
                    #[cfg(feature = "exporter")]
                    crate::exporter::add_rejected_counter(&self.rule.name);
                    return Err(CallError::Open(BreakerOpen::new(
                        self.rule.name.clone(),
                        next_retry - now,
                    )));
                }
                self.transform(&mut inner, State::HalfOpen);
            }
            // only left behind by a probe that panicked, this call is the new probe
            State::HalfOpen => {}
        }

        match op() {
            Ok(v) => {
                self.on_success(&mut inner);
                Ok(v)
            }
            Err(err) => {
                self.on_failure(&mut inner);
                Err(CallError::Failed(err))
            }
        }
    }

    fn on_success(&self, inner: &mut BreakerState) {
        inner.failures = 0;
        if inner.state == State::HalfOpen {
            self.transform(inner, State::Closed);
        }
    }

    fn on_failure(&self, inner: &mut BreakerState) {
        inner.failures = inner.failures.saturating_add(1);
        inner.last_failure_ms = utils::curr_time_millis();
        match inner.state {
            State::HalfOpen => self.transform(inner, State::Open),
            State::Closed if inner.failures >= self.rule.threshold => {
                self.transform(inner, State::Open)
            }
            _ => {}
        }
    }

    fn transform(&self, inner: &mut BreakerState, to: State) {
        let prev = inner.state;
        inner.state = to;
        logging::debug!(
            "[CircuitBreaker] Breaker {} transformed from {} to {}, failures {}",
            self.rule.name,
            prev,
            to,
            inner.failures
        );
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in &*listeners {
            match to {
                State::Closed => listener.on_transform_to_closed(prev, Arc::clone(&self.rule)),
                State::Open => {
                    listener.on_transform_to_open(prev, Arc::clone(&self.rule), inner.failures)
                }
                State::HalfOpen => {
                    listener.on_transform_to_half_open(prev, Arc::clone(&self.rule))
                }
            }
        }
        #[cfg(feature = "exporter")]
        crate::exporter::add_state_change_counter(
            &self.rule.name,
            &prev.to_string(),
            &to.to_string(),
        );
    }
}
