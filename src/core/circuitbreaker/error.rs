use std::error::Error as StdError;
use std::fmt;

/// `BreakerOpen` indicates the call was rejected without being carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakerOpen {
    name: String,
    retry_in_ms: u64,
}

impl BreakerOpen {
    pub(crate) fn new(name: String, retry_in_ms: u64) -> Self {
        BreakerOpen { name, retry_in_ms }
    }

    pub fn breaker_name(&self) -> &str {
        &self.name
    }

    /// Time left until the breaker lets a probe through.
    pub fn retry_in_ms(&self) -> u64 {
        self.retry_in_ms
    }
}

impl fmt::Display for BreakerOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "circuit breaker {} is open, retry in {} ms",
            self.name, self.retry_in_ms
        )
    }
}

impl StdError for BreakerOpen {}

/// Error of `CircuitBreaker::call`.
#[derive(Debug)]
pub enum CallError<E> {
    /// The breaker rejected the call, the operation was not invoked.
    Open(BreakerOpen),
    /// The operation was invoked and returned its own error.
    Failed(E),
}

impl<E> CallError<E> {
    pub fn is_open(&self) -> bool {
        matches!(self, CallError::Open(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CallError::Failed(_))
    }

    /// The error of the operation, if it was invoked.
    pub fn into_inner(self) -> Option<E> {
        match self {
            CallError::Failed(err) => Some(err),
            CallError::Open(_) => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Open(open) => write!(f, "{}", open),
            CallError::Failed(err) => write!(f, "{}", err),
        }
    }
}

impl<E: StdError + 'static> StdError for CallError<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CallError::Open(open) => Some(open),
            CallError::Failed(err) => Some(err),
        }
    }
}
