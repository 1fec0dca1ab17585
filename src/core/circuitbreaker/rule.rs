use crate::{config, Error, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BREAKER_NAME: &str = "default";

/// Rule encompasses the fields of a circuit breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// name of the guarded operation, used in logs and metrics
    pub name: String,
    /// `threshold` is the amount of consecutive failures that opens the breaker, at least 1.
    pub threshold: u32,
    /// `retry_timeout_ms` represents recovery timeout (in milliseconds) after the last failure.
    /// During the open period, no calls are permitted until the timeout has elapsed.
    /// After that, the circuit breaker will transform to half-open state for one "trial" call.
    pub retry_timeout_ms: u64,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            name: DEFAULT_BREAKER_NAME.into(),
            threshold: config::DEFAULT_BREAKER_THRESHOLD,
            retry_timeout_ms: config::DEFAULT_RETRY_TIMEOUT_MS,
        }
    }
}

impl Rule {
    pub fn new<S: Into<String>>(name: S, threshold: u32, retry_timeout: Duration) -> Self {
        Rule {
            name: name.into(),
            threshold,
            retry_timeout_ms: u64::try_from(retry_timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// A rule named `name`, with the threshold and timeout of the global config.
    pub fn from_config<S: Into<String>>(name: S) -> Self {
        Rule {
            name: name.into(),
            threshold: config::breaker_threshold(),
            retry_timeout_ms: config::breaker_retry_timeout_ms(),
        }
    }

    pub fn is_valid(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::msg("empty breaker name"));
        }
        if self.threshold == 0 {
            return Err(Error::msg("invalid threshold, it must be at least 1"));
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmtted = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", fmtted)
    }
}
