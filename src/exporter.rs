//! Prometheus metrics of the pools and breakers in this process.

use crate::{config, Error, Result};
use lazy_static::lazy_static;
use prometheus_exporter::{
    prometheus::{default_registry, opts, CounterVec, Registry},
    Builder,
};
use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};

lazy_static! {
    static ref HOST_NAME: String = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "<unknown>".to_owned());
    static ref PROCESS_NAME: String = std::env::args().next().unwrap_or_default();
    static ref PID_STRING: String = format!("{}", std::process::id());
    // crate::core::pool
    static ref JOB_HANDLED_COUNTER: CounterVec = CounterVec::new(
        opts!(
            "jobguard_jobs_handled_total",
            "Total jobs handled by workers, by outcome"
        ),
        &["host", "process", "pid", "pool", "outcome"]
    )
    .expect("valid metric definition");
    // crate::core::circuitbreaker
    static ref STATE_CHANGE_COUNTER: CounterVec = CounterVec::new(
        opts!(
            "jobguard_circuit_breaker_state_changed_total",
            "Circuit breaker total state change count"
        ),
        &["host", "process", "pid", "breaker", "from_state", "to_state"]
    )
    .expect("valid metric definition");
    static ref REJECTED_COUNTER: CounterVec = CounterVec::new(
        opts!(
            "jobguard_circuit_breaker_rejected_total",
            "Calls rejected by an open circuit breaker"
        ),
        &["host", "process", "pid", "breaker"]
    )
    .expect("valid metric definition");
    static ref COUNTER_METRICS: Vec<CounterVec> = {
        vec![
            JOB_HANDLED_COUNTER.clone(),
            STATE_CHANGE_COUNTER.clone(),
            REJECTED_COUNTER.clone(),
        ]
    };
    static ref INIT_RESULT: Mutex<Option<bool>> = Mutex::new(None);
}

pub fn add_job_handled_counter(pool: &str, outcome: &str) {
    JOB_HANDLED_COUNTER
        .with_label_values(&[&HOST_NAME, &PROCESS_NAME, &PID_STRING, pool, outcome])
        .inc();
}

pub fn add_state_change_counter(breaker: &str, from: &str, to: &str) {
    STATE_CHANGE_COUNTER
        .with_label_values(&[&HOST_NAME, &PROCESS_NAME, &PID_STRING, breaker, from, to])
        .inc();
}

pub fn add_rejected_counter(breaker: &str) {
    REJECTED_COUNTER
        .with_label_values(&[&HOST_NAME, &PROCESS_NAME, &PID_STRING, breaker])
        .inc();
}

fn register_metrics(registry: Option<Box<Registry>>) -> Result<()> {
    let r = match registry {
        Some(ref r) => r,
        None => default_registry(),
    };
    for item in &*COUNTER_METRICS {
        r.register(Box::new(item.clone()))?;
    }
    Ok(())
}

pub fn reset_metrics() {
    for item in &*COUNTER_METRICS {
        item.reset();
    }
}

/// Starts the metrics endpoint on the configured address, only the first call has effect.
pub fn init() -> Result<()> {
    let mut started = INIT_RESULT.lock().unwrap_or_else(PoisonError::into_inner);
    match *started {
        Some(true) => return Ok(()),
        Some(false) => return Err(Error::msg("metric exporter failed to start before")),
        None => {}
    }
    *started = Some(false);
    // currently, `prometheus_exporter` crate only support global registry
    register_metrics(None)?;
    let binding: SocketAddr = config::exporter_addr().parse()?;
    let metrics_path = config::exporter_metrics_path();
    let mut builder = Builder::new(binding);
    builder.with_endpoint(&metrics_path)?;
    builder.start()?;
    *started = Some(true);
    Ok(())
}
