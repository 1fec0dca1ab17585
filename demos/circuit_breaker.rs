use jobguard::circuitbreaker::{CallError, CircuitBreaker, Rule, State, StateChangeListener};
use jobguard::utils::{curr_time_millis, format_time_millis, sleep_for_ms};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct PrintListener {}

impl StateChangeListener for PrintListener {
    fn on_transform_to_closed(&self, prev: State, rule: Arc<Rule>) {
        println!(
            "rule.name: {}, state changed: {} -> Closed, time: {}",
            rule.name,
            prev,
            format_time_millis(curr_time_millis())
        );
    }

    fn on_transform_to_open(&self, prev: State, rule: Arc<Rule>, failures: u32) {
        println!(
            "rule.name: {}, state changed: {} -> Open, failures: {}, time: {}",
            rule.name,
            prev,
            failures,
            format_time_millis(curr_time_millis())
        );
    }

    fn on_transform_to_half_open(&self, prev: State, rule: Arc<Rule>) {
        println!(
            "rule.name: {}, state changed: {} -> HalfOpen, time: {}",
            rule.name,
            prev,
            format_time_millis(curr_time_millis())
        );
    }
}

fn main() {
    let rule = Arc::new(Rule::new("remote", 3, Duration::from_secs(1)));
    let breaker = CircuitBreaker::from_rule(rule).unwrap();
    breaker.register_state_change_listeners(vec![Arc::new(PrintListener {})]);

    // the remote service answers after its 5th call
    let calls = AtomicUsize::new(0);
    let remote = || {
        if calls.fetch_add(1, Ordering::SeqCst) < 5 {
            Err("remote unavailable")
        } else {
            Ok("ok")
        }
    };

    for round in 0..20 {
        match breaker.call(remote) {
            Ok(v) => println!("round {}: {}", round, v),
            Err(CallError::Open(open)) => println!("round {}: {}", round, open),
            Err(CallError::Failed(err)) => println!("round {}: failed, {}", round, err),
        }
        sleep_for_ms(300);
    }
}
