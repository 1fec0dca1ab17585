use jobguard::circuitbreaker::{CallError, CircuitBreaker, Rule, State};
use jobguard::utils::sleep_for_ms;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn flaky_service() {
    // the service fails its first 5 invocations, then recovers
    let invoked = AtomicUsize::new(0);
    let service = || {
        if invoked.fetch_add(1, Ordering::SeqCst) < 5 {
            Err("service unavailable")
        } else {
            Ok("pong")
        }
    };
    let breaker = CircuitBreaker::new(3, Duration::from_millis(150)).unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..8 {
        outcomes.push(match breaker.call(service) {
            Ok(_) => "ok",
            Err(CallError::Failed(_)) => "failed",
            Err(CallError::Open(_)) => "open",
        });
        sleep_for_ms(5);
    }
    assert_eq!(
        outcomes,
        vec!["failed", "failed", "failed", "open", "open", "open", "open", "open"]
    );
    assert_eq!(invoked.load(Ordering::SeqCst), 3);

    // two failed probes, then the service is back
    for _ in 0..2 {
        sleep_for_ms(250);
        assert!(breaker.call(service).unwrap_err().is_failed());
        assert_eq!(breaker.current_state(), State::Open);
        assert!(breaker.call(service).unwrap_err().is_open());
    }
    sleep_for_ms(250);
    assert_eq!(breaker.call(service).unwrap(), "pong");
    assert_eq!(breaker.current_state(), State::Closed);
    assert_eq!(breaker.failure_count(), 0);
    assert_eq!(invoked.load(Ordering::SeqCst), 6);
}

#[test]
fn shared_between_threads() {
    let rule = Arc::new(Rule::new("shared", 5, Duration::from_secs(60)));
    let breaker = Arc::new(CircuitBreaker::from_rule(rule).unwrap());
    let invoked = Arc::new(AtomicUsize::new(0));
    let mut handlers = Vec::new();
    for _ in 0..16 {
        let breaker = Arc::clone(&breaker);
        let invoked = Arc::clone(&invoked);
        handlers.push(std::thread::spawn(move || {
            for _ in 0..10 {
                let res = breaker.call(|| -> Result<(), String> {
                    invoked.fetch_add(1, Ordering::SeqCst);
                    Err("down".into())
                });
                assert!(res.is_err());
            }
        }));
    }
    for h in handlers {
        h.join().expect("Couldn't join on the associated thread");
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 5);
    assert_eq!(breaker.failure_count(), 5);
    assert_eq!(breaker.current_state(), State::Open);
}

#[test]
fn rejection_is_an_error_type() {
    let breaker = CircuitBreaker::new(1, Duration::from_secs(60)).unwrap();
    let failed = breaker
        .call(|| -> Result<(), std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "io"))
        })
        .unwrap_err();
    let open = breaker
        .call(|| -> Result<(), std::io::Error> { Ok(()) })
        .unwrap_err();
    // both convert into the crate-wide error, only the rejection downcasts to CallError::Open
    let failed: jobguard::Error = failed.into();
    let open: jobguard::Error = open.into();
    assert!(matches!(
        failed.downcast_ref::<CallError<std::io::Error>>(),
        Some(CallError::Failed(_))
    ));
    assert!(matches!(
        open.downcast_ref::<CallError<std::io::Error>>(),
        Some(CallError::Open(_))
    ));
}
