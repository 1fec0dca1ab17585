use jobguard::config;
use jobguard::{breaker_from_config, init_with_config, init_with_config_file, BatchBuilder};

#[test]
fn yaml_then_env_then_entity() {
    let mut path = String::from("testdata/config/jobguard.yaml");
    init_with_config_file(&mut path).unwrap();
    assert_eq!(config::app_name(), "jobguard_test");
    assert_eq!(config::worker_count(), 4);
    assert_eq!(config::queue_capacity(), 8);
    assert_eq!(config::breaker_threshold(), 2);
    assert_eq!(config::breaker_retry_timeout_ms(), 500);

    let breaker = breaker_from_config("db").unwrap();
    assert_eq!(breaker.bound_rule().threshold, 2);
    assert_eq!(breaker.name(), "db");

    let output = BatchBuilder::new("configured")
        .run(1..=9i64, |x| Ok(x * x))
        .unwrap();
    assert_eq!(output.report.handled.len(), 4);

    // env overrides the yaml file
    std::env::set_var("JOBGUARD_WORKER_COUNT", "6");
    let mut path = String::from("testdata/config/jobguard.yaml");
    init_with_config_file(&mut path).unwrap();
    assert_eq!(config::worker_count(), 6);

    // a rejected env override keeps the previous config in place
    let before = config::global_config_entity();
    std::env::set_var("JOBGUARD_WORKER_COUNT", "0");
    let mut path = String::from("testdata/config/jobguard.yaml");
    assert!(init_with_config_file(&mut path).is_err());
    assert!(init_with_config(config::ConfigEntity::new()).is_err());
    assert_eq!(config::global_config_entity(), before);
    assert_eq!(config::worker_count(), 6);
    std::env::remove_var("JOBGUARD_WORKER_COUNT");

    let mut path = String::from("testdata/config/missing.yaml");
    assert!(init_with_config_file(&mut path).is_err());

    let mut entity = config::ConfigEntity::new();
    entity.config.pool.queue_capacity = 0;
    assert!(init_with_config(entity).is_err());

    init_with_config(config::ConfigEntity::new()).unwrap();
    assert_eq!(config::worker_count(), config::DEFAULT_WORKER_COUNT);
    assert_eq!(config::app_name(), config::DEFAULT_APP_NAME);
}
