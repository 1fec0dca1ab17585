use jobguard::{breaker_from_config, config, init_with_config_file, logging, BatchBuilder};

fn main() {
    let mut path = String::from("testdata/config/jobguard.yaml");
    init_with_config_file(&mut path).unwrap_or_else(|err| logging::error!("{:?}", err));
    println!("effective config: {}", config::global_config_entity());

    let breaker = breaker_from_config("squares").unwrap();
    let summary = BatchBuilder::new("configured")
        .fold(1..=9i64, |x| Ok(x * x), 0, |acc, v| acc + v)
        .unwrap();
    logging::warn!(
        "sum {} over {} completed jobs, breaker {} is {}",
        summary.value,
        summary.completed,
        breaker.name(),
        breaker.current_state()
    );
}
