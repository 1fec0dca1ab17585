use jobguard::pool::{bounded, Aggregator, Dispatcher, WorkerPool};
use jobguard::utils::sleep_for_ms;
use jobguard::{init_default, logging};
use std::thread;

fn main() {
    init_default().unwrap_or_else(|err| logging::error!("{:?}", err));

    let (job_tx, job_rx) = bounded(20);
    let (res_tx, res_rx) = bounded(20);
    let pool = WorkerPool::new("squares", 3).unwrap();
    let handle = pool
        .start(job_rx, res_tx, |x: i64| {
            sleep_for_ms(100);
            Ok(x * x)
        })
        .unwrap();

    let producer = thread::spawn(move || {
        let mut dispatcher = Dispatcher::new(job_tx);
        dispatcher.dispatch_count(9).unwrap();
        dispatcher.close();
    });

    let summary = Aggregator::new(res_rx).sum();
    producer.join().unwrap();
    let report = handle.wait().unwrap();
    println!(
        "sum of squares: {}, {} jobs on {} workers ({:?})",
        summary.value,
        summary.completed,
        pool.size(),
        report.handled
    );
}
