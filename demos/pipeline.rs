use jobguard::pool::pipeline;

fn main() {
    let numbers = pipeline::source(1..=5i64, 2).unwrap();
    let squared = pipeline::stage(numbers, 2, |n| n * n).unwrap();
    let shifted = pipeline::stage(squared, 2, |n| n + 10).unwrap();
    for n in shifted {
        println!("{}", n);
    }
}
