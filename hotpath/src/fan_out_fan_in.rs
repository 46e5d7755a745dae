use patterns::prelude::*;
use tokio::runtime::Builder;

/// Fan-out / fan-in hotpath profiling
///
/// Profiles a split -> transform -> filter -> merge topology on a
/// multi-threaded runtime. Shows the cost of channel hand-offs and task
/// coordination relative to the per-element work.
///
/// Run with: cargo run --release --bin hotpath_fan_out_fan_in --features profiling
#[hotpath::main]
fn main() {
    println!("=== Fan-out / Fan-in Hotpath Profile ===");
    println!("Workload: 1M elements, split across 8 lanes, merged back");
    println!("Configuration: 8 worker threads, channel capacity 64");
    println!();

    let runtime = Builder::new_multi_thread()
        .worker_threads(8)
        .enable_all()
        .build()
        .unwrap();

    println!("Starting profiled execution...");
    println!();

    let (kept, total) = runtime.block_on(async { run_topology(1_000_000, 8).await });

    println!();
    println!("Kept {} of {} elements", kept, total);
    println!("Profiling complete. Results above show function-level breakdown including coordination overhead.");
}

#[hotpath::measure]
async fn run_topology(total: u64, lanes: usize) -> (usize, u64) {
    let combinators = Combinators::new().with_capacity(64).with_label("hotpath");

    let split = combinators
        .split(combinators.source(0..total), lanes)
        .unwrap();

    let worked: Vec<_> = split
        .into_iter()
        .map(|lane| {
            let mixed = combinators.transform(lane, mix);
            combinators.filter(mixed, |x| x % 3 != 0)
        })
        .collect();

    let kept = drain(combinators.merge(worked)).await;
    (kept, total)
}

#[hotpath::measure]
fn mix(x: u64) -> u64 {
    x.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}

#[hotpath::measure]
async fn drain(mut outlet: Outlet<u64>) -> usize {
    let mut count = 0;
    while outlet.recv().await.is_some() {
        count += 1;
    }
    count
}
