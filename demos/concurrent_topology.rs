//! Example: Concurrent Fan-out / Fan-in Topology
//!
//! This example splits a stream of job ids round-robin across several worker
//! lanes, transforms each lane independently, drops failed jobs with a filter
//! and merges the lanes back together. A tee keeps an audit copy of the input.
//!
//! Use case: When order doesn't matter
//! - Spreading CPU-bound work over several tasks
//! - Independent lanes that can progress at different speeds
//!
//! Note: The merged results are interleaved across lanes. Order within a lane
//! is preserved, order across lanes is not.
//!
//! Usage:
//!   cargo run --example concurrent_topology -- [jobs] [lanes]
//!
//! Worker start/finish events are logged to stderr at debug level, e.g.:
//!   cargo run --example concurrent_topology -- 40 4

use std::env;

use patterns::prelude::*;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let jobs: u64 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(20);
    let lanes: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(3);

    eprintln!("=== Concurrent Topology Example ===");
    eprintln!("Jobs: {}, lanes: {}", jobs, lanes);
    eprintln!();

    let combinators = Combinators::new().with_label("demo");

    // Keep an audit copy of every job id alongside the work stream
    let mut copies = combinators.tee(combinators.source(1..=jobs), 2);
    let audit = copies.pop().ok_or("tee returned no audit copy")?;
    let work = copies.pop().ok_or("tee returned no work copy")?;

    // Fan out: each lane gets every lanes-th job
    let lane_outlets = combinators.split(work, lanes)?;

    let processed: Vec<_> = lane_outlets
        .into_iter()
        .map(|lane| {
            let scored = combinators.transform(lane, |job| job * 10 + job % 7);
            // Jobs with a score ending in 3 "fail" and are dropped
            combinators.filter(scored, |score| score % 10 != 3)
        })
        .collect();

    // Fan in
    let merged = combinators.merge(processed);

    let (results, audited) = tokio::join!(merged.collect_all(), audit.collect_all());
    let results = results?;
    let audited = audited?;

    eprintln!("Topology: tee -> split({}) -> transform -> filter -> merge", lanes);
    eprintln!("  → {} jobs audited", audited.len());
    eprintln!("  → {} jobs completed", results.len());
    eprintln!("  → {} jobs dropped", audited.len() - results.len());
    eprintln!();

    for score in results {
        println!("{}", score);
    }

    Ok(())
}
