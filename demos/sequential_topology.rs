//! Example: Sequential Stream Topology
//!
//! This example chains several batches of records with concat(), so every
//! record of the first batch is emitted before any record of the second, and
//! normalises them with transform() and filter().
//!
//! Use case: When order matters
//! - A main batch, followed by corrections, then adjustments
//! - Historical data processed oldest to newest
//!
//! For comparison the same batches are also merged, where the interleaving is
//! decided by the scheduler.
//!
//! Usage:
//!   cargo run --example sequential_topology

use patterns::prelude::*;
use tracing::Level;

fn batches() -> Vec<Vec<String>> {
    vec![
        vec!["main:alpha".into(), "main:beta".into(), "main:gamma".into()],
        vec!["correction:beta".into(), "".into()],
        vec!["adjustment:alpha".into()],
    ]
}

#[tokio::main]
async fn main() -> Result<(), PatternError> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    eprintln!("=== Sequential Topology Example ===");

    let sources: Vec<_> = batches().into_iter().map(from_iter).collect();
    let chained = concat(sources);
    let cleaned = filter(chained, |record: &String| !record.is_empty());
    let normalised = transform(cleaned, |record| record.to_uppercase());

    eprintln!("Topology: concat -> filter -> transform");
    for record in normalised.collect_all().await? {
        println!("{}", record);
    }
    eprintln!();

    let sources: Vec<_> = batches().into_iter().map(from_iter).collect();
    let merged = merge(sources).collect_all().await?;

    eprintln!("Topology: merge (interleaving decided by the scheduler)");
    for record in merged.iter().filter(|r| !r.is_empty()) {
        println!("{}", record);
    }

    Ok(())
}
