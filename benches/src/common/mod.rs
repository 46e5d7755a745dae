#![allow(dead_code)]

use patterns::prelude::*;

/// Generate `num_sources` disjoint datasets of `per_source` sequence numbers
///
/// Source `s` yields `s * per_source .. (s + 1) * per_source`, so the union of
/// all sources is a contiguous range that is easy to verify.
pub fn generate_sources(num_sources: usize, per_source: usize) -> Vec<Vec<u64>> {
    (0..num_sources)
        .map(|source| {
            let start = (source * per_source) as u64;
            (start..start + per_source as u64).collect()
        })
        .collect()
}

/// Drain every outlet concurrently and return the total element count
pub async fn drain_count<T>(outlets: Vec<Outlet<T>>) -> usize {
    let counts = futures::future::join_all(outlets.into_iter().map(|outlet| async move {
        outlet.collect_all().await.map(|items| items.len()).unwrap_or(0)
    }))
    .await;

    counts.into_iter().sum()
}
