use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::config::Combinators;
use super::stage::{Stage, carry_forward, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};

impl Combinators {
    /// Keep the elements for which `predicate` holds, in original order
    ///
    /// Rejected elements are dropped silently. A panicking predicate is
    /// handled like a panicking [`Combinators::transform`] action: the fault is
    /// recorded, the outlet closes and the input is abandoned. A fault recorded
    /// on an input [`Outlet`] is carried forward to the returned outlet.
    pub fn filter<S, T, P>(&self, input: S, mut predicate: P) -> Outlet<T>
    where
        S: Stream<Item = T> + Send + 'static,
        T: Send + 'static,
        P: FnMut(&T) -> bool + Send + 'static,
    {
        let fault = FaultSlot::new();
        let (tx, outlet) = bounded(self.capacity(), fault.clone());
        let upstream = FaultSlot::upstream_of::<S, T>(&input);

        self.spawn(Stage::Filter, async move {
            let mut input = Box::pin(input);
            let mut kept = 0usize;
            let mut dropped = 0usize;

            guarded(Stage::Filter, &fault, async {
                while let Some(value) = input.next().await {
                    if !predicate(&value) {
                        dropped += 1;
                        continue;
                    }

                    if tx.send(value).await.is_err() {
                        debug!(kept, dropped, "Filter output detached, abandoning input");
                        return;
                    }
                    kept += 1;
                    trace!(kept, "Filter forwarded element");
                }
                debug!(kept, dropped, "Filter input drained");
            })
            .await;

            carry_forward(Stage::Filter, upstream.as_ref(), &fault);
            drop(tx);
        });

        outlet
    }
}

/// Filter an input stream on the ambient runtime with default configuration
///
/// See [`Combinators::filter`].
pub fn filter<S, T, P>(input: S, predicate: P) -> Outlet<T>
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
    P: FnMut(&T) -> bool + Send + 'static,
{
    Combinators::default().filter(input, predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::transform;
    use crate::error::PatternError;
    use futures::stream;

    #[tokio::test]
    async fn keeps_matching_elements_in_order() {
        let outlet = filter(stream::iter(1..=10), |x| x % 3 == 0);
        assert_eq!(outlet.collect_all().await, Ok(vec![3, 6, 9]));
    }

    #[tokio::test]
    async fn always_true_is_identity() {
        let input = vec!["x", "y", "z", "y"];
        let outlet = filter(stream::iter(input.clone()), |_| true);
        assert_eq!(outlet.collect_all().await, Ok(input));
    }

    #[tokio::test]
    async fn always_false_yields_empty_closed_stream() {
        let mut outlet = filter(stream::iter(0..100), |_| false);
        assert_eq!(outlet.recv().await, None);
        assert!(outlet.is_closed());
        assert_eq!(outlet.recv().await, None);
        assert!(outlet.fault().is_none());
    }

    #[tokio::test]
    async fn panicking_predicate_closes_output_with_fault() {
        let mut outlet = filter(stream::iter(vec![2, 4, 5, 6]), |x| {
            assert!(x % 2 == 0, "odd value {x}");
            true
        });

        assert_eq!(outlet.recv().await, Some(2));
        assert_eq!(outlet.recv().await, Some(4));
        assert_eq!(outlet.recv().await, None);

        let fault = outlet.fault().cloned().unwrap();
        assert_eq!(fault.to_string(), "filter worker faulted: odd value 5");
    }

    #[tokio::test]
    async fn upstream_fault_survives_rejecting_everything() {
        let broken = transform(stream::iter(vec![1, 2, 3]), |x: i32| -> i32 {
            assert!(x < 3, "overflowed at {x}");
            x
        });
        let outlet = filter(broken, |_| false);

        let err = outlet.collect_all().await.unwrap_err();
        assert_eq!(err.to_string(), "transform worker faulted: overflowed at 3");
    }
}
